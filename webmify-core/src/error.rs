// ============================================================================
// webmify-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Error Types for the Webmify Core Library
//
// This module defines the error type shared by every part of the engine.
// Only pre-flight errors (root path, missing binaries, thread pool setup)
// escape `process_videos`; per-task errors are turned into summary counts
// inside the worker pool.
//
// KEY COMPONENTS:
// - CoreError: enum of every failure the engine can report
// - CoreResult: result alias used throughout the crate
// - Helper constructors for subprocess start/wait failures

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the webmify core library.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Path error: {0}")]
    PathError(String),

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("{0} is required but was not found in PATH. Install it and try again.")]
    DependencyNotFound(String),

    #[error("{0} was found but `{0} -version` did not succeed")]
    DependencyFailed(String),

    #[error("Failed to start {0}: {1}")]
    CommandStart(String, io::Error),

    #[error("Failed waiting for {0}: {1}")]
    CommandWait(String, io::Error),

    #[error("Transcode failed: {0}")]
    TranscodeFailed(String),

    #[error("Failed to build thread pool: {0}")]
    ThreadPool(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("{0}")]
    OperationFailed(String),
}

/// Result alias used across the core library.
pub type CoreResult<T> = Result<T, CoreError>;

/// Builds a [`CoreError::CommandStart`] for the named command.
pub fn command_start_error(cmd: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandStart(cmd.into(), err)
}

/// Builds a [`CoreError::CommandWait`] for the named command.
pub fn command_wait_error(cmd: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandWait(cmd.into(), err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dependency_message_is_actionable() {
        let err = CoreError::DependencyNotFound("ffmpeg".to_string());
        assert_eq!(
            err.to_string(),
            "ffmpeg is required but was not found in PATH. Install it and try again."
        );
    }

    #[test]
    fn not_a_directory_shows_path() {
        let err = CoreError::NotADirectory(PathBuf::from("/nope/here"));
        assert_eq!(err.to_string(), "Not a directory: /nope/here");
    }

    #[test]
    fn io_errors_convert() {
        let err: CoreError = io::Error::new(io::ErrorKind::PermissionDenied, "denied").into();
        assert!(matches!(err, CoreError::Io(_)));
    }
}
