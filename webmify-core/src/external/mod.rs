// ============================================================================
// webmify-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with ffmpeg and ffprobe
//
// This module encapsulates every interaction with the external transcoder
// and prober binaries. Both sit behind traits (TranscoderSpawner,
// MediaProber) so the engine can be driven by the scripted doubles in
// `mocks` instead of real processes.
//
// KEY COMPONENTS:
// - Command building for the target format
// - Process spawning through ffmpeg-sidecar
// - Duration and stream probing through ffprobe
// - Pre-flight dependency checks

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult, command_start_error};

// ---- Standard library imports ----
use std::io;
use std::process::{Command, Stdio};

// ============================================================================
// SUBMODULES
// ============================================================================

/// Contains ffmpeg argument building and the target-format constants
pub mod ffmpeg;

/// Contains traits and implementations for running ffmpeg processes
pub mod ffmpeg_executor;

/// Contains the prober gateway
pub mod ffprobe_executor;

/// Scripted test doubles for the spawner, prober and prompt seams
#[cfg(any(test, feature = "test-mocks"))]
pub mod mocks;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use ffmpeg::{EncodeParams, build_ffmpeg_command, build_transcode_args};
pub use ffmpeg_executor::{SidecarProcess, SidecarSpawner, TranscodeProcess, TranscoderSpawner};
pub use ffprobe_executor::{FfprobeProber, MediaProber, StreamInfo, is_compliant};

// ============================================================================
// DEPENDENCY CHECKING
// ============================================================================

/// Binaries that must be runnable before any work starts.
pub const REQUIRED_BINARIES: &[&str] = &["ffmpeg", "ffprobe"];

/// Checks that a required external command runs and exits successfully
/// when asked for `-version`.
///
/// # Returns
///
/// * `Ok(())` - The command ran and reported success
/// * `Err(CoreError::DependencyNotFound)` - The command is not on `PATH`
/// * `Err(CoreError::DependencyFailed)` - The command ran but exited nonzero
/// * `Err(CoreError::CommandStart)` - The command exists but could not start
pub fn check_dependency(cmd_name: &str) -> CoreResult<()> {
    let result = Command::new(cmd_name)
        .arg("-version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(status) if status.success() => {
            log::debug!("Found dependency: {}", cmd_name);
            Ok(())
        }
        Ok(status) => {
            log::warn!("Dependency '{}' exited with {}", cmd_name, status);
            Err(CoreError::DependencyFailed(cmd_name.to_string()))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::debug!("Dependency '{}' not found.", cmd_name);
            Err(CoreError::DependencyNotFound(cmd_name.to_string()))
        }
        Err(e) => Err(command_start_error(cmd_name, e)),
    }
}

/// Runs [`check_dependency`] for every binary in [`REQUIRED_BINARIES`],
/// stopping at the first failure.
pub fn ensure_dependencies() -> CoreResult<()> {
    REQUIRED_BINARIES.iter().try_for_each(|cmd| check_dependency(cmd))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_binary_is_reported_by_name() {
        let err = check_dependency("webmify-no-such-binary-for-tests").unwrap_err();
        match err {
            CoreError::DependencyNotFound(name) => {
                assert_eq!(name, "webmify-no-such-binary-for-tests")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
