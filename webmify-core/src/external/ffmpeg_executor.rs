// ============================================================================
// webmify-core/src/external/ffmpeg_executor.rs
// ============================================================================
//
// FFMPEG EXECUTOR: FFmpeg Process Management and Abstraction
//
// This module provides the seam between the transcoder supervisor and real
// ffmpeg processes. The supervisor only needs two byte streams (progress on
// stdout, diagnostics on stderr) and an exit status, so that is all the
// process trait exposes.
//
// KEY COMPONENTS:
// - TranscodeProcess: Trait representing a running transcoder
// - TranscoderSpawner: Trait for starting transcoder processes
// - SidecarSpawner: Concrete implementation using ffmpeg-sidecar

use crate::error::{CoreResult, command_start_error, command_wait_error};

use ffmpeg_sidecar::child::FfmpegChild;
use ffmpeg_sidecar::command::FfmpegCommand;

use std::io::Read;
use std::process::ExitStatus;

/// Trait representing an active transcoder process.
pub trait TranscodeProcess {
    /// Takes the line-oriented progress stream. Returns `None` once taken.
    fn take_progress_stream(&mut self) -> Option<Box<dyn Read + Send>>;

    /// Takes the diagnostic (stderr) stream. Returns `None` once taken.
    fn take_diagnostic_stream(&mut self) -> Option<Box<dyn Read + Send>>;

    /// Waits for the process to exit.
    fn wait(&mut self) -> CoreResult<ExitStatus>;
}

/// Trait representing something that can start a transcoder process.
///
/// Spawners are shared by every worker in the pool.
pub trait TranscoderSpawner: Sync {
    type Process: TranscodeProcess;

    /// Spawns the command, consuming it.
    fn spawn(&self, cmd: FfmpegCommand) -> CoreResult<Self::Process>;
}

/// Wrapper around `ffmpeg_sidecar::child::FfmpegChild`.
pub struct SidecarProcess(FfmpegChild);

impl TranscodeProcess for SidecarProcess {
    fn take_progress_stream(&mut self) -> Option<Box<dyn Read + Send>> {
        self.0
            .take_stdout()
            .map(|out| Box::new(out) as Box<dyn Read + Send>)
    }

    fn take_diagnostic_stream(&mut self) -> Option<Box<dyn Read + Send>> {
        self.0
            .take_stderr()
            .map(|err| Box::new(err) as Box<dyn Read + Send>)
    }

    fn wait(&mut self) -> CoreResult<ExitStatus> {
        self.0.wait().map_err(|e| command_wait_error("ffmpeg", e))
    }
}

/// Concrete implementation of `TranscoderSpawner` using `ffmpeg-sidecar`.
#[derive(Debug, Clone, Default)]
pub struct SidecarSpawner;

impl TranscoderSpawner for SidecarSpawner {
    type Process = SidecarProcess;

    fn spawn(&self, mut cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        log::debug!("Spawning ffmpeg: {:?}", cmd);
        cmd.spawn()
            .map(SidecarProcess)
            .map_err(|e| command_start_error("ffmpeg", e))
    }
}
