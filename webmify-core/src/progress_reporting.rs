//! Live progress reporting API
//!
//! The core library never draws to the terminal. Workers hand progress
//! checkpoints to a [`ProgressReporter`] supplied by the caller; the CLI
//! renders them as a progress bar. When several workers run at once no
//! reporter is used at all and only start/finish lines are logged.

pub mod ffmpeg_handler;

pub use ffmpeg_handler::{ProgressEvent, ProgressParser, ProgressSample};

/// Receives live progress for the task currently being transcoded.
pub trait ProgressReporter: Send + Sync {
    /// A transcode started. `label` identifies the task in output.
    fn task_started(&self, label: &str);

    /// A progress checkpoint was parsed.
    fn task_progress(&self, label: &str, sample: &ProgressSample);

    /// The transcode exited, successfully or not. Clear any live display.
    fn task_finished(&self, label: &str);
}

/// Reporter that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl ProgressReporter for NullReporter {
    fn task_started(&self, _label: &str) {}
    fn task_progress(&self, _label: &str, _sample: &ProgressSample) {}
    fn task_finished(&self, _label: &str) {}
}
