//! Orchestration engine for batch transcoding video folders to 720p WebM.
//!
//! The engine discovers video files, probes them concurrently, resolves
//! conflicts with outputs that already exist, and runs a bounded pool of
//! ffmpeg processes, counting every task's outcome.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use webmify_core::config::CoreConfigBuilder;
//! use webmify_core::external::{FfprobeProber, SidecarSpawner};
//! use webmify_core::processing::prompt::StdinPrompter;
//! use webmify_core::progress_reporting::NullReporter;
//! use webmify_core::{find_processable_files, process_videos};
//! use std::path::Path;
//!
//! let config = CoreConfigBuilder::new().skip_compliant(true).build();
//! let files = find_processable_files(Path::new("/path/to/videos")).unwrap();
//! let mut prompter = StdinPrompter::stdin(config.prompt_timeout);
//!
//! let report = process_videos(
//!     &SidecarSpawner,
//!     &FfprobeProber,
//!     &mut prompter,
//!     &NullReporter,
//!     &config,
//!     &files,
//! )
//! .unwrap();
//! println!("{}", report.counts);
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod external;
pub mod hardware_decode;
pub mod processing;
pub mod progress_reporting;
pub mod reporting;
pub mod utils;

// Re-exports for public API
pub use config::{CoreConfig, CoreConfigBuilder, ExistingOutputPolicy};
pub use discovery::{find_processable_files, output_path_for};
pub use error::{CoreError, CoreResult};
pub use external::ensure_dependencies;
pub use processing::decision::{OverwriteMode, PromptAnswer, Prompter};
pub use processing::planner::Task;
pub use processing::process_videos;
pub use progress_reporting::{ProgressReporter, ProgressSample};
pub use reporting::{RunReport, SummaryCounts, TaskOutcome, TaskRecord};
pub use utils::{format_bytes, format_duration, format_eta, parse_ffmpeg_time};
