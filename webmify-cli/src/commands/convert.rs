//! Implementation of the folder conversion command.
//!
//! Runs the pre-flight checks (folder, then ffmpeg/ffprobe), discovers the
//! video files and hands them to `webmify_core::process_videos` with the
//! production prober, transcoder, stdin prompt and terminal progress bar.

use crate::cli::Cli;
use crate::error::{CliErrorContext, CliResult};
use crate::terminal::{TerminalReporter, print_summary};

use webmify_core::external::{FfprobeProber, SidecarSpawner};
use webmify_core::processing::prompt::StdinPrompter;
use webmify_core::{
    CoreConfig, CoreConfigBuilder, CoreError, ExistingOutputPolicy, RunReport,
    ensure_dependencies, find_processable_files, process_videos,
};

use log::{debug, info, warn};

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Checks that `folder` exists and is a directory, returning its canonical form.
pub fn validate_folder(folder: &Path) -> CliResult<PathBuf> {
    match fs::metadata(folder) {
        Ok(metadata) if metadata.is_dir() => {
            Ok(folder.canonicalize().unwrap_or_else(|_| folder.to_path_buf()))
        }
        Ok(_) => Err(CoreError::NotADirectory(folder.to_path_buf())),
        Err(e) => {
            debug!("Cannot stat {}: {}", folder.display(), e);
            Err(CoreError::NotADirectory(folder.to_path_buf()))
        }
    }
}

/// Maps the parsed flags onto the engine configuration.
pub fn build_core_config(args: &Cli) -> CoreConfig {
    let policy = match (args.overwrite, args.skip_existing) {
        (true, true) => {
            warn!("Both --overwrite and --skip-existing given; overwriting");
            ExistingOutputPolicy::Overwrite
        }
        (true, false) => ExistingOutputPolicy::Overwrite,
        (false, true) => ExistingOutputPolicy::Skip,
        (false, false) => ExistingOutputPolicy::Ask,
    };

    let mut builder = CoreConfigBuilder::new()
        .overwrite_policy(policy)
        .skip_compliant(args.skip_compliant)
        .hw_decode(args.hwdecode);
    if let Some(workers) = args.concurrency {
        builder = builder.concurrency(workers);
    }
    if let Some(threads) = args.threads {
        builder = builder.threads_per_job(threads);
    }
    if let Some(secs) = args.prompt_timeout {
        builder = builder.prompt_timeout(Duration::from_secs(secs));
    }
    builder.build()
}

/// Converts every video under `folder`.
///
/// Returns `Ok(None)` when the folder holds no video files. Errors are the
/// pre-flight failures; per-file failures are counted in the report.
pub fn run_convert(args: &Cli, folder: &Path) -> CliResult<Option<RunReport>> {
    let total_start_time = Instant::now();

    let root = validate_folder(folder)?;
    ensure_dependencies()?;

    let files = find_processable_files(&root)
        .cli_with_context(|| format!("Failed to scan {}", root.display()))?;
    if files.is_empty() {
        println!("No video files found.");
        return Ok(None);
    }
    info!("Found {} video file(s)", files.len());

    let config = build_core_config(args);
    debug!("Configuration: {:?}", config);

    let mut prompter = StdinPrompter::stdin(config.prompt_timeout);
    let reporter = TerminalReporter::new();

    let report = process_videos(
        &SidecarSpawner,
        &FfprobeProber,
        &mut prompter,
        &reporter,
        &config,
        &files,
    )?;

    print_summary(&report, total_start_time.elapsed());
    Ok(Some(report))
}
