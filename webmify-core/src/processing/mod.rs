// ============================================================================
// webmify-core/src/processing/mod.rs
// ============================================================================
//
// PROCESSING: Run Orchestration
//
// A run has three strictly separated phases:
//   1. planning: probe every file (bounded fan-out) and sort longest first
//   2. deciding: one sequential pass resolving existing-output conflicts
//   3. executing: the worker pool transcodes the runnable tasks
// Phase 2 owns the prompt and the overwrite mode, and finishes before any
// transcoder starts.

pub mod decision;
pub mod planner;
pub mod prompt;
pub mod transcode;
pub mod worker_pool;

use crate::config::CoreConfig;
use crate::error::CoreResult;
use crate::external::{MediaProber, TranscoderSpawner};
use crate::progress_reporting::ProgressReporter;
use crate::reporting::{RunReport, RunSummary, TaskOutcome, TaskRecord};

use decision::{OverwriteMode, Prompter, resolve_conflicts};
use planner::plan_tasks;
use worker_pool::{PoolContext, resolve_parallelism, run_workers};

use std::path::PathBuf;

/// Processes the discovered files end to end.
///
/// Per-task failures never surface as errors: they are counted in the
/// returned report. The `Err` cases are an invalid configuration and a
/// probe thread pool that cannot be built.
///
/// `reporter` only receives progress when the pool runs a single worker.
pub fn process_videos<S, P>(
    spawner: &S,
    prober: &P,
    prompter: &mut dyn Prompter,
    reporter: &dyn ProgressReporter,
    config: &CoreConfig,
    files: &[PathBuf],
) -> CoreResult<RunReport>
where
    S: TranscoderSpawner,
    P: MediaProber,
{
    config.validate()?;

    let tasks = plan_tasks(files, prober, config.skip_compliant)?;

    let resolution = resolve_conflicts(
        tasks,
        config.skip_compliant,
        OverwriteMode::from(config.overwrite_policy),
        prompter,
    );

    let summary = RunSummary::new();
    let mut records: Vec<TaskRecord> = resolution
        .skipped
        .into_iter()
        .map(|(task, reason)| {
            summary.record(TaskOutcome::Skipped);
            TaskRecord {
                source_path: task.source_path,
                output_path: task.output_path,
                outcome: TaskOutcome::Skipped,
                detail: Some(reason.to_string()),
            }
        })
        .collect();

    let parallelism = resolve_parallelism(
        num_cpus::get(),
        config.concurrency,
        config.threads_per_job,
    );
    log::info!(
        "Workers: {}  Threads/job: {}",
        parallelism.workers,
        parallelism.threads_per_job
    );

    let ctx = PoolContext {
        spawner,
        parallelism,
        hw_decode: config.hw_decode,
        reporter: (parallelism.workers == 1).then_some(reporter),
        summary: &summary,
    };
    records.extend(run_workers(&resolution.runnable, &ctx));

    Ok(RunReport {
        counts: summary.snapshot(),
        records,
        quit: resolution.quit,
        abandoned: resolution.abandoned.len(),
    })
}
