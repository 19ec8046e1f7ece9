// ============================================================================
// webmify-core/src/processing/worker_pool.rs
// ============================================================================
//
// WORKER POOL: Bounded Parallel Execution of Runnable Tasks
//
// Exactly `workers` scoped threads share one atomic cursor over the
// runnable list. Each claim is a single fetch_add, so every index is owned
// by exactly one worker. A failing task is recorded and logged; the worker
// moves on to its next claim.

use crate::external::{EncodeParams, TranscoderSpawner};
use crate::processing::planner::Task;
use crate::processing::transcode::run_transcode;
use crate::progress_reporting::ProgressReporter;
use crate::reporting::{RunSummary, TaskOutcome, TaskRecord};
use crate::utils::{format_bytes, format_duration, size_ratio_percent};

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Instant;

/// Worker count and per-job encoder threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parallelism {
    pub workers: usize,
    pub threads_per_job: usize,
}

/// Derives the pool shape from the logical processor count.
///
/// Workers default to a quarter of the processors, threads per job to an
/// even share of the processors; both are at least 1.
pub fn resolve_parallelism(
    cores: usize,
    concurrency: Option<usize>,
    threads: Option<usize>,
) -> Parallelism {
    let cores = cores.max(1);
    let workers = concurrency.unwrap_or(cores / 4).max(1);
    let threads_per_job = threads.unwrap_or(cores / workers).max(1);
    Parallelism {
        workers,
        threads_per_job,
    }
}

/// Shared, read-only inputs of every worker.
pub struct PoolContext<'a, S: TranscoderSpawner> {
    pub spawner: &'a S,
    pub parallelism: Parallelism,
    pub hw_decode: bool,
    /// Live progress sink; `None` suppresses progress rendering
    pub reporter: Option<&'a dyn ProgressReporter>,
    pub summary: &'a RunSummary,
}

/// Runs every task and returns their records in claim order.
pub fn run_workers<S: TranscoderSpawner>(
    runnable: &[Task],
    ctx: &PoolContext<'_, S>,
) -> Vec<TaskRecord> {
    if runnable.is_empty() {
        return Vec::new();
    }

    let cursor = AtomicUsize::new(0);
    let mut claimed: Vec<(usize, TaskRecord)> = thread::scope(|scope| {
        let handles: Vec<_> = (0..ctx.parallelism.workers)
            .map(|worker_id| {
                let cursor = &cursor;
                scope.spawn(move || worker_loop(worker_id, runnable, cursor, ctx))
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|handle| match handle.join() {
                Ok(records) => records,
                Err(_) => {
                    log::error!("A worker thread panicked; its remaining claims were lost");
                    Vec::new()
                }
            })
            .collect()
    });

    claimed.sort_by_key(|(index, _)| *index);
    claimed.into_iter().map(|(_, record)| record).collect()
}

fn worker_loop<S: TranscoderSpawner>(
    worker_id: usize,
    runnable: &[Task],
    cursor: &AtomicUsize,
    ctx: &PoolContext<'_, S>,
) -> Vec<(usize, TaskRecord)> {
    let mut records = Vec::new();
    loop {
        let index = cursor.fetch_add(1, Ordering::SeqCst);
        let Some(task) = runnable.get(index) else {
            log::debug!("Worker {} found no more tasks", worker_id);
            return records;
        };
        let prefix = format!("[{}/{}]", index + 1, runnable.len());
        let record = run_one(task, &prefix, ctx);
        ctx.summary.record(record.outcome);
        records.push((index, record));
    }
}

fn run_one<S: TranscoderSpawner>(
    task: &Task,
    prefix: &str,
    ctx: &PoolContext<'_, S>,
) -> TaskRecord {
    log::info!("{} Converting: {}", prefix, task.source_path.display());
    let label = format!(
        "{} {} -> {}",
        prefix,
        file_name(&task.source_path),
        file_name(&task.output_path)
    );

    let params = EncodeParams {
        input_path: task.source_path.clone(),
        output_path: task.output_path.clone(),
        threads: ctx.parallelism.threads_per_job,
        use_hw_decode: ctx.hw_decode,
    };

    if let Some(reporter) = ctx.reporter {
        reporter.task_started(&label);
    }
    let started = Instant::now();
    let result = run_transcode(ctx.spawner, &params, task.duration_secs, |sample| {
        if let Some(reporter) = ctx.reporter {
            reporter.task_progress(&label, sample);
        }
    });
    if let Some(reporter) = ctx.reporter {
        reporter.task_finished(&label);
    }

    match result {
        Ok(()) => {
            log_size_ratio(task, prefix, started.elapsed().as_secs_f64());
            let outcome = if task.output_already_exists {
                TaskOutcome::Overwritten
            } else {
                TaskOutcome::Converted
            };
            TaskRecord {
                source_path: task.source_path.clone(),
                output_path: task.output_path.clone(),
                outcome,
                detail: None,
            }
        }
        Err(e) => {
            log::error!("{} Failed: {}: {}", prefix, task.source_path.display(), e);
            TaskRecord {
                source_path: task.source_path.clone(),
                output_path: task.output_path.clone(),
                outcome: TaskOutcome::Failed,
                detail: Some(e.to_string()),
            }
        }
    }
}

fn log_size_ratio(task: &Task, prefix: &str, elapsed_secs: f64) {
    let sizes = fs::metadata(&task.source_path)
        .and_then(|input| fs::metadata(&task.output_path).map(|output| (input.len(), output.len())));
    match sizes {
        Ok((input, output)) => log::info!(
            "{} Done in {}: {} ({} / {}, {:.1}%)",
            prefix,
            format_duration(elapsed_secs),
            task.output_path.display(),
            format_bytes(output),
            format_bytes(input),
            size_ratio_percent(input, output)
        ),
        Err(e) => log::info!(
            "{} Done in {}: {} (size unavailable: {})",
            prefix,
            format_duration(elapsed_secs),
            task.output_path.display(),
            e
        ),
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
