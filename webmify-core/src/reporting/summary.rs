//! Summary aggregation
//!
//! Outcome counters shared by the decision pass and the worker pool, plus
//! the per-task records returned to the caller.

use std::fmt;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Terminal state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    /// Transcoded to a path that did not exist before
    Converted,
    /// Transcoded over an existing output
    Overwritten,
    /// Not transcoded: compliant source or existing output kept
    Skipped,
    /// Transcoder failed to start or exited nonzero
    Failed,
}

/// One task that reached a terminal state.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskRecord {
    pub source_path: PathBuf,
    pub output_path: PathBuf,
    pub outcome: TaskOutcome,
    /// Skip reason or failure detail
    pub detail: Option<String>,
}

/// Live outcome counters.
///
/// Each task increments exactly one counter exactly once.
#[derive(Debug, Default)]
pub struct RunSummary {
    converted: AtomicUsize,
    overwritten: AtomicUsize,
    skipped: AtomicUsize,
    failed: AtomicUsize,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, outcome: TaskOutcome) {
        let counter = match outcome {
            TaskOutcome::Converted => &self.converted,
            TaskOutcome::Overwritten => &self.overwritten,
            TaskOutcome::Skipped => &self.skipped,
            TaskOutcome::Failed => &self.failed,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Reads the counters. Call after the worker pool has drained.
    pub fn snapshot(&self) -> SummaryCounts {
        SummaryCounts {
            converted: self.converted.load(Ordering::Relaxed),
            overwritten: self.overwritten.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}

/// Final outcome counts of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SummaryCounts {
    pub converted: usize,
    pub overwritten: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl SummaryCounts {
    pub fn total(&self) -> usize {
        self.converted + self.overwritten + self.skipped + self.failed
    }
}

impl fmt::Display for SummaryCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Summary: {} converted, {} overwritten, {} skipped, {} failed",
            self.converted, self.overwritten, self.skipped, self.failed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_land_in_their_bucket() {
        let summary = RunSummary::new();
        summary.record(TaskOutcome::Converted);
        summary.record(TaskOutcome::Converted);
        summary.record(TaskOutcome::Overwritten);
        summary.record(TaskOutcome::Skipped);
        summary.record(TaskOutcome::Failed);

        let counts = summary.snapshot();
        assert_eq!(
            counts,
            SummaryCounts {
                converted: 2,
                overwritten: 1,
                skipped: 1,
                failed: 1
            }
        );
        assert_eq!(counts.total(), 5);
    }

    #[test]
    fn renders_one_line() {
        let counts = SummaryCounts {
            converted: 3,
            overwritten: 0,
            skipped: 2,
            failed: 1,
        };
        assert_eq!(
            counts.to_string(),
            "Summary: 3 converted, 0 overwritten, 2 skipped, 1 failed"
        );
    }

    #[test]
    fn concurrent_records_are_not_lost() {
        let summary = RunSummary::new();
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for _ in 0..250 {
                        summary.record(TaskOutcome::Converted);
                    }
                });
            }
        });
        assert_eq!(summary.snapshot().converted, 1000);
    }
}
