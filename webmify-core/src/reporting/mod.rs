//! Run reporting: outcome counters and per-task records.

pub mod summary;

pub use summary::{RunSummary, SummaryCounts, TaskOutcome, TaskRecord};

/// Everything a run produced.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Final counts over every task that reached a terminal state
    pub counts: SummaryCounts,
    /// Decision-pass skips in planning order, then executed tasks in claim order
    pub records: Vec<TaskRecord>,
    /// Whether planning stopped on a quit answer
    pub quit: bool,
    /// Tasks left unprocessed by a quit; not part of `counts`
    pub abandoned: usize,
}
