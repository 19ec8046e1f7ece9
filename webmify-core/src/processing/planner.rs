// ============================================================================
// webmify-core/src/processing/planner.rs
// ============================================================================
//
// TASK PLANNER: Probe Discovered Files and Order the Work
//
// Turns discovered source paths into Tasks. Probing runs on a dedicated
// rayon pool sized to PROBE_FANOUT, so at most that many prober processes
// exist at once regardless of the worker pool's concurrency. Tasks are then
// ordered longest first so short jobs backfill worker slots at the end.

use crate::config::PROBE_FANOUT;
use crate::discovery::output_path_for;
use crate::error::{CoreError, CoreResult};
use crate::external::MediaProber;

use rayon::prelude::*;

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

/// One source file's planned transcode.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub source_path: PathBuf,
    pub output_path: PathBuf,
    /// Container duration, `None` when the prober could not tell
    pub duration_secs: Option<f64>,
    /// Already VP9 1280x720 with Opus audio; always false unless compliance checks are enabled
    pub is_format_compliant: bool,
    /// The output path existed at planning time
    pub output_already_exists: bool,
}

impl Task {
    /// Duration used for ordering; unknown counts as zero.
    pub fn sort_key(&self) -> f64 {
        self.duration_secs.unwrap_or(0.0)
    }
}

/// Probes every file and returns the tasks sorted by descending duration.
pub fn plan_tasks<P: MediaProber>(
    files: &[PathBuf],
    prober: &P,
    check_compliance: bool,
) -> CoreResult<Vec<Task>> {
    plan_tasks_with_fanout(files, prober, check_compliance, PROBE_FANOUT)
}

/// [`plan_tasks`] with an explicit probe fan-out.
pub fn plan_tasks_with_fanout<P: MediaProber>(
    files: &[PathBuf],
    prober: &P,
    check_compliance: bool,
    fanout: usize,
) -> CoreResult<Vec<Task>> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(fanout.max(1))
        .thread_name(|i| format!("webmify-probe-{i}"))
        .build()
        .map_err(|e| CoreError::ThreadPool(e.to_string()))?;

    log::debug!("Probing {} files with fan-out {}", files.len(), fanout.max(1));

    let mut tasks: Vec<Task> = pool.install(|| {
        files
            .par_iter()
            .map(|file| probe_task(file, prober, check_compliance))
            .collect()
    });

    sort_by_duration_desc(&mut tasks);
    Ok(tasks)
}

fn probe_task<P: MediaProber>(source: &Path, prober: &P, check_compliance: bool) -> Task {
    let output_path = output_path_for(source);
    let duration_secs = prober.probe_duration(source);
    let is_format_compliant = check_compliance && prober.probe_compliance(source);
    let output_already_exists = output_path.exists();

    log::debug!(
        "Probed {}: duration={:?} compliant={} output_exists={}",
        source.display(),
        duration_secs,
        is_format_compliant,
        output_already_exists
    );

    Task {
        source_path: source.to_path_buf(),
        output_path,
        duration_secs,
        is_format_compliant,
        output_already_exists,
    }
}

/// Stable sort, longest first, unknown durations as zero.
pub fn sort_by_duration_desc(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| {
        b.sort_key()
            .partial_cmp(&a.sort_key())
            .unwrap_or(Ordering::Equal)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::mocks::MockProber;

    fn task(name: &str, duration: Option<f64>) -> Task {
        Task {
            source_path: PathBuf::from(name),
            output_path: output_path_for(Path::new(name)),
            duration_secs: duration,
            is_format_compliant: false,
            output_already_exists: false,
        }
    }

    fn names(tasks: &[Task]) -> Vec<String> {
        tasks
            .iter()
            .map(|t| t.source_path.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn longest_first_with_unknown_as_zero() {
        let mut tasks = vec![
            task("short.mp4", Some(5.0)),
            task("unknown.mp4", None),
            task("long.mp4", Some(600.0)),
            task("zero.mp4", Some(0.0)),
            task("mid.mp4", Some(60.0)),
        ];
        sort_by_duration_desc(&mut tasks);
        assert_eq!(
            names(&tasks),
            ["long.mp4", "mid.mp4", "short.mp4", "unknown.mp4", "zero.mp4"]
        );
    }

    #[test]
    fn compliance_is_not_probed_when_disabled() {
        let prober = MockProber::new();
        prober.set_duration("/v/a.mp4", Some(3.0));
        prober.set_compliant("/v/a.mp4", true);

        let tasks = plan_tasks(&[PathBuf::from("/v/a.mp4")], &prober, false).unwrap();
        assert!(!tasks[0].is_format_compliant);
        assert_eq!(prober.compliance_calls(), 0);

        let tasks = plan_tasks(&[PathBuf::from("/v/a.mp4")], &prober, true).unwrap();
        assert!(tasks[0].is_format_compliant);
        assert_eq!(prober.compliance_calls(), 1);
    }

    #[test]
    fn planning_twice_gives_identical_tasks() {
        let dir = tempfile::tempdir().unwrap();
        let prober = MockProber::new();
        let mut files = Vec::new();
        for (i, duration) in [Some(30.0), Some(90.0), Some(30.0), None, Some(30.0), Some(90.0)]
            .into_iter()
            .enumerate()
        {
            let source = dir.path().join(format!("clip{i}.mp4"));
            std::fs::write(&source, b"x").unwrap();
            if i % 2 == 0 {
                std::fs::write(output_path_for(&source), b"old").unwrap();
            }
            prober.set_duration(&source, duration);
            prober.set_compliant(&source, i == 1);
            files.push(source);
        }

        let first = plan_tasks(&files, &prober, true).unwrap();
        let second = plan_tasks(&files, &prober, true).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            first.iter().map(|t| t.source_path.clone()).collect::<Vec<_>>(),
            [1, 5, 0, 2, 4, 3].map(|i| files[i].clone())
        );
        assert!(first[0].is_format_compliant);
        assert!(first[2].output_already_exists);
        assert!(!first[1].output_already_exists);
    }

    #[test]
    fn probe_concurrency_never_exceeds_fanout() {
        let prober = MockProber::new().with_probe_delay(std::time::Duration::from_millis(20));
        let files: Vec<PathBuf> = (0..24).map(|i| PathBuf::from(format!("/v/{i}.mp4"))).collect();

        let tasks = plan_tasks_with_fanout(&files, &prober, true, 3).unwrap();
        assert_eq!(tasks.len(), 24);
        assert!(prober.max_concurrent_probes() <= 3);
    }
}
