// ============================================================================
// webmify-cli/src/terminal.rs
// ============================================================================
//
// TERMINAL OUTPUT: progress bar and final report
//
// TerminalReporter renders the single-worker live progress line with
// indicatif. The engine only hands the reporter to the pool when one worker
// runs, so at most one bar exists at a time. indicatif hides the bar
// when stderr is not a terminal.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use webmify_core::{ProgressReporter, ProgressSample, RunReport, format_duration, format_eta};

use std::sync::Mutex;
use std::time::Duration;

/// Live progress bar for the running transcode.
#[derive(Default)]
pub struct TerminalReporter {
    progress: Mutex<Option<ProgressBar>>,
    max_percent: Mutex<u64>,
}

impl TerminalReporter {
    pub fn new() -> Self {
        Self::default()
    }

    fn finish_progress(&self) {
        if let Some(pb) = self.progress.lock().ok().and_then(|mut guard| guard.take()) {
            pb.finish_and_clear();
        }
        if let Ok(mut max) = self.max_percent.lock() {
            *max = 0;
        }
    }
}

impl ProgressReporter for TerminalReporter {
    fn task_started(&self, label: &str) {
        self.finish_progress();

        let pb = ProgressBar::new(100);
        if let Ok(bar_style) = ProgressStyle::default_bar()
            .template("{prefix} [{bar:30}] {percent:>3}% | {msg}")
        {
            pb.set_style(bar_style.progress_chars("=> "));
        }
        pb.set_prefix(label.to_string());
        pb.set_message("starting");
        pb.enable_steady_tick(Duration::from_millis(120));

        if let Ok(mut guard) = self.progress.lock() {
            *guard = Some(pb);
        }
    }

    fn task_progress(&self, _label: &str, sample: &ProgressSample) {
        let Ok(guard) = self.progress.lock() else {
            return;
        };
        let Some(pb) = guard.as_ref() else {
            return;
        };

        // The bar never moves backwards.
        let percent = sample.percent.clamp(0.0, 100.0) as u64;
        if let Ok(mut max) = self.max_percent.lock() {
            if percent >= *max {
                *max = percent;
                pb.set_position(percent);
            }
        }

        pb.set_message(format!(
            "speed {:.2}x, ETA {}",
            sample.speed,
            format_eta(sample.eta_secs)
        ));
    }

    fn task_finished(&self, _label: &str) {
        self.finish_progress();
    }
}

/// Prints the final summary block to stdout.
pub fn print_summary(report: &RunReport, elapsed: Duration) {
    println!();
    println!("{}", style(report.counts).bold());
    if report.quit {
        println!(
            "{}",
            style(format!("Stopped early: {} file(s) left unprocessed", report.abandoned)).yellow()
        );
    }
    if report.counts.failed > 0 {
        for record in report
            .records
            .iter()
            .filter(|r| r.outcome == webmify_core::TaskOutcome::Failed)
        {
            println!(
                "  {} {}",
                style("failed:").red(),
                record.source_path.display()
            );
        }
    }
    println!("Total time: {}", format_duration(elapsed.as_secs_f64()));
    println!("{}", style("All done.").green());
}

/// Prints an error message to stderr in red.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), style(message).red());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(percent: f64) -> ProgressSample {
        ProgressSample {
            elapsed_ms: 0.0,
            speed: 1.0,
            percent,
            eta_secs: None,
        }
    }

    #[test]
    fn test_progress_is_monotonic() {
        let reporter = TerminalReporter::new();
        reporter.task_started("[1/1] a.mp4 -> a_720p.webm");
        reporter.task_progress("", &sample(40.0));
        reporter.task_progress("", &sample(30.0));

        let position = reporter
            .progress
            .lock()
            .unwrap()
            .as_ref()
            .map(ProgressBar::position);
        assert_eq!(position, Some(40));
        assert_eq!(*reporter.max_percent.lock().unwrap(), 40);
    }

    #[test]
    fn test_finish_clears_bar() {
        let reporter = TerminalReporter::new();
        reporter.task_started("[1/1] a.mp4 -> a_720p.webm");
        reporter.task_progress("", &sample(75.0));
        reporter.task_finished("[1/1] a.mp4 -> a_720p.webm");

        assert!(reporter.progress.lock().unwrap().is_none());
        assert_eq!(*reporter.max_percent.lock().unwrap(), 0);
    }

    #[test]
    fn test_progress_without_bar_is_ignored() {
        let reporter = TerminalReporter::new();
        reporter.task_progress("", &sample(50.0));
        assert!(reporter.progress.lock().unwrap().is_none());
    }
}
