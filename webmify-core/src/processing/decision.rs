//! Overwrite decision engine.
//!
//! A sequential pass over the planned tasks deciding which ones run. The
//! current [`OverwriteMode`] is passed by `&mut` through every decision, so
//! each place that can change it is visible at the call site. Once the mode
//! leaves `Ask` it never returns to it.

use crate::config::ExistingOutputPolicy;
use crate::processing::planner::Task;

use std::fmt;
use std::path::Path;

/// Run-wide policy for existing-output conflicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverwriteMode {
    Ask,
    OverwriteAll,
    SkipAll,
}

impl From<ExistingOutputPolicy> for OverwriteMode {
    fn from(policy: ExistingOutputPolicy) -> Self {
        match policy {
            ExistingOutputPolicy::Ask => Self::Ask,
            ExistingOutputPolicy::Overwrite => Self::OverwriteAll,
            ExistingOutputPolicy::Skip => Self::SkipAll,
        }
    }
}

/// Answer to an overwrite prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptAnswer {
    Yes,
    No,
    All,
    SkipAll,
    Quit,
}

impl PromptAnswer {
    /// Parses typed input. Unrecognised text means `No`.
    pub fn parse(input: &str) -> Self {
        match input.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => Self::Yes,
            "a" | "all" => Self::All,
            "s" | "skip" | "skip-all" => Self::SkipAll,
            "q" | "quit" => Self::Quit,
            _ => Self::No,
        }
    }
}

/// Source of answers to overwrite prompts.
pub trait Prompter {
    /// Asks whether `output_path` may be overwritten.
    ///
    /// Must return within a bounded time; a timeout or a non-interactive
    /// environment answers `No`.
    fn ask_overwrite(&mut self, output_path: &Path) -> PromptAnswer;
}

/// Why a task was not enqueued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Compliant,
    OutputExists,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compliant => f.write_str("already compliant"),
            Self::OutputExists => f.write_str("output exists"),
        }
    }
}

/// Result of deciding one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Run the task; `overwrite` when its output already exists.
    Enqueue { overwrite: bool },
    Skip(SkipReason),
    /// Stop deciding; this and every later task stay unprocessed.
    Quit,
}

/// Decides a single task, updating `mode` when the answer is sticky.
///
/// The compliance check comes first, so a compliant source is skipped even
/// under `OverwriteAll`.
pub fn decide(
    task: &Task,
    skip_compliant: bool,
    mode: &mut OverwriteMode,
    prompter: &mut dyn Prompter,
) -> Decision {
    if skip_compliant && task.is_format_compliant {
        return Decision::Skip(SkipReason::Compliant);
    }
    if !task.output_already_exists {
        return Decision::Enqueue { overwrite: false };
    }

    match *mode {
        OverwriteMode::SkipAll => Decision::Skip(SkipReason::OutputExists),
        OverwriteMode::OverwriteAll => Decision::Enqueue { overwrite: true },
        OverwriteMode::Ask => match prompter.ask_overwrite(&task.output_path) {
            PromptAnswer::Yes => Decision::Enqueue { overwrite: true },
            PromptAnswer::No => Decision::Skip(SkipReason::OutputExists),
            PromptAnswer::All => {
                *mode = OverwriteMode::OverwriteAll;
                Decision::Enqueue { overwrite: true }
            }
            PromptAnswer::SkipAll => {
                *mode = OverwriteMode::SkipAll;
                Decision::Skip(SkipReason::OutputExists)
            }
            PromptAnswer::Quit => Decision::Quit,
        },
    }
}

/// Outcome of the whole decision pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Tasks to hand to the worker pool, in planning order
    pub runnable: Vec<Task>,
    /// Tasks skipped by policy, in planning order
    pub skipped: Vec<(Task, SkipReason)>,
    /// Tasks never decided because of a quit
    pub abandoned: Vec<Task>,
    pub quit: bool,
    /// Mode at the end of the pass
    pub final_mode: OverwriteMode,
}

/// Runs the sequential decision pass over sorted tasks.
pub fn resolve_conflicts(
    tasks: Vec<Task>,
    skip_compliant: bool,
    initial_mode: OverwriteMode,
    prompter: &mut dyn Prompter,
) -> Resolution {
    let total = tasks.len();
    let mut mode = initial_mode;
    let mut runnable = Vec::new();
    let mut skipped = Vec::new();
    let mut remaining = tasks.into_iter().enumerate();

    while let Some((i, task)) = remaining.next() {
        let prefix = format!("[{}/{}]", i + 1, total);
        match decide(&task, skip_compliant, &mut mode, prompter) {
            Decision::Enqueue { overwrite } => {
                if overwrite {
                    log::info!("{} Overwriting: {}", prefix, task.output_path.display());
                }
                runnable.push(task);
            }
            Decision::Skip(reason) => {
                match reason {
                    SkipReason::Compliant => {
                        log::info!("{} Skipping (compliant): {}", prefix, task.source_path.display())
                    }
                    SkipReason::OutputExists => {
                        log::info!("{} Skipping existing: {}", prefix, task.output_path.display())
                    }
                }
                skipped.push((task, reason));
            }
            Decision::Quit => {
                let mut abandoned = vec![task];
                abandoned.extend(remaining.map(|(_, t)| t));
                log::warn!(
                    "Quit requested, {} task(s) left unprocessed",
                    abandoned.len()
                );
                return Resolution {
                    runnable,
                    skipped,
                    abandoned,
                    quit: true,
                    final_mode: mode,
                };
            }
        }
    }

    Resolution {
        runnable,
        skipped,
        abandoned: Vec::new(),
        quit: false,
        final_mode: mode,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::mocks::ScriptedPrompter;
    use std::path::PathBuf;

    fn task(name: &str, exists: bool, compliant: bool) -> Task {
        Task {
            source_path: PathBuf::from(format!("/v/{name}.mp4")),
            output_path: PathBuf::from(format!("/v/{name}_720p.webm")),
            duration_secs: Some(1.0),
            is_format_compliant: compliant,
            output_already_exists: exists,
        }
    }

    #[test]
    fn answers_parse_with_aliases() {
        assert_eq!(PromptAnswer::parse("Y"), PromptAnswer::Yes);
        assert_eq!(PromptAnswer::parse(" yes \n"), PromptAnswer::Yes);
        assert_eq!(PromptAnswer::parse("a"), PromptAnswer::All);
        assert_eq!(PromptAnswer::parse("skip"), PromptAnswer::SkipAll);
        assert_eq!(PromptAnswer::parse("skip-all"), PromptAnswer::SkipAll);
        assert_eq!(PromptAnswer::parse("QUIT"), PromptAnswer::Quit);
        assert_eq!(PromptAnswer::parse(""), PromptAnswer::No);
        assert_eq!(PromptAnswer::parse("maybe"), PromptAnswer::No);
    }

    #[test]
    fn no_conflict_enqueues_without_prompting() {
        let mut prompter = ScriptedPrompter::new(vec![]);
        let mut mode = OverwriteMode::Ask;
        let decision = decide(&task("a", false, false), false, &mut mode, &mut prompter);
        assert_eq!(decision, Decision::Enqueue { overwrite: false });
        assert!(prompter.asked().is_empty());
    }

    #[test]
    fn compliance_wins_over_overwrite_all() {
        let mut prompter = ScriptedPrompter::new(vec![]);
        let mut mode = OverwriteMode::OverwriteAll;
        let decision = decide(&task("a", true, true), true, &mut mode, &mut prompter);
        assert_eq!(decision, Decision::Skip(SkipReason::Compliant));
    }

    #[test]
    fn compliance_ignored_when_disabled() {
        let mut prompter = ScriptedPrompter::new(vec![]);
        let mut mode = OverwriteMode::Ask;
        let decision = decide(&task("a", false, true), false, &mut mode, &mut prompter);
        assert_eq!(decision, Decision::Enqueue { overwrite: false });
    }

    #[test]
    fn all_is_sticky() {
        let tasks = vec![task("a", true, false), task("b", true, false), task("c", true, false)];
        let mut prompter = ScriptedPrompter::new(vec![PromptAnswer::All]);

        let resolution = resolve_conflicts(tasks, false, OverwriteMode::Ask, &mut prompter);

        assert_eq!(resolution.runnable.len(), 3);
        assert_eq!(prompter.asked().len(), 1);
        assert_eq!(resolution.final_mode, OverwriteMode::OverwriteAll);
    }

    #[test]
    fn skip_all_is_sticky() {
        let tasks = vec![
            task("a", true, false),
            task("b", false, false),
            task("c", true, false),
        ];
        let mut prompter = ScriptedPrompter::new(vec![PromptAnswer::SkipAll]);

        let resolution = resolve_conflicts(tasks, false, OverwriteMode::Ask, &mut prompter);

        assert_eq!(resolution.skipped.len(), 2);
        assert_eq!(resolution.runnable.len(), 1);
        assert_eq!(prompter.asked().len(), 1);
        assert_eq!(resolution.final_mode, OverwriteMode::SkipAll);
    }

    #[test]
    fn yes_and_no_do_not_change_mode() {
        let tasks = vec![task("a", true, false), task("b", true, false)];
        let mut prompter = ScriptedPrompter::new(vec![PromptAnswer::Yes, PromptAnswer::No]);

        let resolution = resolve_conflicts(tasks, false, OverwriteMode::Ask, &mut prompter);

        assert_eq!(resolution.runnable.len(), 1);
        assert_eq!(resolution.skipped.len(), 1);
        assert_eq!(prompter.asked().len(), 2);
        assert_eq!(resolution.final_mode, OverwriteMode::Ask);
    }

    #[test]
    fn quit_abandons_current_and_later_tasks() {
        let tasks = vec![
            task("a", false, false),
            task("b", true, false),
            task("c", false, false),
        ];
        let mut prompter = ScriptedPrompter::new(vec![PromptAnswer::Quit]);

        let resolution = resolve_conflicts(tasks, false, OverwriteMode::Ask, &mut prompter);

        assert!(resolution.quit);
        assert_eq!(resolution.runnable.len(), 1);
        assert!(resolution.skipped.is_empty());
        assert_eq!(resolution.abandoned.len(), 2);
    }

    #[test]
    fn startup_policy_maps_to_mode() {
        assert_eq!(OverwriteMode::from(ExistingOutputPolicy::Ask), OverwriteMode::Ask);
        assert_eq!(
            OverwriteMode::from(ExistingOutputPolicy::Overwrite),
            OverwriteMode::OverwriteAll
        );
        assert_eq!(OverwriteMode::from(ExistingOutputPolicy::Skip), OverwriteMode::SkipAll);
    }
}
