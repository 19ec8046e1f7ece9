// ============================================================================
// webmify-core/src/processing/prompt.rs
// ============================================================================
//
// OVERWRITE PROMPT: Timed Line Prompts for the Decision Pass
//
// Each prompt waits on two sources at once: the next typed line and a
// timeout. Lines come from one long-lived reader thread over a channel,
// so a prompt that times out leaves nothing blocked behind it. Anything
// typed before a prompt is shown (including a late answer to an earlier,
// timed-out prompt) is drained and discarded, so one answer can never
// decide two prompts.

use crate::processing::decision::{PromptAnswer, Prompter};

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::Path;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

/// Prompter reading answers line by line with a per-prompt timeout.
pub struct LinePrompter<W: Write> {
    timeout: Duration,
    interactive: bool,
    lines: Option<Receiver<String>>,
    out: W,
}

/// The production prompter: questions on stderr, answers from stdin.
pub type StdinPrompter = LinePrompter<io::Stderr>;

impl LinePrompter<io::Stderr> {
    /// Creates a prompter on the process's stdin. When stdin is not a
    /// terminal every prompt answers `No` without waiting.
    ///
    /// The stdin reader thread is started on the first prompt.
    pub fn stdin(timeout: Duration) -> Self {
        Self {
            timeout,
            interactive: io::stdin().is_terminal(),
            lines: None,
            out: io::stderr(),
        }
    }
}

impl<W: Write> LinePrompter<W> {
    /// Creates a prompter fed from an existing line channel.
    pub fn from_channel(lines: Receiver<String>, out: W, timeout: Duration) -> Self {
        Self {
            timeout,
            interactive: true,
            lines: Some(lines),
            out,
        }
    }

    /// Consumes the prompter and returns its output sink.
    pub fn into_output(self) -> W {
        self.out
    }

    fn wait_for_line(&mut self) -> Option<String> {
        let timeout = self.timeout;
        let lines = self.lines.get_or_insert_with(spawn_stdin_reader);

        // Stale input belongs to no prompt.
        while lines.try_recv().is_ok() {}

        match lines.recv_timeout(timeout) {
            Ok(line) => Some(line),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => {
                log::debug!("Prompt input closed");
                None
            }
        }
    }
}

impl<W: Write> Prompter for LinePrompter<W> {
    fn ask_overwrite(&mut self, output_path: &Path) -> PromptAnswer {
        if !self.interactive {
            log::debug!(
                "Non-interactive input, not overwriting {}",
                output_path.display()
            );
            return PromptAnswer::No;
        }

        // A broken terminal only hides the question; the timeout still applies.
        let _ = write!(
            self.out,
            "Output exists: {}\nOverwrite? [y]es/[n]o/[a]ll/[s]kip all/[q]uit: ",
            output_path.display()
        );
        let _ = self.out.flush();

        match self.wait_for_line() {
            Some(line) => PromptAnswer::parse(&line),
            None => {
                let _ = writeln!(self.out);
                log::info!("No answer within {}s, skipping", self.timeout.as_secs());
                PromptAnswer::No
            }
        }
    }
}

fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    let spawned = thread::Builder::new()
        .name("webmify-stdin".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        });
    if let Err(e) = spawned {
        // The sender was dropped with the closure, so prompts see a closed channel.
        log::warn!("Could not start stdin reader: {}", e);
    }
    rx
}
