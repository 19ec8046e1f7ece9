// webmify-core/src/external/mocks.rs

// --- Test doubles for the external seams ---
//
// Scripted stand-ins for the prober, the transcoder and the overwrite
// prompt. They are thread-safe because the planner and the worker pool call
// them from several threads.

use crate::error::{CoreError, CoreResult};
use crate::external::ffprobe_executor::MediaProber;
use crate::external::ffmpeg_executor::{TranscodeProcess, TranscoderSpawner};
use crate::processing::decision::{PromptAnswer, Prompter};

use ffmpeg_sidecar::command::FfmpegCommand;

use std::collections::{HashMap, VecDeque};
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

/// Builds an `ExitStatus` carrying `code`.
pub fn exit_status(code: i32) -> ExitStatus {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        ExitStatus::from_raw(code << 8)
    }
    #[cfg(windows)]
    {
        use std::os::windows::process::ExitStatusExt;
        ExitStatus::from_raw(code as u32)
    }
}

// ---- Prober ----

#[derive(Debug, Clone, Copy, Default)]
struct ProbeScript {
    duration: Option<f64>,
    compliant: bool,
}

/// Prober answering from per-path scripts. Unscripted paths have unknown
/// duration and are not compliant.
#[derive(Debug, Default)]
pub struct MockProber {
    scripts: Mutex<HashMap<PathBuf, ProbeScript>>,
    delay: Option<Duration>,
    duration_calls: AtomicUsize,
    compliance_calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockProber {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every probe sleep, so overlapping calls can be observed.
    pub fn with_probe_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn set_duration(&self, path: impl AsRef<Path>, duration: Option<f64>) {
        if let Ok(mut scripts) = self.scripts.lock() {
            scripts.entry(path.as_ref().to_path_buf()).or_default().duration = duration;
        }
    }

    pub fn set_compliant(&self, path: impl AsRef<Path>, compliant: bool) {
        if let Ok(mut scripts) = self.scripts.lock() {
            scripts.entry(path.as_ref().to_path_buf()).or_default().compliant = compliant;
        }
    }

    pub fn duration_calls(&self) -> usize {
        self.duration_calls.load(Ordering::SeqCst)
    }

    pub fn compliance_calls(&self) -> usize {
        self.compliance_calls.load(Ordering::SeqCst)
    }

    /// Highest number of probes that were running at the same time.
    pub fn max_concurrent_probes(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn script(&self, path: &Path) -> ProbeScript {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            thread::sleep(delay);
        }
        let script = self
            .scripts
            .lock()
            .ok()
            .and_then(|scripts| scripts.get(path).copied())
            .unwrap_or_default();
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        script
    }
}

impl MediaProber for MockProber {
    fn probe_duration(&self, path: &Path) -> Option<f64> {
        self.duration_calls.fetch_add(1, Ordering::SeqCst);
        self.script(path).duration
    }

    fn probe_compliance(&self, path: &Path) -> bool {
        self.compliance_calls.fetch_add(1, Ordering::SeqCst);
        self.script(path).compliant
    }
}

// ---- Transcoder ----

/// Scripted behaviour of one transcoder invocation.
#[derive(Debug, Clone)]
pub struct MockTranscode {
    /// Text written to the progress stream
    pub progress: String,
    /// Text written to the diagnostic stream
    pub diagnostics: String,
    pub exit_code: i32,
    /// Write a small file at the output path, as a real encode would
    pub create_output: bool,
}

impl MockTranscode {
    /// A run that reports two checkpoints and succeeds.
    pub fn success() -> Self {
        Self {
            progress: "out_time_ms=1000000\nspeed=1.0x\nprogress=continue\nout_time_ms=2000000\nspeed=1.0x\nprogress=end\n".to_string(),
            diagnostics: String::new(),
            exit_code: 0,
            create_output: true,
        }
    }

    /// A run that exits with `code` after writing `diagnostics` to stderr.
    pub fn failure(code: i32, diagnostics: &str) -> Self {
        Self {
            progress: "progress=continue\n".to_string(),
            diagnostics: diagnostics.to_string(),
            exit_code: code,
            create_output: false,
        }
    }

    pub fn with_progress(mut self, progress: &str) -> Self {
        self.progress = progress.to_string();
        self
    }
}

/// Process double streaming the scripted text.
pub struct MockProcess {
    progress: Option<Cursor<Vec<u8>>>,
    diagnostics: Option<Cursor<Vec<u8>>>,
    exit_status: ExitStatus,
}

impl TranscodeProcess for MockProcess {
    fn take_progress_stream(&mut self) -> Option<Box<dyn Read + Send>> {
        self.progress
            .take()
            .map(|c| Box::new(c) as Box<dyn Read + Send>)
    }

    fn take_diagnostic_stream(&mut self) -> Option<Box<dyn Read + Send>> {
        self.diagnostics
            .take()
            .map(|c| Box::new(c) as Box<dyn Read + Send>)
    }

    fn wait(&mut self) -> CoreResult<ExitStatus> {
        Ok(self.exit_status)
    }
}

struct Expectation {
    arg_pattern: String,
    result: Result<MockTranscode, String>,
}

/// Spawner matching each call against expectations by argument substring.
///
/// The first unused expectation whose pattern occurs in any argument is
/// consumed. Calls matching nothing use the default, if one is set, and
/// otherwise fail to spawn.
#[derive(Default)]
pub struct MockSpawner {
    expectations: Mutex<Vec<Expectation>>,
    default: Option<MockTranscode>,
    received_calls: Mutex<Vec<Vec<String>>>,
}

impl MockSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `transcode` for every call that matches no expectation.
    pub fn with_default(mut self, transcode: MockTranscode) -> Self {
        self.default = Some(transcode);
        self
    }

    pub fn expect(&self, arg_pattern: &str, transcode: MockTranscode) {
        self.push(arg_pattern, Ok(transcode));
    }

    /// The matching call fails as if ffmpeg could not be started.
    pub fn expect_spawn_error(&self, arg_pattern: &str, message: &str) {
        self.push(arg_pattern, Err(message.to_string()));
    }

    /// Argument lists of every spawn, in call order.
    pub fn received_calls(&self) -> Vec<Vec<String>> {
        self.received_calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// Input paths (the value after `-i`) of every spawn, in call order.
    pub fn received_inputs(&self) -> Vec<String> {
        self.received_calls()
            .iter()
            .filter_map(|args| {
                args.iter()
                    .position(|a| a == "-i")
                    .and_then(|i| args.get(i + 1).cloned())
            })
            .collect()
    }

    fn push(&self, arg_pattern: &str, result: Result<MockTranscode, String>) {
        if let Ok(mut expectations) = self.expectations.lock() {
            expectations.push(Expectation {
                arg_pattern: arg_pattern.to_string(),
                result,
            });
        }
    }

    fn take_match(&self, args: &[String]) -> Option<Result<MockTranscode, String>> {
        let mut expectations = self.expectations.lock().ok()?;
        let index = expectations
            .iter()
            .position(|exp| args.iter().any(|arg| arg.contains(&exp.arg_pattern)))?;
        Some(expectations.remove(index).result)
    }
}

impl TranscoderSpawner for MockSpawner {
    type Process = MockProcess;

    fn spawn(&self, mut cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        let args: Vec<String> = cmd
            .as_inner()
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        if let Ok(mut calls) = self.received_calls.lock() {
            calls.push(args.clone());
        }

        let scripted = match self.take_match(&args) {
            Some(result) => result,
            None => self
                .default
                .clone()
                .ok_or_else(|| format!("no expectation matched {args:?}")),
        };
        let transcode = scripted.map_err(|message| {
            CoreError::CommandStart(
                "ffmpeg".to_string(),
                std::io::Error::new(std::io::ErrorKind::NotFound, message),
            )
        })?;

        if transcode.create_output {
            if let Some(output) = args.last() {
                std::fs::write(output, b"webm")?;
            }
        }

        Ok(MockProcess {
            progress: Some(Cursor::new(transcode.progress.into_bytes())),
            diagnostics: Some(Cursor::new(transcode.diagnostics.into_bytes())),
            exit_status: exit_status(transcode.exit_code),
        })
    }
}

// ---- Prompt ----

/// Prompter replaying a fixed list of answers, then answering `No`.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<PromptAnswer>,
    asked: Vec<PathBuf>,
}

impl ScriptedPrompter {
    pub fn new(answers: Vec<PromptAnswer>) -> Self {
        Self {
            answers: answers.into(),
            asked: Vec::new(),
        }
    }

    /// Output paths that were asked about, in order.
    pub fn asked(&self) -> &[PathBuf] {
        &self.asked
    }
}

impl Prompter for ScriptedPrompter {
    fn ask_overwrite(&mut self, output_path: &Path) -> PromptAnswer {
        self.asked.push(output_path.to_path_buf());
        self.answers.pop_front().unwrap_or(PromptAnswer::No)
    }
}
