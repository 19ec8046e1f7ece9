//! `FFmpeg` `-progress` stream parser
//!
//! ffmpeg writes blocks of `key=value` lines, each block terminated by
//! `progress=continue` or, for the last one, `progress=end`. The parser keeps
//! the most recent elapsed time and speed and turns every terminator into an
//! event. Unknown keys and malformed values are ignored.

use crate::utils::parse_ffmpeg_time;

/// Percent shown while the process is still running. The total duration is
/// an estimate, so 100 is only implied by the process exiting.
const MAX_RUNNING_PERCENT: f64 = 99.0;

/// One rendering checkpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSample {
    /// Encoded media time so far, in milliseconds
    pub elapsed_ms: f64,
    /// Encoding speed relative to real time, 0 when not yet known
    pub speed: f64,
    /// Percent complete, 0 when the total duration is unknown
    pub percent: f64,
    /// Seconds remaining, when both speed and total duration are known
    pub eta_secs: Option<f64>,
}

/// Terminator lines of a progress block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProgressEvent {
    Checkpoint(ProgressSample),
    End,
}

/// Line-fed state machine over one transcoder's progress stream.
#[derive(Debug, Clone)]
pub struct ProgressParser {
    total_ms: Option<f64>,
    elapsed_ms: Option<f64>,
    speed: f64,
}

impl ProgressParser {
    /// Creates a parser for a source of `total_secs` seconds, if known.
    #[must_use]
    pub fn new(total_secs: Option<f64>) -> Self {
        Self {
            total_ms: total_secs
                .filter(|s| s.is_finite() && *s > 0.0)
                .map(|s| s * 1000.0),
            elapsed_ms: None,
            speed: 0.0,
        }
    }

    /// Feeds one line. Returns an event when the line terminates a block.
    pub fn feed_line(&mut self, line: &str) -> Option<ProgressEvent> {
        let (key, value) = line.trim().split_once('=')?;
        let value = value.trim();

        match key.trim() {
            // Despite its name the value is in microseconds.
            "out_time_ms" => {
                // Negative values are the "no timestamp yet" sentinel.
                if let Ok(micros) = value.parse::<i64>() {
                    if micros >= 0 {
                        self.elapsed_ms = Some(micros as f64 / 1000.0);
                    }
                }
            }
            "out_time" => {
                if self.elapsed_ms.is_none() {
                    if let Some(secs) = parse_ffmpeg_time(value) {
                        self.elapsed_ms = Some(secs * 1000.0);
                    }
                }
            }
            "speed" => {
                if let Some(speed) = parse_speed(value) {
                    self.speed = speed;
                }
            }
            "progress" => match value {
                "continue" => return Some(ProgressEvent::Checkpoint(self.sample())),
                "end" => return Some(ProgressEvent::End),
                _ => {}
            },
            _ => {}
        }
        None
    }

    /// Current state as a checkpoint.
    #[must_use]
    pub fn sample(&self) -> ProgressSample {
        let elapsed_ms = self.elapsed_ms.unwrap_or(0.0);
        let (percent, eta_secs) = match self.total_ms {
            Some(total_ms) => {
                let percent = (elapsed_ms / total_ms * 100.0).clamp(0.0, MAX_RUNNING_PERCENT);
                let eta = (self.speed > 0.0)
                    .then(|| ((total_ms - elapsed_ms) / 1000.0 / self.speed).max(0.0));
                (percent, eta)
            }
            None => (0.0, None),
        };

        ProgressSample {
            elapsed_ms,
            speed: self.speed,
            percent,
            eta_secs,
        }
    }
}

/// Parses values like `2.5x` or ` 1.02x`. `N/A` and garbage yield `None`.
fn parse_speed(value: &str) -> Option<f64> {
    let number = value.strip_suffix('x')?.trim();
    let speed: f64 = number.parse().ok()?;
    (speed.is_finite() && speed >= 0.0).then_some(speed)
}
