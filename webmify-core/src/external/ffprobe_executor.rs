//! FFprobe integration for planning-time media queries
//!
//! Two queries are needed per source file: the container duration (used to
//! order work and compute progress) and the stream list (used to decide
//! whether a file already matches the target format). Both degrade to
//! "unknown"/false instead of failing; a broken probe never aborts planning.

use crate::external::ffmpeg::{TARGET_AUDIO_CODEC, TARGET_HEIGHT, TARGET_VIDEO_CODEC, TARGET_WIDTH};
use ffprobe::{FfProbeError, ffprobe};
use std::path::Path;
use std::process::{Command, Stdio};

/// The subset of stream metadata the engine looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamInfo {
    pub codec_type: Option<String>,
    pub codec_name: Option<String>,
    pub width: Option<i64>,
    pub height: Option<i64>,
}

impl StreamInfo {
    fn is_type(&self, kind: &str) -> bool {
        self.codec_type.as_deref() == Some(kind)
    }

    fn is_codec(&self, codec: &str) -> bool {
        self.codec_name.as_deref() == Some(codec)
    }
}

impl From<&ffprobe::Stream> for StreamInfo {
    fn from(stream: &ffprobe::Stream) -> Self {
        Self {
            codec_type: stream.codec_type.clone(),
            codec_name: stream.codec_name.clone(),
            width: stream.width,
            height: stream.height,
        }
    }
}

/// Trait for the prober gateway.
///
/// Implementations must be callable from several planning threads at once.
pub trait MediaProber: Sync {
    /// Container duration in seconds, or `None` when it cannot be determined.
    fn probe_duration(&self, path: &Path) -> Option<f64>;

    /// Whether the file already has a VP9 1280x720 video stream and an Opus audio stream.
    fn probe_compliance(&self, path: &Path) -> bool;
}

/// Production prober backed by the `ffprobe` binary.
#[derive(Debug, Clone, Default)]
pub struct FfprobeProber;

impl FfprobeProber {
    pub fn new() -> Self {
        Self
    }
}

impl MediaProber for FfprobeProber {
    fn probe_duration(&self, path: &Path) -> Option<f64> {
        let output = Command::new("ffprobe")
            .args([
                "-v",
                "error",
                "-show_entries",
                "format=duration",
                "-of",
                "default=noprint_wrappers=1:nokey=1",
            ])
            .arg(path)
            .stdin(Stdio::null())
            .output();

        match output {
            Ok(output) if output.status.success() => {
                parse_duration_output(&String::from_utf8_lossy(&output.stdout))
            }
            Ok(output) => {
                log::debug!(
                    "ffprobe duration query failed for {} ({})",
                    path.display(),
                    output.status
                );
                None
            }
            Err(e) => {
                log::debug!("Could not run ffprobe for {}: {}", path.display(), e);
                None
            }
        }
    }

    fn probe_compliance(&self, path: &Path) -> bool {
        match ffprobe(path) {
            Ok(metadata) => {
                let streams: Vec<StreamInfo> = metadata.streams.iter().map(StreamInfo::from).collect();
                is_compliant(&streams)
            }
            Err(err) => {
                log::debug!(
                    "ffprobe stream query failed for {}: {}",
                    path.display(),
                    describe_ffprobe_error(&err)
                );
                false
            }
        }
    }
}

/// Parses the single value printed by a duration-only ffprobe query.
///
/// Anything other than a finite, non-negative number yields `None`.
pub fn parse_duration_output(stdout: &str) -> Option<f64> {
    let value: f64 = stdout.trim().parse().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}

/// Target-format check over a probed stream list.
pub fn is_compliant(streams: &[StreamInfo]) -> bool {
    let video_ok = streams.iter().any(|s| {
        s.is_type("video")
            && s.is_codec(TARGET_VIDEO_CODEC)
            && s.width == Some(i64::from(TARGET_WIDTH))
            && s.height == Some(i64::from(TARGET_HEIGHT))
    });
    let audio_ok = streams
        .iter()
        .any(|s| s.is_type("audio") && s.is_codec(TARGET_AUDIO_CODEC));
    video_ok && audio_ok
}

fn describe_ffprobe_error(err: &FfProbeError) -> String {
    match err {
        FfProbeError::Io(io_err) => format!("I/O error: {io_err}"),
        FfProbeError::Status(output) => {
            String::from_utf8_lossy(&output.stderr).trim().to_string()
        }
        FfProbeError::Deserialize(e) => format!("unreadable JSON: {e}"),
        _ => format!("{err:?}"),
    }
}
