//! FFmpeg command building for the 720p WebM target
//!
//! Every transcode uses the same recipe: scale and letterbox to 1280x720,
//! VP9 at constant quality with tiling scaled to the per-job thread count,
//! and Opus audio. Progress is requested as key=value lines on stdout.

use crate::hardware_decode::add_hardware_decoding_to_command;

use ffmpeg_sidecar::command::FfmpegCommand;

use std::path::PathBuf;

#[cfg(test)]
mod tests;

/// Output frame width.
pub const TARGET_WIDTH: u32 = 1280;
/// Output frame height.
pub const TARGET_HEIGHT: u32 = 720;
/// Codec name ffprobe reports for already-converted video.
pub const TARGET_VIDEO_CODEC: &str = "vp9";
/// Codec name ffprobe reports for already-converted audio.
pub const TARGET_AUDIO_CODEC: &str = "opus";

const VIDEO_ENCODER: &str = "libvpx-vp9";
const VIDEO_CRF: &str = "32";
const AUDIO_ENCODER: &str = "libopus";
const AUDIO_BITRATE: &str = "96k";

/// Scale down to fit 1280x720 keeping the aspect ratio, then pad with black.
pub const SCALE_PAD_FILTER: &str = "scale=1280:720:force_original_aspect_ratio=decrease,pad=1280:720:(ow-iw)/2:(oh-ih)/2:color=black";

/// Parameters required for one transcode.
#[derive(Debug, Clone)]
pub struct EncodeParams {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    /// Encoder threads for this job, at least 1
    pub threads: usize,
    /// Whether to use hardware decoding (when available)
    pub use_hw_decode: bool,
}

/// Argument list for a transcode, excluding any hardware decoding flags.
pub fn build_transcode_args(params: &EncodeParams) -> Vec<String> {
    let threads = params.threads.max(1).to_string();
    let mut args: Vec<String> = [
        "-hide_banner",
        "-nostats",
        "-nostdin",
        "-loglevel",
        "error",
        "-progress",
        "pipe:1",
        "-y",
    ]
    .iter()
    .map(|s| (*s).to_string())
    .collect();

    args.push("-i".to_string());
    args.push(params.input_path.to_string_lossy().into_owned());

    let video = [
        "-vf",
        SCALE_PAD_FILTER,
        "-c:v",
        VIDEO_ENCODER,
        "-b:v",
        "0",
        "-crf",
        VIDEO_CRF,
        "-row-mt",
        "1",
        "-tile-columns",
        "2",
        "-tile-rows",
        "1",
        "-frame-parallel",
        "1",
        "-threads",
        threads.as_str(),
        "-speed",
        "1",
    ];
    args.extend(video.iter().map(|s| (*s).to_string()));

    let audio = ["-c:a", AUDIO_ENCODER, "-b:a", AUDIO_BITRATE];
    args.extend(audio.iter().map(|s| (*s).to_string()));

    args.push(params.output_path.to_string_lossy().into_owned());
    args
}

/// Builds the ffmpeg command for one transcode.
///
/// Hardware decoding flags, when requested and supported, come first so they
/// apply to the input.
pub fn build_ffmpeg_command(params: &EncodeParams) -> FfmpegCommand {
    let mut cmd = FfmpegCommand::new();
    add_hardware_decoding_to_command(&mut cmd, params.use_hw_decode);
    cmd.args(build_transcode_args(params));
    cmd
}
