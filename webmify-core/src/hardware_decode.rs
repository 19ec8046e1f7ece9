//! Hardware decoding detection and configuration.
//!
//! Only VideoToolbox decoding on macOS is wired up. On every other platform
//! the opt-in is accepted and has no effect.
//!
//! This module is ONLY for hardware DECODING. Output is always encoded in
//! software with libvpx-vp9.

use ffmpeg_sidecar::command::FfmpegCommand;
use std::env;

/// Checks if the current platform is macOS.
#[must_use]
pub fn is_macos() -> bool {
    env::consts::OS == "macos"
}

/// Checks if hardware decoding is available on the current platform.
#[must_use]
pub fn is_hardware_decoding_available() -> bool {
    is_macos()
}

/// Returns the ffmpeg arguments enabling hardware decoding, if any apply.
#[must_use]
pub fn hwdecode_args(requested: bool) -> &'static [&'static str] {
    if requested && is_hardware_decoding_available() {
        &["-hwaccel", "videotoolbox"]
    } else {
        &[]
    }
}

/// Adds hardware decoding options to an ffmpeg command.
///
/// IMPORTANT: This must be called BEFORE adding the input file to the command.
///
/// Returns whether any options were added.
pub fn add_hardware_decoding_to_command(cmd: &mut FfmpegCommand, requested: bool) -> bool {
    let args = hwdecode_args(requested);
    if requested && args.is_empty() {
        log::debug!("Hardware decoding requested but not available on {}", env::consts::OS);
    }
    cmd.args(args);
    !args.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_requested_adds_nothing() {
        assert!(hwdecode_args(false).is_empty());
    }

    #[test]
    fn requested_follows_platform() {
        let args = hwdecode_args(true);
        if is_macos() {
            assert_eq!(args, &["-hwaccel", "videotoolbox"]);
        } else {
            assert!(args.is_empty());
        }
    }
}
