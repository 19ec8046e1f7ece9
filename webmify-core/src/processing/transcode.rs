//! Transcoder supervisor.
//!
//! Runs one ffmpeg process to completion: progress lines are parsed on the
//! calling thread while stderr is collected on a helper thread, so neither
//! pipe can fill up and stall the child. The exit status is the only
//! success signal.

use crate::error::{CoreError, CoreResult};
use crate::external::{EncodeParams, TranscodeProcess, TranscoderSpawner, build_ffmpeg_command};
use crate::progress_reporting::{ProgressEvent, ProgressParser, ProgressSample};

use std::io::{BufRead, BufReader, Read};
use std::process::ExitStatus;
use std::thread;

/// Runs a transcode, calling `on_progress` at every progress checkpoint.
///
/// `duration_secs` is the probed source duration used for percent and ETA.
/// Returns `CoreError::TranscodeFailed` carrying ffmpeg's diagnostics when
/// the process exits nonzero, or the spawn error when it never started.
pub fn run_transcode<S, F>(
    spawner: &S,
    params: &EncodeParams,
    duration_secs: Option<f64>,
    mut on_progress: F,
) -> CoreResult<()>
where
    S: TranscoderSpawner,
    F: FnMut(&ProgressSample),
{
    let cmd = build_ffmpeg_command(params);
    let mut process = spawner.spawn(cmd)?;

    let diagnostics = process.take_diagnostic_stream().map(|mut stream| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            if let Err(e) = stream.read_to_end(&mut buf) {
                log::debug!("Error reading ffmpeg stderr: {}", e);
            }
            String::from_utf8_lossy(&buf).into_owned()
        })
    });

    if let Some(stream) = process.take_progress_stream() {
        let mut parser = ProgressParser::new(duration_secs);
        for line in BufReader::new(stream).lines().map_while(Result::ok) {
            match parser.feed_line(&line) {
                Some(ProgressEvent::Checkpoint(sample)) => {
                    log::debug!(
                        target: "webmify::progress",
                        "{}: {:.0}% speed {:.2}x",
                        params.input_path.display(),
                        sample.percent,
                        sample.speed
                    );
                    on_progress(&sample);
                }
                Some(ProgressEvent::End) => {
                    log::debug!(target: "webmify::progress", "{}: progress end", params.input_path.display());
                }
                None => {}
            }
        }
    }

    let status = process.wait()?;
    let diagnostics = diagnostics
        .and_then(|handle| handle.join().ok())
        .unwrap_or_default();

    if status.success() {
        if !diagnostics.trim().is_empty() {
            log::debug!("ffmpeg stderr for {}: {}", params.input_path.display(), diagnostics.trim());
        }
        Ok(())
    } else {
        Err(CoreError::TranscodeFailed(failure_detail(&diagnostics, status)))
    }
}

/// ffmpeg's own diagnostics when it wrote any, else a generic exit message.
pub fn failure_detail(diagnostics: &str, status: ExitStatus) -> String {
    let trimmed = diagnostics.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    match status.code() {
        Some(code) => format!("ffmpeg exited with code {code}"),
        None => "ffmpeg terminated by signal".to_string(),
    }
}
