// ============================================================================
// webmify-cli/src/logging.rs
// ============================================================================
//
// LOGGING: fern backend for the `log` facade
//
// Info records print as the bare message so normal runs read like plain
// output. Other levels carry a colored level tag. Verbose mode lowers the
// level to Debug and prefixes every record with a timestamp.
//
// KEY COMPONENTS:
// - init_logging: installs the global logger
// - format_record: the line layout, kept separate for testing

use crate::error::CliResult;

use console::style;
use log::{Level, LevelFilter};
use webmify_core::CoreError;

use std::fmt;

/// Returns the current local time as "HH:MM:SS.mmm" for log prefixes.
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%H:%M:%S%.3f").to_string()
}

/// Installs the logger. Call once, before any logging.
pub fn init_logging(verbose: bool) -> CliResult<()> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    fern::Dispatch::new()
        .format(move |out, message, record| {
            let timestamp = verbose.then(get_timestamp);
            out.finish(format_args!(
                "{}",
                format_record(record.level(), message, timestamp.as_deref())
            ))
        })
        .level(level)
        // ffmpeg-sidecar logs every spawned command line at debug.
        .level_for("ffmpeg_sidecar", LevelFilter::Warn)
        .chain(std::io::stderr())
        .apply()
        .map_err(|e| CoreError::OperationFailed(format!("Failed to initialize logging: {e}")))
}

/// Lays out one record.
pub fn format_record(level: Level, message: &fmt::Arguments, timestamp: Option<&str>) -> String {
    let tag = match level {
        Level::Info => None,
        Level::Error => Some(style("ERROR").red().bold()),
        Level::Warn => Some(style("WARN").yellow()),
        Level::Debug => Some(style("DEBUG").dim()),
        Level::Trace => Some(style("TRACE").dim()),
    };

    let mut line = String::new();
    if let Some(ts) = timestamp {
        line.push_str(&style(ts).dim().to_string());
        line.push(' ');
    }
    if let Some(tag) = tag {
        line.push_str(&format!("{tag}: "));
    }
    line.push_str(&message.to_string());
    line
}
