//! Configuration utility functions
//!
//! Helpers for reading settings from environment variables.

use std::time::Duration;

/// Get a u64 value from an environment variable or use the default.
///
/// A value that does not parse is reported and ignored.
pub fn get_env_u64(key: &str, default: u64) -> u64 {
    match std::env::var(key) {
        Ok(val) => match val.trim().parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                log::warn!("Ignoring {}={:?}: not a whole number", key, val);
                default
            }
        },
        Err(_) => default,
    }
}

/// Get a timeout in whole seconds from an environment variable or use the default.
///
/// Zero is treated like an unparsable value.
pub fn get_env_secs(key: &str, default: Duration) -> Duration {
    match get_env_u64(key, default.as_secs()) {
        0 => {
            log::warn!("Ignoring {}=0: timeout must be positive", key);
            default
        }
        secs => Duration::from_secs(secs),
    }
}
