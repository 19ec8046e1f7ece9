//! Configuration structures and constants for the webmify-core library.
//!
//! This module holds the run settings the CLI collects (overwrite policy,
//! compliance skipping, worker and thread counts, prompt timeout) together
//! with the fixed constants of the engine.

mod builder;
pub mod utils;

use std::time::Duration;

use crate::error::{CoreError, CoreResult};

pub use builder::CoreConfigBuilder;

// Default constants

/// Seconds an overwrite prompt waits for an answer before resolving to "no".
pub const DEFAULT_PROMPT_TIMEOUT_SECS: u64 = 30;

/// Environment variable overriding the prompt timeout, in seconds.
pub const PROMPT_TIMEOUT_ENV: &str = "WEBMIFY_PROMPT_TIMEOUT";

/// Maximum number of prober invocations running at once during planning.
/// Independent of the worker pool's concurrency.
pub const PROBE_FANOUT: usize = 8;

/// How outputs that already exist are handled, as requested at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExistingOutputPolicy {
    /// Prompt for each conflict.
    #[default]
    Ask,
    /// Overwrite every existing output without asking.
    Overwrite,
    /// Leave every existing output alone.
    Skip,
}

/// Main configuration structure for the webmify-core library.
///
/// Built by the consumer of the library (normally webmify-cli) and passed to
/// [`crate::process_videos`]. `None` for `concurrency` or `threads_per_job`
/// means "derive from the number of logical processors".
///
/// # Examples
///
/// ```rust
/// use webmify_core::config::{CoreConfigBuilder, ExistingOutputPolicy};
///
/// let config = CoreConfigBuilder::new()
///     .overwrite_policy(ExistingOutputPolicy::Skip)
///     .skip_compliant(true)
///     .concurrency(2)
///     .build();
/// assert_eq!(config.concurrency, Some(2));
/// ```
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Startup directive for existing outputs
    pub overwrite_policy: ExistingOutputPolicy,

    /// Skip sources already encoded as VP9 1280x720 with Opus audio
    pub skip_compliant: bool,

    /// Number of concurrent transcodes
    pub concurrency: Option<usize>,

    /// Encoder threads given to each transcode
    pub threads_per_job: Option<usize>,

    /// Request hardware-accelerated decoding where the platform supports it
    pub hw_decode: bool,

    /// How long an overwrite prompt waits before defaulting to "no"
    pub prompt_timeout: Duration,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            overwrite_policy: ExistingOutputPolicy::Ask,
            skip_compliant: false,
            concurrency: None,
            threads_per_job: None,
            hw_decode: false,
            prompt_timeout: Duration::from_secs(DEFAULT_PROMPT_TIMEOUT_SECS),
        }
    }
}

impl CoreConfig {
    /// Validates the configuration.
    ///
    /// Zero workers, zero threads and a zero prompt timeout are rejected.
    pub fn validate(&self) -> CoreResult<()> {
        if self.concurrency == Some(0) {
            return Err(CoreError::Config(
                "concurrency must be at least 1".to_string(),
            ));
        }
        if self.threads_per_job == Some(0) {
            return Err(CoreError::Config(
                "threads per job must be at least 1".to_string(),
            ));
        }
        if self.prompt_timeout.is_zero() {
            return Err(CoreError::Config(
                "prompt timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = CoreConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.overwrite_policy, ExistingOutputPolicy::Ask);
        assert_eq!(config.prompt_timeout, Duration::from_secs(30));
    }

    #[test]
    fn zero_counts_are_rejected() {
        let config = CoreConfig {
            concurrency: Some(0),
            ..CoreConfig::default()
        };
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));

        let config = CoreConfig {
            threads_per_job: Some(0),
            ..CoreConfig::default()
        };
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));

        let config = CoreConfig {
            prompt_timeout: Duration::ZERO,
            ..CoreConfig::default()
        };
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));
    }
}
