// ============================================================================
// webmify-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for CoreConfig
//
// Fluent construction of CoreConfig. Values not set explicitly fall back to
// the defaults in config/mod.rs; the prompt timeout additionally consults
// the WEBMIFY_PROMPT_TIMEOUT environment variable.

// ---- Standard library imports ----
use std::time::Duration;

// ---- Internal crate imports ----
use super::utils::get_env_secs;
use super::{CoreConfig, DEFAULT_PROMPT_TIMEOUT_SECS, ExistingOutputPolicy, PROMPT_TIMEOUT_ENV};

/// Builder for creating CoreConfig instances.
///
/// # Examples
///
/// ```rust
/// use webmify_core::config::CoreConfigBuilder;
/// use std::time::Duration;
///
/// let config = CoreConfigBuilder::new()
///     .skip_compliant(true)
///     .threads_per_job(4)
///     .prompt_timeout(Duration::from_secs(5))
///     .build();
/// assert_eq!(config.prompt_timeout, Duration::from_secs(5));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CoreConfigBuilder {
    overwrite_policy: ExistingOutputPolicy,
    skip_compliant: bool,
    concurrency: Option<usize>,
    threads_per_job: Option<usize>,
    hw_decode: bool,
    prompt_timeout: Option<Duration>,
}

impl CoreConfigBuilder {
    /// Creates a new CoreConfigBuilder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the startup directive for existing outputs.
    pub fn overwrite_policy(mut self, policy: ExistingOutputPolicy) -> Self {
        self.overwrite_policy = policy;
        self
    }

    /// Sets whether already-compliant sources are skipped.
    pub fn skip_compliant(mut self, enable: bool) -> Self {
        self.skip_compliant = enable;
        self
    }

    /// Sets an explicit worker count.
    pub fn concurrency(mut self, workers: usize) -> Self {
        self.concurrency = Some(workers);
        self
    }

    /// Sets an explicit encoder thread count per transcode.
    pub fn threads_per_job(mut self, threads: usize) -> Self {
        self.threads_per_job = Some(threads);
        self
    }

    /// Requests hardware-accelerated decoding.
    pub fn hw_decode(mut self, enable: bool) -> Self {
        self.hw_decode = enable;
        self
    }

    /// Sets the overwrite prompt timeout.
    pub fn prompt_timeout(mut self, timeout: Duration) -> Self {
        self.prompt_timeout = Some(timeout);
        self
    }

    /// Builds the CoreConfig.
    ///
    /// Without an explicit prompt timeout, `WEBMIFY_PROMPT_TIMEOUT` is read,
    /// falling back to 30 seconds.
    pub fn build(self) -> CoreConfig {
        let prompt_timeout = self.prompt_timeout.unwrap_or_else(|| {
            get_env_secs(
                PROMPT_TIMEOUT_ENV,
                Duration::from_secs(DEFAULT_PROMPT_TIMEOUT_SECS),
            )
        });

        CoreConfig {
            overwrite_policy: self.overwrite_policy,
            skip_compliant: self.skip_compliant,
            concurrency: self.concurrency,
            threads_per_job: self.threads_per_job,
            hw_decode: self.hw_decode,
            prompt_timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_every_field() {
        let config = CoreConfigBuilder::new()
            .overwrite_policy(ExistingOutputPolicy::Overwrite)
            .skip_compliant(true)
            .concurrency(3)
            .threads_per_job(2)
            .hw_decode(true)
            .prompt_timeout(Duration::from_secs(9))
            .build();

        assert_eq!(config.overwrite_policy, ExistingOutputPolicy::Overwrite);
        assert!(config.skip_compliant);
        assert_eq!(config.concurrency, Some(3));
        assert_eq!(config.threads_per_job, Some(2));
        assert!(config.hw_decode);
        assert_eq!(config.prompt_timeout, Duration::from_secs(9));
    }

    #[test]
    fn unset_counts_stay_automatic() {
        let config = CoreConfigBuilder::new()
            .prompt_timeout(Duration::from_secs(1))
            .build();
        assert_eq!(config.concurrency, None);
        assert_eq!(config.threads_per_job, None);
        assert_eq!(config.overwrite_policy, ExistingOutputPolicy::Ask);
    }
}
