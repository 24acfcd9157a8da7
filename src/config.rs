//! Configuration for the scraper.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Rendering session tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Delay between scroll rounds while waiting for lazy content.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Hard bound on scroll rounds; exceeding it is a session error
    /// instead of an endless loop.
    #[serde(default = "default_max_scroll_rounds")]
    pub max_scroll_rounds: u32,
    /// Chrome executable override; platform default when unset.
    #[serde(default)]
    pub chrome_path: Option<String>,
}

fn default_poll_interval_ms() -> u64 {
    500
}

fn default_max_scroll_rounds() -> u32 {
    40
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            max_scroll_rounds: default_max_scroll_rounds(),
            chrome_path: None,
        }
    }
}

impl SessionConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Caller-level retry policy for whole-run failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryProfile {
    /// Attempt cap; permanent failures never loop forever.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Fixed delay between attempts.
    #[serde(default = "default_delay_secs")]
    pub delay_secs: u64,
}

fn default_max_retries() -> u32 {
    10
}

fn default_delay_secs() -> u64 {
    30
}

impl Default for RetryProfile {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            delay_secs: default_delay_secs(),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub retry: RetryProfile,
}

impl AppConfig {
    /// Load configuration from defaults, an optional `matchscan.toml` and
    /// `MATCHSCAN_`-prefixed environment variables.
    pub fn load() -> anyhow::Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default())?)
            .add_source(config::File::with_name("matchscan").required(false))
            .add_source(
                config::Environment::with_prefix("MATCHSCAN")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.session.poll_interval(), Duration::from_millis(500));
        assert_eq!(config.session.max_scroll_rounds, 40);
        assert_eq!(config.retry.max_retries, 10);
    }
}
