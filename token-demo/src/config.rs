use std::time::Duration;

use token_auth::TokenConfig;

/// Demo configuration
#[derive(Debug, Clone)]
pub struct DemoConfig {
    /// Signing secret and token lifetime
    pub token: TokenConfig,

    /// Number of tokens issued by the batch run
    pub batch_size: usize,

    /// Pause between batch issuances in seconds (spreads the `exp` values)
    pub batch_interval_secs: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            token: TokenConfig::default(),
            batch_size: 6,
            batch_interval_secs: 1,
        }
    }
}

impl DemoConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self {
            token: TokenConfig::from_env(),
            ..Self::default()
        };

        if let Ok(size) = std::env::var("TOKEN_BATCH_SIZE") {
            if let Ok(n) = size.parse() {
                config.batch_size = n;
            }
        }

        if let Ok(interval) = std::env::var("TOKEN_BATCH_INTERVAL_SECS") {
            if let Ok(n) = interval.parse() {
                config.batch_interval_secs = n;
            }
        }

        config
    }

    /// Get batch interval as Duration
    pub fn batch_interval(&self) -> Duration {
        Duration::from_secs(self.batch_interval_secs)
    }
}
