//! Runtime configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::adapters::solana::{DEVNET_RPC_URL, TESTNET_RPC_URL};
use crate::error::{AirdropError, Result};

pub const ENV_TESTNET_RPC_URL: &str = "SOL_NALKA_TESTNET_RPC_URL";
pub const ENV_DEVNET_RPC_URL: &str = "SOL_NALKA_DEVNET_RPC_URL";
pub const ENV_REQUEST_TIMEOUT: &str = "SOL_NALKA_REQUEST_TIMEOUT";
pub const ENV_POLL_INTERVAL_MS: &str = "SOL_NALKA_POLL_INTERVAL_MS";
pub const ENV_CONFIRMATION_TIMEOUT: &str = "SOL_NALKA_CONFIRMATION_TIMEOUT";

/// Airdrop client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirdropConfig {
    /// RPC endpoint for testnet
    pub testnet_rpc_url: String,

    /// RPC endpoint for devnet
    pub devnet_rpc_url: String,

    /// Timeout for a single HTTP round trip (seconds)
    pub request_timeout_secs: u64,

    /// Delay between signature status queries (milliseconds)
    pub poll_interval_ms: u64,

    /// Overall deadline for reaching `confirmed` (seconds)
    pub confirmation_timeout_secs: u64,
}

impl Default for AirdropConfig {
    fn default() -> Self {
        Self {
            testnet_rpc_url: TESTNET_RPC_URL.to_string(),
            devnet_rpc_url: DEVNET_RPC_URL.to_string(),
            request_timeout_secs: 30,
            poll_interval_ms: 1000,
            confirmation_timeout_secs: 30,
        }
    }
}

impl AirdropConfig {
    /// Load from environment variables with defaults.
    ///
    /// Unlike a silent fallback, a set-but-unparseable variable is an error.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reads from an arbitrary source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_TESTNET_RPC_URL) {
            config.testnet_rpc_url = url;
        }

        if let Some(url) = lookup(ENV_DEVNET_RPC_URL) {
            config.devnet_rpc_url = url;
        }

        if let Some(v) = lookup(ENV_REQUEST_TIMEOUT) {
            config.request_timeout_secs = parse_u64(ENV_REQUEST_TIMEOUT, &v)?;
        }

        if let Some(v) = lookup(ENV_POLL_INTERVAL_MS) {
            config.poll_interval_ms = parse_u64(ENV_POLL_INTERVAL_MS, &v)?;
        }

        if let Some(v) = lookup(ENV_CONFIRMATION_TIMEOUT) {
            config.confirmation_timeout_secs = parse_u64(ENV_CONFIRMATION_TIMEOUT, &v)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check that the poller has a bounded, non-spinning schedule.
    pub fn validate(&self) -> Result<()> {
        if self.request_timeout_secs == 0 {
            return Err(AirdropError::Configuration(
                "request timeout must be at least 1 second".to_string(),
            ));
        }
        if self.poll_interval_ms == 0 {
            return Err(AirdropError::Configuration(
                "poll interval must be non-zero".to_string(),
            ));
        }
        if self.confirmation_timeout_secs == 0 {
            return Err(AirdropError::Configuration(
                "confirmation timeout must be non-zero".to_string(),
            ));
        }
        if self.poll_interval() > self.confirmation_timeout() {
            return Err(AirdropError::Configuration(format!(
                "poll interval {}ms exceeds confirmation timeout {}s",
                self.poll_interval_ms, self.confirmation_timeout_secs
            )));
        }
        for url in [&self.testnet_rpc_url, &self.devnet_rpc_url] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(AirdropError::Configuration(format!(
                    "RPC URL must be http(s): {}",
                    url
                )));
            }
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn confirmation_timeout(&self) -> Duration {
        Duration::from_secs(self.confirmation_timeout_secs)
    }
}

fn parse_u64(key: &str, value: &str) -> Result<u64> {
    value.trim().parse().map_err(|_| {
        AirdropError::Configuration(format!("{} must be an integer, got '{}'", key, value))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = AirdropConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.poll_interval(), Duration::from_secs(1));
        assert_eq!(config.confirmation_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_overrides_applied() {
        let config = AirdropConfig::from_lookup(lookup(&[
            (ENV_DEVNET_RPC_URL, "http://127.0.0.1:8899"),
            (ENV_POLL_INTERVAL_MS, "250"),
            (ENV_CONFIRMATION_TIMEOUT, "10"),
        ]))
        .unwrap();

        assert_eq!(config.devnet_rpc_url, "http://127.0.0.1:8899");
        assert_eq!(config.testnet_rpc_url, TESTNET_RPC_URL);
        assert_eq!(config.poll_interval_ms, 250);
        assert_eq!(config.confirmation_timeout_secs, 10);
    }

    #[test]
    fn test_unparseable_value_fails_loudly() {
        let err = AirdropConfig::from_lookup(lookup(&[(ENV_POLL_INTERVAL_MS, "soon")])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains(ENV_POLL_INTERVAL_MS));
    }

    #[test]
    fn test_interval_longer_than_deadline_rejected() {
        let config = AirdropConfig {
            poll_interval_ms: 5_000,
            confirmation_timeout_secs: 2,
            ..AirdropConfig::default()
        };
        assert_eq!(config.validate().unwrap_err().kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_non_http_url_rejected() {
        let err = AirdropConfig::from_lookup(lookup(&[(ENV_TESTNET_RPC_URL, "ftp://nope")])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }
}
