//! Esplora endpoint configuration

use std::time::Duration;

use crate::error::{ClientError, Result};

/// Blockstream's public Esplora API
pub const BLOCKSTREAM_API: &str = "https://blockstream.info/api";

/// mempool.space's Esplora-compatible API
pub const MEMPOOL_SPACE_API: &str = "https://mempool.space/api";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Esplora client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EsploraConfig {
    /// Base URL of the API, without a trailing slash (e.g., "https://blockstream.info/api")
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Count unconfirmed mempool activity toward the balance
    pub include_mempool: bool,
}

impl Default for EsploraConfig {
    fn default() -> Self {
        Self::blockstream()
    }
}

impl EsploraConfig {
    /// Blockstream mainnet API
    pub fn blockstream() -> Self {
        Self::local(BLOCKSTREAM_API)
    }

    /// mempool.space mainnet API
    pub fn mempool_space() -> Self {
        Self::local(MEMPOOL_SPACE_API)
    }

    /// Any Esplora-compatible endpoint, e.g. a local electrs instance
    pub fn local(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
            include_mempool: true,
        }
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Choose whether mempool activity counts toward balances
    pub fn with_mempool(mut self, include_mempool: bool) -> Self {
        self.include_mempool = include_mempool;
        self
    }

    /// Check the configuration before building a client
    pub fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ClientError::InvalidConfig(format!(
                "base URL must be http(s): {}",
                self.base_url
            )));
        }
        if self.timeout.is_zero() {
            return Err(ClientError::InvalidConfig("timeout must be non-zero".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert_eq!(EsploraConfig::default().base_url, BLOCKSTREAM_API);
        assert_eq!(EsploraConfig::mempool_space().base_url, MEMPOOL_SPACE_API);
        assert!(EsploraConfig::default().include_mempool);
    }

    #[test]
    fn test_local_trims_slash() {
        let config = EsploraConfig::local("http://localhost:3002/");
        assert_eq!(config.base_url, "http://localhost:3002");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_config() {
        assert!(matches!(
            EsploraConfig::local("localhost:3002").validate(),
            Err(ClientError::InvalidConfig(_))
        ));
        assert!(matches!(
            EsploraConfig::blockstream()
                .with_timeout(Duration::ZERO)
                .validate(),
            Err(ClientError::InvalidConfig(_))
        ));
    }
}
