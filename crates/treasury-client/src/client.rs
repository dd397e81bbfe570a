//! Esplora HTTP client

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::StatusCode;
use treasury_primitives::BalanceAttestation;

use crate::config::EsploraConfig;
use crate::error::{ClientError, Result};
use crate::types::{AddressStats, BalanceSnapshot};

/// HTTP client for an Esplora block explorer API
#[derive(Debug, Clone)]
pub struct EsploraClient {
    client: reqwest::Client,
    config: EsploraConfig,
}

impl EsploraClient {
    /// Create a new client
    pub fn try_new(config: EsploraConfig) -> Result<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .user_agent(concat!("treasury-commit/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, config })
    }

    /// Active configuration
    pub fn config(&self) -> &EsploraConfig {
        &self.config
    }

    /// URL of the address stats endpoint
    pub fn address_url(&self, address: &str) -> Result<String> {
        let address = address.trim();
        if address.is_empty() || address.contains(['/', '?', '#', ' ']) {
            return Err(ClientError::InvalidAddress(address.to_string()));
        }
        Ok(format!("{}/address/{}", self.config.base_url, address))
    }

    /// Fetch funded/spent statistics for an address
    pub async fn address_stats(&self, address: &str) -> Result<AddressStats> {
        let url = self.address_url(address)?;
        tracing::debug!(%url, "Fetching address stats");

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else if status == StatusCode::NOT_FOUND || status == StatusCode::BAD_REQUEST {
            Err(ClientError::AddressNotFound(address.to_string()))
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ClientError::Api {
                status: status.as_u16(),
                message: body,
            })
        }
    }

    /// Balance of an address in satoshis
    pub async fn balance(&self, address: &str) -> Result<u64> {
        let stats = self.address_stats(address).await?;
        let balance = stats.balance(self.config.include_mempool);
        tracing::debug!(address, balance, "Fetched balance");
        Ok(balance)
    }

    /// Attest the current balance of each address, all stamped with `timestamp`
    ///
    /// Addresses are queried one at a time; the first failure aborts the
    /// snapshot.
    pub async fn attest(
        &self,
        addresses: &[String],
        timestamp: u64,
    ) -> Result<Vec<BalanceAttestation>> {
        let mut attestations = Vec::with_capacity(addresses.len());
        for address in addresses {
            let balance = self.balance(address).await?;
            attestations.push(BalanceAttestation::new(address.trim(), balance, timestamp));
        }
        Ok(attestations)
    }

    /// Attest every address and commit to the result
    pub async fn snapshot(&self, addresses: &[String], timestamp: u64) -> Result<BalanceSnapshot> {
        let attestations = self.attest(addresses, timestamp).await?;
        let snapshot = BalanceSnapshot::new(attestations, timestamp);
        tracing::info!(
            addresses = snapshot.attestations.len(),
            total_balance = snapshot.total_balance,
            root = %snapshot.root,
            "Balance snapshot committed"
        );
        Ok(snapshot)
    }
}
