//! Treasury Client
//!
//! Reads Bitcoin address balances from an Esplora block explorer
//! (Blockstream, mempool.space or a self-hosted electrs) and turns them into
//! balance attestations ready to be committed.
//!
//! # Example
//!
//! ```no_run
//! use treasury_client::{EsploraClient, EsploraConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = EsploraClient::try_new(EsploraConfig::blockstream())?;
//!
//!     let addresses = vec!["bc1qxy2kgdygjrsqtzq2n0yrf2493p83kkfjhx0wlh".to_string()];
//!     let snapshot = client.snapshot(&addresses, 1_700_000_000).await?;
//!     println!("Root: {}", snapshot.root);
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod types;

pub use client::EsploraClient;
pub use config::{EsploraConfig, BLOCKSTREAM_API, DEFAULT_TIMEOUT, MEMPOOL_SPACE_API};
pub use error::{ClientError, Result};
pub use types::{AddressStats, BalanceSnapshot, TxoStats};
