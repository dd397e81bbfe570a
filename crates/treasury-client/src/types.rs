//! Esplora response types and the published snapshot document

use serde::{Deserialize, Serialize};
use treasury_merkle::build_root;
use treasury_primitives::{BalanceAttestation, Hash256};

/// Funded/spent totals for one side (chain or mempool) of an address
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TxoStats {
    pub funded_txo_count: u64,
    pub funded_txo_sum: u64,
    pub spent_txo_count: u64,
    pub spent_txo_sum: u64,
    pub tx_count: u64,
}

impl TxoStats {
    /// Net satoshi movement; may be negative for the mempool side
    pub fn net(&self) -> i128 {
        i128::from(self.funded_txo_sum) - i128::from(self.spent_txo_sum)
    }
}

/// Response of `GET /address/:address`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddressStats {
    pub address: String,
    #[serde(default)]
    pub chain_stats: TxoStats,
    #[serde(default)]
    pub mempool_stats: TxoStats,
}

impl AddressStats {
    /// Confirmed balance in satoshis
    pub fn confirmed_balance(&self) -> u64 {
        clamp_sats(self.chain_stats.net())
    }

    /// Balance in satoshis, optionally including unconfirmed activity
    pub fn balance(&self, include_mempool: bool) -> u64 {
        let mut net = self.chain_stats.net();
        if include_mempool {
            net += self.mempool_stats.net();
        }
        clamp_sats(net)
    }
}

fn clamp_sats(net: i128) -> u64 {
    u64::try_from(net.max(0)).unwrap_or(u64::MAX)
}

/// A published set of attestations together with its commitment root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    /// Common timestamp of every attestation
    pub timestamp: u64,
    /// Merkle root over `attestations`
    pub root: Hash256,
    /// Sum of all balances in satoshis (saturating)
    pub total_balance: u64,
    /// The committed attestations
    pub attestations: Vec<BalanceAttestation>,
}

impl BalanceSnapshot {
    /// Commit to `attestations` taken at `timestamp`
    pub fn new(attestations: Vec<BalanceAttestation>, timestamp: u64) -> Self {
        let root = build_root(&attestations);
        let total_balance = attestations
            .iter()
            .fold(0u64, |acc, a| acc.saturating_add(a.balance));
        Self {
            timestamp,
            root,
            total_balance,
            attestations,
        }
    }

    /// Whether `root` still matches the attestations
    pub fn is_consistent(&self) -> bool {
        build_root(&self.attestations) == self.root
    }
}
