//! Balance attestations and their canonical leaf encoding
//!
//! A leaf of the commitment tree is `SHA-256("{address}:{balance}:{timestamp}")`
//! where `balance` is an integer amount of satoshis and `timestamp` is integer
//! seconds since the Unix epoch. Both numbers are written in plain base 10 with
//! no sign, grouping, leading zeros or exponent, which is exactly what `u64`'s
//! `Display` produces.

use crate::hash::Hash256;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Separator between the fields of the canonical leaf string
pub const FIELD_SEPARATOR: char = ':';

/// An assertion that `address` held `balance` satoshis at `timestamp`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BalanceAttestation {
    /// Opaque address string, used as the ordering key
    pub address: String,

    /// Balance in satoshis
    pub balance: u64,

    /// Seconds since the Unix epoch
    pub timestamp: u64,
}

impl BalanceAttestation {
    /// Create a new attestation
    pub fn new(address: impl Into<String>, balance: u64, timestamp: u64) -> Self {
        Self {
            address: address.into(),
            balance,
            timestamp,
        }
    }

    /// Canonical string hashed into the leaf
    pub fn canonical_string(&self) -> String {
        canonical_leaf_string(&self.address, self.balance, self.timestamp)
    }

    /// Leaf digest of this attestation
    pub fn leaf_hash(&self) -> Hash256 {
        leaf_hash(&self.address, self.balance, self.timestamp)
    }
}

/// Canonical `"{address}:{balance}:{timestamp}"` string
pub fn canonical_leaf_string(address: &str, balance: u64, timestamp: u64) -> String {
    format!("{address}{FIELD_SEPARATOR}{balance}{FIELD_SEPARATOR}{timestamp}")
}

/// Leaf digest for loose attestation fields
pub fn leaf_hash(address: &str, balance: u64, timestamp: u64) -> Hash256 {
    Hash256::sha256(canonical_leaf_string(address, balance, timestamp).as_bytes())
}

/// Canonical leaf order: address bytes, then balance, then timestamp.
///
/// Addresses compare as raw UTF-8 bytes, never by locale. The numeric
/// tie-break only matters for repeated addresses and keeps the order
/// independent of input order.
pub fn compare_by_address(a: &BalanceAttestation, b: &BalanceAttestation) -> Ordering {
    a.address
        .as_bytes()
        .cmp(b.address.as_bytes())
        .then(a.balance.cmp(&b.balance))
        .then(a.timestamp.cmp(&b.timestamp))
}

/// Return a copy of `attestations` in canonical (address-sorted) order
pub fn sorted_by_address(attestations: &[BalanceAttestation]) -> Vec<BalanceAttestation> {
    let mut sorted = attestations.to_vec();
    sorted.sort_by(compare_by_address);
    sorted
}
