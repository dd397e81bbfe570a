//! Treasury Primitives
//!
//! This crate provides the building blocks shared by the commitment crates:
//! - `Hash256`, a SHA-256 digest with a lowercase hex wire form
//! - `BalanceAttestation` and its canonical leaf encoding
//! - Ordinal (byte-wise) address ordering

pub mod attestation;
pub mod hash;

pub use attestation::{
    canonical_leaf_string, compare_by_address, leaf_hash, sorted_by_address, BalanceAttestation,
};
pub use hash::Hash256;
