//! Treasury Commit - Merkle commitments to Bitcoin treasury balances
//!
//! This crate publishes a single SHA-256 root over a set of
//! (address, balance, timestamp) attestations and lets anyone holding one
//! attestation check it against that root with a short inclusion proof.
//!
//! # Crates
//!
//! - `treasury-primitives`: `Hash256` digests and `BalanceAttestation`
//! - `treasury-merkle`: tree construction, inclusion proofs, verification
//! - `treasury-client`: Esplora client that snapshots live address balances
//!
//! # Example
//!
//! ```
//! use treasury_commit::merkle::{build_proof, build_root, verify};
//! use treasury_commit::primitives::BalanceAttestation;
//!
//! let attestations = vec![
//!     BalanceAttestation::new("bc1qcold", 250_000_000, 1_700_000_000),
//!     BalanceAttestation::new("bc1qhot", 12_500_000, 1_700_000_000),
//! ];
//! let root = build_root(&attestations);
//! let proof = build_proof(&attestations, "bc1qhot")?;
//! assert!(verify("bc1qhot", 12_500_000, 1_700_000_000, &root.to_hex(), &proof)?);
//! # Ok::<(), treasury_commit::merkle::CommitmentError>(())
//! ```

// Re-export sub-crates
pub use treasury_client as client;
pub use treasury_merkle as merkle;
pub use treasury_primitives as primitives;
