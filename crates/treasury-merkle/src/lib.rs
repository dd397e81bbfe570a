//! Treasury Merkle commitments
//!
//! Commits to a set of balance attestations with a SHA-256 Merkle root and
//! proves single attestations against it.
//!
//! # Construction
//!
//! 1. Attestations are sorted by address using byte order.
//! 2. Each leaf is `SHA-256("{address}:{balance}:{timestamp}")`.
//! 3. Adjacent nodes are paired left to right; an odd node out is paired with
//!    itself.
//! 4. A parent is `SHA-256(hex(left) || hex(right))`.
//!
//! An empty attestation set commits to [`EMPTY_ROOT`].
//!
//! # Usage
//!
//! ```
//! use treasury_merkle::{build_proof, build_root, verify};
//! use treasury_primitives::BalanceAttestation;
//!
//! let attestations = vec![
//!     BalanceAttestation::new("addrB", 10, 100),
//!     BalanceAttestation::new("addrA", 5, 100),
//! ];
//!
//! let root = build_root(&attestations);
//! let proof = build_proof(&attestations, "addrB")?;
//! assert!(verify("addrB", 10, 100, &root.to_hex(), &proof)?);
//! # Ok::<(), treasury_merkle::CommitmentError>(())
//! ```
//!
//! None of these functions perform I/O or log; they are safe to call
//! concurrently.

pub mod error;
pub mod proof;
pub mod tree;

pub use error::{CommitmentError, CommitmentResult};
pub use proof::{verify, verify_attestation, InclusionProof, ProofStep, SiblingPosition};
pub use tree::{hash_pair, BalanceMerkleTree, EMPTY_ROOT};

use treasury_primitives::{BalanceAttestation, Hash256};

/// Compute the commitment root of `attestations`, in any order
pub fn build_root(attestations: &[BalanceAttestation]) -> Hash256 {
    BalanceMerkleTree::from_attestations(attestations).root()
}

/// Build the inclusion proof for the attestation with `target_address`.
///
/// Fails with [`CommitmentError::NotFound`] if no attestation has that
/// address and [`CommitmentError::AmbiguousTarget`] if several do.
pub fn build_proof(
    attestations: &[BalanceAttestation],
    target_address: &str,
) -> CommitmentResult<InclusionProof> {
    BalanceMerkleTree::from_attestations(attestations).proof_for_address(target_address)
}
