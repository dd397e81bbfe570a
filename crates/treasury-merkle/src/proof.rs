//! Inclusion proofs and single-leaf verification

use serde::{Deserialize, Serialize};
use treasury_primitives::{leaf_hash, BalanceAttestation, Hash256};

use crate::error::{CommitmentError, CommitmentResult};
use crate::tree::hash_pair;

/// Which side of the path node its sibling sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiblingPosition {
    /// Sibling is the left child: parent = H(sibling || current)
    Left,
    /// Sibling is the right child: parent = H(current || sibling)
    Right,
}

/// One level of an inclusion proof
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofStep {
    /// Sibling digest as hex, exactly as published
    pub sibling: String,

    /// Side the sibling sits on
    pub position: SiblingPosition,
}

impl ProofStep {
    /// Create a step from a sibling digest
    pub fn new(sibling: Hash256, position: SiblingPosition) -> Self {
        Self {
            sibling: sibling.to_hex(),
            position,
        }
    }

    /// Decode the sibling digest.
    ///
    /// The sibling must be exactly 64 hex characters: no prefix, no padding.
    pub fn sibling_hash(&self) -> Result<Hash256, String> {
        if self.sibling.len() != Hash256::HEX_LEN || self.sibling.starts_with("0x") {
            return Err(format!(
                "sibling must be {} hex characters, got {:?}",
                Hash256::HEX_LEN,
                self.sibling
            ));
        }
        Hash256::from_hex(&self.sibling).map_err(|e| e.to_string())
    }
}

/// A Merkle proof for inclusion of a leaf
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InclusionProof {
    /// Index of the leaf being proven, in canonical order
    pub leaf_index: usize,

    /// Number of leaves in the tree the proof was taken from
    pub leaf_count: usize,

    /// Sibling hashes from the leaf level up to just below the root
    pub steps: Vec<ProofStep>,
}

impl InclusionProof {
    /// Number of levels the proof climbs
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the proof is for a single-leaf tree
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Fold the proof over a leaf digest.
    ///
    /// Fails only if a step's sibling is not a well-formed digest.
    pub fn compute_root(&self, leaf: Hash256) -> CommitmentResult<Hash256> {
        self.steps
            .iter()
            .enumerate()
            .try_fold(leaf, |current, (step, s)| {
                let sibling = s
                    .sibling_hash()
                    .map_err(|reason| CommitmentError::InvalidProofFormat { step, reason })?;
                Ok(match s.position {
                    SiblingPosition::Right => hash_pair(&current, &sibling),
                    SiblingPosition::Left => hash_pair(&sibling, &current),
                })
            })
    }
}

/// Verify that an attestation is committed under `root`.
///
/// Returns `Ok(false)` for any mismatch, including a `root` that is not a
/// well-formed digest. Only a malformed proof step is an error.
pub fn verify(
    address: &str,
    balance: u64,
    timestamp: u64,
    root: &str,
    proof: &InclusionProof,
) -> CommitmentResult<bool> {
    let computed = proof.compute_root(leaf_hash(address, balance, timestamp))?;
    Ok(Hash256::from_hex(root.trim()).is_ok_and(|expected| expected == computed))
}

/// Verify a typed attestation against a typed root
pub fn verify_attestation(
    attestation: &BalanceAttestation,
    root: &Hash256,
    proof: &InclusionProof,
) -> CommitmentResult<bool> {
    let computed = proof.compute_root(attestation.leaf_hash())?;
    Ok(computed == *root)
}
