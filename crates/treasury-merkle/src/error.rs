//! Error types for commitment operations

use thiserror::Error;

/// Errors that can occur while building or checking balance commitments
///
/// A proof that simply does not match its root is not an error; `verify`
/// reports that as `Ok(false)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommitmentError {
    /// A proof step does not carry a 64-character hex digest
    #[error("Invalid proof format at step {step}: {reason}")]
    InvalidProofFormat { step: usize, reason: String },

    /// No attestation has the requested address
    #[error("Address not found in attestation set: {address}")]
    NotFound { address: String },

    /// More than one attestation has the requested address
    #[error("Address {address} matches {count} attestations")]
    AmbiguousTarget { address: String, count: usize },

    /// A proof was requested from a tree with no leaves
    #[error("Cannot build a proof from an empty tree")]
    EmptyTree,

    /// Leaf index past the end of the tree
    #[error("Leaf index {index} out of bounds (num leaves: {leaf_count})")]
    LeafIndexOutOfBounds { index: usize, leaf_count: usize },
}

/// Result type for commitment operations
pub type CommitmentResult<T> = Result<T, CommitmentError>;
