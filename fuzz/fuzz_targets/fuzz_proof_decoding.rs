//! Fuzz target for proof decoding and verification
//!
//! This target ensures:
//! 1. Proof JSON decoding never panics on arbitrary input
//! 2. Verification never panics on garbage proofs or roots
//! 3. A step that is not a well-formed digest is reported as an error

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use treasury_merkle::{verify, CommitmentError, InclusionProof, ProofStep, SiblingPosition};

/// Arbitrary proof pieces and attestation fields
#[derive(Debug, Arbitrary)]
struct ProofInput {
    /// Raw bytes to try as proof JSON
    json: Vec<u8>,
    /// Sibling strings with their side (true = left)
    steps: Vec<(String, bool)>,
    address: String,
    balance: u64,
    timestamp: u64,
    root: String,
}

fuzz_target!(|input: ProofInput| {
    if let Ok(proof) = serde_json::from_slice::<InclusionProof>(&input.json) {
        let _ = verify(&input.address, input.balance, input.timestamp, &input.root, &proof);
    }

    // Limit depth to keep iterations fast
    let steps: Vec<ProofStep> = input
        .steps
        .into_iter()
        .take(64)
        .map(|(sibling, left)| ProofStep {
            sibling,
            position: if left {
                SiblingPosition::Left
            } else {
                SiblingPosition::Right
            },
        })
        .collect();
    let first_bad = steps
        .iter()
        .position(|s| s.sibling_hash().is_err());

    let proof = InclusionProof {
        leaf_index: 0,
        leaf_count: 1,
        steps,
    };
    match verify(&input.address, input.balance, input.timestamp, &input.root, &proof) {
        Ok(_) => assert!(first_bad.is_none()),
        Err(CommitmentError::InvalidProofFormat { step, .. }) => assert_eq!(Some(step), first_bad),
        Err(e) => panic!("unexpected error: {e}"),
    }
});
