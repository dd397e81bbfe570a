//! Fuzz target for tree construction
//!
//! This target ensures:
//! 1. Building a tree never panics for any attestation set
//! 2. The root does not depend on input order
//! 3. Every attestation with a unique address verifies against the root

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use treasury_merkle::{build_root, verify, BalanceMerkleTree, CommitmentError, EMPTY_ROOT};
use treasury_primitives::BalanceAttestation;

#[derive(Debug, Arbitrary)]
struct TreeInput {
    attestations: Vec<(String, u64, u64)>,
}

fuzz_target!(|input: TreeInput| {
    // Limit size to avoid slow iterations
    let set: Vec<BalanceAttestation> = input
        .attestations
        .into_iter()
        .take(256)
        .map(|(address, balance, timestamp)| BalanceAttestation::new(address, balance, timestamp))
        .collect();

    let tree = BalanceMerkleTree::from_attestations(&set);
    if set.is_empty() {
        assert_eq!(tree.root(), EMPTY_ROOT);
        return;
    }

    let mut reversed = set.clone();
    reversed.reverse();
    assert_eq!(build_root(&reversed), tree.root());

    let root = tree.root().to_hex();
    for a in &set {
        match tree.proof_for_address(&a.address) {
            Ok(proof) => {
                assert!(verify(&a.address, a.balance, a.timestamp, &root, &proof).unwrap());
            }
            Err(CommitmentError::AmbiguousTarget { count, .. }) => assert!(count > 1),
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
});
