//! Adversarial Tests for balance commitment verification
//!
//! These tests check that verification rejects forged or malformed proofs:
//! - Proofs borrowed from another leaf or another tree
//! - Reordered, truncated or extended proof paths
//! - Flipped sibling positions
//! - Internal nodes presented as leaves
//! - Malformed hex in proof steps
//!
//! A malformed proof must surface as an error, never as a silent `false`.

use treasury_commit::merkle::{
    build_proof, build_root, hash_pair, verify, verify_attestation, BalanceMerkleTree,
    CommitmentError, InclusionProof, ProofStep, SiblingPosition,
};
use treasury_commit::primitives::{BalanceAttestation, Hash256};

// =============================================================================
// Test Helpers
// =============================================================================

fn treasury(n: usize) -> Vec<BalanceAttestation> {
    (0..n)
        .map(|i| {
            BalanceAttestation::new(
                format!("bc1qwallet{i:03}"),
                100_000 * (i as u64 + 1),
                1_700_000_000,
            )
        })
        .collect()
}

fn root_hex(set: &[BalanceAttestation]) -> String {
    build_root(set).to_hex()
}

// =============================================================================
// Forged Paths
// =============================================================================

#[test]
fn test_proof_for_other_leaf_rejected() {
    let set = treasury(7);
    let root = root_hex(&set);
    let proof = build_proof(&set, "bc1qwallet001").unwrap();

    let other = &set[4];
    assert!(!verify(&other.address, other.balance, other.timestamp, &root, &proof).unwrap());
}

#[test]
fn test_proof_from_other_tree_rejected() {
    let set = treasury(6);
    let mut other_set = set.clone();
    other_set[5].balance += 1;

    let foreign_proof = build_proof(&other_set, "bc1qwallet000").unwrap();
    let a = &set[0];
    assert!(!verify(&a.address, a.balance, a.timestamp, &root_hex(&set), &foreign_proof).unwrap());
}

#[test]
fn test_reordered_steps_rejected() {
    let set = treasury(8);
    let a = &set[2];
    let mut proof = build_proof(&set, &a.address).unwrap();
    proof.steps.swap(0, 1);
    assert!(!verify(&a.address, a.balance, a.timestamp, &root_hex(&set), &proof).unwrap());
}

#[test]
fn test_truncated_proof_rejected() {
    let set = treasury(8);
    let a = &set[3];
    let mut proof = build_proof(&set, &a.address).unwrap();
    proof.steps.pop();
    assert!(!verify(&a.address, a.balance, a.timestamp, &root_hex(&set), &proof).unwrap());
}

#[test]
fn test_extended_proof_rejected() {
    let set = treasury(4);
    let a = &set[0];
    let mut proof = build_proof(&set, &a.address).unwrap();
    let root = build_root(&set);
    proof.steps.push(ProofStep::new(root, SiblingPosition::Right));
    assert!(!verify(&a.address, a.balance, a.timestamp, &root.to_hex(), &proof).unwrap());
}

#[test]
fn test_flipped_positions_rejected() {
    let set = treasury(5);
    let root = root_hex(&set);
    for a in &set {
        let proof = build_proof(&set, &a.address).unwrap();
        for step in 0..proof.len() {
            let mut flipped = proof.clone();
            flipped.steps[step].position = match flipped.steps[step].position {
                SiblingPosition::Left => SiblingPosition::Right,
                SiblingPosition::Right => SiblingPosition::Left,
            };
            // A duplicated odd node is its own sibling, so flipping it is harmless
            let self_paired =
                flipped.steps[step].sibling == climb(&proof, a.leaf_hash(), step).to_hex();
            let valid = verify(&a.address, a.balance, a.timestamp, &root, &flipped).unwrap();
            assert_eq!(valid, self_paired, "{} step {}", a.address, step);
        }
    }
}

/// Digest of the path node before `steps` levels of the proof are applied
fn climb(proof: &InclusionProof, leaf: Hash256, steps: usize) -> Hash256 {
    let partial = InclusionProof {
        steps: proof.steps[..steps].to_vec(),
        ..proof.clone()
    };
    partial.compute_root(leaf).unwrap()
}

#[test]
fn test_sideless_proof_fails_for_right_children() {
    // A verifier that always hashes current || sibling only works for paths
    // that never pass through a right child.
    let set = treasury(4);
    let a = &set[3];
    let proof = build_proof(&set, &a.address).unwrap();
    let all_right = InclusionProof {
        steps: proof
            .steps
            .iter()
            .map(|s| ProofStep {
                position: SiblingPosition::Right,
                ..s.clone()
            })
            .collect(),
        ..proof.clone()
    };

    let root = root_hex(&set);
    assert!(verify(&a.address, a.balance, a.timestamp, &root, &proof).unwrap());
    assert!(!verify(&a.address, a.balance, a.timestamp, &root, &all_right).unwrap());
}

// =============================================================================
// Structural Attacks
// =============================================================================

#[test]
fn test_internal_node_is_not_a_leaf() {
    // Presenting level-1 children as a single "leaf" must not reproduce the root
    let set = treasury(4);
    let tree = BalanceMerkleTree::from_attestations(&set);
    let level1 = tree.level(1).unwrap();
    let forged_leaf = format!("{}{}", level1[0], level1[1]);

    let empty_proof = InclusionProof {
        leaf_index: 0,
        leaf_count: 1,
        steps: Vec::new(),
    };
    assert!(!verify(&forged_leaf, 0, 0, &tree.root().to_hex(), &empty_proof).unwrap());
}

#[test]
fn test_duplicate_padding_cannot_add_leaf() {
    // With 3 leaves the last one is paired with itself; appending a copy of
    // it must give the same root, but the copy cannot be proven separately.
    let set = treasury(3);
    let mut padded = set.clone();
    padded.push(set[2].clone());

    assert_eq!(build_root(&set), build_root(&padded));
    assert_eq!(
        build_proof(&padded, &set[2].address),
        Err(CommitmentError::AmbiguousTarget {
            address: set[2].address.clone(),
            count: 2
        })
    );
}

#[test]
fn test_field_separator_is_not_ambiguous_for_numbers() {
    // "a:1" with balance 23 and "a" with balance 123 have different leaves
    let one = BalanceAttestation::new("a:1", 23, 5);
    let two = BalanceAttestation::new("a", 123, 5);
    assert_ne!(one.canonical_string(), two.canonical_string());
    assert_ne!(one.leaf_hash(), two.leaf_hash());
}

#[test]
fn test_hash_pair_is_hex_concatenation() {
    let left = Hash256::sha256(b"left");
    let right = Hash256::sha256(b"right");
    let expected = Hash256::sha256(format!("{left}{right}").as_bytes());
    assert_eq!(hash_pair(&left, &right), expected);
}

// =============================================================================
// Malformed Proofs
// =============================================================================

#[test]
fn test_non_hex_sibling_is_error() {
    let set = treasury(4);
    let a = &set[1];
    let mut proof = build_proof(&set, &a.address).unwrap();
    proof.steps[0].sibling = "g".repeat(64);

    let err = verify(&a.address, a.balance, a.timestamp, &root_hex(&set), &proof).unwrap_err();
    assert!(matches!(err, CommitmentError::InvalidProofFormat { step: 0, .. }));
}

#[test]
fn test_short_sibling_is_error() {
    let set = treasury(4);
    let a = &set[1];
    let mut proof = build_proof(&set, &a.address).unwrap();
    proof.steps[1].sibling.truncate(62);

    let err = verify_attestation(a, &build_root(&set), &proof).unwrap_err();
    assert!(matches!(err, CommitmentError::InvalidProofFormat { step: 1, .. }));
}

#[test]
fn test_malformed_later_step_is_error_even_if_root_mismatches() {
    let set = treasury(4);
    let a = &set[0];
    let mut proof = build_proof(&set, &a.address).unwrap();
    proof.steps[1].sibling = String::new();

    assert!(verify("someone-else", 1, 1, &root_hex(&set), &proof).is_err());
}

#[test]
fn test_uppercase_siblings_accepted() {
    let set = treasury(6);
    let a = &set[5];
    let mut proof = build_proof(&set, &a.address).unwrap();
    for step in &mut proof.steps {
        step.sibling = step.sibling.to_uppercase();
    }
    assert!(verify(&a.address, a.balance, a.timestamp, &root_hex(&set), &proof).unwrap());
}

#[test]
fn test_prefixed_or_padded_siblings_rejected() {
    let set = treasury(6);
    let a = &set[5];
    let root = root_hex(&set);
    let proof = build_proof(&set, &a.address).unwrap();

    for (prefix, suffix) in [("0x", ""), (" 0x", " "), (" ", ""), ("", "\n")] {
        let mut bad = proof.clone();
        bad.steps[1].sibling = format!("{prefix}{}{suffix}", bad.steps[1].sibling);
        assert!(matches!(
            verify(&a.address, a.balance, a.timestamp, &root, &bad),
            Err(CommitmentError::InvalidProofFormat { step: 1, .. })
        ));
    }
}

#[test]
fn test_malformed_proof_json_rejected() {
    let bad_position = r#"{"leaf_index":0,"leaf_count":2,"steps":[{"sibling":"00","position":"up"}]}"#;
    assert!(serde_json::from_str::<InclusionProof>(bad_position).is_err());

    let missing_steps = r#"{"leaf_index":0,"leaf_count":2}"#;
    assert!(serde_json::from_str::<InclusionProof>(missing_steps).is_err());
}
