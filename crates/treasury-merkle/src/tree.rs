//! SHA-256 Merkle tree over balance attestations
//!
//! Leaves are sorted by address (byte order) before hashing. Each level pairs
//! adjacent nodes left to right; an unpaired last node is hashed with itself
//! rather than promoted. Parents are `SHA-256(hex(left) || hex(right))`.

use crate::error::{CommitmentError, CommitmentResult};
use crate::proof::{InclusionProof, ProofStep, SiblingPosition};
use treasury_primitives::{sorted_by_address, BalanceAttestation, Hash256};

/// Root of a tree with no leaves: SHA-256 of the empty byte string.
///
/// No leaf preimage is empty (it always contains two separators) and every
/// internal preimage is 128 bytes, so this value cannot be produced by a
/// non-empty tree.
pub const EMPTY_ROOT: Hash256 = Hash256([
    0xe3, 0xb0, 0xc4, 0x42, 0x98, 0xfc, 0x1c, 0x14, 0x9a, 0xfb, 0xf4, 0xc8, 0x99, 0x6f, 0xb9, 0x24,
    0x27, 0xae, 0x41, 0xe4, 0x64, 0x9b, 0x93, 0x4c, 0xa4, 0x95, 0x99, 0x1b, 0x78, 0x52, 0xb8, 0x55,
]);

/// Merkle tree of balance attestations
#[derive(Debug, Clone)]
pub struct BalanceMerkleTree {
    /// Attestations in canonical (address-sorted) order
    attestations: Vec<BalanceAttestation>,

    /// Node hashes by level (level 0 = leaves, last = root)
    levels: Vec<Vec<Hash256>>,

    /// The root hash
    root: Hash256,
}

impl BalanceMerkleTree {
    /// Build a tree from attestations in any order
    pub fn from_attestations(attestations: &[BalanceAttestation]) -> Self {
        let sorted = sorted_by_address(attestations);
        let leaf_hashes = sorted.iter().map(BalanceAttestation::leaf_hash).collect();
        let (levels, root) = build_levels(leaf_hashes);

        Self {
            attestations: sorted,
            levels,
            root,
        }
    }

    /// Get the root hash
    pub fn root(&self) -> Hash256 {
        self.root
    }

    /// Whether the tree has no leaves
    pub fn is_empty(&self) -> bool {
        self.attestations.is_empty()
    }

    /// Get the number of leaves
    pub fn num_leaves(&self) -> usize {
        self.attestations.len()
    }

    /// Get the tree depth (number of levels excluding leaves)
    pub fn depth(&self) -> usize {
        self.levels.len().saturating_sub(1)
    }

    /// Get all nodes at a specific level (0 = leaves)
    pub fn level(&self, level: usize) -> Option<&[Hash256]> {
        self.levels.get(level).map(Vec::as_slice)
    }

    /// Get all leaf hashes in canonical order
    pub fn leaf_hashes(&self) -> &[Hash256] {
        self.level(0).unwrap_or(&[])
    }

    /// Attestations in canonical order
    pub fn attestations(&self) -> &[BalanceAttestation] {
        &self.attestations
    }

    /// Position of the single leaf committed for `address`
    pub fn position_of(&self, address: &str) -> CommitmentResult<usize> {
        let key = address.as_bytes();
        let start = self
            .attestations
            .partition_point(|a| a.address.as_bytes() < key);
        let end = self
            .attestations
            .partition_point(|a| a.address.as_bytes() <= key);

        match end - start {
            0 => Err(CommitmentError::NotFound {
                address: address.to_string(),
            }),
            1 => Ok(start),
            count => Err(CommitmentError::AmbiguousTarget {
                address: address.to_string(),
                count,
            }),
        }
    }

    /// Get a Merkle proof for a specific leaf index
    pub fn proof(&self, leaf_index: usize) -> CommitmentResult<InclusionProof> {
        if self.is_empty() {
            return Err(CommitmentError::EmptyTree);
        }
        if leaf_index >= self.num_leaves() {
            return Err(CommitmentError::LeafIndexOutOfBounds {
                index: leaf_index,
                leaf_count: self.num_leaves(),
            });
        }

        let mut steps = Vec::with_capacity(self.depth());
        let mut index = leaf_index;

        // Walk up the tree collecting siblings; the root level has none.
        for nodes in &self.levels[..self.levels.len() - 1] {
            let (sibling_index, position) = if index.is_multiple_of(2) {
                (index + 1, SiblingPosition::Right)
            } else {
                (index - 1, SiblingPosition::Left)
            };

            // Unpaired last node: its sibling is itself
            let sibling = nodes.get(sibling_index).unwrap_or(&nodes[index]);
            steps.push(ProofStep::new(*sibling, position));
            index /= 2;
        }

        Ok(InclusionProof {
            leaf_index,
            leaf_count: self.num_leaves(),
            steps,
        })
    }

    /// Get a Merkle proof for the leaf committed for `address`
    pub fn proof_for_address(&self, address: &str) -> CommitmentResult<InclusionProof> {
        let index = self.position_of(address)?;
        self.proof(index)
    }
}

/// Hash two child nodes to get their parent
pub fn hash_pair(left: &Hash256, right: &Hash256) -> Hash256 {
    Hash256::sha256_hex_pair(left, right)
}

/// Build every level from the leaves up, returning the levels and the root
fn build_levels(leaf_hashes: Vec<Hash256>) -> (Vec<Vec<Hash256>>, Hash256) {
    if leaf_hashes.is_empty() {
        return (Vec::new(), EMPTY_ROOT);
    }

    let mut levels = vec![leaf_hashes];
    while let Some(current) = levels.last().filter(|level| level.len() > 1) {
        let next: Vec<Hash256> = current
            .chunks(2)
            .map(|pair| match pair {
                [left, right] => hash_pair(left, right),
                [odd] => hash_pair(odd, odd),
                _ => unreachable!("chunks(2) yields one or two nodes"),
            })
            .collect();
        levels.push(next);
    }

    let root = levels[levels.len() - 1][0];
    (levels, root)
}
