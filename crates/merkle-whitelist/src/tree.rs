//! Sorted-pair Merkle tree

use tracing::debug;

use crate::{
    error::{Result, WhitelistError},
    hasher::Keccak256Hasher,
    leaf::{Entry, LeafEncoding},
    proof::MerkleProof,
    types::{Hash, to_hex},
};

/// Merkle tree over whitelist leaves.
///
/// Layer 0 holds the leaves in insertion order. Each following layer hashes
/// adjacent pairs with the smaller value first; an odd node at the end of a
/// layer is carried up unchanged. The last layer holds only the root.
///
/// Leaves are paired by position, so swapping the two members of a pair keeps
/// the root while moving a leaf into another pair changes it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MerkleTree {
    layers: Vec<Vec<Hash>>,
    encoding: LeafEncoding,
}

impl MerkleTree {
    /// Build a tree from entries using the packed encoding
    pub fn build(entries: &[Entry]) -> Result<Self> {
        Self::build_with(entries, LeafEncoding::Packed)
    }

    /// Build a tree from entries using the given leaf encoding
    pub fn build_with(entries: &[Entry], encoding: LeafEncoding) -> Result<Self> {
        let leaves = entries.iter().map(|entry| entry.leaf(encoding)).collect();
        Self::from_leaves(leaves, encoding)
    }

    /// Build a tree from precomputed leaf hashes.
    ///
    /// `encoding` must be the layout the leaves were hashed with;
    /// [`MerkleTree::proof_for`] hashes entries with it.
    pub fn from_leaves(leaves: Vec<Hash>, encoding: LeafEncoding) -> Result<Self> {
        if leaves.is_empty() {
            return Err(WhitelistError::EmptyInput);
        }

        let mut layers = vec![leaves];
        while let Some(current) = layers.last().filter(|layer| layer.len() > 1) {
            let next = current
                .chunks(2)
                .map(|pair| match pair {
                    [left, right] => Keccak256Hasher::hash_sorted_pair(left, right),
                    [odd] => *odd,
                    _ => unreachable!("chunks(2) yields one or two nodes"),
                })
                .collect();
            layers.push(next);
        }

        let tree = Self { layers, encoding };
        debug!(
            leaves = tree.len(),
            depth = tree.depth(),
            root = %to_hex(&tree.root()),
            %encoding,
            "built merkle tree"
        );
        Ok(tree)
    }

    /// Get the root hash
    pub fn root(&self) -> Hash {
        self.layers[self.layers.len() - 1][0]
    }

    /// Leaf hashes in insertion order
    pub fn leaves(&self) -> &[Hash] {
        &self.layers[0]
    }

    /// All layers, leaves first, root last
    pub fn layers(&self) -> &[Vec<Hash>] {
        &self.layers
    }

    /// Number of leaves
    pub fn len(&self) -> usize {
        self.layers[0].len()
    }

    /// Always false: a tree holds at least one leaf.
    pub fn is_empty(&self) -> bool {
        self.layers[0].is_empty()
    }

    /// Number of hashing levels above the leaves
    pub fn depth(&self) -> usize {
        self.layers.len() - 1
    }

    /// Leaf encoding the tree's leaves were hashed with
    pub const fn encoding(&self) -> LeafEncoding {
        self.encoding
    }

    /// Position of the first leaf equal to `leaf`
    pub fn leaf_index(&self, leaf: &Hash) -> Option<usize> {
        self.leaves().iter().position(|candidate| candidate == leaf)
    }

    /// Generate a proof for a leaf hash.
    ///
    /// With duplicate leaves this proves the first occurrence; use
    /// [`MerkleTree::proof_at`] to target a specific position.
    pub fn proof(&self, leaf: &Hash) -> Result<MerkleProof> {
        let index =
            self.leaf_index(leaf).ok_or_else(|| WhitelistError::LeafNotFound(to_hex(leaf)))?;
        self.proof_at(index)
    }

    /// Generate a proof for an entry, hashed with this tree's encoding
    pub fn proof_for(&self, entry: &Entry) -> Result<MerkleProof> {
        self.proof(&entry.leaf(self.encoding))
    }

    /// Generate a proof for the leaf at `index`
    pub fn proof_at(&self, index: usize) -> Result<MerkleProof> {
        let len = self.len();
        if index >= len {
            return Err(WhitelistError::LeafIndexOutOfBounds { index, len });
        }

        // Walk from leaf to root, collecting sibling hashes
        let mut siblings = Vec::with_capacity(self.depth());
        let mut position = index;
        for layer in &self.layers[..self.depth()] {
            let sibling = position ^ 1;
            if let Some(hash) = layer.get(sibling) {
                siblings.push(*hash);
            }
            position /= 2;
        }

        debug!(index, siblings = siblings.len(), "generated merkle proof");
        Ok(MerkleProof { leaf: self.layers[0][index], index, siblings })
    }
}
