//! Merkle tree whitelist
//!
//! Builds a Keccak-256 Merkle tree over `(address, quota)` allocations and
//! produces proofs an on-chain verifier can check against the published root.
//! Key properties:
//! - Sort-before-hash: every pair is hashed smaller value first, so proofs
//!   carry no left/right flags and the order within a pair does not affect
//!   the root
//! - Leaves stay in insertion order and are paired by position; moving a leaf
//!   into a different pair changes the root
//! - Odd nodes are carried up unchanged
//! - Verification is a pure fold that reports mismatches as `false`

mod allocation;
mod error;
mod hasher;
mod leaf;
mod proof;
mod tree;
mod types;
mod verifier;

pub use allocation::parse_allocations;
pub use error::{ErrorKind, Result, WhitelistError};
pub use hasher::Keccak256Hasher;
pub use leaf::{ABI_LEN, Entry, LeafEncoding, PACKED_LEN, leaf_hash, parse_quota};
pub use proof::{MerkleProof, fold, verify, verify_entry, verify_hex, verify_slices};
pub use tree::MerkleTree;
pub use types::{
    ADDRESS_LEN, Address, HASH_LEN, Hash, address_from_slice, hash_from_slice, parse_address,
    parse_hash, to_hex,
};
pub use verifier::{MembershipVerifier, WhitelistVerifier};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_and_verify() {
        let entries = [Entry::new([1u8; 20], 2), Entry::new([2u8; 20], 2)];
        let tree = MerkleTree::build(&entries).unwrap();

        let proof = tree.proof_for(&entries[0]).unwrap();
        assert!(proof.verify(&tree.root()));
        assert!(WhitelistVerifier::new(tree.root()).verify(&proof.siblings, &[1u8; 20], 2));
    }
}
