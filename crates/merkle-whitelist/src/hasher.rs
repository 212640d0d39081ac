//! Keccak256 hasher for whitelist trees

use tiny_keccak::{Hasher, Keccak};

use crate::types::Hash;

/// Keccak256 hasher
#[derive(Clone, Copy, Debug, Default)]
pub struct Keccak256Hasher;

impl Keccak256Hasher {
    /// Hash a single value
    pub fn hash(data: &[u8]) -> Hash {
        let mut hasher = Keccak::v256();
        hasher.update(data);
        let mut output = [0u8; 32];
        hasher.finalize(&mut output);
        output
    }

    /// Hash two nodes, smaller value first.
    ///
    /// Byte-wise ordering of big-endian 32-byte values is their numeric order.
    pub fn hash_sorted_pair(a: &Hash, b: &Hash) -> Hash {
        let (left, right) = if a <= b { (a, b) } else { (b, a) };
        let mut hasher = Keccak::v256();
        hasher.update(left);
        hasher.update(right);
        let mut output = [0u8; 32];
        hasher.finalize(&mut output);
        output
    }
}
