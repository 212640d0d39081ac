//! Proof folding and verification

use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    hasher::Keccak256Hasher,
    leaf::{Entry, LeafEncoding},
    types::{Hash, hash_from_slice, parse_hash, to_hex},
};

/// Whitelist inclusion proof
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleProof {
    /// The leaf being proven
    #[serde(with = "hex_hash")]
    pub leaf: Hash,
    /// Position of the leaf in the tree's leaf layer
    pub index: usize,
    /// Sibling hashes from leaf to root
    #[serde(with = "hex_hashes")]
    pub siblings: Vec<Hash>,
}

impl MerkleProof {
    /// Verify this proof against a root hash
    pub fn verify(&self, root: &Hash) -> bool {
        verify(&self.siblings, &self.leaf, root)
    }

    /// Compute root from proof
    pub fn compute_root(&self) -> Hash {
        fold(&self.siblings, &self.leaf)
    }

    /// Siblings as `0x`-prefixed hex strings
    pub fn to_hex(&self) -> Vec<String> {
        self.siblings.iter().map(|hash| to_hex(hash)).collect()
    }
}

/// Fold a leaf with its proof using sort-before-hash at every step.
pub fn fold(proof: &[Hash], leaf: &Hash) -> Hash {
    proof
        .iter()
        .fold(*leaf, |current, sibling| Keccak256Hasher::hash_sorted_pair(&current, sibling))
}

/// Check that `proof` folds `leaf` into `root`.
///
/// A proof that does not fold to the root, including an empty or truncated
/// one, yields `false`.
pub fn verify(proof: &[Hash], leaf: &Hash, root: &Hash) -> bool {
    fold(proof, leaf) == *root
}

/// Like [`verify`], over raw byte slices.
///
/// Fails with a format error if any value is not 32 bytes wide.
pub fn verify_slices<P: AsRef<[u8]>>(proof: &[P], leaf: &[u8], root: &[u8]) -> Result<bool> {
    let proof = proof
        .iter()
        .map(|sibling| hash_from_slice(sibling.as_ref()))
        .collect::<Result<Vec<_>>>()?;
    Ok(verify(&proof, &hash_from_slice(leaf)?, &hash_from_slice(root)?))
}

/// Like [`verify`], over `0x`-prefixed (or bare) hex strings.
pub fn verify_hex<P: AsRef<str>>(proof: &[P], leaf: &str, root: &str) -> Result<bool> {
    let proof =
        proof.iter().map(|sibling| parse_hash(sibling.as_ref())).collect::<Result<Vec<_>>>()?;
    Ok(verify(&proof, &parse_hash(leaf)?, &parse_hash(root)?))
}

/// Verify an entry's raw fields: the leaf is recomputed before folding.
pub fn verify_entry(proof: &[Hash], entry: &Entry, encoding: LeafEncoding, root: &Hash) -> bool {
    verify(proof, &entry.leaf(encoding), root)
}

mod hex_hash {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    use crate::types::{Hash, parse_hash, to_hex};

    pub(super) fn serialize<S: Serializer>(hash: &Hash, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&to_hex(hash))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Hash, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_hash(&s).map_err(D::Error::custom)
    }
}

mod hex_hashes {
    use serde::{Deserialize, Deserializer, Serializer, de::Error, ser::SerializeSeq};

    use crate::types::{Hash, parse_hash, to_hex};

    pub(super) fn serialize<S: Serializer>(
        hashes: &[Hash],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(hashes.len()))?;
        for hash in hashes {
            seq.serialize_element(&to_hex(hash))?;
        }
        seq.end()
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<Hash>, D::Error> {
        Vec::<String>::deserialize(deserializer)?
            .iter()
            .map(|s| parse_hash(s).map_err(D::Error::custom))
            .collect()
    }
}
