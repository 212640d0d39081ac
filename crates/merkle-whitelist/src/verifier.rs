//! Root-holding verifier, the off-chain counterpart of a whitelist contract

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    leaf::{Entry, LeafEncoding},
    proof::verify_entry,
    types::{Address, Hash, to_hex},
};

/// Trait for whitelist membership checks against a trusted root
pub trait MembershipVerifier {
    /// Returns true if `(identity, quota)` is proven to be in the whitelist.
    fn verify(&self, proof: &[Hash], identity: &Address, quota: u64) -> bool;
}

/// Holds a published root and checks claims against it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhitelistVerifier {
    root: Hash,
    encoding: LeafEncoding,
}

impl WhitelistVerifier {
    /// Create a verifier for a root built with the packed encoding
    pub const fn new(root: Hash) -> Self {
        Self::with_encoding(root, LeafEncoding::Packed)
    }

    /// Create a verifier for a root built with the given encoding
    pub const fn with_encoding(root: Hash, encoding: LeafEncoding) -> Self {
        Self { root, encoding }
    }

    /// The trusted root
    pub const fn root(&self) -> Hash {
        self.root
    }

    /// Leaf encoding claims are hashed with
    pub const fn encoding(&self) -> LeafEncoding {
        self.encoding
    }
}

impl MembershipVerifier for WhitelistVerifier {
    fn verify(&self, proof: &[Hash], identity: &Address, quota: u64) -> bool {
        let entry = Entry::new(*identity, quota);
        let verified = verify_entry(proof, &entry, self.encoding, &self.root);
        debug!(claimant = %to_hex(identity), quota, verified, "checked whitelist claim");
        verified
    }
}
