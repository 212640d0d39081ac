//! Whitelist entries and their canonical leaf encoding

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, WhitelistError},
    hasher::Keccak256Hasher,
    types::{ADDRESS_LEN, Address, Hash, address_from_slice, parse_address, to_hex},
};

/// Size of a packed entry: 20-byte address followed by a big-endian u64.
pub const PACKED_LEN: usize = ADDRESS_LEN + 8;

/// Size of an ABI-encoded entry: two 32-byte words.
pub const ABI_LEN: usize = 64;

/// Byte layout used to turn an [`Entry`] into leaf preimage bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeafEncoding {
    /// `abi.encodePacked(address, uint64)`: 28 bytes
    #[default]
    Packed,
    /// `abi.encode(address, uint64)`: each field right-aligned in a 32-byte word
    Abi,
}

impl LeafEncoding {
    /// Returns the string representation of the encoding
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Packed => "packed",
            Self::Abi => "abi",
        }
    }

    /// Length in bytes of an encoded entry
    pub const fn encoded_len(&self) -> usize {
        match self {
            Self::Packed => PACKED_LEN,
            Self::Abi => ABI_LEN,
        }
    }
}

impl fmt::Display for LeafEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeafEncoding {
    type Err = WhitelistError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "packed" => Ok(Self::Packed),
            "abi" => Ok(Self::Abi),
            _ => Err(WhitelistError::UnknownEncoding(s.to_string())),
        }
    }
}

/// A single whitelist allocation: who may claim, and how much.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entry {
    /// Claimant address
    #[serde(with = "hex_address")]
    pub identity: Address,
    /// Allocation for the claimant
    pub quota: u64,
}

impl Entry {
    /// Create an entry from a fixed-width address.
    pub const fn new(identity: Address, quota: u64) -> Self {
        Self { identity, quota }
    }

    /// Create an entry from an arbitrary byte slice, which must be exactly 20 bytes.
    pub fn from_slice(identity: &[u8], quota: u64) -> Result<Self> {
        Ok(Self::new(address_from_slice(identity)?, quota))
    }

    /// Parse an entry from a hex address and a decimal quota.
    pub fn parse(identity: &str, quota: &str) -> Result<Self> {
        Ok(Self::new(parse_address(identity)?, parse_quota(quota)?))
    }

    /// Serialize the entry with the given layout.
    pub fn encode(&self, encoding: LeafEncoding) -> Vec<u8> {
        let mut out = Vec::with_capacity(encoding.encoded_len());
        match encoding {
            LeafEncoding::Packed => {
                out.extend_from_slice(&self.identity);
                out.extend_from_slice(&self.quota.to_be_bytes());
            }
            LeafEncoding::Abi => {
                out.extend_from_slice(&[0u8; 32 - ADDRESS_LEN]);
                out.extend_from_slice(&self.identity);
                out.extend_from_slice(&[0u8; 24]);
                out.extend_from_slice(&self.quota.to_be_bytes());
            }
        }
        out
    }

    /// Leaf hash: keccak256 of the encoded entry.
    pub fn leaf(&self, encoding: LeafEncoding) -> Hash {
        Keccak256Hasher::hash(&self.encode(encoding))
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", to_hex(&self.identity), self.quota)
    }
}

/// Parse a decimal quota, rejecting anything outside `0..=u64::MAX`.
pub fn parse_quota(s: &str) -> Result<u64> {
    s.trim().parse::<u64>().map_err(|_| WhitelistError::QuotaOutOfRange(s.to_string()))
}

/// Convenience wrapper for `entry.leaf(encoding)`
pub fn leaf_hash(identity: &Address, quota: u64, encoding: LeafEncoding) -> Hash {
    Entry::new(*identity, quota).leaf(encoding)
}

mod hex_address {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    use crate::types::{Address, parse_address, to_hex};

    pub(super) fn serialize<S: Serializer>(
        address: &Address,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&to_hex(address))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Address, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_address(&s).map_err(D::Error::custom)
    }
}
