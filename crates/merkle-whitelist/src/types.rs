//! Common types

use crate::error::{Result, WhitelistError};

/// Width of a Keccak-256 digest
pub const HASH_LEN: usize = 32;

/// Width of an EVM-style address
pub const ADDRESS_LEN: usize = 20;

/// 32-byte hash type (leaves, internal nodes, roots)
pub type Hash = [u8; HASH_LEN];

/// Address type (20 bytes)
pub type Address = [u8; ADDRESS_LEN];

/// Convert a byte slice into a [`Hash`], rejecting any other width.
pub fn hash_from_slice(bytes: &[u8]) -> Result<Hash> {
    bytes.try_into().map_err(|_| WhitelistError::InvalidHashLength {
        expected: HASH_LEN,
        actual: bytes.len(),
    })
}

/// Convert a byte slice into an [`Address`], rejecting any other width.
pub fn address_from_slice(bytes: &[u8]) -> Result<Address> {
    bytes.try_into().map_err(|_| WhitelistError::InvalidIdentityLength {
        expected: ADDRESS_LEN,
        actual: bytes.len(),
    })
}

/// Parse a hex hash, with or without a `0x` prefix.
pub fn parse_hash(s: &str) -> Result<Hash> {
    hash_from_slice(&decode_hex(s)?)
}

/// Parse a hex address, with or without a `0x` prefix.
pub fn parse_address(s: &str) -> Result<Address> {
    address_from_slice(&decode_hex(s)?)
}

/// Render bytes as `0x`-prefixed lowercase hex.
pub fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

fn decode_hex(s: &str) -> Result<Vec<u8>> {
    let trimmed = s.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    hex::decode(digits)
        .map_err(|source| WhitelistError::InvalidHex { value: s.to_string(), source })
}
