//! Whitelist errors

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = WhitelistError> = std::result::Result<T, E>;

/// Broad category of a [`WhitelistError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller supplied a malformed entry or an empty entry set.
    Input,
    /// A leaf or position is not present in the tree.
    Lookup,
    /// A hash value does not have the expected width.
    Format,
}

/// Errors returned by whitelist construction, proof generation and verification.
///
/// A proof that simply does not fold to the root is not an error; verification
/// reports that as `false`.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum WhitelistError {
    #[error("identity must be {expected} bytes, got {actual}")]
    InvalidIdentityLength { expected: usize, actual: usize },

    #[error("quota {0:?} is not an unsigned 64-bit integer")]
    QuotaOutOfRange(String),

    #[error("invalid hex value {value:?}: {source}")]
    InvalidHex {
        value: String,
        #[source]
        source: hex::FromHexError,
    },

    #[error("unknown leaf encoding {0:?} (expected \"packed\" or \"abi\")")]
    UnknownEncoding(String),

    #[error("malformed allocation list: {0}")]
    Allocation(#[from] serde_json::Error),

    #[error("cannot build a merkle tree from zero entries")]
    EmptyInput,

    #[error("leaf {0} is not part of the tree")]
    LeafNotFound(String),

    #[error("leaf index {index} out of bounds for {len} leaves")]
    LeafIndexOutOfBounds { index: usize, len: usize },

    #[error("hash must be {expected} bytes, got {actual}")]
    InvalidHashLength { expected: usize, actual: usize },
}

impl WhitelistError {
    /// Returns the category this error belongs to.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidIdentityLength { .. }
            | Self::QuotaOutOfRange(_)
            | Self::InvalidHex { .. }
            | Self::UnknownEncoding(_)
            | Self::Allocation(_)
            | Self::EmptyInput => ErrorKind::Input,
            Self::LeafNotFound(_) | Self::LeafIndexOutOfBounds { .. } => ErrorKind::Lookup,
            Self::InvalidHashLength { .. } => ErrorKind::Format,
        }
    }
}
