//! Error types for the cipherlab core.

use thiserror::Error;

/// Errors raised while validating key material or transforming a value.
///
/// Every variant is produced synchronously at validation or decode time.
/// The transforms are deterministic, so none of them are worth retrying.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Knapsack private sequence is not superincreasing, or the modulus
    /// does not exceed its sum.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// No modular inverse of the multiplier exists below it.
    #[error("no modular inverse of {multiplier} modulo {modulus} found below {multiplier}")]
    KeyGenerationFailure { multiplier: u64, modulus: u64 },

    /// Sequence is not a bijection on `0..len`, or has the wrong length.
    #[error("invalid permutation: {0}")]
    InvalidPermutation(String),

    /// Plaintext value needs more bits than the knapsack key provides.
    #[error("block overflow: value needs {bits} bits but the key holds {capacity}")]
    BlockOverflow { bits: u32, capacity: usize },

    /// Subset-sum reconstruction left a nonzero residue.
    #[error("decode failure: residue {residue} left after subset-sum reconstruction")]
    DecodeFailure { residue: u128 },

    /// Stream cipher word width outside `1..=16`.
    #[error("word width must be between 1 and 16 bits, got {0}")]
    InvalidWordWidth(u32),

    /// Stream cipher key is empty or contains characters other than `0`/`1`.
    #[error("invalid key bits: {0}")]
    InvalidKeyBits(String),

    /// Knapsack block width outside `1..=8` bytes.
    #[error("invalid block width: {0}")]
    InvalidBlockWidth(String),

    /// Matrix with zero columns.
    #[error("matrix must have at least one column")]
    InvalidColumns,

    /// Bitmap header is truncated or its pixel offset is out of range.
    #[error("malformed image: {0}")]
    MalformedImage(String),

    /// Hex-encoded key material of the wrong length or alphabet.
    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
