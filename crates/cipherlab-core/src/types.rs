//! Strong type definitions shared by the ciphers.
//!
//! Key material is wrapped in newtypes that validate on construction, so the
//! cipher code never has to second-guess the shape of what it was handed.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, Result};

/// A bijection on `0..len`, used as a transposition key.
///
/// The only way to obtain one is through [`Permutation::new`] (or serde,
/// which goes through the same check), so every `Permutation` in the crate
/// is known to be valid.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct Permutation(Vec<usize>);

impl Permutation {
    /// Validate and wrap a sequence of indices.
    ///
    /// Fails unless the sequence is non-empty and contains each of
    /// `0..len` exactly once.
    pub fn new(indices: Vec<usize>) -> Result<Self> {
        if indices.is_empty() {
            return Err(CoreError::InvalidPermutation("empty permutation".into()));
        }
        let mut seen = vec![false; indices.len()];
        for &index in &indices {
            match seen.get_mut(index) {
                Some(slot) if !*slot => *slot = true,
                Some(_) => {
                    return Err(CoreError::InvalidPermutation(format!(
                        "index {index} appears more than once"
                    )))
                }
                None => {
                    return Err(CoreError::InvalidPermutation(format!(
                        "index {index} out of range for length {}",
                        indices.len()
                    )))
                }
            }
        }
        Ok(Self(indices))
    }

    /// The identity permutation of the given length.
    pub fn identity(len: usize) -> Result<Self> {
        Self::new((0..len).collect())
    }

    /// Number of positions permuted.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; empty permutations are rejected at construction.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The raw indices.
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// The permutation that undoes this one: `inverse[i]` is the position
    /// `k` with `self[k] == i`.
    pub fn inverse(&self) -> Self {
        let mut inverse = vec![0; self.0.len()];
        for (k, &i) in self.0.iter().enumerate() {
            inverse[i] = k;
        }
        Self(inverse)
    }

    /// Check that the permutation covers exactly `expected` positions.
    pub fn ensure_len(&self, expected: usize, what: &str) -> Result<()> {
        if self.0.len() != expected {
            return Err(CoreError::InvalidPermutation(format!(
                "{what} has {expected} entries but the permutation has length {}",
                self.0.len()
            )));
        }
        Ok(())
    }

    /// Gather `items` through the permutation: output `i` is `items[self[i]]`.
    pub fn apply<T: Clone>(&self, items: &[T]) -> Result<Vec<T>> {
        self.ensure_len(items.len(), "sequence")?;
        Ok(self.0.iter().map(|&k| items[k].clone()).collect())
    }
}

impl fmt::Debug for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Permutation({:?})", self.0)
    }
}

impl TryFrom<Vec<usize>> for Permutation {
    type Error = CoreError;

    fn try_from(indices: Vec<usize>) -> Result<Self> {
        Self::new(indices)
    }
}

impl From<Permutation> for Vec<usize> {
    fn from(permutation: Permutation) -> Self {
        permutation.0
    }
}

impl AsRef<[usize]> for Permutation {
    fn as_ref(&self) -> &[usize] {
        &self.0
    }
}

/// Decode a hex string into exactly `N` bytes.
fn decode_fixed<const N: usize>(s: &str) -> Result<[u8; N]> {
    let bytes = hex::decode(s.trim()).map_err(|e| CoreError::InvalidHex(e.to_string()))?;
    bytes.as_slice().try_into().map_err(|_| {
        CoreError::InvalidHex(format!("expected {N} bytes, got {}", bytes.len()))
    })
}

/// A TEA key: four big-endian 16-bit words (8 bytes).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BlockKey(pub [u8; 8]);

impl BlockKey {
    /// Create a key from raw bytes.
    pub const fn from_bytes(bytes: [u8; 8]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }

    /// The key split into its four round words.
    pub fn words(&self) -> [u16; 4] {
        let b = &self.0;
        [
            u16::from_be_bytes([b[0], b[1]]),
            u16::from_be_bytes([b[2], b[3]]),
            u16::from_be_bytes([b[4], b[5]]),
            u16::from_be_bytes([b[6], b[7]]),
        ]
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self> {
        decode_fixed(s).map(Self)
    }
}

impl fmt::Debug for BlockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockKey({})", self.to_hex())
    }
}

impl fmt::Display for BlockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl TryFrom<String> for BlockKey {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self> {
        Self::from_hex(&s)
    }
}

impl From<BlockKey> for String {
    fn from(key: BlockKey) -> Self {
        key.to_hex()
    }
}

/// A CFB initialization vector: one 4-byte block.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Iv(pub [u8; 4]);

impl Iv {
    /// Create an IV from raw bytes.
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self> {
        decode_fixed(s).map(Self)
    }

    /// The all-zero IV.
    pub const ZERO: Self = Self([0u8; 4]);
}

impl fmt::Debug for Iv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Iv({})", self.to_hex())
    }
}

impl TryFrom<String> for Iv {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self> {
        Self::from_hex(&s)
    }
}

impl From<Iv> for String {
    fn from(iv: Iv) -> Self {
        iv.to_hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permutation_rejects_duplicates() {
        let err = Permutation::new(vec![0, 1, 1]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidPermutation(_)));
    }

    #[test]
    fn test_permutation_rejects_out_of_range() {
        assert!(Permutation::new(vec![0, 3, 1]).is_err());
    }

    #[test]
    fn test_permutation_rejects_empty() {
        assert!(Permutation::new(vec![]).is_err());
        assert!(Permutation::identity(0).is_err());
    }

    #[test]
    fn test_permutation_inverse() {
        let p = Permutation::new(vec![2, 0, 3, 1]).unwrap();
        assert_eq!(p.inverse().as_slice(), &[1, 3, 0, 2]);
        assert_eq!(p.inverse().inverse(), p);
    }

    #[test]
    fn test_permutation_apply_gathers() {
        let p = Permutation::new(vec![2, 0, 1]).unwrap();
        assert_eq!(p.apply(&['a', 'b', 'c']).unwrap(), vec!['c', 'a', 'b']);
        assert!(p.apply(&['a', 'b']).is_err());
    }

    #[test]
    fn test_permutation_serde_validates() {
        let p: Permutation = serde_json::from_str("[1, 0, 2]").unwrap();
        assert_eq!(p.as_slice(), &[1, 0, 2]);
        assert!(serde_json::from_str::<Permutation>("[1, 1, 2]").is_err());
    }

    #[test]
    fn test_block_key_hex_roundtrip() {
        let key = BlockKey::from_hex("0a0bf4f2fafb0402").unwrap();
        assert_eq!(key.words(), [0x0A0B, 0xF4F2, 0xFAFB, 0x0402]);
        assert_eq!(key.to_hex(), "0a0bf4f2fafb0402");
    }

    #[test]
    fn test_block_key_wrong_length() {
        assert!(matches!(
            BlockKey::from_hex("0a0b"),
            Err(CoreError::InvalidHex(_))
        ));
        assert!(Iv::from_hex("zzzzzzzz").is_err());
    }

    #[test]
    fn test_iv_serde_as_hex() {
        let iv = Iv::from_bytes([0xde, 0xad, 0xbe, 0xef]);
        let json = serde_json::to_string(&iv).unwrap();
        assert_eq!(json, "\"deadbeef\"");
        let back: Iv = serde_json::from_str(&json).unwrap();
        assert_eq!(back, iv);
    }
}
