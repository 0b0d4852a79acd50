//! The election cipher: a word-level block transposition.
//!
//! Text is cut into word tokens (with prefixes such as "san" or "st" fused
//! to the following word), the token list is cyclically padded to a whole
//! number of blocks, and the tokens inside each block are permuted.
//!
//! Padding repeats tokens from the start of the message, so decrypting a
//! padded ciphertext gives back the original words followed by those
//! repeated tokens. That is how the cipher has always behaved and callers
//! rely on it; it is not stripped here.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::text::{pad_cyclic, tokenize, PrefixSet};
use crate::types::Permutation;

/// Key for the election cipher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionKey {
    pub permutation: Permutation,
    #[serde(default)]
    pub prefixes: PrefixSet,
}

impl ElectionKey {
    /// Key without any prefixes.
    pub fn new(permutation: Permutation) -> Self {
        Self {
            permutation,
            prefixes: PrefixSet::new(),
        }
    }

    /// Key with the given prefixes.
    pub fn with_prefixes(permutation: Permutation, prefixes: PrefixSet) -> Self {
        Self {
            permutation,
            prefixes,
        }
    }

    /// The key that decrypts what this key encrypts.
    pub fn inverse(&self) -> Self {
        Self {
            permutation: inverse_key(&self.permutation),
            prefixes: self.prefixes.clone(),
        }
    }
}

/// Permute the tokens of `text` block by block.
pub fn encrypt(
    text: &str,
    permutation: &Permutation,
    prefixes: Option<&PrefixSet>,
) -> Result<String> {
    let empty = PrefixSet::new();
    let tokens = tokenize(text, prefixes.unwrap_or(&empty));
    let padded = pad_cyclic(&tokens, permutation.len());

    let mut out = Vec::with_capacity(padded.len());
    for block in padded.chunks(permutation.len()) {
        out.extend(permutation.apply(block)?);
    }
    Ok(out.join(" "))
}

/// Encrypt with the inverse permutation.
pub fn decrypt(
    text: &str,
    permutation: &Permutation,
    prefixes: Option<&PrefixSet>,
) -> Result<String> {
    encrypt(text, &inverse_key(permutation), prefixes)
}

/// `inverse[i]` is the index of `i` in `permutation`.
pub fn inverse_key(permutation: &Permutation) -> Permutation {
    permutation.inverse()
}

/// Encrypt with an [`ElectionKey`].
pub fn encrypt_with(text: &str, key: &ElectionKey) -> Result<String> {
    encrypt(text, &key.permutation, Some(&key.prefixes))
}

/// Decrypt with an [`ElectionKey`].
pub fn decrypt_with(text: &str, key: &ElectionKey) -> Result<String> {
    decrypt(text, &key.permutation, Some(&key.prefixes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn perm(indices: &[usize]) -> Permutation {
        Permutation::new(indices.to_vec()).unwrap()
    }

    #[test]
    fn test_encrypt_blocks() {
        let p = perm(&[2, 0, 1]);
        let ct = encrypt("one two three four five six", &p, None).unwrap();
        assert_eq!(ct, "three one two six four five");
    }

    #[test]
    fn test_roundtrip_without_padding() {
        let p = perm(&[2, 0, 1]);
        let pt = "one two three four five six";
        let ct = encrypt(pt, &p, None).unwrap();
        assert_eq!(decrypt(&ct, &p, None).unwrap(), pt);
    }

    #[test]
    fn test_padding_repeats_leading_tokens() {
        let p = perm(&[1, 0, 2]);
        let ct = encrypt("a b c d", &p, None).unwrap();
        // padded to: a b c d a b
        assert_eq!(ct, "b a c a d b");
        assert_eq!(decrypt(&ct, &p, None).unwrap(), "a b c d a b");
    }

    #[test]
    fn test_prefixes_travel_together() {
        let p = perm(&[1, 0]);
        let prefixes: PrefixSet = ["san", "st"].into_iter().collect();
        let ct = encrypt("vote San Jose, St. Paul", &p, Some(&prefixes)).unwrap();
        assert_eq!(ct, "San Jose, vote vote St. Paul");
    }

    #[test]
    fn test_inverse_key() {
        assert_eq!(inverse_key(&perm(&[2, 0, 1])).as_slice(), &[1, 2, 0]);
    }

    #[test]
    fn test_key_struct_roundtrip() {
        let prefixes: PrefixSet = ["van"].into_iter().collect();
        let key = ElectionKey::with_prefixes(perm(&[3, 2, 0, 1]), prefixes);
        let pt = "ludwig van beethoven wrote nine symphonies in total sum";
        let ct = encrypt_with(pt, &key).unwrap();
        assert_eq!(decrypt_with(&ct, &key).unwrap(), pt);
        assert_eq!(encrypt_with(&ct, &key.inverse()).unwrap(), pt);
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(encrypt("   ", &perm(&[1, 0]), None).unwrap(), "");
    }

    fn permutation(max: usize) -> impl Strategy<Value = Permutation> {
        (1..=max)
            .prop_flat_map(|n| Just((0..n).collect::<Vec<_>>()).prop_shuffle())
            .prop_map(|v| Permutation::new(v).unwrap())
    }

    proptest! {
        #[test]
        fn test_inverse_key_is_involution(p in permutation(12)) {
            prop_assert_eq!(inverse_key(&inverse_key(&p)), p);
        }

        #[test]
        fn test_roundtrip_whole_blocks(
            p in permutation(6),
            words in prop::collection::vec("[a-z]{1,8}", 0..30),
        ) {
            let whole = words.len() - words.len() % p.len();
            let pt = words[..whole].join(" ");
            let ct = encrypt(&pt, &p, None).unwrap();
            prop_assert_eq!(decrypt(&ct, &p, None).unwrap(), pt);
        }
    }
}
