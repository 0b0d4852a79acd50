//! Proptest generators for property-based testing.

use proptest::prelude::*;

use cipherlab_core::{
    BlockKey, Iv, KeyBits, KnapsackKeyPair, Permutation, Result, TranspositionKey, WordWidth,
};

/// Generate a permutation of length `1..=max`.
pub fn permutation(max: usize) -> impl Strategy<Value = Permutation> {
    (1..=max.max(1)).prop_flat_map(permutation_of)
}

/// Generate a permutation of exactly `len` elements.
pub fn permutation_of(len: usize) -> impl Strategy<Value = Permutation> {
    Just((0..len).collect::<Vec<_>>())
        .prop_shuffle()
        .prop_filter_map("non-empty permutation", |v| Permutation::new(v).ok())
}

/// Generate lowercase ASCII text without whitespace.
pub fn lowercase_text(max_len: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(b'a'..=b'z', 0..=max_len)
        .prop_map(|bytes| bytes.into_iter().map(char::from).collect())
}

/// Generate space-separated lowercase words.
pub fn words(max_words: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{1,8}", 0..=max_words)
}

/// Generate a random TEA key.
pub fn block_key() -> impl Strategy<Value = BlockKey> {
    any::<[u8; 8]>().prop_map(BlockKey::from_bytes)
}

/// Generate a random CFB initialization vector.
pub fn iv() -> impl Strategy<Value = Iv> {
    any::<[u8; 4]>().prop_map(Iv::from_bytes)
}

/// Generate a stream cipher word width in `1..=max`.
pub fn word_width(max: u32) -> impl Strategy<Value = WordWidth> {
    (1..=max.max(1)).prop_filter_map("supported width", |bits| WordWidth::new(bits).ok())
}

/// Generate a binary key of `1..=max_len` bits.
pub fn key_bits(max_len: usize) -> impl Strategy<Value = KeyBits> {
    prop::collection::vec(any::<bool>(), 1..=max_len.max(1)).prop_filter_map(
        "binary key",
        |bits| {
            let text: String = bits.iter().map(|&b| if b { '1' } else { '0' }).collect();
            KeyBits::new(text).ok()
        },
    )
}

/// Payload bytes of at most `max_len`.
pub fn payload(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

/// Merkle-Hellman key material satisfying every key invariant.
#[derive(Debug, Clone)]
pub struct KnapsackParams {
    /// Superincreasing private sequence.
    pub p: Vec<u64>,
    /// Multiplier, coprime to `n`.
    pub m: u64,
    /// Modulus, larger than `sum(p)`.
    pub n: u64,
}

impl KnapsackParams {
    /// Derive the key pair.
    pub fn key_pair(&self) -> Result<KnapsackKeyPair> {
        KnapsackKeyPair::derive(&self.p, self.m, self.n)
    }
}

/// Generate knapsack parameters with a sequence of `1..=max_len` elements.
pub fn knapsack_params(max_len: usize) -> impl Strategy<Value = KnapsackParams> {
    prop::collection::vec(0u64..64, 1..=max_len.clamp(1, 40))
        .prop_map(|gaps| {
            let mut sum = 0u64;
            gaps.into_iter()
                .map(|gap| {
                    let next = sum + 1 + gap;
                    sum += next;
                    next
                })
                .collect::<Vec<_>>()
        })
        .prop_flat_map(|p| {
            let sum: u64 = p.iter().sum();
            (Just(p), (sum + 2)..(sum + 2000))
        })
        .prop_flat_map(|(p, n)| (Just(p), 2..n.min(5000), Just(n)))
        .prop_filter_map("multiplier coprime to modulus", |(p, m, n)| {
            (gcd(m, n) == 1).then_some(KnapsackParams { p, m, n })
        })
}

impl Arbitrary for KnapsackParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        knapsack_params(16).boxed()
    }
}

/// A transposition key together with text that exactly fills its matrix.
#[derive(Debug, Clone)]
pub struct TranspositionParams {
    pub key: TranspositionKey,
    pub text: String,
}

impl Arbitrary for TranspositionParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (1usize..=8, 1usize..=8, any::<bool>())
            .prop_flat_map(|(columns, rows, column_first)| {
                let (first, second) = if column_first {
                    (columns, rows)
                } else {
                    (rows, columns)
                };
                (
                    permutation_of(first),
                    permutation_of(second),
                    prop::collection::vec(b'a'..=b'z', columns * rows),
                )
                    .prop_map(move |(per1, per2, text)| TranspositionParams {
                        key: TranspositionKey {
                            columns,
                            column_first,
                            per1,
                            per2,
                        },
                        text: text.into_iter().map(char::from).collect(),
                    })
            })
            .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cipherlab::{
        Cipher, CipherConfig, KnapsackConfig, Payload, Rc4Config, TeaConfig, TeaMode,
    };

    proptest! {
        #[test]
        fn test_knapsack_params_derive(params: KnapsackParams) {
            prop_assert!(params.key_pair().is_ok());
        }

        #[test]
        fn test_knapsack_engine_roundtrip(params: KnapsackParams, data in payload(32)) {
            // keys shorter than a byte only carry values that fit them
            let mask = match params.p.len() {
                len if len >= 8 => 0xFF,
                len => (1u8 << len) - 1,
            };
            let data: Vec<u8> = data.into_iter().map(|b| b & mask).collect();
            let cipher = Cipher::new(CipherConfig::Knapsack(KnapsackConfig {
                p: params.p.clone(),
                m: params.m,
                n: params.n,
                bytes_per_block: 1,
            })).unwrap();
            let ct = cipher.encrypt(Payload::Bytes(data.clone())).unwrap();
            prop_assert_eq!(ct.len(), data.len());
            prop_assert_eq!(cipher.decrypt(ct).unwrap(), Payload::Bytes(data));
        }

        #[test]
        fn test_transposition_engine_roundtrip(params: TranspositionParams) {
            let cipher = Cipher::new(CipherConfig::DoubleTransposition(params.key.clone())).unwrap();
            let ct = cipher.encrypt(Payload::Text(params.text.clone())).unwrap();
            prop_assert_eq!(ct.len(), params.text.len());
            prop_assert_eq!(cipher.decrypt(ct).unwrap(), Payload::Text(params.text));
        }

        #[test]
        fn test_shift_decrypt_inverts(text in lowercase_text(64), offset in any::<i64>()) {
            let cipher = Cipher::new(CipherConfig::Shift { offset }).unwrap();
            let ct = cipher.encrypt(Payload::Text(text.clone())).unwrap();
            prop_assert_eq!(cipher.decrypt(ct).unwrap(), Payload::Text(text));
        }

        #[test]
        fn test_rc4_engine_roundtrip(
            width in word_width(8),
            key in key_bits(32),
            data in payload(64),
        ) {
            let cipher = Cipher::new(CipherConfig::Rc4(Rc4Config { word_width: width, key })).unwrap();
            let ct = cipher.encrypt(Payload::Bytes(data.clone())).unwrap();
            prop_assert_eq!(cipher.decrypt(ct).unwrap(), Payload::Bytes(data));
        }

        #[test]
        fn test_tea_ecb_whole_blocks_roundtrip(
            key in block_key(),
            blocks in prop::collection::vec(any::<[u8; 4]>(), 0..16),
        ) {
            let data: Vec<u8> = blocks.concat();
            let cipher = Cipher::new(CipherConfig::Tea(TeaConfig {
                key,
                iv: None,
                mode: TeaMode::Ecb,
                image: false,
            })).unwrap();
            let ct = cipher.encrypt(Payload::Bytes(data.clone())).unwrap();
            prop_assert_eq!(cipher.decrypt(ct).unwrap(), Payload::Bytes(data));
        }

        #[test]
        fn test_tea_cfb_roundtrip(key in block_key(), iv in iv(), data in payload(64)) {
            let cipher = Cipher::new(CipherConfig::Tea(TeaConfig {
                key,
                iv: Some(iv),
                mode: TeaMode::Cfb,
                image: false,
            })).unwrap();
            let ct = cipher.encrypt(Payload::Bytes(data.clone())).unwrap();
            prop_assert_eq!(ct.len(), data.len());
            prop_assert_eq!(cipher.decrypt(ct).unwrap(), Payload::Bytes(data));
        }

        #[test]
        fn test_election_whole_blocks_roundtrip(p in permutation(6), ws in words(24)) {
            let whole = ws.len() - ws.len() % p.len();
            let text = ws[..whole].join(" ");
            let cipher = Cipher::new(CipherConfig::Election(
                cipherlab::ElectionKey::new(p),
            )).unwrap();
            let ct = cipher.encrypt(Payload::Text(text.clone())).unwrap();
            prop_assert_eq!(cipher.decrypt(ct).unwrap(), Payload::Text(text));
        }
    }
}
