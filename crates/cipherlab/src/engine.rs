//! The cipher engine: a configured algorithm applied to payloads.
//!
//! Key material is validated and derived once in [`Cipher::new`]; every
//! call to [`Cipher::encrypt`] or [`Cipher::decrypt`] then dispatches once
//! on the algorithm.

use std::collections::HashMap;

use cipherlab_core::{
    classical, election, knapsack, rc4, tea, transposition, BlockKey, CoreError, ElectionKey,
    KeyBits, KnapsackKeyPair, Mode, TranspositionKey, WordWidth,
};

use crate::config::{AlgorithmKind, CipherConfig};
use crate::error::{LabError, Result};

/// A value flowing into or out of a cipher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Text for the classical and transposition ciphers.
    Text(String),
    /// Raw bytes for the stream, block and knapsack ciphers.
    Bytes(Vec<u8>),
    /// `n`-bit stream cipher digits.
    Digits(Vec<u16>),
    /// Knapsack ciphertext integers.
    Blocks(Vec<u128>),
}

impl Payload {
    /// Short name of the variant, for messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytes",
            Self::Digits(_) => "digits",
            Self::Blocks(_) => "blocks",
        }
    }

    /// Number of characters, bytes, digits or blocks.
    pub fn len(&self) -> usize {
        match self {
            Self::Text(s) => s.chars().count(),
            Self::Bytes(b) => b.len(),
            Self::Digits(d) => d.len(),
            Self::Blocks(b) => b.len(),
        }
    }

    /// Whether the payload holds nothing.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<&str> for Payload {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Payload {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Encrypt,
    Decrypt,
}

impl Direction {
    fn as_str(self) -> &'static str {
        match self {
            Self::Encrypt => "encrypt",
            Self::Decrypt => "decrypt",
        }
    }
}

/// Key material after validation and derivation.
#[derive(Debug, Clone)]
enum Prepared {
    Shift(i64),
    Substitution {
        forward: HashMap<char, char>,
        backward: HashMap<char, char>,
    },
    Codebook {
        forward: HashMap<String, String>,
        backward: HashMap<String, String>,
    },
    Transposition(TranspositionKey),
    Election(ElectionKey),
    Rc4 {
        width: WordWidth,
        key: KeyBits,
    },
    Tea {
        key: BlockKey,
        mode: Mode,
        image: bool,
    },
    Knapsack {
        pair: KnapsackKeyPair,
        bytes_per_block: usize,
    },
}

/// A configured cipher, ready to encrypt and decrypt.
#[derive(Debug, Clone)]
pub struct Cipher {
    kind: AlgorithmKind,
    prepared: Prepared,
}

impl Cipher {
    /// Validate `config` and derive its key material.
    pub fn new(config: CipherConfig) -> Result<Self> {
        let kind = config.kind();
        let prepared = match config {
            CipherConfig::Shift { offset } => Prepared::Shift(offset),
            CipherConfig::SimpleSubstitution { map } => {
                let forward: HashMap<char, char> = map.into_iter().collect();
                let backward = classical::invert_substitution(&forward);
                Prepared::Substitution { forward, backward }
            }
            CipherConfig::Codebook { book } => {
                let forward: HashMap<String, String> = book
                    .into_iter()
                    .map(|(word, code)| (word.to_lowercase(), code))
                    .collect();
                let backward = classical::invert_codebook(&forward);
                Prepared::Codebook { forward, backward }
            }
            CipherConfig::DoubleTransposition(key) => Prepared::Transposition(key),
            CipherConfig::Election(key) => Prepared::Election(key),
            CipherConfig::Rc4(rc4) => Prepared::Rc4 {
                width: rc4.word_width,
                key: rc4.key,
            },
            CipherConfig::Tea(config) => Prepared::Tea {
                key: config.key,
                mode: config.chaining()?,
                image: config.image,
            },
            CipherConfig::Knapsack(config) => {
                let pair = KnapsackKeyPair::derive(&config.p, config.m, config.n)?;
                Prepared::Knapsack {
                    pair,
                    bytes_per_block: config.bytes_per_block,
                }
            }
        };
        tracing::debug!(algorithm = %kind, "cipher configured");
        Ok(Self { kind, prepared })
    }

    /// Which algorithm this cipher runs.
    pub fn kind(&self) -> AlgorithmKind {
        self.kind
    }

    /// The derived knapsack keys, if this is a knapsack cipher.
    pub fn knapsack_keys(&self) -> Option<&KnapsackKeyPair> {
        match &self.prepared {
            Prepared::Knapsack { pair, .. } => Some(pair),
            _ => None,
        }
    }

    /// Encrypt a payload.
    pub fn encrypt(&self, payload: Payload) -> Result<Payload> {
        self.run(Direction::Encrypt, payload)
    }

    /// Decrypt a payload produced by [`encrypt`](Self::encrypt).
    pub fn decrypt(&self, payload: Payload) -> Result<Payload> {
        self.run(Direction::Decrypt, payload)
    }

    fn mismatch(&self, direction: Direction, payload: &Payload) -> LabError {
        LabError::Config(format!(
            "{} cannot {} a {} payload",
            self.kind,
            direction.as_str(),
            payload.kind()
        ))
    }

    fn run(&self, direction: Direction, payload: Payload) -> Result<Payload> {
        use Direction::{Decrypt, Encrypt};

        tracing::debug!(
            algorithm = %self.kind,
            direction = direction.as_str(),
            len = payload.len(),
            "dispatch"
        );

        let out = match (&self.prepared, direction, payload) {
            (Prepared::Shift(offset), Encrypt, Payload::Text(text)) => {
                Payload::Text(classical::shift(&text, *offset))
            }
            (Prepared::Shift(offset), Decrypt, Payload::Text(text)) => {
                Payload::Text(classical::shift(&text, classical::inverse_offset(*offset)))
            }

            (Prepared::Substitution { forward, .. }, Encrypt, Payload::Text(text)) => {
                Payload::Text(classical::substitute(&text, forward))
            }
            (Prepared::Substitution { backward, .. }, Decrypt, Payload::Text(text)) => {
                Payload::Text(classical::substitute(&text, backward))
            }

            (Prepared::Codebook { forward, .. }, Encrypt, Payload::Text(text)) => {
                Payload::Text(classical::codebook(&text, forward))
            }
            (Prepared::Codebook { backward, .. }, Decrypt, Payload::Text(text)) => {
                Payload::Text(classical::codebook(&text, backward))
            }

            (Prepared::Transposition(key), Encrypt, Payload::Text(text)) => {
                Payload::Text(transposition::double_transposition(&text, key)?)
            }
            (Prepared::Transposition(key), Decrypt, Payload::Text(text)) => {
                Payload::Text(transposition::reverse(&text, key)?)
            }

            (Prepared::Election(key), Encrypt, Payload::Text(text)) => {
                Payload::Text(election::encrypt_with(&text, key)?)
            }
            (Prepared::Election(key), Decrypt, Payload::Text(text)) => {
                Payload::Text(election::decrypt_with(&text, key)?)
            }

            (Prepared::Rc4 { width, key }, Encrypt, Payload::Bytes(bytes)) => {
                tracing::trace!(bits = width.bits(), sbox = width.size(), "rc4 key schedule");
                Payload::Digits(rc4::encrypt(&bytes, *width, key))
            }
            (Prepared::Rc4 { width, key }, Decrypt, Payload::Digits(digits)) => {
                tracing::trace!(bits = width.bits(), sbox = width.size(), "rc4 key schedule");
                Payload::Bytes(rc4::decrypt(&digits, *width, key))
            }

            (Prepared::Tea { key, mode, image }, direction, Payload::Bytes(bytes)) => {
                tracing::trace!(
                    blocks = bytes.len().div_ceil(tea::BLOCK_LEN),
                    image = *image,
                    "tea"
                );
                let out = match direction {
                    Encrypt => tea::encrypt(&bytes, key, *mode, *image)?,
                    Decrypt => tea::decrypt(&bytes, key, *mode, *image)?,
                };
                Payload::Bytes(out)
            }

            (
                Prepared::Knapsack {
                    pair,
                    bytes_per_block,
                },
                Encrypt,
                Payload::Bytes(bytes),
            ) => {
                let blocks = knapsack::encrypt_with(&bytes, *bytes_per_block, &pair.public)?;
                tracing::trace!(blocks = blocks.len(), "knapsack encrypted");
                Payload::Blocks(blocks)
            }
            (
                Prepared::Knapsack {
                    pair,
                    bytes_per_block,
                },
                Decrypt,
                Payload::Blocks(blocks),
            ) => {
                tracing::trace!(blocks = blocks.len(), "knapsack decrypt");
                match knapsack::decrypt_with(&blocks, *bytes_per_block, &pair.private) {
                    Ok(bytes) => Payload::Bytes(bytes),
                    Err(e @ CoreError::DecodeFailure { .. }) => {
                        tracing::warn!("knapsack block failed to decode: {}", e);
                        return Err(e.into());
                    }
                    Err(e) => return Err(e.into()),
                }
            }

            (_, direction, payload) => return Err(self.mismatch(direction, &payload)),
        };
        Ok(out)
    }
}
