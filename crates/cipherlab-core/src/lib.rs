//! # Cipherlab Core
//!
//! Pure transforms for a teaching toolkit of classical and modern ciphers.
//!
//! This crate contains no I/O, no logging and no key generation. Every
//! operation is a deterministic function of its input and key material.
//!
//! ## Ciphers
//!
//! - [`classical`] - Shift, simple substitution and codebook lookup
//! - [`transposition`] - Double transposition over a character matrix
//! - [`election`] - Word-level block transposition with prefix binding
//! - [`rc4`] - RC4 generalized to `n`-bit words
//! - [`tea`] - TEA on 16-bit words, ECB and CFB, with bitmap pass-through
//! - [`knapsack`] - Merkle-Hellman knapsack
//!
//! ## Key Types
//!
//! - [`Permutation`] - Validated bijection on `0..len`
//! - [`BlockKey`] / [`Iv`] - TEA key and CFB initialization vector
//! - [`WordWidth`] / [`KeyBits`] - Stream cipher parameters
//! - [`KnapsackKeyPair`] - Public and private knapsack keys

pub mod classical;
pub mod election;
pub mod error;
pub mod knapsack;
pub mod matrix;
pub mod rc4;
pub mod tea;
pub mod text;
pub mod transposition;
pub mod types;

pub use election::ElectionKey;
pub use error::{CoreError, Result};
pub use knapsack::{KnapsackKeyPair, PrivateKey, PublicKey};
pub use matrix::Matrix;
pub use rc4::{KeyBits, StreamState, WordWidth};
pub use tea::Mode;
pub use text::PrefixSet;
pub use transposition::TranspositionKey;
pub use types::{BlockKey, Iv, Permutation};
