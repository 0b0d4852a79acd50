//! # Cipherlab
//!
//! The unified API for cipherlab: configured ciphers over text, bytes,
//! stream digits and knapsack blocks.
//!
//! ## Overview
//!
//! - **Configuration**: [`CipherConfig`] names one algorithm and carries its
//!   key material; [`ConfigFile`] holds a section per algorithm
//! - **Engine**: [`Cipher`] validates key material once and then encrypts or
//!   decrypts [`Payload`]s
//! - **Key generation**: [`TeaKeyMaterial`] draws random TEA keys and IVs
//!
//! ## Usage
//!
//! ```rust
//! use cipherlab::{AlgorithmKind, Cipher, ConfigFile, Payload};
//!
//! let file = ConfigFile::from_json(r#"{"shift-by-n": 3}"#).unwrap();
//! let kind: AlgorithmKind = "ShiftByN".parse().unwrap();
//! let cipher = Cipher::new(file.resolve(kind).unwrap()).unwrap();
//!
//! let ct = cipher.encrypt(Payload::from("attack at dawn")).unwrap();
//! assert_eq!(ct, Payload::from("dwwdfndwgdzq"));
//! ```
//!
//! ## Re-exports
//!
//! - `cipherlab::core` - The pure transforms and key types

pub mod config;
pub mod engine;
pub mod error;
pub mod keygen;

// Re-export the core crate
pub use cipherlab_core as core;

pub use config::{
    AlgorithmKind, CipherConfig, ConfigFile, KnapsackConfig, Rc4Config, TeaConfig, TeaMode,
    DEFAULT_SHIFT_OFFSET,
};
pub use engine::{Cipher, Payload};
pub use error::{LabError, Result};
pub use keygen::TeaKeyMaterial;

// Re-export commonly used core types
pub use cipherlab_core::{
    BlockKey, CoreError, ElectionKey, Iv, KeyBits, KnapsackKeyPair, Permutation, PrefixSet,
    TranspositionKey, WordWidth,
};
