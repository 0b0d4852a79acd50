//! # Cipherlab Testkit
//!
//! Testing utilities for cipherlab.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known inputs with expected ciphertexts for every algorithm,
//!   exportable as JSON
//! - **Generators**: Proptest strategies for key material and plaintexts
//! - **Fixtures**: A sample configuration, bitmap images and mock plaintext
//!
//! ## Golden Vectors
//!
//! ```rust
//! use cipherlab_testkit::vectors::verify_all_vectors;
//!
//! for (name, ok, detail) in verify_all_vectors() {
//!     assert!(ok, "{name}: {detail}");
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use cipherlab_testkit::generators::KnapsackParams;
//!
//! proptest! {
//!     #[test]
//!     fn knapsack_keys_derive(params: KnapsackParams) {
//!         prop_assert!(params.key_pair().is_ok());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use cipherlab::{AlgorithmKind, Payload};
//! use cipherlab_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::with_seed(1);
//! let cipher = fixture.cipher(AlgorithmKind::Tea).unwrap();
//! let ct = cipher.encrypt(Payload::Bytes(fixture.bitmap.clone())).unwrap();
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{bitmap, mock_paragraphs, TestFixture, SAMPLE_CONFIG};
pub use generators::{KnapsackParams, TranspositionParams};
pub use vectors::{
    all_vectors, export_vectors, verify_all_vectors, verify_vector, GoldenVector, Sample,
};
