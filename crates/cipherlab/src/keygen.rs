//! TEA key material generation.
//!
//! The core never produces keys; this module draws a random key and IV and
//! hands them back in the hex form configuration files use.

use cipherlab_core::{BlockKey, Iv};
use rand::Rng;
use serde::Serialize;

use crate::config::{CipherConfig, TeaConfig, TeaMode};

/// A freshly generated TEA key and IV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TeaKeyMaterial {
    pub key: BlockKey,
    pub iv: Iv,
}

impl TeaKeyMaterial {
    /// Generate from the thread-local RNG.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        Self::generate_with(&mut rng)
    }

    /// Generate from the given RNG.
    pub fn generate_with<R: Rng>(rng: &mut R) -> Self {
        let key: [u8; 8] = rng.gen();
        let iv: [u8; 4] = rng.gen();
        Self {
            key: BlockKey::from_bytes(key),
            iv: Iv::from_bytes(iv),
        }
    }

    /// A TEA configuration using this key material.
    pub fn to_config(&self, mode: TeaMode, image: bool) -> CipherConfig {
        CipherConfig::Tea(TeaConfig {
            key: self.key,
            iv: Some(self.iv),
            mode,
            image,
        })
    }

    /// The key and IV as a JSON object of hex strings.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
