//! Cipher configuration.
//!
//! [`CipherConfig`] is the closed set of algorithms, each variant carrying
//! its own strongly typed key material. It is tagged by an `"algorithm"`
//! field when read from JSON. [`ConfigFile`] is the multi-algorithm document
//! with one optional section per algorithm; it is resolved to a single
//! `CipherConfig` once, at the boundary.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use cipherlab_core::{
    BlockKey, ElectionKey, Iv, KeyBits, Mode, TranspositionKey, WordWidth,
};
use serde::{Deserialize, Serialize};

use crate::error::{LabError, Result};

/// Shift offset used when no algorithm is named.
pub const DEFAULT_SHIFT_OFFSET: i64 = 3;

/// The supported algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AlgorithmKind {
    #[default]
    Shift,
    SimpleSubstitution,
    Codebook,
    DoubleTransposition,
    Election,
    Rc4,
    Tea,
    Knapsack,
}

impl AlgorithmKind {
    /// Every algorithm, in a stable order.
    pub const ALL: [Self; 8] = [
        Self::Shift,
        Self::SimpleSubstitution,
        Self::Codebook,
        Self::DoubleTransposition,
        Self::Election,
        Self::Rc4,
        Self::Tea,
        Self::Knapsack,
    ];

    /// Canonical kebab-case name, as used for the `"algorithm"` tag.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Shift => "shift",
            Self::SimpleSubstitution => "simple-substitution",
            Self::Codebook => "codebook",
            Self::DoubleTransposition => "double-transposition",
            Self::Election => "election",
            Self::Rc4 => "rc4",
            Self::Tea => "tea",
            Self::Knapsack => "knapsack",
        }
    }

    /// Key of this algorithm's section in a [`ConfigFile`].
    pub fn section(&self) -> &'static str {
        match self {
            Self::Shift => "shift-by-n",
            other => other.name(),
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `ShiftByN` and `shiftByN` become `shift-by-n`; runs of capitals stay
/// together, so `RC4` becomes `rc4`.
fn to_kebab(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;
    for c in name.trim().chars() {
        if c == '_' || c == ' ' {
            out.push('-');
        } else if c.is_ascii_uppercase() {
            if prev.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit()) {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
        prev = Some(c);
    }
    out
}

impl FromStr for AlgorithmKind {
    type Err = LabError;

    /// Accepts kebab-case, camelCase and CapitalCamelCase spellings along
    /// with a few historical aliases.
    fn from_str(s: &str) -> Result<Self> {
        let kind = match to_kebab(s).as_str() {
            "shift" | "shift-by-n" | "caesar" => Self::Shift,
            "simple-substitution" | "substitution" => Self::SimpleSubstitution,
            "codebook" | "codebook-cypher" | "codebook-cipher" => Self::Codebook,
            "double-transposition" | "transposition" => Self::DoubleTransposition,
            "election" | "election-cipher" | "election-cypher" => Self::Election,
            "rc4" => Self::Rc4,
            "tea" => Self::Tea,
            "knapsack" | "merkle-hellman" => Self::Knapsack,
            _ => {
                return Err(LabError::Config(format!(
                    "algorithm {s:?} is not supported"
                )))
            }
        };
        Ok(kind)
    }
}

/// Stream cipher settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rc4Config {
    #[serde(alias = "n")]
    pub word_width: WordWidth,
    pub key: KeyBits,
}

/// TEA chaining mode as written in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TeaMode {
    #[default]
    Ecb,
    Cfb,
}

/// TEA settings. Key and IV are hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeaConfig {
    pub key: BlockKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iv: Option<Iv>,
    #[serde(default)]
    pub mode: TeaMode,
    #[serde(default)]
    pub image: bool,
}

impl TeaConfig {
    /// The core chaining mode. CFB needs an IV.
    pub fn chaining(&self) -> Result<Mode> {
        match (self.mode, self.iv) {
            (TeaMode::Ecb, _) => Ok(Mode::Ecb),
            (TeaMode::Cfb, Some(iv)) => Ok(Mode::Cfb(iv)),
            (TeaMode::Cfb, None) => Err(LabError::Config(
                "tea in cfb mode needs an iv".into(),
            )),
        }
    }
}

fn default_bytes_per_block() -> usize {
    1
}

/// Merkle-Hellman settings: the private sequence, multiplier and modulus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnapsackConfig {
    #[serde(alias = "P")]
    pub p: Vec<u64>,
    #[serde(alias = "M")]
    pub m: u64,
    #[serde(alias = "N")]
    pub n: u64,
    #[serde(default = "default_bytes_per_block", alias = "bytes")]
    pub bytes_per_block: usize,
}

/// One configured algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "algorithm", rename_all = "kebab-case")]
pub enum CipherConfig {
    #[serde(alias = "shift-by-n")]
    Shift { offset: i64 },
    SimpleSubstitution { map: Vec<(char, char)> },
    Codebook { book: HashMap<String, String> },
    DoubleTransposition(TranspositionKey),
    Election(ElectionKey),
    Rc4(Rc4Config),
    Tea(TeaConfig),
    Knapsack(KnapsackConfig),
}

impl Default for CipherConfig {
    fn default() -> Self {
        Self::Shift {
            offset: DEFAULT_SHIFT_OFFSET,
        }
    }
}

impl CipherConfig {
    /// Parse a single tagged configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Which algorithm this configures.
    pub fn kind(&self) -> AlgorithmKind {
        match self {
            Self::Shift { .. } => AlgorithmKind::Shift,
            Self::SimpleSubstitution { .. } => AlgorithmKind::SimpleSubstitution,
            Self::Codebook { .. } => AlgorithmKind::Codebook,
            Self::DoubleTransposition(_) => AlgorithmKind::DoubleTransposition,
            Self::Election(_) => AlgorithmKind::Election,
            Self::Rc4(_) => AlgorithmKind::Rc4,
            Self::Tea(_) => AlgorithmKind::Tea,
            Self::Knapsack(_) => AlgorithmKind::Knapsack,
        }
    }
}

/// A configuration document with one optional section per algorithm.
///
/// ```json
/// {
///   "shift-by-n": 3,
///   "simple-substitution": [["a", "q"], ["b", "w"]],
///   "tea": { "key": "0a0bf4f2fafb0402", "iv": "01020304", "mode": "cfb" }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConfigFile {
    #[serde(default, alias = "shift", skip_serializing_if = "Option::is_none")]
    pub shift_by_n: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simple_substitution: Option<Vec<(char, char)>>,
    #[serde(default, alias = "codebook-cypher", skip_serializing_if = "Option::is_none")]
    pub codebook: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub double_transposition: Option<TranspositionKey>,
    #[serde(default, alias = "election-cipher", skip_serializing_if = "Option::is_none")]
    pub election: Option<ElectionKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rc4: Option<Rc4Config>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tea: Option<TeaConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub knapsack: Option<KnapsackConfig>,
}

impl ConfigFile {
    /// Parse a configuration document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// The configuration for `kind`, or a `Config` error if its section is
    /// absent.
    pub fn resolve(&self, kind: AlgorithmKind) -> Result<CipherConfig> {
        let config = match kind {
            AlgorithmKind::Shift => self
                .shift_by_n
                .map(|offset| CipherConfig::Shift { offset }),
            AlgorithmKind::SimpleSubstitution => self
                .simple_substitution
                .clone()
                .map(|map| CipherConfig::SimpleSubstitution { map }),
            AlgorithmKind::Codebook => self
                .codebook
                .clone()
                .map(|book| CipherConfig::Codebook { book }),
            AlgorithmKind::DoubleTransposition => self
                .double_transposition
                .clone()
                .map(CipherConfig::DoubleTransposition),
            AlgorithmKind::Election => self.election.clone().map(CipherConfig::Election),
            AlgorithmKind::Rc4 => self.rc4.clone().map(CipherConfig::Rc4),
            AlgorithmKind::Tea => self.tea.clone().map(CipherConfig::Tea),
            AlgorithmKind::Knapsack => self.knapsack.clone().map(CipherConfig::Knapsack),
        };
        config.ok_or_else(|| {
            LabError::Config(format!("no {:?} section in configuration", kind.section()))
        })
    }

    /// Like [`resolve`](Self::resolve), but with no algorithm named falls
    /// back to the shift cipher, using the file's offset when it has one.
    pub fn resolve_or_default(&self, kind: Option<AlgorithmKind>) -> Result<CipherConfig> {
        match kind {
            Some(kind) => self.resolve(kind),
            None => Ok(CipherConfig::Shift {
                offset: self.shift_by_n.unwrap_or(DEFAULT_SHIFT_OFFSET),
            }),
        }
    }
}
