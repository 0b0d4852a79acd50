//! Golden test vectors for deterministic verification.
//!
//! Every vector pairs a tagged cipher configuration with an input and the
//! ciphertext any correct implementation must produce for it.

use cipherlab::{Cipher, CipherConfig, Payload};
use serde::{Serialize, Serializer};

/// An input or output value of a vector.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Sample {
    Text(&'static str),
    /// Bytes, hex encoded.
    Hex(&'static str),
    Digits(&'static [u16]),
    Blocks(&'static [u128]),
}

impl Sample {
    /// The engine payload this sample stands for.
    pub fn to_payload(&self) -> Result<Payload, String> {
        Ok(match *self {
            Self::Text(s) => Payload::Text(s.to_string()),
            Self::Hex(h) => Payload::Bytes(hex::decode(h).map_err(|e| e.to_string())?),
            Self::Digits(d) => Payload::Digits(d.to_vec()),
            Self::Blocks(b) => Payload::Blocks(b.to_vec()),
        })
    }
}

/// A golden test vector.
#[derive(Debug, Clone, Serialize)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Tagged JSON configuration.
    #[serde(serialize_with = "embed_json")]
    pub config: &'static str,
    pub input: Sample,
    /// Expected ciphertext.
    pub expected: Sample,
    /// Whether decrypting `expected` must give back `input`.
    pub inverts: bool,
}

const KEYBOARD_ROWS: &str = r#"{"algorithm": "simple-substitution", "map": [
    ["q", "a"], ["w", "s"], ["e", "d"], ["r", "f"], ["t", "g"],
    ["y", "h"], ["u", "j"], ["i", "k"], ["o", "l"], ["p", ";"]
]}"#;

const CODEBOOK: &str =
    r#"{"algorithm": "codebook", "book": {"februar": "12a69e", "finansija": "247"}}"#;

const TEA_KEY: &str = r#"{"algorithm": "tea", "key": "0a0bf4f2fafb0402"}"#;

const KNAPSACK: &str =
    r#"{"algorithm": "knapsack", "P": [2, 3, 7, 14, 30, 57, 120, 251], "M": 41, "N": 491}"#;

/// Write a JSON string field as the JSON value it contains.
fn embed_json<S: Serializer>(json: &&'static str, serializer: S) -> Result<S::Ok, S::Error> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(serde::ser::Error::custom)?;
    value.serialize(serializer)
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "shift single letter",
            config: r#"{"algorithm": "shift", "offset": 1}"#,
            input: Sample::Text("a"),
            expected: Sample::Text("b"),
            inverts: true,
        },
        GoldenVector {
            name: "shift wraps past z",
            config: r#"{"algorithm": "shift", "offset": 1}"#,
            input: Sample::Text("abyz"),
            expected: Sample::Text("bcza"),
            inverts: true,
        },
        GoldenVector {
            name: "shift negative wraps past a",
            config: r#"{"algorithm": "shift", "offset": -1}"#,
            input: Sample::Text("lazar"),
            expected: Sample::Text("kzyzq"),
            inverts: true,
        },
        GoldenVector {
            name: "shift by two",
            config: r#"{"algorithm": "shift-by-n", "offset": 2}"#,
            input: Sample::Text("abcd"),
            expected: Sample::Text("cdef"),
            inverts: true,
        },
        GoldenVector {
            name: "substitution keyboard row word",
            config: KEYBOARD_ROWS,
            input: Sample::Text("typewriter"),
            expected: Sample::Text("gh;dsfkgdf"),
            inverts: true,
        },
        // 'a', 'n', 's', 'm', 'l' are unmapped, and 'k', 'd', 'f', 'g' are
        // themselves images, so the inverse cannot tell them apart
        GoldenVector {
            name: "substitution partial mapping",
            config: KEYBOARD_ROWS,
            input: Sample::Text("instrumental"),
            expected: Sample::Text("knsgfjmdngal"),
            inverts: false,
        },
        GoldenVector {
            name: "codebook words in sentence",
            config: CODEBOOK,
            input: Sample::Text("februar je mesec finansija"),
            expected: Sample::Text("12a69e je mesec 247"),
            inverts: true,
        },
        GoldenVector {
            name: "codebook ignores case",
            config: CODEBOOK,
            input: Sample::Text("Februar je mesec FiNaNsIjA"),
            expected: Sample::Text("12a69e je mesec 247"),
            inverts: false,
        },
        GoldenVector {
            name: "double transposition row first",
            config: r#"{"algorithm": "double-transposition", "columns": 4, "columnFirst": false,
                        "per1": [2, 0, 1], "per2": [3, 1, 0, 2]}"#,
            input: Sample::Text("attackatdawn"),
            expected: Sample::Text("nadwatattkca"),
            inverts: true,
        },
        GoldenVector {
            name: "election with prefixes",
            config: r#"{"algorithm": "election", "permutation": [1, 0], "prefixes": ["san", "st"]}"#,
            input: Sample::Text("vote San Jose, St. Paul vote"),
            expected: Sample::Text("San Jose, vote vote St. Paul"),
            inverts: true,
        },
        GoldenVector {
            name: "rc4 nibble words",
            config: r#"{"algorithm": "rc4", "wordWidth": 4, "key": "00010110"}"#,
            input: Sample::Hex("6869"),
            expected: Sample::Digits(&[10, 15, 8, 1]),
            inverts: true,
        },
        GoldenVector {
            name: "rc4 three bit words",
            config: r#"{"algorithm": "rc4", "wordWidth": 3, "key": "101"}"#,
            input: Sample::Hex("6869"),
            expected: Sample::Digits(&[4, 5, 5, 5, 3, 2]),
            inverts: true,
        },
        GoldenVector {
            name: "tea reference block",
            config: TEA_KEY,
            input: Sample::Hex("1234abcd"),
            expected: Sample::Hex("7e7cbb0b"),
            inverts: true,
        },
        GoldenVector {
            name: "tea ecb pads short tail",
            config: TEA_KEY,
            input: Sample::Hex("1234abcd00"),
            expected: Sample::Hex("7e7cbb0bc1aef91c"),
            inverts: false,
        },
        GoldenVector {
            name: "knapsack textbook block",
            config: KNAPSACK,
            input: Sample::Hex("96"),
            expected: Sample::Blocks(&[548]),
            inverts: true,
        },
        GoldenVector {
            name: "knapsack zero block",
            config: KNAPSACK,
            input: Sample::Hex("00"),
            expected: Sample::Blocks(&[0]),
            inverts: true,
        },
    ]
}

/// Check one vector: encrypt must match `expected`, and decrypt must give
/// back `input` when the vector says it inverts.
pub fn verify_vector(vector: &GoldenVector) -> Result<(), String> {
    let config = CipherConfig::from_json(vector.config).map_err(|e| e.to_string())?;
    let cipher = Cipher::new(config).map_err(|e| e.to_string())?;
    let input = vector.input.to_payload()?;
    let expected = vector.expected.to_payload()?;

    let ct = cipher.encrypt(input.clone()).map_err(|e| e.to_string())?;
    if ct != expected {
        return Err(format!("expected {expected:?}, got {ct:?}"));
    }
    if vector.inverts {
        let pt = cipher.decrypt(ct).map_err(|e| e.to_string())?;
        if pt != input {
            return Err(format!("decrypted to {pt:?}"));
        }
    }
    Ok(())
}

/// All vectors as a pretty-printed JSON array, for sharing with other
/// implementations.
pub fn export_vectors() -> serde_json::Result<String> {
    serde_json::to_string_pretty(&all_vectors())
}

/// Verify all vectors. Returns `(name, passed, detail)` per vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| match verify_vector(v) {
            Ok(()) => (v.name.to_string(), true, String::from("ok")),
            Err(detail) => (v.name.to_string(), false, detail),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_vectors_pass() {
        for (name, ok, detail) in verify_all_vectors() {
            assert!(ok, "{name}: {detail}");
        }
    }

    #[test]
    fn test_vector_names_unique() {
        let vectors = all_vectors();
        let mut names: Vec<_> = vectors.iter().map(|v| v.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), vectors.len());
    }

    #[test]
    fn test_export_embeds_configs() {
        let json = export_vectors().unwrap();
        let exported: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(exported.len(), all_vectors().len());
        for entry in &exported {
            let config: CipherConfig = serde_json::from_value(entry["config"].clone()).unwrap();
            assert!(Cipher::new(config).is_ok(), "{}", entry["name"]);
        }
        assert_eq!(exported[0]["input"]["kind"], "text");
        assert_eq!(exported[0]["expected"]["value"], "b");
    }

    #[test]
    fn test_wrong_expectation_is_reported() {
        let vector = GoldenVector {
            name: "deliberately wrong",
            config: r#"{"algorithm": "shift", "offset": 1}"#,
            input: Sample::Text("a"),
            expected: Sample::Text("c"),
            inverts: true,
        };
        assert!(verify_vector(&vector).is_err());
    }
}
