//! Golden test vectors, checked end to end through the configured engine.
//!
//! Each vector is a JSON cipher configuration, an input and the expected
//! ciphertext. Vectors survive a trip through JSON so they can be shared
//! with other implementations.

use cipherlab::{Cipher, CipherConfig, Payload};
use serde::{Deserialize, Serialize};

/// Serializable form of a payload. Bytes are hex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
enum Sample {
    Text(String),
    Hex(String),
    Digits(Vec<u16>),
    Blocks(Vec<u64>),
}

impl Sample {
    fn to_payload(&self) -> anyhow::Result<Payload> {
        Ok(match self {
            Self::Text(s) => Payload::Text(s.clone()),
            Self::Hex(h) => Payload::Bytes(hex::decode(h)?),
            Self::Digits(d) => Payload::Digits(d.clone()),
            Self::Blocks(b) => Payload::Blocks(b.iter().map(|&v| u128::from(v)).collect()),
        })
    }
}

/// A single golden test vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GoldenVector {
    name: String,
    config: serde_json::Value,
    input: Sample,
    expected: Sample,
    /// Whether decrypting `expected` gives back `input` exactly.
    inverts: bool,
}

fn vector(
    name: &str,
    config: serde_json::Value,
    input: Sample,
    expected: Sample,
    inverts: bool,
) -> GoldenVector {
    GoldenVector {
        name: name.to_string(),
        config,
        input,
        expected,
        inverts,
    }
}

fn text(s: &str) -> Sample {
    Sample::Text(s.to_string())
}

fn hex_sample(s: &str) -> Sample {
    Sample::Hex(s.to_string())
}

fn generate_all_vectors() -> Vec<GoldenVector> {
    use serde_json::json;

    vec![
        // Whitespace is stripped, so decryption cannot restore it
        vector(
            "shift_default_offset",
            json!({"algorithm": "shift", "offset": 3}),
            text("attack at dawn"),
            text("dwwdfndwgdzq"),
            false,
        ),
        vector(
            "shift_negative_wraps",
            json!({"algorithm": "shift-by-n", "offset": -1}),
            text("a"),
            text("z"),
            true,
        ),
        vector(
            "simple_substitution_keyboard",
            json!({
                "algorithm": "simple-substitution",
                "map": [["t", "g"], ["y", "h"], ["p", ";"], ["e", "d"]]
            }),
            text("type"),
            text("gh;d"),
            true,
        ),
        vector(
            "codebook_lookup",
            json!({"algorithm": "codebook", "book": {"februar": "12a69e", "finansija": "247"}}),
            text("februar finansija"),
            text("12a69e 247"),
            true,
        ),
        vector(
            "double_transposition_column_first",
            json!({
                "algorithm": "double-transposition",
                "columns": 4,
                "columnFirst": true,
                "per1": [3, 1, 0, 2],
                "per2": [2, 0, 1]
            }),
            text("attackatdawn"),
            text("nadwatattkca"),
            true,
        ),
        vector(
            "election_three_word_blocks",
            json!({"algorithm": "election", "permutation": [2, 0, 1]}),
            text("one two three four five six"),
            text("three one two six four five"),
            true,
        ),
        vector(
            "rc4_nibble",
            json!({"algorithm": "rc4", "wordWidth": 4, "key": "00010110"}),
            hex_sample("6869"),
            Sample::Digits(vec![10, 15, 8, 1]),
            true,
        ),
        // "hi" is 16 bits, padded to 18 in 3-bit digits
        vector(
            "rc4_three_bit",
            json!({"algorithm": "rc4", "n": 3, "key": "101"}),
            hex_sample("6869"),
            Sample::Digits(vec![4, 5, 5, 5, 3, 2]),
            true,
        ),
        vector(
            "tea_ecb_single_block",
            json!({"algorithm": "tea", "key": "0a0bf4f2fafb0402"}),
            hex_sample("1234abcd"),
            hex_sample("7e7cbb0b"),
            true,
        ),
        vector(
            "tea_ecb_zero_block",
            json!({"algorithm": "tea", "key": "0a0bf4f2fafb0402", "mode": "ecb"}),
            hex_sample("00000000"),
            hex_sample("c1aef91c"),
            true,
        ),
        vector(
            "knapsack_textbook",
            json!({"algorithm": "knapsack", "P": [2, 3, 7, 14, 30, 57, 120, 251], "M": 41, "N": 491}),
            hex_sample("96"),
            Sample::Blocks(vec![548]),
            true,
        ),
    ]
}

fn check(v: &GoldenVector) -> anyhow::Result<()> {
    let config: CipherConfig = serde_json::from_value(v.config.clone())?;
    let cipher = Cipher::new(config)?;

    let ct = cipher.encrypt(v.input.to_payload()?)?;
    anyhow::ensure!(ct == v.expected.to_payload()?, "{}: got {:?}", v.name, ct);

    if v.inverts {
        let pt = cipher.decrypt(ct)?;
        anyhow::ensure!(pt == v.input.to_payload()?, "{}: decrypted to {:?}", v.name, pt);
    }
    Ok(())
}

#[test]
fn test_vectors_verify() -> anyhow::Result<()> {
    for v in &generate_all_vectors() {
        check(v)?;
    }
    Ok(())
}

#[test]
fn test_vector_names_unique() {
    let vectors = generate_all_vectors();
    let mut names: Vec<&str> = vectors.iter().map(|v| v.name.as_str()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), vectors.len());
}

#[test]
fn test_vectors_survive_json() -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&generate_all_vectors())?;
    let parsed: Vec<GoldenVector> = serde_json::from_str(&json)?;
    assert_eq!(parsed.len(), generate_all_vectors().len());
    for v in &parsed {
        check(v)?;
    }
    Ok(())
}
