//! Configuration files read from disk and run through the engine.

use std::io::Write;

use cipherlab::{AlgorithmKind, Cipher, ConfigFile, LabError, Payload, TeaKeyMaterial, TeaMode};
use tempfile::NamedTempFile;

const CRYPTO_JSON: &str = r#"{
    "shift-by-n": 3,
    "simple-substitution": [["a", "q"], ["t", "z"], ["c", "e"], ["k", "m"]],
    "codebook-cypher": {"attack": "17", "dawn": "42"},
    "double-transposition": {"col": 4, "columnFirst": false, "per1": [2, 0, 1], "per2": [3, 1, 0, 2]},
    "election": {"permutation": [1, 0], "prefixes": ["san", "st"]},
    "rc4": {"n": 5, "key": "1100101"},
    "tea": {"key": "0a0bf4f2fafb0402", "iv": "01020304", "mode": "cfb"},
    "knapsack": {"P": [1, 2, 4, 8, 16, 32, 64, 128, 256, 512, 1024, 2048, 4096, 8192, 16384, 32768], "M": 3, "N": 65537, "bytes": 2}
}"#;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

fn write_config(contents: &str) -> anyhow::Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    Ok(file)
}

#[test]
fn test_every_section_resolves_and_roundtrips() -> anyhow::Result<()> {
    init_tracing();
    let file = write_config(CRYPTO_JSON)?;
    let config = ConfigFile::from_path(file.path())?;

    for kind in AlgorithmKind::ALL {
        let cipher = Cipher::new(config.resolve(kind)?)?;
        let input = match kind {
            AlgorithmKind::Rc4 | AlgorithmKind::Tea | AlgorithmKind::Knapsack => {
                Payload::Bytes(b"attack at dawn".to_vec())
            }
            AlgorithmKind::Shift | AlgorithmKind::DoubleTransposition => {
                Payload::from("attackatdawn")
            }
            AlgorithmKind::Election => Payload::from("vote San Jose, St. Paul now"),
            _ => Payload::from("attack at dawn"),
        };
        let ct = cipher.encrypt(input.clone())?;
        assert_ne!(ct, input, "{kind} left its input unchanged");
        assert_eq!(cipher.decrypt(ct)?, input, "{kind} did not invert");
    }
    Ok(())
}

#[test]
fn test_named_by_alias() -> anyhow::Result<()> {
    let file = write_config(CRYPTO_JSON)?;
    let config = ConfigFile::from_path(file.path())?;
    let kind: AlgorithmKind = "codebookCypher".parse()?;
    let cipher = Cipher::new(config.resolve(kind)?)?;
    assert_eq!(
        cipher.encrypt(Payload::from("Attack at dawn"))?,
        Payload::from("17 at 42")
    );
    Ok(())
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ConfigFile::from_path(dir.path().join("crypto.json")).unwrap_err();
    assert!(matches!(err, LabError::Io(_)));
}

#[test]
fn test_bad_json_is_json_error() -> anyhow::Result<()> {
    let file = write_config("{\"shift-by-n\": \"three\"}")?;
    let err = ConfigFile::from_path(file.path()).unwrap_err();
    assert!(matches!(err, LabError::Json(_)));
    Ok(())
}

#[test]
fn test_missing_section_is_config_error() -> anyhow::Result<()> {
    let file = write_config("{\"shift-by-n\": 1}")?;
    let config = ConfigFile::from_path(file.path())?;
    assert!(matches!(
        config.resolve(AlgorithmKind::Knapsack),
        Err(LabError::Config(_))
    ));
    Ok(())
}

#[test]
fn test_generated_tea_key_written_and_read_back() -> anyhow::Result<()> {
    let material = TeaKeyMaterial::generate();
    let json = format!(
        "{{\"tea\": {{\"key\": \"{}\", \"iv\": \"{}\", \"mode\": \"cfb\"}}}}",
        material.key, material.iv.to_hex()
    );
    let file = write_config(&json)?;
    let config = ConfigFile::from_path(file.path())?;
    let resolved = config.resolve(AlgorithmKind::Tea)?;
    assert_eq!(resolved, material.to_config(TeaMode::Cfb, false));
    Ok(())
}
