//! Test fixtures and helpers.
//!
//! A sample multi-algorithm configuration, minimal 24-bit bitmaps for the
//! image mode of TEA, and seeded mock plaintext.

use cipherlab::{
    AlgorithmKind, Cipher, ConfigFile, Result, TeaConfig, TeaKeyMaterial, TeaMode,
};
use cipherlab_core::tea::PIXEL_OFFSET_FIELD;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A configuration document with a section for every algorithm.
pub const SAMPLE_CONFIG: &str = r#"{
    "shift-by-n": 3,
    "simple-substitution": [
        ["q", "a"], ["w", "s"], ["e", "d"], ["r", "f"], ["t", "g"],
        ["y", "h"], ["u", "j"], ["i", "k"], ["o", "l"], ["p", ";"]
    ],
    "codebook": {"februar": "12a69e", "finansija": "247"},
    "double-transposition": {
        "columns": 4, "columnFirst": true, "per1": [3, 1, 0, 2], "per2": [2, 0, 1]
    },
    "election": {"permutation": [3, 2, 0, 1], "prefixes": ["san", "st", "van"]},
    "rc4": {"wordWidth": 4, "key": "00010110"},
    "tea": {"key": "0a0bf4f2fafb0402", "iv": "01020304", "mode": "cfb", "image": true},
    "knapsack": {"P": [2, 3, 7, 14, 30, 57, 120, 251], "M": 41, "N": 491, "bytesPerBlock": 1}
}"#;

const BMP_HEADER_LEN: usize = 54;

/// A 24-bit uncompressed bitmap of `width` x `height` pixels.
///
/// `pixel(i)` gives the value of the `i`-th byte of pixel data; rows are
/// padded to four bytes as the format requires.
pub fn bitmap(width: u32, height: u32, pixel: impl Fn(usize) -> u8) -> Vec<u8> {
    let row_len = (width as usize * 3).div_ceil(4) * 4;
    let data_len = row_len * height as usize;
    let file_len = (BMP_HEADER_LEN + data_len) as u32;

    let mut bmp = Vec::with_capacity(BMP_HEADER_LEN + data_len);
    bmp.extend_from_slice(b"BM");
    bmp.extend_from_slice(&file_len.to_le_bytes());
    bmp.extend_from_slice(&[0; 4]);
    debug_assert_eq!(bmp.len(), PIXEL_OFFSET_FIELD);
    bmp.extend_from_slice(&(BMP_HEADER_LEN as u32).to_le_bytes());
    bmp.extend_from_slice(&40u32.to_le_bytes());
    bmp.extend_from_slice(&(width as i32).to_le_bytes());
    bmp.extend_from_slice(&(height as i32).to_le_bytes());
    bmp.extend_from_slice(&1u16.to_le_bytes());
    bmp.extend_from_slice(&24u16.to_le_bytes());
    bmp.extend_from_slice(&0u32.to_le_bytes());
    bmp.extend_from_slice(&(data_len as u32).to_le_bytes());
    bmp.extend_from_slice(&[0; 16]);
    bmp.extend((0..data_len).map(pixel));
    bmp
}

const LOREM: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed",
    "do", "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna",
    "aliqua", "enim", "ad", "minim", "veniam", "quis", "nostrud", "exercitation",
    "ullamco", "laboris", "nisi", "aliquip", "ex", "ea", "commodo", "consequat", "duis",
    "aute", "irure", "in", "reprehenderit", "voluptate", "velit", "esse", "cillum",
    "fugiat", "nulla", "pariatur", "excepteur", "sint", "occaecat", "cupidatat", "non",
    "proident", "sunt", "culpa", "qui", "officia", "deserunt", "mollit", "anim", "id",
    "est", "laborum",
];

fn sentence(rng: &mut impl Rng) -> String {
    let len = rng.gen_range(4..=12);
    let words: Vec<&str> = (0..len)
        .map(|_| LOREM[rng.gen_range(0..LOREM.len())])
        .collect();
    words.join(" ")
}

/// `count` paragraphs of lowercase mock text, separated by blank lines.
///
/// The same seed always yields the same text.
pub fn mock_paragraphs(seed: u64, count: usize) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let sentences = rng.gen_range(3..=7);
            (0..sentences)
                .map(|_| sentence(&mut rng))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// A test fixture with the sample configuration, TEA key material and a
/// small bitmap.
pub struct TestFixture {
    pub config: ConfigFile,
    pub tea: TeaKeyMaterial,
    pub bitmap: Vec<u8>,
}

impl TestFixture {
    /// Create a new fixture with a random TEA key and IV.
    pub fn new() -> Self {
        Self::from_material(TeaKeyMaterial::generate())
    }

    /// Create with deterministic TEA key material.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_material(TeaKeyMaterial::generate_with(&mut StdRng::seed_from_u64(seed)))
    }

    fn from_material(tea: TeaKeyMaterial) -> Self {
        let mut config = sample_config();
        config.tea = Some(TeaConfig {
            key: tea.key,
            iv: Some(tea.iv),
            mode: TeaMode::Cfb,
            image: true,
        });
        Self {
            config,
            tea,
            bitmap: bitmap(5, 3, |i| (i * 7 % 251) as u8),
        }
    }

    /// A cipher for `kind` configured from the fixture.
    pub fn cipher(&self, kind: AlgorithmKind) -> Result<Cipher> {
        Cipher::new(self.config.resolve(kind)?)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// The parsed [`SAMPLE_CONFIG`].
pub fn sample_config() -> ConfigFile {
    ConfigFile::from_json(SAMPLE_CONFIG).expect("sample config is valid")
}
