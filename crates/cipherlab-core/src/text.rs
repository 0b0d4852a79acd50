//! Text and buffer helpers shared by the ciphers.
//!
//! Whitespace stripping, positive modulo, the prefix-aware tokenizer used by
//! the election cipher, cyclic right-padding of token lists and zero
//! right-padding of byte buffers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Remove every whitespace character.
pub fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Modulo whose result is always in `[0, m)`, also for negative `a`.
pub fn positive_mod(a: i64, m: i64) -> i64 {
    a.rem_euclid(m)
}

/// Lowercase word prefixes that bind to the word after them ("san", "st").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct PrefixSet(BTreeSet<String>);

impl PrefixSet {
    /// An empty set: plain whitespace tokenization.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `word` is one of the prefixes.
    ///
    /// Comparison ignores case and trailing ASCII punctuation, so `"St."`
    /// matches the prefix `"st"`.
    pub fn matches(&self, word: &str) -> bool {
        let bare = word.trim_end_matches(|c: char| c.is_ascii_punctuation());
        !bare.is_empty() && self.0.contains(&bare.to_lowercase())
    }

    /// Number of prefixes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set has no prefixes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for PrefixSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|p| p.as_ref().trim().to_lowercase())
                .filter(|p| !p.is_empty())
                .collect(),
        )
    }
}

impl From<Vec<String>> for PrefixSet {
    fn from(prefixes: Vec<String>) -> Self {
        prefixes.into_iter().collect()
    }
}

impl From<PrefixSet> for Vec<String> {
    fn from(set: PrefixSet) -> Self {
        set.0.into_iter().collect()
    }
}

/// Split on whitespace, fusing each prefix with the word that follows it.
///
/// A fused unit keeps its words joined by a single space and keeps any
/// punctuation on the last word. Prefixes chain: in `"de la cruz"` with
/// prefixes `de` and `la` all three words become one unit. A prefix with
/// nothing after it stays a token of its own.
pub fn tokenize(text: &str, prefixes: &PrefixSet) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut pending: Option<String> = None;

    for word in text.split_whitespace() {
        let unit = match pending.take() {
            Some(mut open) => {
                open.push(' ');
                open.push_str(word);
                open
            }
            None => word.to_string(),
        };
        if prefixes.matches(word) {
            pending = Some(unit);
        } else {
            tokens.push(unit);
        }
    }
    tokens.extend(pending);
    tokens
}

/// Right-pad `items` by cycling through them from the start until the
/// length is a multiple of `multiple`.
///
/// An empty list stays empty.
pub fn pad_cyclic<T: Clone>(items: &[T], multiple: usize) -> Vec<T> {
    let mut padded = items.to_vec();
    if items.is_empty() || multiple == 0 {
        return padded;
    }
    let mut source = items.iter().cycle();
    while padded.len() % multiple != 0 {
        if let Some(item) = source.next() {
            padded.push(item.clone());
        }
    }
    padded
}

/// Right-pad a byte buffer with zeros to a multiple of `multiple`.
pub fn pad_zeros(bytes: &[u8], multiple: usize) -> Vec<u8> {
    let mut padded = bytes.to_vec();
    if multiple > 0 && bytes.len() % multiple != 0 {
        padded.resize(bytes.len() + multiple - bytes.len() % multiple, 0);
    }
    padded
}
