//! Classical character and word ciphers: shift, simple substitution and
//! codebook lookup.

use std::collections::HashMap;

use crate::text::{positive_mod, strip_whitespace};

const ALPHABET_LEN: i64 = 26;

/// Shift every letter of `text` by `offset` positions in `a..=z`.
///
/// Whitespace is removed first. Input is expected to be lowercase ASCII
/// letters; anything else is still mapped through the same formula. Any
/// `i64` offset is accepted; only its value modulo 26 matters.
pub fn shift(text: &str, offset: i64) -> String {
    let base = i64::from(b'a');
    let offset = positive_mod(offset, ALPHABET_LEN);
    strip_whitespace(text)
        .chars()
        .map(|c| {
            let shifted = positive_mod(i64::from(u32::from(c)) - base + offset, ALPHABET_LEN);
            char::from(b'a' + shifted as u8)
        })
        .collect()
}

/// The offset that undoes a shift by `offset`, defined for every `i64`
/// including `i64::MIN`.
pub fn inverse_offset(offset: i64) -> i64 {
    -positive_mod(offset, ALPHABET_LEN)
}

/// Replace each character found in `map`; leave the rest untouched.
pub fn substitute(text: &str, map: &HashMap<char, char>) -> String {
    text.chars().map(|c| *map.get(&c).unwrap_or(&c)).collect()
}

/// Replace whole words found in `book` with their code.
///
/// Words are split on single spaces, trimmed and lowercased before lookup,
/// and rejoined with single spaces, so original case and spacing are lost.
/// An empty code leaves the word in place.
pub fn codebook(text: &str, book: &HashMap<String, String>) -> String {
    text.split(' ')
        .map(|word| {
            let word = word.trim().to_lowercase();
            match book.get(&word) {
                Some(code) if !code.is_empty() => code.clone(),
                _ => word,
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Swap keys and values of a substitution map.
///
/// Only a true inverse when the map is injective; when two letters share an
/// image, one of them wins arbitrarily.
pub fn invert_substitution(map: &HashMap<char, char>) -> HashMap<char, char> {
    map.iter().map(|(&from, &to)| (to, from)).collect()
}

/// Swap words and codes of a codebook.
pub fn invert_codebook(book: &HashMap<String, String>) -> HashMap<String, String> {
    book.iter()
        .map(|(word, code)| (code.to_lowercase(), word.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn keyboard_rows() -> HashMap<char, char> {
        "qwertyuiop".chars().zip("asdfghjkl;".chars()).collect()
    }

    fn book() -> HashMap<String, String> {
        [("februar", "12a69e"), ("finansija", "247")]
            .into_iter()
            .map(|(w, c)| (w.to_string(), c.to_string()))
            .collect()
    }

    #[test]
    fn test_shift_single_letter() {
        assert_eq!(shift("a", 1), "b");
        assert_eq!(shift("b", -1), "a");
    }

    #[test]
    fn test_shift_wraps() {
        assert_eq!(shift("z", 1), "a");
        assert_eq!(shift("a", -1), "z");
        assert_eq!(shift("abyz", 1), "bcza");
        assert_eq!(shift("abyz", -1), "zaxy");
    }

    #[test]
    fn test_shift_words() {
        assert_eq!(shift("abcd", 2), "cdef");
        assert_eq!(shift("lazar", 1), "mbabs");
        assert_eq!(shift("lazar", -1), "kzyzq");
    }

    #[test]
    fn test_shift_strips_whitespace() {
        assert_eq!(shift("attack at dawn", 3), "dwwdfndwgdzq");
    }

    #[test]
    fn test_shift_large_offsets() {
        assert_eq!(shift("abc", 26 * 4 + 1), "bcd");
        assert_eq!(shift("abc", -(26 * 7) - 1), "zab");
    }

    #[test]
    fn test_shift_extreme_offsets() {
        assert_eq!(shift("z", i64::MAX), "g");
        assert_eq!(shift("z", i64::MIN), "r");
        assert_eq!(shift("attack", i64::MAX), "haahjr");
        for offset in [i64::MAX, i64::MIN, i64::MIN + 1] {
            let ct = shift("attackatdawn", offset);
            assert_eq!(shift(&ct, inverse_offset(offset)), "attackatdawn");
        }
    }

    #[test]
    fn test_substitute() {
        let map = keyboard_rows();
        assert_eq!(substitute("q", &map), "a");
        assert_eq!(substitute("a", &map), "a");
        assert_eq!(substitute("typewriter", &map), "gh;dsfkgdf");
        assert_eq!(substitute("instrumental", &map), "knsgfjmdngal");
    }

    #[test]
    fn test_substitute_inverse() {
        let map = keyboard_rows();
        let inverse = invert_substitution(&map);
        assert_eq!(substitute("gh;dsfkgdf", &inverse), "typewriter");
    }

    #[test]
    fn test_codebook_lookup() {
        let book = book();
        assert_eq!(codebook("februar", &book), "12a69e");
        assert_eq!(codebook("foo", &book), "foo");
        assert_eq!(
            codebook("februar je mesec finansija", &book),
            "12a69e je mesec 247"
        );
    }

    #[test]
    fn test_codebook_ignores_case() {
        assert_eq!(
            codebook("Februar je mesec FiNaNsIjA", &book()),
            "12a69e je mesec 247"
        );
    }

    #[test]
    fn test_codebook_inverse() {
        let inverse = invert_codebook(&book());
        assert_eq!(
            codebook("12a69e je mesec 247", &inverse),
            "februar je mesec finansija"
        );
    }

    proptest! {
        #[test]
        fn test_shift_inverts_on_stripped_text(
            text in "[a-z ]{0,40}",
            offset in any::<i64>(),
        ) {
            let stripped = strip_whitespace(&text);
            let ct = shift(&text, offset);
            prop_assert_eq!(shift(&ct, inverse_offset(offset)), stripped.clone());
            if let Some(negated) = offset.checked_neg() {
                prop_assert_eq!(shift(&ct, negated), stripped);
            }
        }
    }
}
