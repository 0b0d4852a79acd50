//! RC4 generalized to `n`-bit words.
//!
//! The S-box holds `2^n` entries instead of 256. Key and plaintext are both
//! read as bit strings and cut into `n`-bit digits (the last digit
//! zero-padded on the right), and ciphertext is the digit-wise XOR of the
//! plaintext digits with the keystream.
//!
//! The keystream is a strict chain: each digit depends on the S-box left
//! behind by the previous one. [`StreamState`] is therefore an owned value
//! that the keystream step borrows mutably for the whole buffer.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Widest supported word, giving a 65 536-entry S-box.
pub const MAX_WORD_WIDTH: u32 = 16;

/// Word width `n` in bits, `1..=16`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct WordWidth(u32);

impl WordWidth {
    /// Validate a width.
    pub fn new(bits: u32) -> Result<Self> {
        if bits == 0 || bits > MAX_WORD_WIDTH {
            return Err(CoreError::InvalidWordWidth(bits));
        }
        Ok(Self(bits))
    }

    /// The classic nibble width, the only one [`get_buffer`] understands.
    pub const NIBBLE: Self = Self(4);

    /// Width in bits.
    pub fn bits(&self) -> u32 {
        self.0
    }

    /// S-box size, `2^n`.
    pub fn size(&self) -> usize {
        1 << self.0
    }
}

impl TryFrom<u32> for WordWidth {
    type Error = CoreError;

    fn try_from(bits: u32) -> Result<Self> {
        Self::new(bits)
    }
}

impl From<WordWidth> for u32 {
    fn from(width: WordWidth) -> Self {
        width.0
    }
}

/// A key written as a string of `0` and `1` characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct KeyBits(String);

impl KeyBits {
    /// Validate a binary key string.
    pub fn new(bits: impl Into<String>) -> Result<Self> {
        let bits = bits.into();
        if bits.is_empty() {
            return Err(CoreError::InvalidKeyBits("key is empty".into()));
        }
        if let Some(bad) = bits.chars().find(|c| *c != '0' && *c != '1') {
            return Err(CoreError::InvalidKeyBits(format!(
                "unexpected character {bad:?}"
            )));
        }
        Ok(Self(bits))
    }

    /// The key as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The key cut into `width`-bit digits.
    pub fn digits(&self, width: WordWidth) -> Vec<u16> {
        chunk_bits(self.0.chars().map(|c| c == '1'), width)
    }
}

impl TryFrom<String> for KeyBits {
    type Error = CoreError;

    fn try_from(bits: String) -> Result<Self> {
        Self::new(bits)
    }
}

impl From<KeyBits> for String {
    fn from(key: KeyBits) -> Self {
        key.0
    }
}

/// Group a bit sequence into `width`-bit digits, most significant bit
/// first, zero-padding the last digit on the right.
fn chunk_bits(bits: impl Iterator<Item = bool>, width: WordWidth) -> Vec<u16> {
    let width = width.bits();
    let mut digits = Vec::new();
    let mut current: u16 = 0;
    let mut filled = 0;
    for bit in bits {
        current = (current << 1) | u16::from(bit);
        filled += 1;
        if filled == width {
            digits.push(current);
            current = 0;
            filled = 0;
        }
    }
    if filled > 0 {
        digits.push(current << (width - filled));
    }
    digits
}

/// Bits of a byte buffer, most significant first.
fn buffer_bits(buffer: &[u8]) -> impl Iterator<Item = bool> + '_ {
    buffer
        .iter()
        .flat_map(|byte| (0..8).rev().map(move |shift| (byte >> shift) & 1 == 1))
}

/// S-box plus the two scanning indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamState {
    sbox: Vec<u16>,
    i: usize,
    j: usize,
}

impl StreamState {
    /// Run key scheduling: start from the identity and swap `S[i]` with
    /// `S[j]` where `j += S[i] + key[i mod len]`.
    pub fn schedule(width: WordWidth, key: &KeyBits) -> Self {
        let size = width.size();
        let key = key.digits(width);
        let mut sbox: Vec<u16> = (0..size).map(|v| v as u16).collect();
        let mut j = 0usize;
        for i in 0..size {
            j = (j + usize::from(sbox[i]) + usize::from(key[i % key.len()])) % size;
            sbox.swap(i, j);
        }
        Self { sbox, i: 0, j: 0 }
    }

    /// Current S-box contents.
    pub fn sbox(&self) -> &[u16] {
        &self.sbox
    }

    /// Advance one step and return the next keystream digit.
    pub fn next_digit(&mut self) -> u16 {
        let size = self.sbox.len();
        self.i = (self.i + 1) % size;
        self.j = (self.j + usize::from(self.sbox[self.i])) % size;
        self.sbox.swap(self.i, self.j);
        let t = (usize::from(self.sbox[self.i]) + usize::from(self.sbox[self.j])) % size;
        self.sbox[t]
    }
}

/// Key scheduling: the S-box for `key` at word width `width`.
pub fn generate_key(width: WordWidth, key: &KeyBits) -> StreamState {
    StreamState::schedule(width, key)
}

/// Cut a byte buffer into `width`-bit digits.
pub fn split_buffer(buffer: &[u8], width: WordWidth) -> Vec<u16> {
    chunk_bits(buffer_bits(buffer), width)
}

/// Draw `count` keystream digits, mutating `state` as it goes.
pub fn keystream(state: &mut StreamState, count: usize) -> Vec<u16> {
    (0..count).map(|_| state.next_digit()).collect()
}

/// Encrypt a buffer into `width`-bit ciphertext digits.
pub fn encrypt(buffer: &[u8], width: WordWidth, key: &KeyBits) -> Vec<u16> {
    let mut state = generate_key(width, key);
    let plain = split_buffer(buffer, width);
    let stream = keystream(&mut state, plain.len());
    plain.iter().zip(&stream).map(|(p, k)| p ^ k).collect()
}

/// Decrypt ciphertext digits back to bytes.
///
/// The recovered digits are repacked with [`pack_digits`]. For widths above
/// 8 the zero padding of the last digit can span a whole byte, which then
/// shows up as a trailing zero byte.
pub fn decrypt(digits: &[u16], width: WordWidth, key: &KeyBits) -> Vec<u8> {
    let mut state = generate_key(width, key);
    let stream = keystream(&mut state, digits.len());
    let plain: Vec<u16> = digits.iter().zip(&stream).map(|(c, k)| c ^ k).collect();
    pack_digits(&plain, width)
}

/// Repack `width`-bit digits into bytes, dropping a trailing partial byte.
///
/// Only the low `width` bits of each digit are used.
pub fn pack_digits(digits: &[u16], width: WordWidth) -> Vec<u8> {
    let bits = digits
        .iter()
        .flat_map(|d| (0..width.bits()).rev().map(move |shift| (d >> shift) & 1 == 1));
    let mut bytes = Vec::with_capacity(digits.len() * width.bits() as usize / 8);
    let mut current: u8 = 0;
    let mut filled = 0;
    for bit in bits {
        current = (current << 1) | u8::from(bit);
        filled += 1;
        if filled == 8 {
            bytes.push(current);
            current = 0;
            filled = 0;
        }
    }
    bytes
}

/// Pair up 4-bit digits into bytes as `high * 0x10 + low`.
///
/// Meaningful only for [`WordWidth::NIBBLE`] output. A dangling last digit
/// becomes a high nibble over a zero low nibble.
pub fn get_buffer(digits: &[u16]) -> Vec<u8> {
    digits
        .chunks(2)
        .map(|pair| {
            let high = (pair[0] & 0x0F) as u8;
            let low = pair.get(1).map_or(0, |d| (d & 0x0F) as u8);
            high * 0x10 + low
        })
        .collect()
}
