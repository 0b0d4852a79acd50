//! TEA on 16-bit words.
//!
//! A block is two 16-bit words (4 bytes) and the key four 16-bit words
//! (8 bytes). Every addition, shift and update wraps at `2^16`; the running
//! `sum` only ever contributes its low 16 bits, so the golden-ratio delta
//! is effectively `0x79b9`. Widening any of this to 32 bits changes the
//! ciphertext.
//!
//! Buffers are processed in ECB or CFB mode. In image mode the bitmap
//! header (everything before the pixel-data offset stored at byte `0x0A`)
//! passes through untouched so the result still opens in an image viewer.

use crate::error::{CoreError, Result};
use crate::text::pad_zeros;
use crate::types::{BlockKey, Iv};

/// Feistel rounds per block.
pub const ROUNDS: u16 = 32;

/// Golden-ratio round constant.
pub const DELTA: u32 = 0x9e37_79b9;

/// Block length in bytes.
pub const BLOCK_LEN: usize = 4;

/// Byte offset of the little-endian pixel-data offset in a bitmap header.
pub const PIXEL_OFFSET_FIELD: usize = 0x0A;

/// One cipher block.
pub type Block = [u8; BLOCK_LEN];

/// Chaining mode for whole buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Each block on its own. Output is padded to whole blocks.
    Ecb,
    /// Cipher feedback seeded with an IV. Output is as long as the input.
    Cfb(Iv),
}

fn round_delta() -> u16 {
    DELTA as u16
}

fn mix(v: u16, sum: u16, ka: u16, kb: u16) -> u16 {
    (v << 4).wrapping_add(ka) ^ v.wrapping_add(sum) ^ (v >> 5).wrapping_add(kb)
}

/// Read a (possibly short) block as two words, zero-padding on the right.
fn load(block: &[u8]) -> (u16, u16) {
    let padded = pad_zeros(&block[..block.len().min(BLOCK_LEN)], BLOCK_LEN);
    let mut b = [0u8; BLOCK_LEN];
    b[..padded.len()].copy_from_slice(&padded);
    (
        u16::from_be_bytes([b[0], b[1]]),
        u16::from_be_bytes([b[2], b[3]]),
    )
}

fn store(v0: u16, v1: u16) -> Block {
    let [a, b] = v0.to_be_bytes();
    let [c, d] = v1.to_be_bytes();
    [a, b, c, d]
}

/// Encrypt one block.
///
/// Blocks shorter than 4 bytes are zero-padded; bytes past the fourth are
/// ignored.
pub fn encrypt_block(block: &[u8], key: &BlockKey) -> Block {
    let (mut v0, mut v1) = load(block);
    let [k0, k1, k2, k3] = key.words();
    let mut sum: u16 = 0;
    for _ in 0..ROUNDS {
        sum = sum.wrapping_add(round_delta());
        v0 = v0.wrapping_add(mix(v1, sum, k0, k1));
        v1 = v1.wrapping_add(mix(v0, sum, k2, k3));
    }
    store(v0, v1)
}

/// Decrypt one block: the rounds of [`encrypt_block`] undone in reverse.
pub fn decrypt_block(block: &[u8], key: &BlockKey) -> Block {
    let (mut v0, mut v1) = load(block);
    let [k0, k1, k2, k3] = key.words();
    let mut sum: u16 = round_delta().wrapping_mul(ROUNDS);
    for _ in 0..ROUNDS {
        v1 = v1.wrapping_sub(mix(v0, sum, k2, k3));
        v0 = v0.wrapping_sub(mix(v1, sum, k0, k1));
        sum = sum.wrapping_sub(round_delta());
    }
    store(v0, v1)
}

/// Split a bitmap into its header and pixel data.
pub fn chunk_image(image: &[u8]) -> Result<(&[u8], &[u8])> {
    let field = image
        .get(PIXEL_OFFSET_FIELD..PIXEL_OFFSET_FIELD + 4)
        .ok_or_else(|| {
            CoreError::MalformedImage(format!("header truncated at {} bytes", image.len()))
        })?;
    let offset = i32::from_le_bytes([field[0], field[1], field[2], field[3]]);
    let start = usize::try_from(offset)
        .ok()
        .filter(|&start| start <= image.len())
        .ok_or_else(|| {
            CoreError::MalformedImage(format!(
                "pixel offset {offset} outside image of {} bytes",
                image.len()
            ))
        })?;
    Ok(image.split_at(start))
}

fn xor(keystream: &Block, block: &[u8]) -> Vec<u8> {
    block.iter().zip(keystream).map(|(b, k)| b ^ k).collect()
}

fn process(
    encrypting: bool,
    buffer: &[u8],
    key: &BlockKey,
    mode: Mode,
    image: bool,
) -> Result<Vec<u8>> {
    let (header, body) = if image {
        chunk_image(buffer)?
    } else {
        (&buffer[..0], buffer)
    };

    let mut out = Vec::with_capacity(buffer.len() + BLOCK_LEN);
    out.extend_from_slice(header);

    match mode {
        Mode::Ecb => {
            for block in body.chunks(BLOCK_LEN) {
                let result = if encrypting {
                    encrypt_block(block, key)
                } else {
                    decrypt_block(block, key)
                };
                out.extend_from_slice(&result);
            }
        }
        Mode::Cfb(iv) => {
            // Both directions run the forward block function.
            let mut feedback = iv.as_bytes().to_vec();
            for block in body.chunks(BLOCK_LEN) {
                let mixed = xor(&encrypt_block(&feedback, key), block);
                feedback = if encrypting {
                    mixed.clone()
                } else {
                    block.to_vec()
                };
                out.extend_from_slice(&mixed);
            }
        }
    }
    Ok(out)
}

/// Encrypt a buffer.
///
/// With `image` set, the buffer must be a bitmap and only its pixel data is
/// encrypted.
pub fn encrypt(buffer: &[u8], key: &BlockKey, mode: Mode, image: bool) -> Result<Vec<u8>> {
    process(true, buffer, key, mode, image)
}

/// Decrypt a buffer produced by [`encrypt`] with the same settings.
pub fn decrypt(buffer: &[u8], key: &BlockKey, mode: Mode, image: bool) -> Result<Vec<u8>> {
    process(false, buffer, key, mode, image)
}
