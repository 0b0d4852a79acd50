//! Merkle-Hellman knapsack cipher.
//!
//! The private key is a superincreasing sequence `P`, a modulus `N` larger
//! than `sum(P)` and a multiplier `M` coprime to `N`. The public key is
//! `J[i] = P[i] * M mod N`. A block of plaintext bits selects a subset of `J`
//! and the ciphertext is its sum; decryption multiplies by `M^-1 mod N` and
//! solves the now-easy superincreasing subset sum greedily.
//!
//! Bit `i` of the block (counting from the most significant of `len(P)`
//! bits) selects `J[i]`. Sums are carried in `u128` so no key of up to 64
//! elements can overflow.

use serde::Serialize;

use crate::error::{CoreError, Result};
use crate::text::pad_zeros;

/// Longest supported private sequence (one bit per element, blocks are `u64`).
pub const MAX_KEY_LEN: usize = 64;

/// Widest supported block, in bytes.
pub const MAX_BLOCK_BYTES: usize = 8;

/// True iff every element exceeds the sum of all elements before it.
///
/// The empty sequence is not superincreasing.
pub fn is_superincreasing(seq: &[u64]) -> bool {
    let Some((&first, rest)) = seq.split_first() else {
        return false;
    };
    let mut sum = u128::from(first);
    for &x in rest {
        if u128::from(x) <= sum {
            return false;
        }
        sum += u128::from(x);
    }
    true
}

/// The public knapsack `J`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicKey {
    j: Vec<u64>,
}

impl PublicKey {
    /// The knapsack weights.
    pub fn weights(&self) -> &[u64] {
        &self.j
    }

    /// Number of plaintext bits per block.
    pub fn capacity(&self) -> usize {
        self.j.len()
    }

    /// Subset-sum of the weights selected by the bits of `value`.
    pub fn encrypt_block(&self, value: u64) -> Result<u128> {
        let bits = u64::BITS - value.leading_zeros();
        let len = self.j.len();
        if bits as usize > len {
            return Err(CoreError::BlockOverflow {
                bits,
                capacity: len,
            });
        }
        Ok(self
            .j
            .iter()
            .enumerate()
            .filter(|(i, _)| (value >> (len - 1 - i)) & 1 == 1)
            .map(|(_, &w)| u128::from(w))
            .sum())
    }
}

/// The private key `(P, N, M^-1 mod N)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrivateKey {
    p: Vec<u64>,
    n: u64,
    im: u64,
}

impl PrivateKey {
    /// Assemble a private key from its parts.
    ///
    /// Fails unless `p` is superincreasing and `n` exceeds its sum.
    pub fn new(p: Vec<u64>, n: u64, im: u64) -> Result<Self> {
        validate_private(&p, n)?;
        Ok(Self { p, n, im })
    }

    /// The superincreasing sequence.
    pub fn sequence(&self) -> &[u64] {
        &self.p
    }

    /// The modulus.
    pub fn modulus(&self) -> u64 {
        self.n
    }

    /// The inverse multiplier.
    pub fn inverse_multiplier(&self) -> u64 {
        self.im
    }

    /// Recover the plaintext block from a subset-sum.
    pub fn decrypt_block(&self, ciphertext: u128) -> Result<u64> {
        let n = u128::from(self.n);
        let mut t = (ciphertext % n) * u128::from(self.im) % n;
        let len = self.p.len();
        let mut value: u64 = 0;
        for i in (0..len).rev() {
            let weight = u128::from(self.p[i]);
            if t >= weight {
                value |= 1 << (len - 1 - i);
                t -= weight;
            }
        }
        if t != 0 {
            return Err(CoreError::DecodeFailure { residue: t });
        }
        Ok(value)
    }
}

/// Public and private halves derived from the same `(P, M, N)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KnapsackKeyPair {
    pub public: PublicKey,
    pub private: PrivateKey,
}

impl KnapsackKeyPair {
    /// Derive both keys, checking every key invariant.
    pub fn derive(p: &[u64], m: u64, n: u64) -> Result<Self> {
        let public = get_public_key(p, m, n)?;
        let private = get_private_key(p, m, n)?;
        Ok(Self { public, private })
    }
}

fn validate_private(p: &[u64], n: u64) -> Result<()> {
    if !is_superincreasing(p) {
        return Err(CoreError::InvalidKey("P has to be superincreasing".into()));
    }
    if p.len() > MAX_KEY_LEN {
        return Err(CoreError::InvalidKey(format!(
            "P has {} elements, at most {MAX_KEY_LEN} are supported",
            p.len()
        )));
    }
    let sum: u128 = p.iter().map(|&x| u128::from(x)).sum();
    if u128::from(n) <= sum {
        return Err(CoreError::InvalidKey(format!(
            "N ({n}) has to be larger than sum of P ({sum})"
        )));
    }
    Ok(())
}

/// Find `M^-1 mod N` by trying every `q < M` until `(q*N + 1) / M` is whole.
pub fn get_private_key(p: &[u64], m: u64, n: u64) -> Result<PrivateKey> {
    let (wide_m, wide_n) = (u128::from(m), u128::from(n));
    for q in 0..wide_m {
        let candidate = q * wide_n + 1;
        if candidate % wide_m == 0 {
            let im = u64::try_from(candidate / wide_m)
                .map_err(|_| CoreError::KeyGenerationFailure { multiplier: m, modulus: n })?;
            return Ok(PrivateKey {
                p: p.to_vec(),
                n,
                im,
            });
        }
    }
    Err(CoreError::KeyGenerationFailure {
        multiplier: m,
        modulus: n,
    })
}

/// `J[i] = P[i] * M mod N`, after checking the private key invariants.
pub fn get_public_key(p: &[u64], m: u64, n: u64) -> Result<PublicKey> {
    validate_private(p, n)?;
    let (wide_m, wide_n) = (u128::from(m), u128::from(n));
    let j = p
        .iter()
        .map(|&x| (u128::from(x) * wide_m % wide_n) as u64)
        .collect();
    Ok(PublicKey { j })
}

/// Encrypt one integer block.
pub fn encrypt_block(value: u64, p: &[u64], m: u64, n: u64) -> Result<u128> {
    get_public_key(p, m, n)?.encrypt_block(value)
}

/// Decrypt one integer block.
pub fn decrypt_block(ciphertext: u128, p: &[u64], im: u64, n: u64) -> Result<u64> {
    PrivateKey::new(p.to_vec(), n, im)?.decrypt_block(ciphertext)
}

fn check_block_width(bytes_per_block: usize) -> Result<()> {
    if bytes_per_block == 0 || bytes_per_block > MAX_BLOCK_BYTES {
        return Err(CoreError::InvalidBlockWidth(format!(
            "{bytes_per_block} bytes per block, expected 1 to {MAX_BLOCK_BYTES}"
        )));
    }
    Ok(())
}

/// Encrypt a buffer as big-endian blocks of `bytes_per_block` bytes.
///
/// The buffer is zero-padded on the right to a whole number of blocks. Each
/// block only has to fit the key, so a 7-element key still carries 7-bit
/// ASCII; a block needing more bits than the key has is `BlockOverflow`.
pub fn encrypt_with(buffer: &[u8], bytes_per_block: usize, key: &PublicKey) -> Result<Vec<u128>> {
    check_block_width(bytes_per_block)?;
    pad_zeros(buffer, bytes_per_block)
        .chunks(bytes_per_block)
        .map(|chunk| {
            let value = chunk.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b));
            key.encrypt_block(value)
        })
        .collect()
}

/// Decrypt blocks back into `bytes_per_block` big-endian bytes each.
pub fn decrypt_with(blocks: &[u128], bytes_per_block: usize, key: &PrivateKey) -> Result<Vec<u8>> {
    check_block_width(bytes_per_block)?;
    let mut out = Vec::with_capacity(blocks.len() * bytes_per_block);
    for &block in blocks {
        let value = key.decrypt_block(block)?;
        let bits = u64::BITS - value.leading_zeros();
        if bits as usize > bytes_per_block * 8 {
            return Err(CoreError::BlockOverflow {
                bits,
                capacity: bytes_per_block * 8,
            });
        }
        out.extend_from_slice(&value.to_be_bytes()[MAX_BLOCK_BYTES - bytes_per_block..]);
    }
    Ok(out)
}

/// Encrypt a buffer with the key derived from `(P, M, N)`.
pub fn encrypt(buffer: &[u8], bytes_per_block: usize, p: &[u64], m: u64, n: u64) -> Result<Vec<u128>> {
    encrypt_with(buffer, bytes_per_block, &get_public_key(p, m, n)?)
}

/// Decrypt blocks with the private key `(P, IM, N)`.
pub fn decrypt(blocks: &[u128], bytes_per_block: usize, p: &[u64], im: u64, n: u64) -> Result<Vec<u8>> {
    decrypt_with(blocks, bytes_per_block, &PrivateKey::new(p.to_vec(), n, im)?)
}
