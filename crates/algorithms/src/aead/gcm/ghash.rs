//! GHASH, the universal hash of GCM (NIST SP 800-38D)
//!
//! Blocks are read big-endian into a `u128`, so bit 0 of the field element
//! is the most significant bit of the integer.

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of a GHASH block and of its output in bytes
pub const GHASH_BLOCK_SIZE: usize = 16;

/// Reduction constant `R = 11100001 ∥ 0^120`
const R: u128 = 0xe1 << 120;

/// GHASH keyed by the hash subkey `H = E(K, 0^128)`
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct GHash {
    h: u128,
    acc: u128,
}

impl GHash {
    /// Start a hash under subkey `h`
    pub fn new(h: &[u8; GHASH_BLOCK_SIZE]) -> Self {
        Self {
            h: u128::from_be_bytes(*h),
            acc: 0,
        }
    }

    /// Multiply two field elements
    ///
    /// All 128 iterations run, with masks in place of branches.
    pub fn gf_multiply(x: u128, y: u128) -> u128 {
        let mut z = 0u128;
        let mut v = y;
        for i in 0..128 {
            let bit = (x >> (127 - i)) & 1;
            z ^= v & bit.wrapping_neg();
            let carry = v & 1;
            v = (v >> 1) ^ (R & carry.wrapping_neg());
        }
        z
    }

    /// Absorb `data`, zero-padding its final partial block
    pub fn update_padded(&mut self, data: &[u8]) {
        for chunk in data.chunks(GHASH_BLOCK_SIZE) {
            let mut block = [0u8; GHASH_BLOCK_SIZE];
            block[..chunk.len()].copy_from_slice(chunk);
            self.acc = Self::gf_multiply(self.acc ^ u128::from_be_bytes(block), self.h);
        }
    }

    /// Absorb the bit lengths of both fields and return the hash
    pub fn finalize(mut self, ad_len: usize, ciphertext_len: usize) -> [u8; GHASH_BLOCK_SIZE] {
        let lengths = ((ad_len as u128 * 8) << 64) | (ciphertext_len as u128 * 8);
        self.acc = Self::gf_multiply(self.acc ^ lengths, self.h);
        self.acc.to_be_bytes()
    }
}
