//! AES-256 block cipher (FIPS 197), encryption direction
//!
//! GCM runs the block cipher forwards only, so the inverse rounds are not
//! implemented.
//!
//! ## Constant-Time Guarantees
//!
//! - The S-box is an inversion in GF(2^8) followed by the affine map, with
//!   no table lookups
//! - Doubling in GF(2^8) uses masks rather than branches
//! - Round keys live in a [`SecretBuffer`] and are zeroized on drop

use core::sync::atomic::{compiler_fence, Ordering};

use byteorder::{BigEndian, ByteOrder};
use sodix_common::security::{EphemeralSecret, SecretBuffer};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of an AES-256 key in bytes
pub const AES256_KEY_SIZE: usize = 32;
/// Size of an AES block in bytes
pub const AES_BLOCK_SIZE: usize = 16;

const ROUNDS: usize = 14;
const ROUND_KEY_WORDS: usize = 4 * (ROUNDS + 1);
const ROUND_KEY_BYTES: usize = 4 * ROUND_KEY_WORDS;

/// Round constants; index 0 is unused
const RCON: [u32; 8] = [
    0x0000_0000,
    0x0100_0000,
    0x0200_0000,
    0x0400_0000,
    0x0800_0000,
    0x1000_0000,
    0x2000_0000,
    0x4000_0000,
];

/// Multiply by x in GF(2^8) modulo x^8 + x^4 + x^3 + x + 1
#[inline(always)]
fn xtime(byte: u8) -> u8 {
    (byte << 1) ^ ((byte >> 7).wrapping_neg() & 0x1b)
}

#[inline(always)]
fn gf_mul(mut a: u8, mut b: u8) -> u8 {
    let mut product = 0u8;
    for _ in 0..8 {
        product ^= a & (b & 1).wrapping_neg();
        a = xtime(a);
        b >>= 1;
    }
    product
}

/// `x^254`, the multiplicative inverse for non-zero `x` and 0 for zero
#[inline(always)]
fn gf_inv(x: u8) -> u8 {
    let x2 = gf_mul(x, x);
    let x4 = gf_mul(x2, x2);
    let x8 = gf_mul(x4, x4);
    let x16 = gf_mul(x8, x8);
    let x32 = gf_mul(x16, x16);
    let x64 = gf_mul(x32, x32);
    let x128 = gf_mul(x64, x64);

    let mut y = gf_mul(x128, x64);
    y = gf_mul(y, x32);
    y = gf_mul(y, x16);
    y = gf_mul(y, x8);
    y = gf_mul(y, x4);
    gf_mul(y, x2)
}

#[inline(always)]
fn sbox(x: u8) -> u8 {
    let i = gf_inv(x);
    i ^ i.rotate_left(1) ^ i.rotate_left(2) ^ i.rotate_left(3) ^ i.rotate_left(4) ^ 0x63
}

#[inline(always)]
fn sub_word(word: u32) -> u32 {
    u32::from_be_bytes(word.to_be_bytes().map(sbox))
}

/// AES-256, forward direction
///
/// The state is kept column-major, byte `4 * c + r` holding row `r` of
/// column `c`, matching the FIPS 197 input ordering.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Aes256 {
    round_keys: SecretBuffer<ROUND_KEY_BYTES>,
}

impl Aes256 {
    /// Expand `key` into the round key schedule
    pub fn new(key: &[u8; AES256_KEY_SIZE]) -> Self {
        let mut words = EphemeralSecret::new([0u32; ROUND_KEY_WORDS]);
        for (word, chunk) in words.iter_mut().zip(key.chunks_exact(4)) {
            *word = BigEndian::read_u32(chunk);
        }

        for i in 8..ROUND_KEY_WORDS {
            let mut temp = words[i - 1];
            if i % 8 == 0 {
                temp = sub_word(temp.rotate_left(8)) ^ RCON[i / 8];
            } else if i % 8 == 4 {
                temp = sub_word(temp);
            }
            words[i] = words[i - 8] ^ temp;
        }

        let mut round_keys = SecretBuffer::<ROUND_KEY_BYTES>::zeroed();
        for (chunk, word) in round_keys.as_mut_slice().chunks_exact_mut(4).zip(words.iter()) {
            BigEndian::write_u32(chunk, *word);
        }
        Self { round_keys }
    }

    /// Encrypt one block in place
    pub fn encrypt_block(&self, block: &mut [u8; AES_BLOCK_SIZE]) {
        let round_keys = self.round_keys.as_slice();

        add_round_key(block, &round_keys[..AES_BLOCK_SIZE]);
        for round in 1..ROUNDS {
            sub_bytes(block);
            shift_rows(block);
            mix_columns(block);
            add_round_key(block, &round_keys[round * AES_BLOCK_SIZE..][..AES_BLOCK_SIZE]);
        }
        sub_bytes(block);
        shift_rows(block);
        add_round_key(block, &round_keys[ROUNDS * AES_BLOCK_SIZE..]);
    }

    /// Zeroize the round keys
    ///
    /// The instance is unusable afterwards; build a new one.
    pub fn wipe(&mut self) {
        self.round_keys.wipe();
    }
}

fn add_round_key(state: &mut [u8; AES_BLOCK_SIZE], round_key: &[u8]) {
    for (s, k) in state.iter_mut().zip(round_key) {
        *s ^= k;
    }
}

fn sub_bytes(state: &mut [u8; AES_BLOCK_SIZE]) {
    for byte in state.iter_mut() {
        *byte = sbox(*byte);
    }
    compiler_fence(Ordering::SeqCst);
}

/// Row `r` rotates left by `r` columns
fn shift_rows(state: &mut [u8; AES_BLOCK_SIZE]) {
    let old = EphemeralSecret::new(*state);
    for c in 0..4 {
        for r in 1..4 {
            state[4 * c + r] = old[4 * ((c + r) % 4) + r];
        }
    }
}

fn mix_columns(state: &mut [u8; AES_BLOCK_SIZE]) {
    for column in state.chunks_exact_mut(4) {
        let [s0, s1, s2, s3] = [column[0], column[1], column[2], column[3]];
        let all = s0 ^ s1 ^ s2 ^ s3;
        column[0] = s0 ^ all ^ xtime(s0 ^ s1);
        column[1] = s1 ^ all ^ xtime(s1 ^ s2);
        column[2] = s2 ^ all ^ xtime(s2 ^ s3);
        column[3] = s3 ^ all ^ xtime(s3 ^ s0);
    }
}
