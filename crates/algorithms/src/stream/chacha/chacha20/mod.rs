//! ChaCha20 stream cipher implementation
//!
//! One block function serves three nonce layouts:
//!
//! | nonce | counter | layout |
//! |---|---|---|
//! | 8 bytes | 64-bit, words 12..13 | original (djb) |
//! | 12 bytes | 32-bit, word 12 | IETF, RFC 8439 |
//! | 24 bytes | 64-bit | XChaCha20: HChaCha20 subkey, then the original layout |

use byteorder::{ByteOrder, LittleEndian};
use sodix_common::security::EphemeralSecret;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::stream::StreamCipher;
use crate::subkey::hchacha20_block;
use crate::types::nonce::ChaCha20Compatible;
use crate::types::Nonce;

/// Size of ChaCha20 key in bytes
pub const CHACHA20_KEY_SIZE: usize = 32;
/// Size of the original ChaCha20 nonce in bytes
pub const CHACHA20_NONCE_SIZE: usize = 8;
/// Size of the IETF ChaCha20 nonce in bytes
pub const CHACHA20_IETF_NONCE_SIZE: usize = 12;
/// Size of the XChaCha20 nonce in bytes
pub const XCHACHA20_NONCE_SIZE: usize = 24;
/// Size of ChaCha20 block in bytes
pub const CHACHA20_BLOCK_SIZE: usize = 64;

/// "expand 32-byte k" in little-endian words
pub(crate) const SIGMA_WORDS: [u32; 4] = [0x61707865, 0x3320646e, 0x79622d32, 0x6b206574];

/// ChaCha20 stream cipher
///
/// Keystream is buffered per block, so any split of the input across calls
/// produces the same output as a single call.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ChaCha20 {
    /// Constants, key and nonce words; counter words are filled per block
    state: [u32; 16],
    /// Keystream buffer
    buffer: [u8; CHACHA20_BLOCK_SIZE],
    /// Current position in the buffer; `CHACHA20_BLOCK_SIZE` means empty
    position: usize,
    /// Index of the next block to generate
    counter: u64,
    /// 32-bit counter and 96-bit nonce
    ietf: bool,
    /// Size of the nonce this instance was created with
    nonce_size: usize,
}

impl ChaCha20 {
    /// Creates a new ChaCha20 instance with block counter 0
    ///
    /// The nonce size selects the variant, see the module table.
    pub fn new<const N: usize>(key: &[u8; CHACHA20_KEY_SIZE], nonce: &Nonce<N>) -> Self
    where
        Nonce<N>: ChaCha20Compatible,
    {
        Self::from_slices(key, nonce.as_ref())
    }

    /// Creates a new ChaCha20 instance starting at block `counter`
    ///
    /// # Panics
    ///
    /// Panics if an IETF instance is asked to start beyond the 32-bit counter.
    pub fn with_counter<const N: usize>(
        key: &[u8; CHACHA20_KEY_SIZE],
        nonce: &Nonce<N>,
        counter: u64,
    ) -> Self
    where
        Nonce<N>: ChaCha20Compatible,
    {
        let mut cipher = Self::new(key, nonce);
        cipher.seek(counter);
        cipher
    }

    /// Creates an instance from untyped key and nonce slices
    ///
    /// # Panics
    ///
    /// Panics unless the key is 32 bytes and the nonce is 8, 12 or 24 bytes.
    pub fn from_slices(key: &[u8], nonce: &[u8]) -> Self {
        assert_eq!(key.len(), CHACHA20_KEY_SIZE, "ChaCha20: key must be 32 bytes");
        match nonce.len() {
            CHACHA20_NONCE_SIZE | CHACHA20_IETF_NONCE_SIZE => Self::init(key, nonce),
            XCHACHA20_NONCE_SIZE => {
                let mut k = EphemeralSecret::new([0u8; CHACHA20_KEY_SIZE]);
                k.copy_from_slice(key);
                let mut input = [0u8; 16];
                input.copy_from_slice(&nonce[..16]);

                let subkey = hchacha20_block(&k, &input);
                let mut cipher = Self::init(subkey.as_ref(), &nonce[16..]);
                cipher.nonce_size = XCHACHA20_NONCE_SIZE;
                cipher
            }
            n => panic!("ChaCha20: unsupported nonce length {}", n),
        }
    }

    fn init(key: &[u8], nonce: &[u8]) -> Self {
        let mut state = [0u32; 16];
        state[..4].copy_from_slice(&SIGMA_WORDS);
        LittleEndian::read_u32_into(key, &mut state[4..12]);

        let ietf = nonce.len() == CHACHA20_IETF_NONCE_SIZE;
        if ietf {
            LittleEndian::read_u32_into(nonce, &mut state[13..16]);
        } else {
            LittleEndian::read_u32_into(nonce, &mut state[14..16]);
        }

        Self {
            state,
            buffer: [0; CHACHA20_BLOCK_SIZE],
            position: CHACHA20_BLOCK_SIZE,
            counter: 0,
            ietf,
            nonce_size: nonce.len(),
        }
    }

    /// Index of the next keystream block that will be generated
    pub fn block_counter(&self) -> u64 {
        self.counter
    }

    /// Generate the next block of keystream into the buffer
    fn generate_keystream(&mut self) {
        let mut input = EphemeralSecret::new(self.state);
        if self.ietf {
            assert!(
                self.counter <= u32::MAX as u64,
                "ChaCha20-IETF: block counter exhausted"
            );
            input[12] = self.counter as u32;
        } else {
            input[12] = self.counter as u32;
            input[13] = (self.counter >> 32) as u32;
        }

        let mut working = EphemeralSecret::new(*input);
        permute(&mut working);

        for (i, chunk) in self.buffer.chunks_exact_mut(4).enumerate() {
            LittleEndian::write_u32(chunk, working[i].wrapping_add(input[i]));
        }

        self.position = 0;
        self.counter = self.counter.wrapping_add(1);
    }
}

impl StreamCipher for ChaCha20 {
    const KEY_SIZE: usize = CHACHA20_KEY_SIZE;
    const BLOCK_SIZE: usize = CHACHA20_BLOCK_SIZE;

    fn nonce_size(&self) -> usize {
        self.nonce_size
    }

    fn apply_keystream(&mut self, data: &mut [u8]) {
        let buffered = (CHACHA20_BLOCK_SIZE - self.position).min(data.len());
        let (head, tail) = data.split_at_mut(buffered);
        for (byte, k) in head.iter_mut().zip(&self.buffer[self.position..]) {
            *byte ^= *k;
        }
        self.position += buffered;

        for chunk in tail.chunks_mut(CHACHA20_BLOCK_SIZE) {
            self.generate_keystream();
            for (byte, k) in chunk.iter_mut().zip(self.buffer.iter()) {
                *byte ^= *k;
            }
            self.position = chunk.len();
        }
    }

    fn seek(&mut self, counter: u64) {
        if self.ietf {
            assert!(
                counter <= u32::MAX as u64,
                "ChaCha20-IETF: block counter exhausted"
            );
        }
        self.counter = counter;
        self.position = CHACHA20_BLOCK_SIZE;
        self.buffer.zeroize();
    }

    fn rekey(&mut self, key: &[u8], nonce: &[u8]) {
        *self = Self::from_slices(key, nonce);
    }

    fn wipe(&mut self) {
        self.zeroize();
        self.position = CHACHA20_BLOCK_SIZE;
    }
}

/// The ChaCha20 quarter round function
#[inline(always)]
fn quarter_round(state: &mut [u32; 16], a: usize, b: usize, c: usize, d: usize) {
    state[a] = state[a].wrapping_add(state[b]);
    state[d] = (state[d] ^ state[a]).rotate_left(16);

    state[c] = state[c].wrapping_add(state[d]);
    state[b] = (state[b] ^ state[c]).rotate_left(12);

    state[a] = state[a].wrapping_add(state[b]);
    state[d] = (state[d] ^ state[a]).rotate_left(8);

    state[c] = state[c].wrapping_add(state[d]);
    state[b] = (state[b] ^ state[c]).rotate_left(7);
}

/// 20 rounds of ChaCha without the final feed-forward addition
///
/// Shared with HChaCha20, which reads words of the permuted state directly.
pub(crate) fn permute(state: &mut [u32; 16]) {
    for _ in 0..10 {
        // Column rounds
        quarter_round(state, 0, 4, 8, 12);
        quarter_round(state, 1, 5, 9, 13);
        quarter_round(state, 2, 6, 10, 14);
        quarter_round(state, 3, 7, 11, 15);

        // Diagonal rounds
        quarter_round(state, 0, 5, 10, 15);
        quarter_round(state, 1, 6, 11, 12);
        quarter_round(state, 2, 7, 8, 13);
        quarter_round(state, 3, 4, 9, 14);
    }
}

#[cfg(test)]
mod tests;
