//! Salsa20 stream cipher implementation
//!
//! Salsa20/20 with a 64-bit nonce and a 64-bit block counter. XSalsa20
//! derives a subkey from the first 16 nonce bytes with HSalsa20 and runs
//! Salsa20 with the remaining 8.

use byteorder::{ByteOrder, LittleEndian};
use sodix_common::security::EphemeralSecret;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::stream::StreamCipher;
use crate::subkey::hsalsa20_block;
use crate::types::nonce::Salsa20Compatible;
use crate::types::Nonce;

/// Size of Salsa20 key in bytes
pub const SALSA20_KEY_SIZE: usize = 32;
/// Size of the Salsa20 nonce in bytes
pub const SALSA20_NONCE_SIZE: usize = 8;
/// Size of the XSalsa20 nonce in bytes
pub const XSALSA20_NONCE_SIZE: usize = 24;
/// Size of Salsa20 block in bytes
pub const SALSA20_BLOCK_SIZE: usize = 64;

/// Word positions of the "expand 32-byte k" constants
pub(crate) const SIGMA_POSITIONS: [usize; 4] = [0, 5, 10, 15];

pub(crate) const SIGMA_WORDS: [u32; 4] = [0x61707865, 0x3320646e, 0x79622d32, 0x6b206574];

/// Salsa20 stream cipher
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Salsa20 {
    /// Constants, key and nonce words; counter words are filled per block
    state: [u32; 16],
    /// Keystream buffer
    buffer: [u8; SALSA20_BLOCK_SIZE],
    /// Current position in the buffer; `SALSA20_BLOCK_SIZE` means empty
    position: usize,
    /// Index of the next block to generate
    counter: u64,
    /// Size of the nonce this instance was created with
    nonce_size: usize,
}

impl Salsa20 {
    /// Creates a new Salsa20 instance
    ///
    /// An 8-byte nonce starts at block 0. A 16-byte nonce is the 8-byte nonce
    /// followed by the initial block counter in little-endian order. A
    /// 24-byte nonce selects XSalsa20.
    pub fn new<const N: usize>(key: &[u8; SALSA20_KEY_SIZE], nonce: &Nonce<N>) -> Self
    where
        Nonce<N>: Salsa20Compatible,
    {
        Self::from_slices(key, nonce.as_ref())
    }

    /// Creates an instance from untyped key and nonce slices
    ///
    /// # Panics
    ///
    /// Panics unless the key is 32 bytes and the nonce is 8, 16 or 24 bytes.
    pub fn from_slices(key: &[u8], nonce: &[u8]) -> Self {
        assert_eq!(key.len(), SALSA20_KEY_SIZE, "Salsa20: key must be 32 bytes");
        match nonce.len() {
            SALSA20_NONCE_SIZE => Self::init(key, nonce),
            16 => {
                let mut cipher = Self::init(key, &nonce[..8]);
                cipher.counter = LittleEndian::read_u64(&nonce[8..]);
                cipher.nonce_size = 16;
                cipher
            }
            XSALSA20_NONCE_SIZE => {
                let mut k = EphemeralSecret::new([0u8; SALSA20_KEY_SIZE]);
                k.copy_from_slice(key);
                let mut input = [0u8; 16];
                input.copy_from_slice(&nonce[..16]);

                let subkey = hsalsa20_block(&k, &input);
                let mut cipher = Self::init(subkey.as_ref(), &nonce[16..]);
                cipher.nonce_size = XSALSA20_NONCE_SIZE;
                cipher
            }
            n => panic!("Salsa20: unsupported nonce length {}", n),
        }
    }

    fn init(key: &[u8], nonce: &[u8]) -> Self {
        let mut state = [0u32; 16];
        for (&pos, &word) in SIGMA_POSITIONS.iter().zip(SIGMA_WORDS.iter()) {
            state[pos] = word;
        }
        LittleEndian::read_u32_into(&key[..16], &mut state[1..5]);
        LittleEndian::read_u32_into(&key[16..], &mut state[11..15]);
        LittleEndian::read_u32_into(nonce, &mut state[6..8]);

        Self {
            state,
            buffer: [0; SALSA20_BLOCK_SIZE],
            position: SALSA20_BLOCK_SIZE,
            counter: 0,
            nonce_size: nonce.len(),
        }
    }

    /// Index of the next keystream block that will be generated
    pub fn block_counter(&self) -> u64 {
        self.counter
    }

    fn generate_keystream(&mut self) {
        let mut input = EphemeralSecret::new(self.state);
        input[8] = self.counter as u32;
        input[9] = (self.counter >> 32) as u32;

        let mut working = EphemeralSecret::new(*input);
        permute(&mut working);

        for (i, chunk) in self.buffer.chunks_exact_mut(4).enumerate() {
            LittleEndian::write_u32(chunk, working[i].wrapping_add(input[i]));
        }

        self.position = 0;
        self.counter = self.counter.wrapping_add(1);
    }
}

impl StreamCipher for Salsa20 {
    const KEY_SIZE: usize = SALSA20_KEY_SIZE;
    const BLOCK_SIZE: usize = SALSA20_BLOCK_SIZE;

    fn nonce_size(&self) -> usize {
        self.nonce_size
    }

    fn apply_keystream(&mut self, data: &mut [u8]) {
        let buffered = (SALSA20_BLOCK_SIZE - self.position).min(data.len());
        let (head, tail) = data.split_at_mut(buffered);
        for (byte, k) in head.iter_mut().zip(&self.buffer[self.position..]) {
            *byte ^= *k;
        }
        self.position += buffered;

        for chunk in tail.chunks_mut(SALSA20_BLOCK_SIZE) {
            self.generate_keystream();
            for (byte, k) in chunk.iter_mut().zip(self.buffer.iter()) {
                *byte ^= *k;
            }
            self.position = chunk.len();
        }
    }

    fn seek(&mut self, counter: u64) {
        self.counter = counter;
        self.position = SALSA20_BLOCK_SIZE;
        self.buffer.zeroize();
    }

    fn rekey(&mut self, key: &[u8], nonce: &[u8]) {
        *self = Self::from_slices(key, nonce);
    }

    fn wipe(&mut self) {
        self.zeroize();
        self.position = SALSA20_BLOCK_SIZE;
    }
}

#[inline(always)]
fn quarter_round(state: &mut [u32; 16], a: usize, b: usize, c: usize, d: usize) {
    state[b] ^= state[a].wrapping_add(state[d]).rotate_left(7);
    state[c] ^= state[b].wrapping_add(state[a]).rotate_left(9);
    state[d] ^= state[c].wrapping_add(state[b]).rotate_left(13);
    state[a] ^= state[d].wrapping_add(state[c]).rotate_left(18);
}

/// 20 rounds of Salsa without the final feed-forward addition
pub(crate) fn permute(state: &mut [u32; 16]) {
    for _ in 0..10 {
        // Column round
        quarter_round(state, 0, 4, 8, 12);
        quarter_round(state, 5, 9, 13, 1);
        quarter_round(state, 10, 14, 2, 6);
        quarter_round(state, 15, 3, 7, 11);

        // Row round
        quarter_round(state, 0, 1, 2, 3);
        quarter_round(state, 5, 6, 7, 4);
        quarter_round(state, 10, 11, 8, 9);
        quarter_round(state, 15, 12, 13, 14);
    }
}
