//! ChaCha20-Poly1305 authenticated encryption
//!
//! Two layouts share a key size and a tag size but are not interoperable:
//!
//! * [`ChaCha20Poly1305`]: the original construction with an 8-byte nonce
//!   and a 64-bit block counter. Lengths are appended to each field and
//!   nothing is padded.
//! * [`ChaCha20Poly1305Ietf`]: RFC 8439, with a 12-byte nonce and a 32-bit
//!   block counter. AD and ciphertext are padded to 16 bytes and both
//!   lengths are appended at the end.
//!
//! ## Constant-Time Guarantees
//!
//! * Tags are compared with `subtle`; the result is the only branch.
//! * No keystream is applied to a ciphertext before its tag is accepted.

use sodix_api::Random;
use sodix_common::security::SecretBuffer;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::construction::Construction;
use super::{message_length, Aead, AEAD_TAG_SIZE};
use crate::error::{validate, Result};
use crate::stream::chacha::chacha20::{
    ChaCha20, CHACHA20_IETF_NONCE_SIZE, CHACHA20_KEY_SIZE, CHACHA20_NONCE_SIZE,
};
use crate::types::{Nonce, Tag};

/// Size of the ChaCha20-Poly1305 key in bytes
pub const CHACHA20POLY1305_KEY_SIZE: usize = CHACHA20_KEY_SIZE;
/// Size of the original ChaCha20-Poly1305 nonce in bytes
pub const CHACHA20POLY1305_NONCE_SIZE: usize = CHACHA20_NONCE_SIZE;
/// Size of the IETF ChaCha20-Poly1305 nonce in bytes
pub const CHACHA20POLY1305_IETF_NONCE_SIZE: usize = CHACHA20_IETF_NONCE_SIZE;
/// Size of the authentication tag in bytes
pub const CHACHA20POLY1305_TAG_SIZE: usize = AEAD_TAG_SIZE;

/// Largest plaintext for the original construction
pub const CHACHA20POLY1305_MESSAGE_BYTES_MAX: u64 = u64::MAX - AEAD_TAG_SIZE as u64;
/// Largest plaintext for the IETF construction: 2^32 - 1 payload blocks
pub const CHACHA20POLY1305_IETF_MESSAGE_BYTES_MAX: u64 = 64 * ((1u64 << 32) - 1);

/// Original ChaCha20-Poly1305, 8-byte nonce
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ChaCha20Poly1305 {
    key: SecretBuffer<CHACHA20POLY1305_KEY_SIZE>,
}

impl ChaCha20Poly1305 {
    /// Create a new instance from a 256-bit key
    pub fn new(key: &[u8; CHACHA20POLY1305_KEY_SIZE]) -> Self {
        Self {
            key: SecretBuffer::new(*key),
        }
    }

    /// Generate a random key
    pub fn generate_key<R: Random + ?Sized>(
        rng: &mut R,
    ) -> Result<SecretBuffer<CHACHA20POLY1305_KEY_SIZE>> {
        SecretBuffer::random(rng)
    }

    /// Zeroize the key
    ///
    /// Afterwards the instance encrypts under the all-zero key.
    pub fn wipe(&mut self) {
        self.key.wipe();
    }

    fn cipher(&self, nonce: &Nonce<CHACHA20POLY1305_NONCE_SIZE>) -> ChaCha20 {
        ChaCha20::new(self.key.as_array(), nonce)
    }
}

impl Aead for ChaCha20Poly1305 {
    const KEY_SIZE: usize = CHACHA20POLY1305_KEY_SIZE;
    const NONCE_SIZE: usize = CHACHA20POLY1305_NONCE_SIZE;
    const MESSAGE_BYTES_MAX: u64 = CHACHA20POLY1305_MESSAGE_BYTES_MAX;

    type Nonce = Nonce<CHACHA20POLY1305_NONCE_SIZE>;

    fn name(&self) -> &'static str {
        "ChaCha20Poly1305"
    }

    fn seal_in_place_detached(
        &self,
        nonce: &Self::Nonce,
        buffer: &mut [u8],
        ad: &[u8],
    ) -> Result<Tag<AEAD_TAG_SIZE>> {
        message_length(self.name(), buffer.len(), Self::MESSAGE_BYTES_MAX)?;
        Ok(Construction::Original.seal_in_place(self.cipher(nonce), buffer, ad))
    }

    fn open_in_place_detached(
        &self,
        nonce: &Self::Nonce,
        buffer: &mut [u8],
        tag: &Tag<AEAD_TAG_SIZE>,
        ad: &[u8],
    ) -> Result<()> {
        Construction::Original.open_in_place(self.cipher(nonce), buffer, tag.as_ref(), ad, self.name())
    }

    fn open_detached_into(
        &self,
        dst: &mut [u8],
        nonce: &Self::Nonce,
        ciphertext: &[u8],
        tag: &Tag<AEAD_TAG_SIZE>,
        ad: &[u8],
    ) -> Result<()> {
        validate::buffer_len(self.name(), dst.len(), ciphertext.len())?;
        Construction::Original.open_to(
            self.cipher(nonce),
            dst,
            ciphertext,
            tag.as_ref(),
            ad,
            self.name(),
        )
    }
}

/// RFC 8439 ChaCha20-Poly1305, 12-byte nonce
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ChaCha20Poly1305Ietf {
    key: SecretBuffer<CHACHA20POLY1305_KEY_SIZE>,
}

impl ChaCha20Poly1305Ietf {
    /// Create a new instance from a 256-bit key
    pub fn new(key: &[u8; CHACHA20POLY1305_KEY_SIZE]) -> Self {
        Self {
            key: SecretBuffer::new(*key),
        }
    }

    /// Generate a random key
    pub fn generate_key<R: Random + ?Sized>(
        rng: &mut R,
    ) -> Result<SecretBuffer<CHACHA20POLY1305_KEY_SIZE>> {
        SecretBuffer::random(rng)
    }

    /// Zeroize the key
    pub fn wipe(&mut self) {
        self.key.wipe();
    }

    fn cipher(&self, nonce: &Nonce<CHACHA20POLY1305_IETF_NONCE_SIZE>) -> ChaCha20 {
        ChaCha20::new(self.key.as_array(), nonce)
    }
}

impl Aead for ChaCha20Poly1305Ietf {
    const KEY_SIZE: usize = CHACHA20POLY1305_KEY_SIZE;
    const NONCE_SIZE: usize = CHACHA20POLY1305_IETF_NONCE_SIZE;
    const MESSAGE_BYTES_MAX: u64 = CHACHA20POLY1305_IETF_MESSAGE_BYTES_MAX;

    type Nonce = Nonce<CHACHA20POLY1305_IETF_NONCE_SIZE>;

    fn name(&self) -> &'static str {
        "ChaCha20Poly1305Ietf"
    }

    fn seal_in_place_detached(
        &self,
        nonce: &Self::Nonce,
        buffer: &mut [u8],
        ad: &[u8],
    ) -> Result<Tag<AEAD_TAG_SIZE>> {
        message_length(self.name(), buffer.len(), Self::MESSAGE_BYTES_MAX)?;
        Ok(Construction::Ietf.seal_in_place(self.cipher(nonce), buffer, ad))
    }

    fn open_in_place_detached(
        &self,
        nonce: &Self::Nonce,
        buffer: &mut [u8],
        tag: &Tag<AEAD_TAG_SIZE>,
        ad: &[u8],
    ) -> Result<()> {
        Construction::Ietf.open_in_place(self.cipher(nonce), buffer, tag.as_ref(), ad, self.name())
    }

    fn open_detached_into(
        &self,
        dst: &mut [u8],
        nonce: &Self::Nonce,
        ciphertext: &[u8],
        tag: &Tag<AEAD_TAG_SIZE>,
        ad: &[u8],
    ) -> Result<()> {
        validate::buffer_len(self.name(), dst.len(), ciphertext.len())?;
        Construction::Ietf.open_to(
            self.cipher(nonce),
            dst,
            ciphertext,
            tag.as_ref(),
            ad,
            self.name(),
        )
    }
}
