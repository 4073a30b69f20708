//! XChaCha20-Poly1305-IETF authenticated encryption
//!
//! Extends the RFC 8439 construction to a 24-byte nonce: HChaCha20 turns
//! the key and the first 16 nonce bytes into a subkey, and the remaining 8
//! bytes, prefixed with four zero bytes, become the IETF nonce. Random
//! nonces are safe at this size.

use sodix_api::Random;
use sodix_common::security::SecretBuffer;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::chacha20poly1305::{
    CHACHA20POLY1305_IETF_MESSAGE_BYTES_MAX, CHACHA20POLY1305_IETF_NONCE_SIZE,
    CHACHA20POLY1305_KEY_SIZE,
};
use super::construction::Construction;
use super::{message_length, Aead, AEAD_TAG_SIZE};
use crate::error::{validate, Result};
use crate::stream::chacha::chacha20::ChaCha20;
use crate::subkey::hchacha20_block;
use crate::types::{Nonce, Tag};

/// Size of the XChaCha20-Poly1305 nonce in bytes
pub const XCHACHA20POLY1305_NONCE_SIZE: usize = 24;

/// XChaCha20-Poly1305-IETF, 24-byte nonce
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct XChaCha20Poly1305Ietf {
    key: SecretBuffer<CHACHA20POLY1305_KEY_SIZE>,
}

impl XChaCha20Poly1305Ietf {
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

    /// Generate a random nonce
    pub fn generate_nonce<R: Random + ?Sized>(
        rng: &mut R,
    ) -> Result<Nonce<XCHACHA20POLY1305_NONCE_SIZE>> {
        Nonce::random(rng)
    }

    /// Zeroize the key
    pub fn wipe(&mut self) {
        self.key.wipe();
    }

    /// IETF ChaCha20 under the HChaCha20 subkey
    fn cipher(&self, nonce: &Nonce<XCHACHA20POLY1305_NONCE_SIZE>) -> ChaCha20 {
        let mut prefix = [0u8; 16];
        prefix.copy_from_slice(&nonce[..16]);
        let subkey = hchacha20_block(self.key.as_array(), &prefix);

        let mut ietf_nonce = [0u8; CHACHA20POLY1305_IETF_NONCE_SIZE];
        ietf_nonce[4..].copy_from_slice(&nonce[16..]);
        ChaCha20::new(subkey.as_array(), &Nonce::new(ietf_nonce))
    }
}

impl Aead for XChaCha20Poly1305Ietf {
    const KEY_SIZE: usize = CHACHA20POLY1305_KEY_SIZE;
    const NONCE_SIZE: usize = XCHACHA20POLY1305_NONCE_SIZE;
    const MESSAGE_BYTES_MAX: u64 = CHACHA20POLY1305_IETF_MESSAGE_BYTES_MAX;

    type Nonce = Nonce<XCHACHA20POLY1305_NONCE_SIZE>;

    fn name(&self) -> &'static str {
        "XChaCha20Poly1305Ietf"
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
