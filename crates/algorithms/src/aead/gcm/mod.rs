//! AES-256-GCM authenticated encryption (NIST SP 800-38D)
//!
//! 12-byte nonce, 16-byte tag, combined output `ciphertext ∥ tag`, the same
//! layout as libsodium's `crypto_aead_aes256gcm`. The nonce is too short to
//! draw at random for a long-lived key; prefer a counter.
//!
//! ## Constant-Time Guarantees
//!
//! * AES uses a computed S-box and GHASH a masked multiply, so neither
//!   indexes memory by secret data.
//! * Tags are compared with `subtle`, and the counter-mode keystream is
//!   applied to a ciphertext only after its tag is accepted.

use byteorder::{BigEndian, ByteOrder};
use sodix_api::Random;
use sodix_common::security::{EphemeralSecret, SecretBuffer};
use sodix_internal::constant_time::{ct_eq, xor_in_place};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{message_length, Aead, AEAD_TAG_SIZE};
use crate::block::aes::{Aes256, AES256_KEY_SIZE, AES_BLOCK_SIZE};
use crate::error::{validate, Result};
use crate::types::{Nonce, Tag};

pub mod ghash;
use ghash::GHash;

/// Size of the AES-256-GCM key in bytes
pub const AES256GCM_KEY_SIZE: usize = AES256_KEY_SIZE;
/// Size of the AES-256-GCM nonce in bytes
pub const AES256GCM_NONCE_SIZE: usize = 12;
/// Size of the authentication tag in bytes
pub const AES256GCM_TAG_SIZE: usize = AEAD_TAG_SIZE;
/// Largest plaintext: the 32-bit block counter leaves 2^32 - 2 blocks
pub const AES256GCM_MESSAGE_BYTES_MAX: u64 = 16 * ((1u64 << 32) - 2);

/// AES-256-GCM, 12-byte nonce
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Aes256Gcm {
    cipher: Aes256,
    /// Hash subkey `E(K, 0^128)`
    h: SecretBuffer<AES_BLOCK_SIZE>,
}

impl Aes256Gcm {
    /// Create a new instance from a 256-bit key
    pub fn new(key: &[u8; AES256GCM_KEY_SIZE]) -> Self {
        let cipher = Aes256::new(key);
        let mut h = SecretBuffer::<AES_BLOCK_SIZE>::zeroed();
        cipher.encrypt_block(h.as_mut_array());
        Self { cipher, h }
    }

    /// Generate a random key
    pub fn generate_key<R: Random + ?Sized>(
        rng: &mut R,
    ) -> Result<SecretBuffer<AES256GCM_KEY_SIZE>> {
        SecretBuffer::random(rng)
    }

    /// Generate a random nonce
    ///
    /// Safe only for a modest number of messages per key.
    pub fn generate_nonce<R: Random + ?Sized>(rng: &mut R) -> Result<Nonce<AES256GCM_NONCE_SIZE>> {
        Nonce::random(rng)
    }

    /// Zeroize the round keys and the hash subkey
    ///
    /// The instance is unusable afterwards; build a new one.
    pub fn wipe(&mut self) {
        self.cipher.wipe();
        self.h.wipe();
    }

    /// Pre-counter block `J0 = nonce ∥ 0^31 ∥ 1`
    fn initial_counter(nonce: &Nonce<AES256GCM_NONCE_SIZE>) -> [u8; AES_BLOCK_SIZE] {
        let mut j0 = [0u8; AES_BLOCK_SIZE];
        j0[..AES256GCM_NONCE_SIZE].copy_from_slice(nonce.as_ref());
        j0[AES_BLOCK_SIZE - 1] = 1;
        j0
    }

    /// XOR `buffer` with the keystream starting at `inc32(j0)`
    fn apply_keystream(&self, j0: &[u8; AES_BLOCK_SIZE], buffer: &mut [u8]) {
        let mut counter = *j0;
        let mut keystream = EphemeralSecret::new([0u8; AES_BLOCK_SIZE]);

        for chunk in buffer.chunks_mut(AES_BLOCK_SIZE) {
            let next = BigEndian::read_u32(&counter[12..]).wrapping_add(1);
            BigEndian::write_u32(&mut counter[12..], next);

            keystream.copy_from_slice(&counter);
            self.cipher.encrypt_block(&mut keystream);
            xor_in_place(chunk, &keystream[..chunk.len()]);
        }
    }

    /// `E(K, J0) ⊕ GHASH(H, ad, ciphertext)`
    fn tag(&self, j0: &[u8; AES_BLOCK_SIZE], ad: &[u8], ciphertext: &[u8]) -> Tag<AEAD_TAG_SIZE> {
        let mut ghash = GHash::new(self.h.as_array());
        ghash.update_padded(ad);
        ghash.update_padded(ciphertext);
        let mut tag = ghash.finalize(ad.len(), ciphertext.len());

        let mut mask = EphemeralSecret::new(*j0);
        self.cipher.encrypt_block(&mut mask);
        xor_in_place(&mut tag, &mask[..]);
        Tag::new(tag)
    }
}

impl Aead for Aes256Gcm {
    const KEY_SIZE: usize = AES256GCM_KEY_SIZE;
    const NONCE_SIZE: usize = AES256GCM_NONCE_SIZE;
    const MESSAGE_BYTES_MAX: u64 = AES256GCM_MESSAGE_BYTES_MAX;

    type Nonce = Nonce<AES256GCM_NONCE_SIZE>;

    fn name(&self) -> &'static str {
        "Aes256Gcm"
    }

    fn seal_in_place_detached(
        &self,
        nonce: &Self::Nonce,
        buffer: &mut [u8],
        ad: &[u8],
    ) -> Result<Tag<AEAD_TAG_SIZE>> {
        message_length(self.name(), buffer.len(), Self::MESSAGE_BYTES_MAX)?;
        let j0 = Self::initial_counter(nonce);
        self.apply_keystream(&j0, buffer);
        Ok(self.tag(&j0, ad, buffer))
    }

    fn open_in_place_detached(
        &self,
        nonce: &Self::Nonce,
        buffer: &mut [u8],
        tag: &Tag<AEAD_TAG_SIZE>,
        ad: &[u8],
    ) -> Result<()> {
        let j0 = Self::initial_counter(nonce);
        let expected = self.tag(&j0, ad, buffer);
        validate::authentication(ct_eq(expected.as_ref(), tag.as_ref()), self.name())?;

        self.apply_keystream(&j0, buffer);
        Ok(())
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
        let j0 = Self::initial_counter(nonce);
        let expected = self.tag(&j0, ad, ciphertext);
        validate::authentication(ct_eq(expected.as_ref(), tag.as_ref()), self.name())?;

        let out = &mut dst[..ciphertext.len()];
        out.copy_from_slice(ciphertext);
        self.apply_keystream(&j0, out);
        Ok(())
    }
}
