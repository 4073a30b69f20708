//! Secret-key authenticated encryption without associated data
//!
//! NaCl's `crypto_secretbox`: a 24-byte nonce selects an extended-nonce
//! stream cipher, the first 32 keystream bytes key Poly1305, the message is
//! encrypted with the keystream that follows and the MAC covers the
//! ciphertext alone.
//!
//! * [`XSalsa20Poly1305`]: the NaCl default
//! * [`XChaCha20Poly1305`]: the same construction over XChaCha20
//!
//! The combined format is `tag ∥ ciphertext`, matching libsodium's
//! `crypto_secretbox_easy`.

use core::marker::PhantomData;

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use sodix_api::Random;
use sodix_common::security::SecretBuffer;

use crate::aead::construction::Construction;
use crate::aead::message_length;
use crate::error::{validate, Result};
use crate::stream::{ChaCha20, Salsa20, StreamCipher};
use crate::subkey::hsalsa20_block;
use crate::types::{Nonce, Tag};

/// Size of the secretbox key in bytes
pub const SECRETBOX_KEY_SIZE: usize = 32;
/// Size of the secretbox nonce in bytes
pub const SECRETBOX_NONCE_SIZE: usize = 24;
/// Size of the secretbox authentication tag in bytes
pub const SECRETBOX_MAC_SIZE: usize = 16;
/// Largest message a single box may carry
pub const SECRETBOX_MESSAGE_BYTES_MAX: u64 = u64::MAX - SECRETBOX_MAC_SIZE as u64;

mod sealed {
    pub trait Sealed {}
}

/// Stream cipher selection for [`SecretBox`]
pub trait BoxCipher: sealed::Sealed {
    /// Concrete cipher type
    type Stream: StreamCipher;
    /// Algorithm name, used as error context
    const NAME: &'static str;

    /// Key the cipher for one box, positioned at keystream byte 0
    fn stream(key: &[u8; SECRETBOX_KEY_SIZE], nonce: &Nonce<SECRETBOX_NONCE_SIZE>) -> Self::Stream;
}

/// XSalsa20 selector
#[derive(Debug)]
pub enum XSalsa20Cipher {}

/// XChaCha20 selector
#[derive(Debug)]
pub enum XChaCha20Cipher {}

impl sealed::Sealed for XSalsa20Cipher {}
impl sealed::Sealed for XChaCha20Cipher {}

impl BoxCipher for XSalsa20Cipher {
    type Stream = Salsa20;
    const NAME: &'static str = "XSalsa20Poly1305";

    fn stream(key: &[u8; SECRETBOX_KEY_SIZE], nonce: &Nonce<SECRETBOX_NONCE_SIZE>) -> Salsa20 {
        Salsa20::new(key, nonce)
    }
}

impl BoxCipher for XChaCha20Cipher {
    type Stream = ChaCha20;
    const NAME: &'static str = "XChaCha20Poly1305";

    fn stream(key: &[u8; SECRETBOX_KEY_SIZE], nonce: &Nonce<SECRETBOX_NONCE_SIZE>) -> ChaCha20 {
        ChaCha20::new(key, nonce)
    }
}

/// NaCl `crypto_secretbox_xsalsa20poly1305`
pub type XSalsa20Poly1305 = SecretBox<XSalsa20Cipher>;

/// libsodium `crypto_secretbox_xchacha20poly1305`
pub type XChaCha20Poly1305 = SecretBox<XChaCha20Cipher>;

/// A keyed secretbox
///
/// The key lives in a [`SecretBuffer`] and is zeroized on drop.
pub struct SecretBox<C: BoxCipher> {
    key: SecretBuffer<SECRETBOX_KEY_SIZE>,
    cipher: PhantomData<C>,
}

impl<C: BoxCipher> Clone for SecretBox<C> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            cipher: PhantomData,
        }
    }
}

impl XSalsa20Poly1305 {
    /// Key a box from a Diffie-Hellman shared secret
    ///
    /// Applies HSalsa20 with a zero input, as `crypto_box_beforenm` does,
    /// so the raw output of a key exchange is never used as a key directly.
    pub fn from_shared_secret(shared: &[u8; 32]) -> Self {
        let key = hsalsa20_block(shared, &[0u8; 16]);
        Self {
            key,
            cipher: PhantomData,
        }
    }
}

impl<C: BoxCipher> SecretBox<C> {
    /// Create a new instance from a 256-bit key
    pub fn new(key: &[u8; SECRETBOX_KEY_SIZE]) -> Self {
        Self {
            key: SecretBuffer::new(*key),
            cipher: PhantomData,
        }
    }

    /// Generate a random key
    pub fn generate_key<R: Random + ?Sized>(rng: &mut R) -> Result<SecretBuffer<SECRETBOX_KEY_SIZE>> {
        SecretBuffer::random(rng)
    }

    /// Generate a random nonce
    pub fn generate_nonce<R: Random + ?Sized>(rng: &mut R) -> Result<Nonce<SECRETBOX_NONCE_SIZE>> {
        Nonce::random(rng)
    }

    /// Zeroize the key
    pub fn wipe(&mut self) {
        self.key.wipe();
    }

    /// Encrypt `buffer` in place and return the detached tag
    pub fn seal_in_place_detached(
        &self,
        nonce: &Nonce<SECRETBOX_NONCE_SIZE>,
        buffer: &mut [u8],
    ) -> Result<Tag<SECRETBOX_MAC_SIZE>> {
        message_length(C::NAME, buffer.len(), SECRETBOX_MESSAGE_BYTES_MAX)?;
        let stream = C::stream(self.key.as_array(), nonce);
        Ok(Construction::SecretBox.seal_in_place(stream, buffer, &[]))
    }

    /// Verify `tag`, then decrypt `buffer` in place
    ///
    /// `buffer` is unchanged on failure.
    pub fn open_in_place_detached(
        &self,
        nonce: &Nonce<SECRETBOX_NONCE_SIZE>,
        buffer: &mut [u8],
        tag: &Tag<SECRETBOX_MAC_SIZE>,
    ) -> Result<()> {
        let stream = C::stream(self.key.as_array(), nonce);
        Construction::SecretBox.open_in_place(stream, buffer, tag.as_ref(), &[], C::NAME)
    }

    /// Encrypt into `dst` as `tag ∥ ciphertext`, returning the bytes written
    pub fn seal_into(
        &self,
        dst: &mut [u8],
        nonce: &Nonce<SECRETBOX_NONCE_SIZE>,
        plaintext: &[u8],
    ) -> Result<usize> {
        let total = plaintext.len() + SECRETBOX_MAC_SIZE;
        validate::buffer_len(C::NAME, dst.len(), total)?;

        let (mac, body) = dst[..total].split_at_mut(SECRETBOX_MAC_SIZE);
        body.copy_from_slice(plaintext);
        let tag = self.seal_in_place_detached(nonce, body)?;
        mac.copy_from_slice(tag.as_ref());
        Ok(total)
    }

    /// Verify and decrypt `tag ∥ ciphertext` into `dst`, returning the
    /// plaintext length
    ///
    /// `dst` is not written unless verification succeeds.
    pub fn open_into(
        &self,
        dst: &mut [u8],
        nonce: &Nonce<SECRETBOX_NONCE_SIZE>,
        boxed: &[u8],
    ) -> Result<usize> {
        validate::ciphertext_length(C::NAME, boxed.len(), SECRETBOX_MAC_SIZE)?;
        let (tag, ciphertext) = boxed.split_at(SECRETBOX_MAC_SIZE);
        validate::buffer_len(C::NAME, dst.len(), ciphertext.len())?;

        let stream = C::stream(self.key.as_array(), nonce);
        Construction::SecretBox.open_to(stream, dst, ciphertext, tag, &[], C::NAME)?;
        Ok(ciphertext.len())
    }

    /// Encrypt, returning the ciphertext and the detached tag
    #[cfg(feature = "alloc")]
    pub fn seal_detached(
        &self,
        nonce: &Nonce<SECRETBOX_NONCE_SIZE>,
        plaintext: &[u8],
    ) -> Result<(Vec<u8>, Tag<SECRETBOX_MAC_SIZE>)> {
        let mut ciphertext = plaintext.to_vec();
        let tag = self.seal_in_place_detached(nonce, &mut ciphertext)?;
        Ok((ciphertext, tag))
    }

    /// Encrypt, returning `tag ∥ ciphertext`
    #[cfg(feature = "alloc")]
    pub fn seal(&self, nonce: &Nonce<SECRETBOX_NONCE_SIZE>, plaintext: &[u8]) -> Result<Vec<u8>> {
        let mut out = alloc::vec![0u8; plaintext.len() + SECRETBOX_MAC_SIZE];
        self.seal_into(&mut out, nonce, plaintext)?;
        Ok(out)
    }

    /// Verify and decrypt a detached ciphertext
    #[cfg(feature = "alloc")]
    pub fn open_detached(
        &self,
        nonce: &Nonce<SECRETBOX_NONCE_SIZE>,
        ciphertext: &[u8],
        tag: &Tag<SECRETBOX_MAC_SIZE>,
    ) -> Result<Vec<u8>> {
        let mut plaintext = alloc::vec![0u8; ciphertext.len()];
        let stream = C::stream(self.key.as_array(), nonce);
        Construction::SecretBox.open_to(stream, &mut plaintext, ciphertext, tag.as_ref(), &[], C::NAME)?;
        Ok(plaintext)
    }

    /// Verify and decrypt `tag ∥ ciphertext`
    ///
    /// Fails with `Error::CipherTooShort` if the input is shorter than a tag.
    #[cfg(feature = "alloc")]
    pub fn open(&self, nonce: &Nonce<SECRETBOX_NONCE_SIZE>, boxed: &[u8]) -> Result<Vec<u8>> {
        validate::ciphertext_length(C::NAME, boxed.len(), SECRETBOX_MAC_SIZE)?;
        let mut plaintext = alloc::vec![0u8; boxed.len() - SECRETBOX_MAC_SIZE];
        self.open_into(&mut plaintext, nonce, boxed)?;
        Ok(plaintext)
    }
}

#[cfg(test)]
mod tests;
