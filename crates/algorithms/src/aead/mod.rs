//! Authenticated Encryption with Associated Data (AEAD)
//!
//! The ChaCha20-Poly1305 family and AES-256-GCM:
//!
//! | type | nonce | MAC layout |
//! |---|---|---|
//! | [`ChaCha20Poly1305`] | 8 bytes | original, unpadded |
//! | [`ChaCha20Poly1305Ietf`] | 12 bytes | RFC 8439 |
//! | [`XChaCha20Poly1305Ietf`] | 24 bytes | RFC 8439 under an HChaCha20 subkey |
//! | [`Aes256Gcm`] | 12 bytes | GHASH, NIST SP 800-38D |
//!
//! All four implement [`Aead`], which provides combined (`ciphertext ∥
//! tag`), detached, in-place and caller-buffer forms of seal and open on top
//! of two required in-place operations.
//!
//! ## Example usage
//!
//! ```
//! use sodix_algorithms::aead::{Aead, XChaCha20Poly1305Ietf};
//! use sodix_algorithms::types::Nonce;
//!
//! let aead = XChaCha20Poly1305Ietf::new(&[0x42; 32]);
//! let nonce = Nonce::new([0x24; 24]);
//!
//! let sealed = aead.seal(&nonce, b"secret message", b"header").unwrap();
//! let opened = aead.open(&nonce, &sealed, b"header").unwrap();
//! assert_eq!(opened, b"secret message");
//! ```

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use crate::error::{validate, Error, Result};
use crate::types::Tag;

pub mod construction;
pub use construction::Construction;

pub mod chacha20poly1305;
pub use chacha20poly1305::{ChaCha20Poly1305, ChaCha20Poly1305Ietf};

pub mod xchacha20poly1305;
pub use xchacha20poly1305::XChaCha20Poly1305Ietf;

pub mod gcm;
pub use gcm::Aes256Gcm;

/// Size of every tag produced by this module
pub const AEAD_TAG_SIZE: usize = 16;

/// Reject plaintexts longer than `max`
pub fn message_length(context: &'static str, len: usize, max: u64) -> Result<()> {
    if len as u64 > max {
        return Err(Error::InvalidLength {
            context,
            expected: usize::try_from(max).unwrap_or(usize::MAX),
            actual: len,
        });
    }
    Ok(())
}

/// A keyed AEAD instance
///
/// Implementors supply the in-place operations; everything else is
/// provided. A nonce must never be used twice with the same key.
pub trait Aead {
    /// Key size in bytes
    const KEY_SIZE: usize;
    /// Nonce size in bytes
    const NONCE_SIZE: usize;
    /// Tag size in bytes
    const TAG_SIZE: usize = AEAD_TAG_SIZE;
    /// Largest plaintext a single message may carry
    const MESSAGE_BYTES_MAX: u64;

    /// Nonce type for this construction
    type Nonce: AsRef<[u8]>;

    /// Algorithm name, used as error context
    fn name(&self) -> &'static str;

    /// Encrypt `buffer` in place and return the detached tag
    ///
    /// Fails with `Error::InvalidLength` if the plaintext exceeds
    /// [`MESSAGE_BYTES_MAX`](Self::MESSAGE_BYTES_MAX).
    fn seal_in_place_detached(
        &self,
        nonce: &Self::Nonce,
        buffer: &mut [u8],
        ad: &[u8],
    ) -> Result<Tag<AEAD_TAG_SIZE>>;

    /// Verify `tag`, then decrypt `buffer` in place
    ///
    /// On `Error::ForgedOrCorrupted` the buffer is left holding the
    /// ciphertext.
    fn open_in_place_detached(
        &self,
        nonce: &Self::Nonce,
        buffer: &mut [u8],
        tag: &Tag<AEAD_TAG_SIZE>,
        ad: &[u8],
    ) -> Result<()>;

    /// Verify `tag` over `ciphertext`, then decrypt into the front of `dst`
    ///
    /// `dst` is not written unless verification succeeds. Fails with
    /// `Error::BufferTooShort` if `dst` is shorter than `ciphertext`.
    fn open_detached_into(
        &self,
        dst: &mut [u8],
        nonce: &Self::Nonce,
        ciphertext: &[u8],
        tag: &Tag<AEAD_TAG_SIZE>,
        ad: &[u8],
    ) -> Result<()>;

    /// Encrypt into `dst` as `ciphertext ∥ tag`, returning the bytes written
    fn seal_into(
        &self,
        dst: &mut [u8],
        nonce: &Self::Nonce,
        plaintext: &[u8],
        ad: &[u8],
    ) -> Result<usize> {
        let total = plaintext.len() + AEAD_TAG_SIZE;
        validate::buffer_len(self.name(), dst.len(), total)?;

        let (body, rest) = dst.split_at_mut(plaintext.len());
        body.copy_from_slice(plaintext);
        let tag = self.seal_in_place_detached(nonce, body, ad)?;
        rest[..AEAD_TAG_SIZE].copy_from_slice(tag.as_ref());
        Ok(total)
    }

    /// Decrypt a combined `ciphertext ∥ tag` into `dst`, returning the
    /// plaintext length
    fn open_into(
        &self,
        dst: &mut [u8],
        nonce: &Self::Nonce,
        ciphertext: &[u8],
        ad: &[u8],
    ) -> Result<usize> {
        validate::ciphertext_length(self.name(), ciphertext.len(), AEAD_TAG_SIZE)?;
        let (body, tag) = ciphertext.split_at(ciphertext.len() - AEAD_TAG_SIZE);
        let tag = Tag::from_slice(tag)?;

        self.open_detached_into(dst, nonce, body, &tag, ad)?;
        Ok(body.len())
    }

    /// Encrypt, returning the ciphertext and the detached tag
    #[cfg(feature = "alloc")]
    fn seal_detached(
        &self,
        nonce: &Self::Nonce,
        plaintext: &[u8],
        ad: &[u8],
    ) -> Result<(Vec<u8>, Tag<AEAD_TAG_SIZE>)> {
        let mut ciphertext = plaintext.to_vec();
        let tag = self.seal_in_place_detached(nonce, &mut ciphertext, ad)?;
        Ok((ciphertext, tag))
    }

    /// Encrypt, returning `ciphertext ∥ tag`
    #[cfg(feature = "alloc")]
    fn seal(&self, nonce: &Self::Nonce, plaintext: &[u8], ad: &[u8]) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(plaintext.len() + AEAD_TAG_SIZE);
        out.extend_from_slice(plaintext);
        self.seal_in_place(nonce, &mut out, ad)?;
        Ok(out)
    }

    /// Replace the plaintext in `buffer` with `ciphertext ∥ tag`
    #[cfg(feature = "alloc")]
    fn seal_in_place(&self, nonce: &Self::Nonce, buffer: &mut Vec<u8>, ad: &[u8]) -> Result<()> {
        let tag = self.seal_in_place_detached(nonce, buffer, ad)?;
        buffer.extend_from_slice(tag.as_ref());
        Ok(())
    }

    /// Verify and decrypt a detached ciphertext
    #[cfg(feature = "alloc")]
    fn open_detached(
        &self,
        nonce: &Self::Nonce,
        ciphertext: &[u8],
        tag: &Tag<AEAD_TAG_SIZE>,
        ad: &[u8],
    ) -> Result<Vec<u8>> {
        let mut plaintext = alloc::vec![0u8; ciphertext.len()];
        self.open_detached_into(&mut plaintext, nonce, ciphertext, tag, ad)?;
        Ok(plaintext)
    }

    /// Verify and decrypt `ciphertext ∥ tag`
    ///
    /// Fails with `Error::CipherTooShort` if the input is shorter than a tag.
    #[cfg(feature = "alloc")]
    fn open(&self, nonce: &Self::Nonce, ciphertext: &[u8], ad: &[u8]) -> Result<Vec<u8>> {
        validate::ciphertext_length(self.name(), ciphertext.len(), AEAD_TAG_SIZE)?;
        let mut plaintext = alloc::vec![0u8; ciphertext.len() - AEAD_TAG_SIZE];
        self.open_into(&mut plaintext, nonce, ciphertext, ad)?;
        Ok(plaintext)
    }

    /// Replace `ciphertext ∥ tag` in `buffer` with the plaintext
    ///
    /// `buffer` is unchanged on failure.
    #[cfg(feature = "alloc")]
    fn open_in_place(&self, nonce: &Self::Nonce, buffer: &mut Vec<u8>, ad: &[u8]) -> Result<()> {
        validate::ciphertext_length(self.name(), buffer.len(), AEAD_TAG_SIZE)?;
        let body_len = buffer.len() - AEAD_TAG_SIZE;
        let tag = Tag::from_slice(&buffer[body_len..])?;

        self.open_in_place_detached(nonce, &mut buffer[..body_len], &tag, ad)?;
        buffer.truncate(body_len);
        Ok(())
    }
}
