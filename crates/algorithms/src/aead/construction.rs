//! Stream cipher + Poly1305 composition
//!
//! Every AEAD and SecretBox type in this crate is one [`Construction`]
//! applied to a freshly keyed [`StreamCipher`]. The cipher supplies the
//! one-time Poly1305 key from the start of its keystream, then encrypts the
//! payload with what follows.
//!
//! Opening always authenticates the received ciphertext first; the
//! keystream is applied only after the tag has been accepted.

use byteorder::{ByteOrder, LittleEndian};
use sodix_common::security::EphemeralSecret;
use sodix_internal::constant_time::ct_eq;

use crate::error::{validate, Result};
use crate::mac::poly1305::{Poly1305, POLY1305_KEY_SIZE, POLY1305_TAG_SIZE};
use crate::stream::StreamCipher;
use crate::types::Tag;

/// Zero bytes for padding MAC input to the Poly1305 block size
pub const ZERO_PAD: [u8; 16] = [0u8; 16];

/// Bytes of padding needed to bring `len` to a multiple of 16
#[inline]
pub const fn pad16(len: usize) -> usize {
    (16 - (len % 16)) % 16
}

/// How the MAC key is taken from the keystream and what the MAC covers
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Construction {
    /// Original ChaCha20-Poly1305
    ///
    /// MAC key from block 0, payload from block 1.
    /// MAC input: `AD ∥ LE64(|AD|) ∥ C ∥ LE64(|C|)`.
    Original,
    /// RFC 8439, also used with extended nonces
    ///
    /// MAC key from block 0, payload from block 1.
    /// MAC input: `AD ∥ pad16 ∥ C ∥ pad16 ∥ LE64(|AD|) ∥ LE64(|C|)`.
    Ietf,
    /// NaCl `crypto_secretbox`
    ///
    /// MAC key from the first 32 keystream bytes, payload from byte 32 of
    /// the same block. MAC input: the ciphertext alone.
    SecretBox,
}

impl Construction {
    /// Keystream bytes consumed before the payload starts
    fn payload_offset(self) -> usize {
        match self {
            Construction::Original | Construction::Ietf => 64,
            Construction::SecretBox => POLY1305_KEY_SIZE,
        }
    }

    /// Draw the one-time Poly1305 key from `cipher` and leave it positioned
    /// at the first payload byte
    pub fn authenticator<C: StreamCipher>(self, cipher: &mut C) -> Poly1305 {
        let mut block = EphemeralSecret::new([0u8; 64]);
        cipher.keystream(&mut block[..self.payload_offset()]);

        let mut key = EphemeralSecret::new([0u8; POLY1305_KEY_SIZE]);
        key.copy_from_slice(&block[..POLY1305_KEY_SIZE]);
        Poly1305::new(&key)
    }

    /// Feed `ad` and `ciphertext` to `mac` in this construction's layout and
    /// return the tag
    pub fn tag(self, mut mac: Poly1305, ad: &[u8], ciphertext: &[u8]) -> Tag<POLY1305_TAG_SIZE> {
        let mut len = [0u8; 8];
        match self {
            Construction::Original => {
                mac.update(ad);
                LittleEndian::write_u64(&mut len, ad.len() as u64);
                mac.update(&len);
                mac.update(ciphertext);
                LittleEndian::write_u64(&mut len, ciphertext.len() as u64);
                mac.update(&len);
            }
            Construction::Ietf => {
                mac.update(ad);
                mac.update(&ZERO_PAD[..pad16(ad.len())]);
                mac.update(ciphertext);
                mac.update(&ZERO_PAD[..pad16(ciphertext.len())]);
                LittleEndian::write_u64(&mut len, ad.len() as u64);
                mac.update(&len);
                LittleEndian::write_u64(&mut len, ciphertext.len() as u64);
                mac.update(&len);
            }
            Construction::SecretBox => mac.update(ciphertext),
        }
        mac.finalize()
    }

    /// Encrypt `buffer` in place and return its tag
    pub fn seal_in_place<C: StreamCipher>(
        self,
        mut cipher: C,
        buffer: &mut [u8],
        ad: &[u8],
    ) -> Tag<POLY1305_TAG_SIZE> {
        let mac = self.authenticator(&mut cipher);
        cipher.apply_keystream(buffer);
        cipher.wipe();
        self.tag(mac, ad, buffer)
    }

    /// Authenticate `buffer` against `tag`, then decrypt it in place
    ///
    /// On failure `buffer` still holds the ciphertext.
    pub fn open_in_place<C: StreamCipher>(
        self,
        mut cipher: C,
        buffer: &mut [u8],
        tag: &[u8],
        ad: &[u8],
        context: &'static str,
    ) -> Result<()> {
        let mac = self.authenticator(&mut cipher);
        let expected = self.tag(mac, ad, buffer);
        validate::authentication(ct_eq(expected.as_ref(), tag), context)?;

        cipher.apply_keystream(buffer);
        cipher.wipe();
        Ok(())
    }

    /// Authenticate `ciphertext` against `tag`, then decrypt it into
    /// `dst[..ciphertext.len()]`
    ///
    /// `dst` is not written unless authentication succeeds.
    ///
    /// # Panics
    ///
    /// Panics if `dst` is shorter than `ciphertext`.
    pub fn open_to<C: StreamCipher>(
        self,
        mut cipher: C,
        dst: &mut [u8],
        ciphertext: &[u8],
        tag: &[u8],
        ad: &[u8],
        context: &'static str,
    ) -> Result<()> {
        let mac = self.authenticator(&mut cipher);
        let expected = self.tag(mac, ad, ciphertext);
        validate::authentication(ct_eq(expected.as_ref(), tag), context)?;

        cipher.xor_keystream(dst, ciphertext);
        cipher.wipe();
        Ok(())
    }
}
