//! `crypto_secretstream_xchacha20poly1305`
//!
//! A stream is keyed once and then carries any number of chunks. Each chunk
//! is encrypted with IETF ChaCha20 under a key derived from the stream key
//! and a random header, authenticated with Poly1305 and tagged with a
//! [`ChunkTag`]. The MAC of every chunk is folded into the nonce of the next
//! one, so chunks cannot be dropped, duplicated or reordered without the
//! receiver noticing.
//!
//! The chunk layout is libsodium's, but the MAC pads the tag block and the
//! ciphertext together to a 16-byte boundary. Chunks whose plaintext length
//! is not a multiple of 16 therefore do not verify under libsodium.
//!
//!
//! ```text
//! header (24) ∥ chunk ∥ chunk ∥ ...
//! chunk = encrypted tag byte (1) ∥ ciphertext (|m|) ∥ MAC (16)
//! ```
//!
//! ## Example usage
//!
//! ```
//! use sodix_common::OsRandom;
//! use sodix_symmetric::secretstream::{ChunkTag, SecretStreamXChaCha20Poly1305};
//!
//! let key = [7u8; 32];
//! let (mut tx, header) = SecretStreamXChaCha20Poly1305::init_push(&key, &mut OsRandom).unwrap();
//! let first = tx.push(b"first", b"", ChunkTag::Message).unwrap();
//! let last = tx.push(b"last", b"", ChunkTag::Final).unwrap();
//!
//! let mut rx = SecretStreamXChaCha20Poly1305::init_pull(&header, &key);
//! assert_eq!(rx.pull(&first, b"").unwrap(), (b"first".to_vec(), ChunkTag::Message));
//! assert_eq!(rx.pull(&last, b"").unwrap(), (b"last".to_vec(), ChunkTag::Final));
//! ```

use core::fmt;

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use byteorder::{ByteOrder, LittleEndian};
use log::{debug, trace, warn};
use sodix_algorithms::aead::construction::{pad16, Construction, ZERO_PAD};
use sodix_algorithms::aead::message_length;
use sodix_algorithms::mac::Poly1305;
use sodix_algorithms::stream::{ChaCha20, StreamCipher};
use sodix_algorithms::subkey::hchacha20_block;
use sodix_algorithms::types::{Nonce, Tag};
use sodix_api::Random;
use sodix_common::security::{EphemeralSecret, SecretBuffer};
use sodix_internal::constant_time::{ct_eq, increment_le, is_zero, xor_in_place};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{validate, validate_stream_state, Error, Result};

/// Per-chunk overhead: one tag byte and a 16-byte MAC
pub const ABYTES: usize = 1 + MAC_BYTES;
/// Size of the stream header in bytes
pub const HEADERBYTES: usize = 24;
/// Size of the stream key in bytes
pub const KEYBYTES: usize = 32;
/// Largest plaintext a single chunk may carry
pub const MESSAGEBYTES_MAX: u64 = 64 * ((1u64 << 32) - 2);

const MAC_BYTES: usize = 16;
const COUNTER_BYTES: usize = 4;
const INONCE_BYTES: usize = 8;
const BLOCK_BYTES: usize = 64;
const CONTEXT: &str = "SecretStreamXChaCha20Poly1305";

/// Chunk tag, transmitted encrypted with every chunk
///
/// `Final` is `Push | Rekey`, so a final chunk also rekeys the state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ChunkTag {
    /// An ordinary chunk
    Message = 0x00,
    /// End of a logical message within the stream
    Push = 0x01,
    /// Rekey the state after this chunk
    Rekey = 0x02,
    /// Last chunk of the stream
    Final = 0x03,
}

impl ChunkTag {
    const REKEY_BIT: u8 = 0x02;

    /// Wire value
    pub const fn as_byte(self) -> u8 {
        self as u8
    }

    /// Parse a wire value, `None` for anything outside the four tags
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(ChunkTag::Message),
            0x01 => Some(ChunkTag::Push),
            0x02 => Some(ChunkTag::Rekey),
            0x03 => Some(ChunkTag::Final),
            _ => None,
        }
    }

    /// True if the state is rekeyed after a chunk with this tag
    pub const fn should_rekey(self) -> bool {
        self.as_byte() & Self::REKEY_BIT != 0
    }

    /// True only for [`ChunkTag::Final`]
    pub const fn is_final(self) -> bool {
        matches!(self, ChunkTag::Final)
    }
}

impl From<ChunkTag> for u8 {
    fn from(tag: ChunkTag) -> u8 {
        tag.as_byte()
    }
}

/// Stream header
///
/// Generated by the sender and sent in the clear ahead of the first chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header([u8; HEADERBYTES]);

impl Header {
    /// Wrap header bytes
    pub const fn new(bytes: [u8; HEADERBYTES]) -> Self {
        Self(bytes)
    }

    /// A fresh random header
    pub fn random<R: Random + ?Sized>(rng: &mut R) -> Result<Self> {
        let mut bytes = [0u8; HEADERBYTES];
        rng.fill(&mut bytes)?;
        Ok(Self(bytes))
    }

    /// Parse exactly [`HEADERBYTES`] bytes
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        validate::length("secretstream header", slice.len(), HEADERBYTES)?;
        let mut bytes = [0u8; HEADERBYTES];
        bytes.copy_from_slice(slice);
        Ok(Self(bytes))
    }

    /// Header bytes
    pub fn as_bytes(&self) -> &[u8; HEADERBYTES] {
        &self.0
    }
}

impl From<[u8; HEADERBYTES]> for Header {
    fn from(bytes: [u8; HEADERBYTES]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Header {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// SecretStream state for one direction of a stream
///
/// The same type pushes or pulls; a given instance must only do one of the
/// two. Key material is zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretStreamXChaCha20Poly1305 {
    key: SecretBuffer<KEYBYTES>,
    /// `LE32(counter) ∥ inner nonce`, the IETF nonce of the next chunk
    nonce: [u8; COUNTER_BYTES + INONCE_BYTES],
    finalized: bool,
}

impl SecretStreamXChaCha20Poly1305 {
    /// Generate a random stream key
    pub fn keygen<R: Random + ?Sized>(rng: &mut R) -> Result<SecretBuffer<KEYBYTES>> {
        SecretBuffer::random(rng)
    }

    /// Start a stream for sending, returning the state and the header to
    /// transmit
    pub fn init_push<R: Random + ?Sized>(
        key: &[u8; KEYBYTES],
        rng: &mut R,
    ) -> Result<(Self, Header)> {
        let header = Header::random(rng)?;
        Ok((Self::init_push_with_header(key, &header), header))
    }

    /// Start a stream for sending with a caller-chosen header
    ///
    /// The header must never repeat under the same key.
    pub fn init_push_with_header(key: &[u8; KEYBYTES], header: &Header) -> Self {
        debug!("secretstream: initialized for push");
        Self::from_header(key, header)
    }

    /// Start a stream for receiving
    pub fn init_pull(header: &Header, key: &[u8; KEYBYTES]) -> Self {
        debug!("secretstream: initialized for pull");
        Self::from_header(key, header)
    }

    /// Start a stream for receiving from the first [`HEADERBYTES`] of `header`
    ///
    /// Fails with `Error::BufferTooShort` if fewer bytes are available.
    pub fn init_pull_from_slice(header: &[u8], key: &[u8; KEYBYTES]) -> Result<Self> {
        validate::min_length("secretstream header", header.len(), HEADERBYTES)?;
        let header = Header::from_slice(&header[..HEADERBYTES])?;
        Ok(Self::init_pull(&header, key))
    }

    fn from_header(key: &[u8; KEYBYTES], header: &Header) -> Self {
        let mut input = [0u8; 16];
        input.copy_from_slice(&header.0[..16]);

        let mut state = Self {
            key: hchacha20_block(key, &input),
            nonce: [0u8; COUNTER_BYTES + INONCE_BYTES],
            finalized: false,
        };
        state.nonce[COUNTER_BYTES..].copy_from_slice(&header.0[16..]);
        state.reset_counter();
        state
    }

    /// True once a [`ChunkTag::Final`] chunk has been pushed or pulled
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Encrypt one chunk into `dst`, returning the bytes written
    ///
    /// `dst` needs room for `plaintext.len() + ABYTES` bytes.
    pub fn push_into(
        &mut self,
        dst: &mut [u8],
        plaintext: &[u8],
        ad: &[u8],
        tag: ChunkTag,
    ) -> Result<usize> {
        validate_stream_state(!self.finalized, "secretstream push after final chunk")?;
        message_length(CONTEXT, plaintext.len(), MESSAGEBYTES_MAX)?;
        let total = plaintext.len() + ABYTES;
        validate::buffer_len(CONTEXT, dst.len(), total)?;

        let mut cipher = self.cipher();
        let mut mac = Construction::Ietf.authenticator(&mut cipher);
        mac.update(ad);
        mac.update(&ZERO_PAD[..pad16(ad.len())]);

        let mut block = EphemeralSecret::new([0u8; BLOCK_BYTES]);
        block[0] = tag.as_byte();
        cipher.apply_keystream(&mut block[..]);
        mac.update(&block[..]);

        let (tag_byte, rest) = dst[..total].split_at_mut(1);
        let (body, mac_out) = rest.split_at_mut(plaintext.len());
        tag_byte[0] = block[0];
        cipher.xor_keystream(body, plaintext);
        cipher.wipe();

        let chunk_mac = finish_mac(mac, ad.len(), body);
        mac_out.copy_from_slice(chunk_mac.as_ref());

        trace!(
            "secretstream push: {} bytes, tag {:?}",
            plaintext.len(),
            tag
        );
        self.advance(chunk_mac.as_ref(), tag);
        Ok(total)
    }

    /// Encrypt one chunk
    #[cfg(feature = "alloc")]
    pub fn push(&mut self, plaintext: &[u8], ad: &[u8], tag: ChunkTag) -> Result<Vec<u8>> {
        let mut chunk = alloc::vec![0u8; plaintext.len() + ABYTES];
        self.push_into(&mut chunk, plaintext, ad, tag)?;
        Ok(chunk)
    }

    /// Verify and decrypt one chunk into `dst`, returning the plaintext
    /// length and the chunk's tag
    ///
    /// Nothing is written to `dst` and the state is left as it was unless
    /// the chunk authenticates.
    pub fn pull_into(
        &mut self,
        dst: &mut [u8],
        chunk: &[u8],
        ad: &[u8],
    ) -> Result<(usize, ChunkTag)> {
        validate_stream_state(!self.finalized, "secretstream pull after final chunk")?;
        validate::ciphertext_length(CONTEXT, chunk.len(), ABYTES)?;
        let mlen = chunk.len() - ABYTES;
        validate::buffer_len(CONTEXT, dst.len(), mlen)?;

        let (ciphertext, stored_mac) = chunk[1..].split_at(mlen);

        let mut cipher = self.cipher();
        let mut mac = Construction::Ietf.authenticator(&mut cipher);
        mac.update(ad);
        mac.update(&ZERO_PAD[..pad16(ad.len())]);

        // The sender absorbed the whole encrypted block; only byte 0 was sent
        let mut block = EphemeralSecret::new([0u8; BLOCK_BYTES]);
        block[0] = chunk[0];
        cipher.apply_keystream(&mut block[..]);
        let tag_byte = block[0];
        block[0] = chunk[0];
        mac.update(&block[..]);

        let expected = finish_mac(mac, ad.len(), ciphertext);
        if let Err(err) = validate::authentication(ct_eq(expected.as_ref(), stored_mac), CONTEXT) {
            cipher.wipe();
            warn!(
                "secretstream pull: chunk of {} bytes failed authentication",
                chunk.len()
            );
            return Err(err);
        }

        let tag = match ChunkTag::from_byte(tag_byte) {
            Some(tag) => tag,
            None => {
                cipher.wipe();
                warn!("secretstream pull: unknown chunk tag");
                return Err(Error::ForgedOrCorrupted { context: CONTEXT });
            }
        };

        cipher.xor_keystream(&mut dst[..mlen], ciphertext);
        cipher.wipe();

        trace!("secretstream pull: {} bytes, tag {:?}", mlen, tag);
        self.advance(stored_mac, tag);
        Ok((mlen, tag))
    }

    /// Verify and decrypt one chunk
    ///
    /// Fails with `Error::CipherTooShort` for chunks under [`ABYTES`] and
    /// `Error::ForgedOrCorrupted` if the chunk does not authenticate in this
    /// position of the stream.
    #[cfg(feature = "alloc")]
    pub fn pull(&mut self, chunk: &[u8], ad: &[u8]) -> Result<(Vec<u8>, ChunkTag)> {
        let mut plaintext = alloc::vec![0u8; chunk.len().saturating_sub(ABYTES)];
        let (_, tag) = self.pull_into(&mut plaintext, chunk, ad)?;
        Ok((plaintext, tag))
    }

    /// Replace the key and inner nonce with keystream derived from them
    ///
    /// Both sides must rekey at the same point in the stream. Chunks tagged
    /// [`ChunkTag::Rekey`] or [`ChunkTag::Final`] do this implicitly.
    pub fn rekey(&mut self) {
        let mut material = EphemeralSecret::new([0u8; KEYBYTES + INONCE_BYTES]);
        material[..KEYBYTES].copy_from_slice(self.key.as_slice());
        material[KEYBYTES..].copy_from_slice(&self.nonce[COUNTER_BYTES..]);

        let mut cipher = self.cipher();
        cipher.apply_keystream(&mut material[..]);
        cipher.wipe();

        self.key.as_mut_slice().copy_from_slice(&material[..KEYBYTES]);
        self.nonce[COUNTER_BYTES..].copy_from_slice(&material[KEYBYTES..]);
        self.reset_counter();
        debug!("secretstream: rekeyed");
    }

    /// Zeroize the key, counter and inner nonce
    pub fn wipe(&mut self) {
        self.zeroize();
    }

    /// IETF ChaCha20 at block 0 for the current key and nonce
    fn cipher(&self) -> ChaCha20 {
        ChaCha20::new(self.key.as_array(), &Nonce::new(self.nonce))
    }

    fn reset_counter(&mut self) {
        LittleEndian::write_u32(&mut self.nonce[..COUNTER_BYTES], 1);
    }

    /// Chain the chunk MAC into the inner nonce and step the counter
    fn advance(&mut self, chunk_mac: &[u8], tag: ChunkTag) {
        xor_in_place(&mut self.nonce[COUNTER_BYTES..], &chunk_mac[..INONCE_BYTES]);
        increment_le(&mut self.nonce[..COUNTER_BYTES]);
        if tag.should_rekey() || is_zero(&self.nonce[..COUNTER_BYTES]) {
            self.rekey();
        }
        if tag.is_final() {
            self.finalized = true;
            debug!("secretstream: final chunk processed");
        }
    }
}

/// Absorb the ciphertext and length trailer, returning the chunk MAC
fn finish_mac(mut mac: Poly1305, ad_len: usize, ciphertext: &[u8]) -> Tag<MAC_BYTES> {
    mac.update(ciphertext);
    mac.update(&ZERO_PAD[..pad16(BLOCK_BYTES + ciphertext.len())]);

    let mut lengths = [0u8; 16];
    LittleEndian::write_u64(&mut lengths[..8], ad_len as u64);
    LittleEndian::write_u64(&mut lengths[8..], (BLOCK_BYTES + ciphertext.len()) as u64);
    mac.update(&lengths);
    mac.finalize()
}

impl fmt::Debug for SecretStreamXChaCha20Poly1305 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretStreamXChaCha20Poly1305")
            .field("finalized", &self.finalized)
            .finish_non_exhaustive()
    }
}
