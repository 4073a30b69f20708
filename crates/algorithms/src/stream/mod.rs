//! Stream cipher implementations
//!
//! # Available Stream Ciphers
//!
//! - [`ChaCha20`]: original (8-byte nonce), IETF (12-byte) and XChaCha20 (24-byte)
//! - [`Salsa20`]: Salsa20 (8-byte nonce) and XSalsa20 (24-byte)
//!
//! [`Stream`] wraps the closed set of variants for code that selects a
//! cipher at runtime.
//!
//! # Security Considerations
//!
//! Reusing a nonce with the same key reveals the XOR of the two plaintexts.
//! None of these ciphers authenticate; use [`crate::aead`] or
//! [`crate::secretbox`] unless you are building a construction yourself.

/// ChaCha family of stream cipher implementations
pub mod chacha;

/// Salsa family of stream cipher implementations
pub mod salsa;

pub use chacha::chacha20::{
    ChaCha20, CHACHA20_BLOCK_SIZE, CHACHA20_IETF_NONCE_SIZE, CHACHA20_KEY_SIZE,
    CHACHA20_NONCE_SIZE, XCHACHA20_NONCE_SIZE,
};
pub use salsa::salsa20::{Salsa20, SALSA20_NONCE_SIZE, XSALSA20_NONCE_SIZE};

/// Common trait for stream cipher implementations
///
/// Keystream position is shared by every method: interleaving
/// [`keystream`](Self::keystream), [`xor_keystream`](Self::xor_keystream)
/// and [`apply_keystream`](Self::apply_keystream) consumes one continuous
/// keystream.
pub trait StreamCipher {
    /// The key size in bytes
    const KEY_SIZE: usize;

    /// The internal block size in bytes
    const BLOCK_SIZE: usize;

    /// The nonce size this instance was created with
    fn nonce_size(&self) -> usize;

    /// XOR the next `data.len()` keystream bytes into `data`
    fn apply_keystream(&mut self, data: &mut [u8]);

    /// Write the next `output.len()` keystream bytes into `output`
    fn keystream(&mut self, output: &mut [u8]) {
        output.fill(0);
        self.apply_keystream(output);
    }

    /// `dst[..src.len()] = src ^ keystream`
    ///
    /// # Panics
    ///
    /// Panics if `dst` is shorter than `src`.
    fn xor_keystream(&mut self, dst: &mut [u8], src: &[u8]) {
        assert!(
            dst.len() >= src.len(),
            "xor_keystream: destination shorter than source"
        );
        let dst = &mut dst[..src.len()];
        dst.copy_from_slice(src);
        self.apply_keystream(dst);
    }

    /// Position the cipher at the start of block `counter`, discarding any
    /// buffered keystream
    fn seek(&mut self, counter: u64);

    /// Re-initialise with a new key and nonce, destroying the current state
    ///
    /// # Panics
    ///
    /// Panics if the key or nonce length is not accepted by the cipher.
    fn rekey(&mut self, key: &[u8], nonce: &[u8]);

    /// Zeroize key material and buffered keystream
    ///
    /// The instance produces no meaningful output until [`rekey`](Self::rekey).
    fn wipe(&mut self);
}

/// Any supported stream cipher, selected at runtime
#[derive(Clone)]
pub enum Stream {
    /// Original ChaCha20, 8-byte nonce, 64-bit counter
    ChaCha20(ChaCha20),
    /// RFC 8439 ChaCha20, 12-byte nonce, 32-bit counter
    ChaCha20Ietf(ChaCha20),
    /// XChaCha20, 24-byte nonce
    XChaCha20(ChaCha20),
    /// Salsa20, 8-byte nonce (or 16 bytes: nonce and initial counter)
    Salsa20(Salsa20),
    /// XSalsa20, 24-byte nonce
    XSalsa20(Salsa20),
}

/// Forward to the concrete cipher of any variant
macro_rules! dispatch {
    ($stream:expr, $cipher:ident => $body:expr) => {
        match $stream {
            Stream::ChaCha20($cipher) | Stream::ChaCha20Ietf($cipher) | Stream::XChaCha20($cipher) => {
                $body
            }
            Stream::Salsa20($cipher) | Stream::XSalsa20($cipher) => $body,
        }
    };
}

impl Stream {
    /// Select a variant from the nonce length
    ///
    /// 8 bytes selects original ChaCha20, 12 the IETF variant, 16 Salsa20
    /// (nonce and initial counter) and 24 XChaCha20. Use
    /// [`Stream::xsalsa20`] for XSalsa20.
    ///
    /// # Panics
    ///
    /// Panics on any other nonce length, or a key that is not 32 bytes.
    pub fn new(key: &[u8], nonce: &[u8]) -> Self {
        match nonce.len() {
            CHACHA20_NONCE_SIZE => Stream::ChaCha20(ChaCha20::from_slices(key, nonce)),
            CHACHA20_IETF_NONCE_SIZE => Stream::ChaCha20Ietf(ChaCha20::from_slices(key, nonce)),
            16 => Stream::Salsa20(Salsa20::from_slices(key, nonce)),
            XCHACHA20_NONCE_SIZE => Stream::XChaCha20(ChaCha20::from_slices(key, nonce)),
            n => panic!("Stream: unsupported nonce length {}", n),
        }
    }

    /// Original ChaCha20
    pub fn chacha20(key: &[u8; 32], nonce: &[u8; CHACHA20_NONCE_SIZE]) -> Self {
        Stream::ChaCha20(ChaCha20::from_slices(key, nonce))
    }

    /// IETF ChaCha20
    pub fn chacha20_ietf(key: &[u8; 32], nonce: &[u8; CHACHA20_IETF_NONCE_SIZE]) -> Self {
        Stream::ChaCha20Ietf(ChaCha20::from_slices(key, nonce))
    }

    /// XChaCha20
    pub fn xchacha20(key: &[u8; 32], nonce: &[u8; XCHACHA20_NONCE_SIZE]) -> Self {
        Stream::XChaCha20(ChaCha20::from_slices(key, nonce))
    }

    /// Salsa20
    pub fn salsa20(key: &[u8; 32], nonce: &[u8; SALSA20_NONCE_SIZE]) -> Self {
        Stream::Salsa20(Salsa20::from_slices(key, nonce))
    }

    /// XSalsa20
    pub fn xsalsa20(key: &[u8; 32], nonce: &[u8; XSALSA20_NONCE_SIZE]) -> Self {
        Stream::XSalsa20(Salsa20::from_slices(key, nonce))
    }
}

impl StreamCipher for Stream {
    const KEY_SIZE: usize = CHACHA20_KEY_SIZE;
    const BLOCK_SIZE: usize = CHACHA20_BLOCK_SIZE;

    fn nonce_size(&self) -> usize {
        dispatch!(self, c => c.nonce_size())
    }

    fn apply_keystream(&mut self, data: &mut [u8]) {
        dispatch!(self, c => c.apply_keystream(data))
    }

    fn seek(&mut self, counter: u64) {
        dispatch!(self, c => c.seek(counter))
    }

    /// Re-initialise within the same variant
    ///
    /// # Panics
    ///
    /// Panics if `nonce` does not have the length of this variant.
    fn rekey(&mut self, key: &[u8], nonce: &[u8]) {
        let accepted: &[usize] = match self {
            Stream::ChaCha20(_) => &[CHACHA20_NONCE_SIZE],
            Stream::ChaCha20Ietf(_) => &[CHACHA20_IETF_NONCE_SIZE],
            Stream::XChaCha20(_) | Stream::XSalsa20(_) => &[XCHACHA20_NONCE_SIZE],
            Stream::Salsa20(_) => &[SALSA20_NONCE_SIZE, 16],
        };
        assert!(
            accepted.contains(&nonce.len()),
            "Stream: nonce length {} does not match the variant",
            nonce.len()
        );
        dispatch!(self, c => c.rekey(key, nonce))
    }

    fn wipe(&mut self) {
        dispatch!(self, c => c.wipe())
    }
}
