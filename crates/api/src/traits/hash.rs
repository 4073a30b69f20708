//! Hash function capabilities (SHA-2, BLAKE2b)
//!
//! sodix does not implement hash internals; these traits describe what the
//! library and its callers expect from a hashing backend.

use crate::Result;
use zeroize::Zeroize;

/// Incremental hash function with a fixed output size
pub trait Hash: Sized {
    /// Digest size in bytes
    const OUTPUT_SIZE: usize;

    /// Start a new hash computation
    fn new() -> Self;

    /// Absorb more input
    fn update(&mut self, data: &[u8]);

    /// Write the digest into `out`, which must be `OUTPUT_SIZE` bytes
    fn finalize_into(self, out: &mut [u8]) -> Result<()>;
}

/// Keyed hash with caller-selected output length (libsodium `crypto_generichash`)
pub trait GenericHash: Sized + Zeroize {
    /// Minimum output length
    const BYTES_MIN: usize;
    /// Maximum output length
    const BYTES_MAX: usize;
    /// Minimum key length
    const KEY_BYTES_MIN: usize;
    /// Maximum key length
    const KEY_BYTES_MAX: usize;

    /// Start a computation producing `output_len` bytes, optionally keyed
    fn new_keyed(key: Option<&[u8]>, output_len: usize) -> Result<Self>;

    /// Absorb more input
    fn update(&mut self, data: &[u8]);

    /// Write the digest into `out`
    fn finalize_into(self, out: &mut [u8]) -> Result<()>;
}
