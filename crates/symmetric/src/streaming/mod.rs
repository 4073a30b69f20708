//! Streaming encryption over `std::io`
//!
//! Each adapter owns a [`SecretStreamXChaCha20Poly1305`] and frames its
//! chunks on the underlying reader or writer:
//!
//! ```text
//! header (24) ∥ LE32(|chunk|) ∥ chunk ∥ LE32(|chunk|) ∥ chunk ∥ ...
//! ```
//!
//! The last chunk carries [`ChunkTag::Final`]. A reader that reaches end of
//! input before it reports the stream as truncated.
//!
//! [`SecretStreamXChaCha20Poly1305`]: crate::secretstream::SecretStreamXChaCha20Poly1305
//! [`ChunkTag::Final`]: crate::secretstream::ChunkTag::Final

use crate::error::Result;
use std::io::{Read, Write};

pub mod secretstream;

pub use secretstream::{
    decrypt_stream, encrypt_stream, SecretStreamReader, SecretStreamWriter, DEFAULT_CHUNK_SIZE,
    DEFAULT_MAX_CHUNK_SIZE,
};

/// Trait for streaming encryption operations
pub trait StreamingEncrypt<W: Write> {
    /// Write data to the encryption stream
    fn write(&mut self, data: &[u8]) -> Result<()>;

    /// Finalize the stream and return the inner writer
    fn finalize(self) -> Result<W>;
}

/// Trait for streaming decryption operations
pub trait StreamingDecrypt<R: Read> {
    /// Read and decrypt data from the stream, returning 0 once the final
    /// chunk has been consumed
    fn read(&mut self, buf: &mut [u8]) -> Result<usize>;
}
