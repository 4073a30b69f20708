//! Chunked authenticated encryption for the sodix library
//!
//! [`secretstream`] implements the `crypto_secretstream_xchacha20poly1305`
//! construction: a sequence of messages under one key where every chunk is
//! authenticated, chained to the chunk before it and tagged so the receiver
//! can detect truncation and reordering.
//!
//! With the `std` feature, [`streaming`] wraps the state machine in
//! `std::io` readers and writers.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod error;
pub mod secretstream;

#[cfg(feature = "std")]
pub mod streaming;

// Re-export main types for convenience
pub use secretstream::{ChunkTag, Header, SecretStreamXChaCha20Poly1305};

#[cfg(feature = "std")]
pub use streaming::{
    decrypt_stream, encrypt_stream, SecretStreamReader, SecretStreamWriter, StreamingDecrypt,
    StreamingEncrypt,
};

// Re-export the API error system instead of custom error types
pub use sodix_api::error::{Error, Result, ResultExt};
