//! Stream ciphers, Poly1305 and the authenticated encryption built on them
//!
//! Everything here is a pure function of its inputs: no logging, no global
//! state, no allocation outside the `Vec`-returning AEAD conveniences.
//!
//! # Layers
//!
//! - [`stream`]: ChaCha20 (classic, IETF, XChaCha20) and Salsa20 (XSalsa20)
//! - [`subkey`]: HChaCha20 and HSalsa20 key derivation
//! - [`mac`]: the Poly1305 one-time authenticator
//! - [`block`]: the AES-256 block cipher
//! - [`aead`]: ChaCha20-Poly1305 in its original, IETF and extended-nonce
//!   forms, and AES-256-GCM
//! - [`secretbox`]: NaCl-style XSalsa20-Poly1305 and XChaCha20-Poly1305

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Error module and re-exports
pub mod error;
pub use error::{validate, Error, Result, ResultExt};

// Type system
pub mod types;
pub use types::{Nonce, Tag};

// Stream cipher implementations
pub mod stream;
pub use stream::{ChaCha20, Salsa20, Stream, StreamCipher};

// Subkey derivation
pub mod subkey;
pub use subkey::{hchacha20, hsalsa20};

// Block ciphers
pub mod block;

// MAC implementations
pub mod mac;
pub use mac::Poly1305;

// AEAD constructions
pub mod aead;
pub use aead::{Aead, Aes256Gcm, ChaCha20Poly1305, ChaCha20Poly1305Ietf, XChaCha20Poly1305Ietf};

pub mod secretbox;
pub use secretbox::{XChaCha20Poly1305, XSalsa20Poly1305};

// Re-export security types from sodix-common
pub use sodix_common::security::{EphemeralSecret, SecretBuffer, ZeroizeGuard};
