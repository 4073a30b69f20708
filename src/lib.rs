//! # sodix
//!
//! Pure Rust authenticated encryption compatible with libsodium.
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! sodix = "0.3"
//! ```
//!
//! ## Features
//!
//! - `std` (default): standard library support, `std::io` stream adapters
//! - `algorithms` (default): stream ciphers, Poly1305, AEADs and SecretBox
//! - `symmetric` (default): the SecretStream chunked protocol
//! - `full`: everything above plus the `rand` re-export
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports functionality from several sub-crates:
//!
//! - [`sodix-api`]: error type and collaborator capability traits
//! - [`sodix-common`]: zeroizing secret containers and OS randomness
//! - [`sodix-internal`]: constant-time and endian helpers
//! - [`sodix-algorithms`]: ChaCha20, Salsa20, Poly1305 and the AEAD constructions
//! - [`sodix-symmetric`]: SecretStream

#![cfg_attr(not(feature = "std"), no_std)]

// Core re-exports (always available)
pub use sodix_api as api;
pub use sodix_common as common;
pub use sodix_internal as internal;

// Feature-gated re-exports
#[cfg(feature = "algorithms")]
pub use sodix_algorithms as algorithms;

#[cfg(feature = "symmetric")]
pub use sodix_symmetric as symmetric;

#[cfg(feature = "full")]
pub use rand;

/// Common imports for sodix users
pub mod prelude {
    pub use crate::api::{Error, Random, Result};

    pub use crate::common::{EphemeralSecret, SecretBuffer, ZeroizeGuard};

    #[cfg(feature = "alloc")]
    pub use crate::common::SecretVec;

    #[cfg(feature = "std")]
    pub use crate::common::OsRandom;

    #[cfg(feature = "algorithms")]
    pub use crate::algorithms::{
        aead::{Aead, Aes256Gcm, ChaCha20Poly1305, ChaCha20Poly1305Ietf, XChaCha20Poly1305Ietf},
        secretbox::{XChaCha20Poly1305, XSalsa20Poly1305},
        stream::{Stream, StreamCipher},
        types::{Nonce, Tag},
    };

    #[cfg(feature = "symmetric")]
    pub use crate::symmetric::secretstream::{ChunkTag, Header, SecretStreamXChaCha20Poly1305};

    pub use zeroize::Zeroize;
}
