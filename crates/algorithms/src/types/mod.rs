//! Type-safe wrappers for nonces and authentication tags
//!
//! Sizes are const generic parameters, so a 12-byte nonce can never reach an
//! API that expects 24 bytes. The compatibility marker traits restrict each
//! cipher constructor to the nonce sizes it accepts.

pub mod nonce;
pub mod tag;

// Sealed trait module (not public)
pub(crate) mod sealed;

pub use nonce::{ChaCha20Compatible, Nonce, Salsa20Compatible};
pub use tag::Tag;
