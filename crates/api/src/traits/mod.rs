//! Capability traits for the collaborators sodix depends on
//!
//! The library implements authenticated encryption itself. Randomness,
//! hashing, signatures, password hashing, key derivation and key exchange are
//! consumed through the traits below, so callers can plug in any backend.

pub mod hash;
pub mod kdf;
pub mod key_exchange;
pub mod random;
pub mod signature;

pub use hash::{GenericHash, Hash};
pub use kdf::{Kdf, PasswordHash};
pub use key_exchange::{KeyExchange, SessionKeys};
pub use random::Random;
pub use signature::{Sign, Verify};
