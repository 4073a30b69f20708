//! Public API traits and types for the sodix library
//!
//! This crate provides the error taxonomy shared by every sodix crate and the
//! capability traits through which the library talks to its external
//! collaborators (randomness, hashing, signatures, key derivation and key
//! exchange).

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(all(feature = "alloc", not(feature = "std")))]
extern crate alloc;

pub mod error;
pub mod traits;

// Re-export commonly used items at the crate level for convenience
pub use error::{Error, Result, ResultExt};

pub use traits::{
    GenericHash, Hash, Kdf, KeyExchange, PasswordHash, Random, SessionKeys, Sign, Verify,
};
