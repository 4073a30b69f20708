//! Common implementations and shared functionality for the sodix library
//!
//! Secret containers that wipe themselves, and the concrete [`Random`]
//! sources the rest of the workspace is tested and deployed with.
//!
//! [`Random`]: sodix_api::Random

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(all(feature = "alloc", not(feature = "std")))]
extern crate alloc;

pub mod random;
pub mod security;

// Re-export core security types
pub use security::{wipe, EphemeralSecret, SecretBuffer, ZeroizeGuard};

#[cfg(feature = "alloc")]
pub use security::SecretVec;

pub use random::RngRandom;

#[cfg(feature = "std")]
pub use random::OsRandom;
