//! Security primitives and memory safety utilities
//!
//! Every temporary that holds key material, keystream or MAC state goes
//! through one of these types so it is overwritten on every exit path.

pub mod secret;

pub use secret::{wipe, EphemeralSecret, SecretBuffer, ZeroizeGuard};

#[cfg(feature = "alloc")]
pub use secret::SecretVec;
