//! Message authentication codes
//!
//! Only the Poly1305 one-time authenticator lives here; keyed hashing
//! belongs to the hash layer.

pub mod poly1305;
pub use poly1305::{onetimeauth, onetimeauth_verify, Poly1305, POLY1305_KEY_SIZE, POLY1305_TAG_SIZE};
