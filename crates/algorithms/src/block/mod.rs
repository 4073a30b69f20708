//! Block ciphers
//!
//! Only the forward AES-256 permutation is provided; it exists to drive
//! [`Aes256Gcm`](crate::aead::Aes256Gcm).

pub mod aes;
pub use aes::{Aes256, AES256_KEY_SIZE, AES_BLOCK_SIZE};
