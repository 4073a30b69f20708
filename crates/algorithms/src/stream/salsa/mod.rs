//! Salsa family of stream ciphers

pub mod salsa20;

pub use salsa20::Salsa20;
