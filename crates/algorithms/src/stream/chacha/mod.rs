//! ChaCha family of stream ciphers

pub mod chacha20;

pub use chacha20::ChaCha20;
