//! Password hashing and key derivation capabilities

use crate::Result;
use zeroize::Zeroize;

/// Memory-hard password hashing (libsodium `crypto_pwhash`)
pub trait PasswordHash {
    /// Salt size in bytes
    const SALT_BYTES: usize;

    /// Derive `out.len()` bytes of key material from a password
    fn derive(&self, out: &mut [u8], password: &[u8], salt: &[u8]) -> Result<()>;
}

/// Subkey derivation from a master key (libsodium `crypto_kdf`)
pub trait Kdf: Zeroize {
    /// Context size in bytes
    const CONTEXT_BYTES: usize;

    /// Fill `out` with subkey number `subkey_id` for `context`
    fn derive_subkey(&self, out: &mut [u8], subkey_id: u64, context: &[u8]) -> Result<()>;
}
