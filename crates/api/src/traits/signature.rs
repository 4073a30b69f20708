//! Signature capabilities (Ed25519)

use crate::{Random, Result};
use zeroize::Zeroize;

/// Signing half of a signature scheme
///
/// The secret key lives inside the implementing type and is never exposed
/// as bytes.
pub trait Sign: Sized + Zeroize {
    /// Matching verifier type
    type Verifier: Verify;

    /// Signature size in bytes
    const SIGNATURE_BYTES: usize;

    /// Generate a fresh key pair
    fn generate<R: Random + ?Sized>(rng: &mut R) -> Result<Self>;

    /// The public half
    fn verifier(&self) -> Self::Verifier;

    /// Write a detached signature of `message` into `signature`
    fn sign_detached(&self, message: &[u8], signature: &mut [u8]) -> Result<()>;
}

/// Verifying half of a signature scheme
pub trait Verify {
    /// Public key size in bytes
    const PUBLIC_KEY_BYTES: usize;

    /// Check a detached signature
    ///
    /// Fails with `Error::ForgedOrCorrupted` on mismatch.
    fn verify_detached(&self, message: &[u8], signature: &[u8]) -> Result<()>;
}
