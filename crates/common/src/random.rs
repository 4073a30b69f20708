//! Concrete randomness sources

use rand::{CryptoRng, RngCore};
use sodix_api::{Error, Random, Result};

/// The operating system CSPRNG
///
/// Delegates to `rand::rngs::OsRng`. May block during early boot until the
/// kernel entropy pool is initialised.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

#[cfg(feature = "std")]
impl Random for OsRandom {
    fn fill(&mut self, dest: &mut [u8]) -> Result<()> {
        rand::rngs::OsRng
            .try_fill_bytes(dest)
            .map_err(|_| Error::RandomGenerationError {
                context: "OsRandom::fill",
            })
    }
}

/// Adapts any `rand` cryptographic generator to [`Random`]
///
/// Useful for seeded, reproducible generators in tests.
#[derive(Debug, Clone)]
pub struct RngRandom<R>(pub R);

impl<R: RngCore + CryptoRng> Random for RngRandom<R> {
    fn fill(&mut self, dest: &mut [u8]) -> Result<()> {
        self.0
            .try_fill_bytes(dest)
            .map_err(|_| Error::RandomGenerationError {
                context: "RngRandom::fill",
            })
    }
}
