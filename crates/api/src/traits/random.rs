//! Source of cryptographically secure random bytes

use crate::Result;

#[cfg(feature = "alloc")]
use zeroize::Zeroizing;

#[cfg(all(feature = "alloc", not(feature = "std")))]
use alloc::{vec, vec::Vec};

/// Cryptographically secure random source
///
/// Only [`fill`](Random::fill) is required; integer helpers are derived from
/// it. Implementations must never return predictable output: a backend that
/// cannot produce entropy reports `Error::RandomGenerationError` instead.
pub trait Random {
    /// Fill `dest` with random bytes
    fn fill(&mut self, dest: &mut [u8]) -> Result<()>;

    /// Generate a fresh key of `size` bytes, zeroized when dropped
    #[cfg(feature = "alloc")]
    fn key_gen(&mut self, size: usize) -> Result<Zeroizing<Vec<u8>>> {
        let mut key = Zeroizing::new(vec![0u8; size]);
        self.fill(&mut key)?;
        Ok(key)
    }

    /// A uniformly distributed `u32`
    fn next_u32(&mut self) -> Result<u32> {
        let mut bytes = [0u8; 4];
        self.fill(&mut bytes)?;
        Ok(u32::from_le_bytes(bytes))
    }

    /// A uniformly distributed `u64`
    fn next_u64(&mut self) -> Result<u64> {
        let mut bytes = [0u8; 8];
        self.fill(&mut bytes)?;
        Ok(u64::from_le_bytes(bytes))
    }

    /// A uniformly distributed value in `0..upper`, without modulo bias
    ///
    /// Returns 0 when `upper < 2`.
    fn uniform_u32(&mut self, upper: u32) -> Result<u32> {
        if upper < 2 {
            return Ok(0);
        }
        // 2^32 mod upper: values below it would bias the reduction
        let min = upper.wrapping_neg() % upper;
        loop {
            let r = self.next_u32()?;
            if r >= min {
                return Ok(r % upper);
            }
        }
    }

    /// A uniformly distributed value in `0..upper`, without modulo bias
    ///
    /// Returns 0 when `upper < 2`.
    fn uniform_u64(&mut self, upper: u64) -> Result<u64> {
        if upper < 2 {
            return Ok(0);
        }
        let min = upper.wrapping_neg() % upper;
        loop {
            let r = self.next_u64()?;
            if r >= min {
                return Ok(r % upper);
            }
        }
    }
}

impl<R: Random + ?Sized> Random for &mut R {
    fn fill(&mut self, dest: &mut [u8]) -> Result<()> {
        (**self).fill(dest)
    }
}
