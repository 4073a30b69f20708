//! Type-safe nonce with a compile-time size

use core::fmt;
use core::ops::{Deref, DerefMut};
use sodix_api::Random;
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use crate::error::{validate, Result};
use crate::types::sealed::Sealed;

/// Generic nonce type with compile-time size guarantee
///
/// Nonces are public, so `Debug` prints the bytes, but equality is still
/// constant time.
#[derive(Clone, Zeroize)]
pub struct Nonce<const N: usize> {
    data: [u8; N],
}

impl<const N: usize> Sealed for Nonce<N> {}

impl<const N: usize> Nonce<N> {
    /// Create a new nonce from an existing array
    pub fn new(data: [u8; N]) -> Self {
        Self { data }
    }

    /// Create a zeroed nonce
    pub fn zeroed() -> Self {
        Self { data: [0u8; N] }
    }

    /// Create from a slice, if it has the correct length
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        validate::length("Nonce", slice.len(), N)?;

        let mut data = [0u8; N];
        data.copy_from_slice(slice);

        Ok(Self { data })
    }

    /// Generate a random nonce
    ///
    /// With 24-byte nonces random generation is safe for any realistic
    /// number of messages under one key; with 8 or 12 bytes use a counter.
    pub fn random<R: Random + ?Sized>(rng: &mut R) -> Result<Self> {
        let mut data = [0u8; N];
        rng.fill(&mut data)?;
        Ok(Self { data })
    }

    /// Size of this nonce in bytes
    pub const fn size() -> usize {
        N
    }

    /// Borrow as a fixed-size array
    pub fn as_array(&self) -> &[u8; N] {
        &self.data
    }
}

impl<const N: usize> From<[u8; N]> for Nonce<N> {
    fn from(data: [u8; N]) -> Self {
        Self::new(data)
    }
}

impl<const N: usize> AsRef<[u8]> for Nonce<N> {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl<const N: usize> AsMut<[u8]> for Nonce<N> {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl<const N: usize> Deref for Nonce<N> {
    type Target = [u8; N];

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<const N: usize> DerefMut for Nonce<N> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.data
    }
}

impl<const N: usize> PartialEq for Nonce<N> {
    fn eq(&self, other: &Self) -> bool {
        self.data[..].ct_eq(&other.data[..]).into()
    }
}

impl<const N: usize> Eq for Nonce<N> {}

impl<const N: usize> fmt::Debug for Nonce<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Nonce<{}>({:?})", N, &self.data[..])
    }
}

// Algorithm compatibility marker traits

/// Nonce sizes accepted by [`ChaCha20::new`](crate::stream::ChaCha20::new)
///
/// 8 bytes selects the classic layout (64-bit counter), 12 bytes the IETF
/// layout (32-bit counter), 24 bytes XChaCha20.
pub trait ChaCha20Compatible: Sealed {}
impl ChaCha20Compatible for Nonce<8> {}
impl ChaCha20Compatible for Nonce<12> {}
impl ChaCha20Compatible for Nonce<24> {}

/// Nonce sizes accepted by [`Salsa20::new`](crate::stream::Salsa20::new)
///
/// 8 bytes is the plain Salsa20 nonce, 16 bytes is nonce followed by a
/// little-endian initial block counter, 24 bytes selects XSalsa20.
pub trait Salsa20Compatible: Sealed {}
impl Salsa20Compatible for Nonce<8> {}
impl Salsa20Compatible for Nonce<16> {}
impl Salsa20Compatible for Nonce<24> {}
