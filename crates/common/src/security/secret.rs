//! Secret data types with guaranteed zeroization
//!
//! Fixed-size keys live in [`SecretBuffer`], variable-size material in
//! [`SecretVec`]. [`EphemeralSecret`] owns a scoped temporary and
//! [`ZeroizeGuard`] borrows one; both wipe on drop, including during panic
//! unwinding.

use core::fmt;
use core::ops::{Deref, DerefMut};
use sodix_api::{Error, Random, Result};
use sodix_internal::constant_time::{ct_eq, is_zero};
use zeroize::{Zeroize, ZeroizeOnDrop};

#[cfg(all(feature = "alloc", not(feature = "std")))]
use alloc::vec::Vec;

/// Overwrite `buf` with zero bytes in a way the optimizer cannot elide
pub fn wipe(buf: &mut [u8]) {
    buf.zeroize();
}

/// Fixed-size secret buffer that guarantees zeroization
///
/// Starts zeroed, compares in constant time and never prints its contents.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretBuffer<const N: usize> {
    data: [u8; N],
}

impl<const N: usize> SecretBuffer<N> {
    /// Take ownership of existing key bytes
    pub fn new(data: [u8; N]) -> Self {
        Self { data }
    }

    /// An all-zero buffer
    pub fn zeroed() -> Self {
        Self { data: [0u8; N] }
    }

    /// Copy key bytes out of a slice of exactly `N` bytes
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        if slice.len() != N {
            return Err(Error::InvalidLength {
                context: "SecretBuffer::from_slice",
                expected: N,
                actual: slice.len(),
            });
        }
        let mut buffer = Self::zeroed();
        buffer.data.copy_from_slice(slice);
        Ok(buffer)
    }

    /// A buffer filled from `rng`
    pub fn random<R: Random + ?Sized>(rng: &mut R) -> Result<Self> {
        let mut buffer = Self::zeroed();
        rng.fill(&mut buffer.data)?;
        Ok(buffer)
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        N
    }

    /// True only for `N == 0`
    pub fn is_empty(&self) -> bool {
        N == 0
    }

    /// True when every byte is zero (e.g. after [`wipe`](Self::wipe))
    pub fn is_zero(&self) -> bool {
        is_zero(&self.data)
    }

    /// Borrow the key bytes
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Borrow the key bytes mutably
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Borrow the key as a fixed-size array
    pub fn as_array(&self) -> &[u8; N] {
        &self.data
    }

    /// Borrow the key as a mutable fixed-size array
    pub fn as_mut_array(&mut self) -> &mut [u8; N] {
        &mut self.data
    }

    /// Overwrite the contents with zeros, keeping the buffer usable
    pub fn wipe(&mut self) {
        self.data.zeroize();
    }
}

impl<const N: usize> From<[u8; N]> for SecretBuffer<N> {
    fn from(data: [u8; N]) -> Self {
        Self::new(data)
    }
}

impl<const N: usize> AsRef<[u8]> for SecretBuffer<N> {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl<const N: usize> AsMut<[u8]> for SecretBuffer<N> {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl<const N: usize> PartialEq for SecretBuffer<N> {
    fn eq(&self, other: &Self) -> bool {
        ct_eq(self.data, other.data)
    }
}

impl<const N: usize> Eq for SecretBuffer<N> {}

impl<const N: usize> fmt::Debug for SecretBuffer<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretBuffer<{}>([REDACTED])", N)
    }
}

/// Variable-size secret vector that guarantees zeroization
#[cfg(feature = "alloc")]
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretVec {
    data: Vec<u8>,
}

#[cfg(feature = "alloc")]
impl SecretVec {
    /// Take ownership of existing secret bytes
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// `len` zero bytes
    pub fn zeroed(len: usize) -> Self {
        let mut data = Vec::with_capacity(len);
        data.resize(len, 0);
        Self { data }
    }

    /// Copy secret bytes out of a slice
    pub fn from_slice(slice: &[u8]) -> Self {
        Self {
            data: slice.to_vec(),
        }
    }

    /// `len` bytes filled from `rng`
    pub fn random<R: Random + ?Sized>(rng: &mut R, len: usize) -> Result<Self> {
        let mut secret = Self::zeroed(len);
        rng.fill(&mut secret.data)?;
        Ok(secret)
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the vector is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow the secret bytes
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Borrow the secret bytes mutably
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Append bytes
    ///
    /// The old allocation is wiped before being released if the vector has
    /// to grow.
    pub fn extend_from_slice(&mut self, slice: &[u8]) {
        if self.data.capacity() - self.data.len() < slice.len() {
            let mut grown = Vec::with_capacity(self.data.len() + slice.len());
            grown.extend_from_slice(&self.data);
            self.data.zeroize();
            self.data = grown;
        }
        self.data.extend_from_slice(slice);
    }

    /// Shorten to `len` bytes, wiping the removed tail
    pub fn truncate(&mut self, len: usize) {
        if len < self.data.len() {
            self.data[len..].zeroize();
            self.data.truncate(len);
        }
    }
}

#[cfg(feature = "alloc")]
impl AsRef<[u8]> for SecretVec {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(feature = "alloc")]
impl AsMut<[u8]> for SecretVec {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

#[cfg(feature = "alloc")]
impl From<Vec<u8>> for SecretVec {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

#[cfg(feature = "alloc")]
impl fmt::Debug for SecretVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretVec(len={}, [REDACTED])", self.data.len())
    }
}

/// Scoped temporary secret, zeroized when it goes out of scope
///
/// Used for keystream blocks, one-time MAC keys and other intermediates that
/// never leave the function computing them.
pub struct EphemeralSecret<T: Zeroize> {
    inner: T,
}

impl<T: Zeroize> EphemeralSecret<T> {
    /// Wrap a temporary value
    pub fn new(value: T) -> Self {
        Self { inner: value }
    }
}

impl<T: Zeroize> Drop for EphemeralSecret<T> {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}

impl<T: Zeroize + Default> Default for EphemeralSecret<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Zeroize> Deref for EphemeralSecret<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<T: Zeroize> DerefMut for EphemeralSecret<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

impl<T: Zeroize> fmt::Debug for EphemeralSecret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EphemeralSecret([REDACTED])")
    }
}

/// Borrows a value and zeroizes it when dropped
///
/// Covers buffers the caller owns but that must not keep secret contents
/// once the current scope ends, whether by return, `?` or panic.
pub struct ZeroizeGuard<'a, T: Zeroize + ?Sized> {
    value: &'a mut T,
}

impl<'a, T: Zeroize + ?Sized> ZeroizeGuard<'a, T> {
    /// Guard `value` until the end of the current scope
    pub fn new(value: &'a mut T) -> Self {
        Self { value }
    }
}

impl<T: Zeroize + ?Sized> Drop for ZeroizeGuard<'_, T> {
    fn drop(&mut self) {
        self.value.zeroize();
    }
}

impl<T: Zeroize + ?Sized> Deref for ZeroizeGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        self.value
    }
}

impl<T: Zeroize + ?Sized> DerefMut for ZeroizeGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.value
    }
}
