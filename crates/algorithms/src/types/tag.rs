//! Type-safe authentication tag

use core::fmt;
use core::ops::Deref;
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use crate::error::{validate, Result};
use crate::types::sealed::Sealed;

/// Authentication tag with compile-time size
///
/// Equality is constant time; comparing a received tag with `==` is safe.
#[derive(Clone, Zeroize)]
pub struct Tag<const N: usize> {
    data: [u8; N],
}

impl<const N: usize> Sealed for Tag<N> {}

impl<const N: usize> Tag<N> {
    /// Create a new tag from an existing array
    pub fn new(data: [u8; N]) -> Self {
        Self { data }
    }

    /// Create from a slice, if it has the correct length
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        validate::length("Tag", slice.len(), N)?;

        let mut data = [0u8; N];
        data.copy_from_slice(slice);

        Ok(Self { data })
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        N
    }

    /// True only for `N == 0`
    pub fn is_empty(&self) -> bool {
        N == 0
    }

    /// Borrow as a fixed-size array
    pub fn as_array(&self) -> &[u8; N] {
        &self.data
    }

    /// Consume into the raw bytes
    pub fn into_bytes(self) -> [u8; N] {
        self.data
    }
}

impl<const N: usize> AsRef<[u8]> for Tag<N> {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl<const N: usize> Deref for Tag<N> {
    type Target = [u8; N];

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<const N: usize> PartialEq for Tag<N> {
    fn eq(&self, other: &Self) -> bool {
        self.data[..].ct_eq(&other.data[..]).into()
    }
}

impl<const N: usize> Eq for Tag<N> {}

impl<const N: usize> fmt::Debug for Tag<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag<{}>(", N)?;
        for byte in &self.data {
            write!(f, "{:02x}", byte)?;
        }
        write!(f, ")")
    }
}
