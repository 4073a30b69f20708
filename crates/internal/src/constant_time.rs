//! Constant-time operations to prevent timing attacks

use subtle::ConstantTimeEq;

/// Constant-time comparison of two byte slices
///
/// Returns true if the slices are equal, false otherwise. Runs in time
/// depending only on the lengths, never on the contents.
pub fn ct_eq<A, B>(a: A, b: B) -> bool
where
    A: AsRef<[u8]>,
    B: AsRef<[u8]>,
{
    let a = a.as_ref();
    let b = b.as_ref();

    if a.len() != b.len() {
        return false;
    }

    a.ct_eq(b).into()
}

/// Constant-time check that every byte of `data` is zero
pub fn is_zero(data: &[u8]) -> bool {
    let acc = data.iter().fold(0u8, |acc, &b| acc | b);
    acc.ct_eq(&0u8).into()
}

/// Increment a little-endian integer of arbitrary width, wrapping on overflow
///
/// Every byte is touched regardless of where the carry stops.
pub fn increment_le(counter: &mut [u8]) {
    let mut carry = 1u16;
    for byte in counter.iter_mut() {
        carry += *byte as u16;
        *byte = carry as u8;
        carry >>= 8;
    }
}

/// `dst ^= src` over the common prefix
///
/// # Panics
///
/// Panics if `dst` is shorter than `src`.
pub fn xor_in_place(dst: &mut [u8], src: &[u8]) {
    assert!(dst.len() >= src.len(), "xor_in_place: destination shorter than source");
    for (d, s) in dst.iter_mut().zip(src) {
        *d ^= *s;
    }
}
