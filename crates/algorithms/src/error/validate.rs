//! Validation utilities for cryptographic primitives

use super::{Error, Result};

/// Validate a parameter condition
#[inline(always)]
pub fn parameter(condition: bool, context: &'static str, message: &'static str) -> Result<()> {
    if !condition {
        return Err(Error::InvalidParameter { context, message });
    }
    Ok(())
}

/// Validate an exact length
#[inline(always)]
pub fn length(context: &'static str, actual: usize, expected: usize) -> Result<()> {
    if actual != expected {
        return Err(Error::InvalidLength {
            context,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Validate a minimum input length
#[inline(always)]
pub fn min_length(context: &'static str, actual: usize, min: usize) -> Result<()> {
    if actual < min {
        return Err(Error::BufferTooShort {
            context,
            expected: min,
            actual,
        });
    }
    Ok(())
}

/// Validate a maximum input length
#[inline(always)]
pub fn max_length(context: &'static str, actual: usize, max: usize) -> Result<()> {
    if actual > max {
        return Err(Error::InvalidLength {
            context,
            expected: max,
            actual,
        });
    }
    Ok(())
}

/// Validate that a combined ciphertext carries at least its overhead
#[inline(always)]
pub fn ciphertext_length(context: &'static str, actual: usize, minimum: usize) -> Result<()> {
    if actual < minimum {
        return Err(Error::CipherTooShort {
            context,
            minimum,
            actual,
        });
    }
    Ok(())
}

/// Validate that an output buffer can hold `needed` bytes
#[inline(always)]
pub fn buffer_len(context: &'static str, actual: usize, needed: usize) -> Result<()> {
    if actual < needed {
        return Err(Error::BufferTooShort {
            context,
            expected: needed,
            actual,
        });
    }
    Ok(())
}

/// Validate authentication
#[inline(always)]
pub fn authentication(is_valid: bool, context: &'static str) -> Result<()> {
    if !is_valid {
        return Err(Error::ForgedOrCorrupted { context });
    }
    Ok(())
}
