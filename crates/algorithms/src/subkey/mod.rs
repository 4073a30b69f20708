//! Subkey derivation: HChaCha20 and HSalsa20
//!
//! Both map a 32-byte key and a 16-byte input to a 32-byte subkey by running
//! the core permutation and reading selected state words without the final
//! feed-forward. The extended-nonce ciphers feed them the first 16 nonce
//! bytes.

use byteorder::{ByteOrder, LittleEndian};
use sodix_common::security::{EphemeralSecret, SecretBuffer};

use crate::error::{validate, Result};
use crate::stream::chacha::chacha20::{self, SIGMA_WORDS as CHACHA_SIGMA};
use crate::stream::salsa::salsa20::{self, SIGMA_POSITIONS, SIGMA_WORDS as SALSA_SIGMA};

/// Subkey size in bytes
pub const SUBKEY_SIZE: usize = 32;
/// Input size in bytes
pub const INPUT_SIZE: usize = 16;
/// The only supported constant, "expand 32-byte k"
pub const SIGMA: [u8; 16] = *b"expand 32-byte k";

/// HChaCha20(key, input)
///
/// `constant` may be omitted or equal to [`SIGMA`]; any other value fails
/// with `Error::InvalidParameter`.
pub fn hchacha20(
    key: &[u8; SUBKEY_SIZE],
    input: &[u8; INPUT_SIZE],
    constant: Option<&[u8; 16]>,
) -> Result<SecretBuffer<SUBKEY_SIZE>> {
    check_constant("hchacha20", constant)?;
    Ok(hchacha20_block(key, input))
}

/// HSalsa20(key, input)
///
/// `constant` may be omitted or equal to [`SIGMA`]; any other value fails
/// with `Error::InvalidParameter`.
pub fn hsalsa20(
    key: &[u8; SUBKEY_SIZE],
    input: &[u8; INPUT_SIZE],
    constant: Option<&[u8; 16]>,
) -> Result<SecretBuffer<SUBKEY_SIZE>> {
    check_constant("hsalsa20", constant)?;
    Ok(hsalsa20_block(key, input))
}

/// HChaCha20 over the first 16 bytes of `input`
///
/// Fails with `Error::BufferTooShort` when `input` has fewer than 16 bytes.
pub fn derive_hchacha20(key: &[u8; SUBKEY_SIZE], input: &[u8]) -> Result<SecretBuffer<SUBKEY_SIZE>> {
    validate::min_length("hchacha20 input", input.len(), INPUT_SIZE)?;
    let mut block = [0u8; INPUT_SIZE];
    block.copy_from_slice(&input[..INPUT_SIZE]);
    Ok(hchacha20_block(key, &block))
}

/// HSalsa20 over the first 16 bytes of `input`
///
/// Fails with `Error::BufferTooShort` when `input` has fewer than 16 bytes.
pub fn derive_hsalsa20(key: &[u8; SUBKEY_SIZE], input: &[u8]) -> Result<SecretBuffer<SUBKEY_SIZE>> {
    validate::min_length("hsalsa20 input", input.len(), INPUT_SIZE)?;
    let mut block = [0u8; INPUT_SIZE];
    block.copy_from_slice(&input[..INPUT_SIZE]);
    Ok(hsalsa20_block(key, &block))
}

fn check_constant(context: &'static str, constant: Option<&[u8; 16]>) -> Result<()> {
    match constant {
        None => Ok(()),
        Some(c) => validate::parameter(
            *c == SIGMA,
            context,
            "only the \"expand 32-byte k\" constant is supported",
        ),
    }
}

/// HChaCha20 with the standard constant
pub fn hchacha20_block(key: &[u8; SUBKEY_SIZE], input: &[u8; INPUT_SIZE]) -> SecretBuffer<SUBKEY_SIZE> {
    let mut state = EphemeralSecret::new([0u32; 16]);
    state[..4].copy_from_slice(&CHACHA_SIGMA);
    LittleEndian::read_u32_into(key, &mut state[4..12]);
    LittleEndian::read_u32_into(input, &mut state[12..16]);

    chacha20::permute(&mut state);

    let mut out = SecretBuffer::zeroed();
    LittleEndian::write_u32_into(&state[..4], &mut out.as_mut_slice()[..16]);
    LittleEndian::write_u32_into(&state[12..], &mut out.as_mut_slice()[16..]);
    out
}

/// HSalsa20 with the standard constant
pub fn hsalsa20_block(key: &[u8; SUBKEY_SIZE], input: &[u8; INPUT_SIZE]) -> SecretBuffer<SUBKEY_SIZE> {
    let mut state = EphemeralSecret::new([0u32; 16]);
    for (&pos, &word) in SIGMA_POSITIONS.iter().zip(SALSA_SIGMA.iter()) {
        state[pos] = word;
    }
    LittleEndian::read_u32_into(&key[..16], &mut state[1..5]);
    LittleEndian::read_u32_into(&key[16..], &mut state[11..15]);
    LittleEndian::read_u32_into(input, &mut state[6..10]);

    salsa20::permute(&mut state);

    let mut out = SecretBuffer::zeroed();
    for (chunk, &pos) in out
        .as_mut_slice()
        .chunks_exact_mut(4)
        .zip([0usize, 5, 10, 15, 6, 7, 8, 9].iter())
    {
        LittleEndian::write_u32(chunk, state[pos]);
    }
    out
}
