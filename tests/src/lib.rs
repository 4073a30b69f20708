//! Shared fixtures for the sodix integration and property tests

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use sodix_common::RngRandom;
use sodix_symmetric::secretstream::HEADERBYTES;

/// A reproducible `Random` source
pub fn seeded_rng(seed: u64) -> RngRandom<ChaCha20Rng> {
    RngRandom(ChaCha20Rng::seed_from_u64(seed))
}

/// Split the output of a `SecretStreamWriter` into its chunks
///
/// # Panics
///
/// Panics if `framed` is not a well-formed header followed by complete
/// length-prefixed chunks.
pub fn split_frames(framed: &[u8]) -> Vec<Vec<u8>> {
    let mut rest = &framed[HEADERBYTES..];
    let mut chunks = Vec::new();
    while !rest.is_empty() {
        let (prefix, tail) = rest.split_at(4);
        let len = u32::from_le_bytes([prefix[0], prefix[1], prefix[2], prefix[3]]) as usize;
        chunks.push(tail[..len].to_vec());
        rest = &tail[len..];
    }
    chunks
}

/// Reassemble a framed stream from a header and chunks
pub fn join_frames(header: &[u8], chunks: &[Vec<u8>]) -> Vec<u8> {
    let mut framed = header.to_vec();
    for chunk in chunks {
        framed.extend_from_slice(&(chunk.len() as u32).to_le_bytes());
        framed.extend_from_slice(chunk);
    }
    framed
}
