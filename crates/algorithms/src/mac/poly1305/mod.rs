//! Poly1305 one-time authenticator
//!
//! Radix 2^26 arithmetic: the accumulator and `r` are held in five 26-bit
//! limbs so every partial product fits in a `u64`. Input may arrive in any
//! chunking; partial blocks are buffered until 16 bytes are available or
//! the tag is requested.
//!
//! A key must authenticate exactly one message. The AEAD constructions
//! derive a fresh key per message from the stream cipher.

use byteorder::{ByteOrder, LittleEndian};
use sodix_internal::constant_time::ct_eq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::types::Tag;

/// Poly1305 key size in bytes
pub const POLY1305_KEY_SIZE: usize = 32;
/// Poly1305 tag size in bytes
pub const POLY1305_TAG_SIZE: usize = 16;
/// Poly1305 block size in bytes
pub const POLY1305_BLOCK_SIZE: usize = 16;

const LIMB_MASK: u32 = 0x3ff_ffff;

/// Streaming Poly1305 state
///
/// Consumed by [`finalize`](Self::finalize), [`sum`](Self::sum) and
/// [`verify`](Self::verify); the key and accumulator are zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Poly1305 {
    r: [u32; 5],
    h: [u32; 5],
    pad: [u32; 4],
    buffer: [u8; POLY1305_BLOCK_SIZE],
    leftover: usize,
}

impl Poly1305 {
    /// Start an authenticator keyed with `key` (`r` ∥ `s`)
    pub fn new(key: &[u8; POLY1305_KEY_SIZE]) -> Self {
        // r &= 0x0ffffffc0ffffffc0ffffffc0fffffff, split into 26-bit limbs
        let r = [
            LittleEndian::read_u32(&key[0..4]) & 0x3ff_ffff,
            (LittleEndian::read_u32(&key[3..7]) >> 2) & 0x3ff_ff03,
            (LittleEndian::read_u32(&key[6..10]) >> 4) & 0x3ff_c0ff,
            (LittleEndian::read_u32(&key[9..13]) >> 6) & 0x3f0_3fff,
            (LittleEndian::read_u32(&key[12..16]) >> 8) & 0x00f_ffff,
        ];

        let mut pad = [0u32; 4];
        LittleEndian::read_u32_into(&key[16..32], &mut pad);

        Self {
            r,
            h: [0; 5],
            pad,
            buffer: [0; POLY1305_BLOCK_SIZE],
            leftover: 0,
        }
    }

    /// Discard all state and start over with a new key
    pub fn rekey(&mut self, key: &[u8; POLY1305_KEY_SIZE]) {
        *self = Self::new(key);
    }

    /// Absorb more message bytes
    pub fn update(&mut self, mut data: &[u8]) {
        if self.leftover > 0 {
            let take = (POLY1305_BLOCK_SIZE - self.leftover).min(data.len());
            self.buffer[self.leftover..self.leftover + take].copy_from_slice(&data[..take]);
            self.leftover += take;
            data = &data[take..];

            if self.leftover < POLY1305_BLOCK_SIZE {
                return;
            }
            let block = self.buffer;
            self.block(&block, false);
            self.leftover = 0;
        }

        let mut blocks = data.chunks_exact(POLY1305_BLOCK_SIZE);
        for block in &mut blocks {
            self.block(block, false);
        }

        let rest = blocks.remainder();
        self.buffer[..rest.len()].copy_from_slice(rest);
        self.leftover = rest.len();
    }

    /// Compute the tag
    pub fn finalize(mut self) -> Tag<POLY1305_TAG_SIZE> {
        let mut out = [0u8; POLY1305_TAG_SIZE];
        self.finish(&mut out);
        Tag::new(out)
    }

    /// Write the tag into `out`
    pub fn sum(mut self, out: &mut [u8; POLY1305_TAG_SIZE]) {
        self.finish(out);
    }

    /// Compare the computed tag with `tag` in constant time
    pub fn verify(self, tag: &[u8]) -> bool {
        let computed = self.finalize();
        ct_eq(computed.as_ref(), tag)
    }

    /// Zeroize the key and accumulator
    ///
    /// The authenticator must be rekeyed before it is used again.
    pub fn wipe(&mut self) {
        self.zeroize();
    }

    /// h = (h + m) * r mod 2^130 - 5, where m is `block` with a 2^128 pad
    /// bit unless it is the final partial block (already padded with 0x01)
    fn block(&mut self, block: &[u8], partial: bool) {
        let hibit: u32 = if partial { 0 } else { 1 << 24 };

        let [r0, r1, r2, r3, r4] = self.r;
        let (s1, s2, s3, s4) = (r1 * 5, r2 * 5, r3 * 5, r4 * 5);

        let h0 = self.h[0] + (LittleEndian::read_u32(&block[0..4]) & LIMB_MASK);
        let h1 = self.h[1] + ((LittleEndian::read_u32(&block[3..7]) >> 2) & LIMB_MASK);
        let h2 = self.h[2] + ((LittleEndian::read_u32(&block[6..10]) >> 4) & LIMB_MASK);
        let h3 = self.h[3] + ((LittleEndian::read_u32(&block[9..13]) >> 6) & LIMB_MASK);
        let h4 = self.h[4] + ((LittleEndian::read_u32(&block[12..16]) >> 8) | hibit);

        let m = |a: u32, b: u32| a as u64 * b as u64;

        let d0 = m(h0, r0) + m(h1, s4) + m(h2, s3) + m(h3, s2) + m(h4, s1);
        let mut d1 = m(h0, r1) + m(h1, r0) + m(h2, s4) + m(h3, s3) + m(h4, s2);
        let mut d2 = m(h0, r2) + m(h1, r1) + m(h2, r0) + m(h3, s4) + m(h4, s3);
        let mut d3 = m(h0, r3) + m(h1, r2) + m(h2, r1) + m(h3, r0) + m(h4, s4);
        let mut d4 = m(h0, r4) + m(h1, r3) + m(h2, r2) + m(h3, r1) + m(h4, r0);

        // Partial carry propagation
        let mut c = (d0 >> 26) as u32;
        let mut h0 = d0 as u32 & LIMB_MASK;
        d1 += c as u64;
        c = (d1 >> 26) as u32;
        let mut h1 = d1 as u32 & LIMB_MASK;
        d2 += c as u64;
        c = (d2 >> 26) as u32;
        let h2 = d2 as u32 & LIMB_MASK;
        d3 += c as u64;
        c = (d3 >> 26) as u32;
        let h3 = d3 as u32 & LIMB_MASK;
        d4 += c as u64;
        c = (d4 >> 26) as u32;
        let h4 = d4 as u32 & LIMB_MASK;
        h0 += c * 5;
        c = h0 >> 26;
        h0 &= LIMB_MASK;
        h1 += c;

        self.h = [h0, h1, h2, h3, h4];
    }

    fn finish(&mut self, out: &mut [u8; POLY1305_TAG_SIZE]) {
        if self.leftover > 0 {
            let mut block = [0u8; POLY1305_BLOCK_SIZE];
            block[..self.leftover].copy_from_slice(&self.buffer[..self.leftover]);
            block[self.leftover] = 1;
            self.block(&block, true);
            block.zeroize();
            self.leftover = 0;
        }

        let [mut h0, mut h1, mut h2, mut h3, mut h4] = self.h;

        // Full carry propagation
        let mut c = h1 >> 26;
        h1 &= LIMB_MASK;
        h2 += c;
        c = h2 >> 26;
        h2 &= LIMB_MASK;
        h3 += c;
        c = h3 >> 26;
        h3 &= LIMB_MASK;
        h4 += c;
        c = h4 >> 26;
        h4 &= LIMB_MASK;
        h0 += c * 5;
        c = h0 >> 26;
        h0 &= LIMB_MASK;
        h1 += c;

        // g = h + -p = h - (2^130 - 5)
        let mut g0 = h0.wrapping_add(5);
        c = g0 >> 26;
        g0 &= LIMB_MASK;
        let mut g1 = h1.wrapping_add(c);
        c = g1 >> 26;
        g1 &= LIMB_MASK;
        let mut g2 = h2.wrapping_add(c);
        c = g2 >> 26;
        g2 &= LIMB_MASK;
        let mut g3 = h3.wrapping_add(c);
        c = g3 >> 26;
        g3 &= LIMB_MASK;
        let mut g4 = h4.wrapping_add(c).wrapping_sub(1 << 26);

        // Select h if h < p, else g, without branching
        let mut mask = (g4 >> 31).wrapping_sub(1);
        g0 &= mask;
        g1 &= mask;
        g2 &= mask;
        g3 &= mask;
        g4 &= mask;
        mask = !mask;
        h0 = (h0 & mask) | g0;
        h1 = (h1 & mask) | g1;
        h2 = (h2 & mask) | g2;
        h3 = (h3 & mask) | g3;
        h4 = (h4 & mask) | g4;

        // h = h % 2^128, repacked into four 32-bit words
        let words = [
            h0 | (h1 << 26),
            (h1 >> 6) | (h2 << 20),
            (h2 >> 12) | (h3 << 14),
            (h3 >> 18) | (h4 << 8),
        ];

        // tag = (h + s) % 2^128
        let mut carry = 0u64;
        for (i, chunk) in out.chunks_exact_mut(4).enumerate() {
            let f = words[i] as u64 + self.pad[i] as u64 + carry;
            LittleEndian::write_u32(chunk, f as u32);
            carry = f >> 32;
        }
    }
}

/// One-shot Poly1305 (libsodium `crypto_onetimeauth`)
pub fn onetimeauth(key: &[u8; POLY1305_KEY_SIZE], message: &[u8]) -> Tag<POLY1305_TAG_SIZE> {
    let mut mac = Poly1305::new(key);
    mac.update(message);
    mac.finalize()
}

/// One-shot Poly1305 verification in constant time
pub fn onetimeauth_verify(key: &[u8; POLY1305_KEY_SIZE], message: &[u8], tag: &[u8]) -> bool {
    let mut mac = Poly1305::new(key);
    mac.update(message);
    mac.verify(tag)
}
