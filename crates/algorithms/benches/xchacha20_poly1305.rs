//! Benchmarks for the extended-nonce constructions
//!
//! XChaCha20-Poly1305-IETF next to the two secretbox families, which share
//! the 24-byte nonce but authenticate the ciphertext alone.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sodix_algorithms::aead::xchacha20poly1305::{XChaCha20Poly1305Ietf, XCHACHA20POLY1305_NONCE_SIZE};
use sodix_algorithms::aead::Aead;
use sodix_algorithms::secretbox::{XChaCha20Poly1305, XSalsa20Poly1305};
use sodix_algorithms::types::Nonce;

/// Benchmark sealing with each 24-byte-nonce construction
fn bench_extended_nonce_seal(c: &mut Criterion) {
    let mut group = c.benchmark_group("extended_nonce_seal");
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    let mut key = [0u8; 32];
    rng.fill(&mut key);
    let mut nonce_bytes = [0u8; XCHACHA20POLY1305_NONCE_SIZE];
    rng.fill(&mut nonce_bytes);
    let nonce = Nonce::new(nonce_bytes);

    let aead = XChaCha20Poly1305Ietf::new(&key);
    let chacha_box = XChaCha20Poly1305::new(&key);
    let salsa_box = XSalsa20Poly1305::new(&key);

    for size in [64usize, 1024, 16384] {
        group.throughput(Throughput::Bytes(size as u64));

        let mut plaintext = vec![0u8; size];
        rng.fill(&mut plaintext[..]);

        group.bench_with_input(BenchmarkId::new("xchacha20poly1305_ietf", size), &plaintext, |b, pt| {
            b.iter(|| black_box(aead.seal(black_box(&nonce), black_box(pt), b"").unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("secretbox_xchacha20", size), &plaintext, |b, pt| {
            b.iter(|| black_box(chacha_box.seal(black_box(&nonce), black_box(pt)).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("secretbox_xsalsa20", size), &plaintext, |b, pt| {
            b.iter(|| black_box(salsa_box.seal(black_box(&nonce), black_box(pt)).unwrap()));
        });
    }

    group.finish();
}

/// Benchmark the HChaCha20 subkey overhead on tiny messages
fn bench_extended_nonce_small_messages(c: &mut Criterion) {
    let mut group = c.benchmark_group("extended_nonce_small_messages");

    let aead = XChaCha20Poly1305Ietf::new(&[0x42; 32]);
    let nonce = Nonce::new([0x24; XCHACHA20POLY1305_NONCE_SIZE]);

    for size in [16usize, 32, 64, 128] {
        group.throughput(Throughput::Bytes(size as u64));
        let mut buffer = vec![0u8; size];

        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            b.iter(|| black_box(aead.seal_in_place_detached(&nonce, black_box(&mut buffer), b"").unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_extended_nonce_seal, bench_extended_nonce_small_messages);
criterion_main!(benches);
