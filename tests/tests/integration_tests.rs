//! End-to-end use of the facade crate

use sodix::prelude::*;
use sodix::symmetric::streaming::{decrypt_stream, encrypt_stream};
use sodix_tests::seeded_rng;

#[test]
fn test_prelude_aead_round_trip() {
    let mut rng = seeded_rng(1);
    let key = XChaCha20Poly1305Ietf::generate_key(&mut rng).unwrap();
    let nonce = XChaCha20Poly1305Ietf::generate_nonce(&mut rng).unwrap();

    let aead = XChaCha20Poly1305Ietf::new(key.as_array());
    let sealed = aead.seal(&nonce, b"attack at dawn", b"v1").unwrap();
    assert_eq!(aead.open(&nonce, &sealed, b"v1").unwrap(), b"attack at dawn");
}

#[test]
fn test_prelude_aes256gcm_round_trip() {
    let mut rng = seeded_rng(2);
    let key = Aes256Gcm::generate_key(&mut rng).unwrap();
    let nonce = Aes256Gcm::generate_nonce(&mut rng).unwrap();

    let aead = Aes256Gcm::new(key.as_array());
    let sealed = aead.seal(&nonce, b"attack at dawn", b"v1").unwrap();
    assert_eq!(sealed.len(), 14 + Aes256Gcm::TAG_SIZE);
    assert_eq!(aead.open(&nonce, &sealed, b"v1").unwrap(), b"attack at dawn");
}

#[test]
fn test_prelude_secretbox_with_os_random() {
    let mut rng = OsRandom;
    let key = SecretBuffer::<32>::random(&mut rng).unwrap();
    let nonce = Nonce::<24>::random(&mut rng).unwrap();

    let sbox = XSalsa20Poly1305::new(key.as_array());
    let boxed = sbox.seal(&nonce, b"hello").unwrap();
    assert_eq!(sbox.open(&nonce, &boxed).unwrap(), b"hello");
}

#[test]
fn test_secretstream_session() {
    let key = [0x5au8; 32];
    let (mut tx, header) = SecretStreamXChaCha20Poly1305::init_push(&key, &mut seeded_rng(2)).unwrap();

    let mut wire = header.as_bytes().to_vec();
    let mut lengths = Vec::new();
    for (message, tag) in [
        (&b"hello"[..], ChunkTag::Message),
        (&b"rotate keys now"[..], ChunkTag::Rekey),
        (&b"bye"[..], ChunkTag::Final),
    ] {
        let chunk = tx.push(message, b"session", tag).unwrap();
        lengths.push(chunk.len());
        wire.extend_from_slice(&chunk);
    }

    let mut rx = SecretStreamXChaCha20Poly1305::init_pull_from_slice(&wire, &key).unwrap();
    let mut offset = 24;
    let mut received = Vec::new();
    for len in lengths {
        let (message, tag) = rx.pull(&wire[offset..offset + len], b"session").unwrap();
        offset += len;
        received.push((message, tag));
    }

    assert_eq!(received[1], (b"rotate keys now".to_vec(), ChunkTag::Rekey));
    assert_eq!(received[2].1, ChunkTag::Final);
    assert!(rx.is_finalized());
}

#[test]
fn test_file_style_streaming() {
    let key = [9u8; 32];
    let data: Vec<u8> = (0..100_000u32).map(|i| i as u8).collect();

    let mut encrypted = Vec::new();
    encrypt_stream(&data[..], &mut encrypted, &key, Some(&b"file v1"[..]), &mut seeded_rng(3)).unwrap();

    let mut decrypted = Vec::new();
    decrypt_stream(&encrypted[..], &mut decrypted, &key, Some(&b"file v1"[..])).unwrap();
    assert_eq!(decrypted, data);

    let err = decrypt_stream(&encrypted[..encrypted.len() - 1], Vec::new(), &key, Some(&b"file v1"[..]))
        .unwrap_err();
    assert_eq!(
        err,
        Error::ForgedOrCorrupted {
            context: "truncated stream"
        }
    );
}

#[test]
fn test_wiped_secrets_read_as_zero() {
    let mut key = SecretBuffer::new([0xffu8; 32]);
    key.zeroize();
    assert!(key.is_zero());

    let mut ephemeral = EphemeralSecret::new([1u8; 16]);
    ephemeral.zeroize();
    assert_eq!(*ephemeral, [0u8; 16]);
}
