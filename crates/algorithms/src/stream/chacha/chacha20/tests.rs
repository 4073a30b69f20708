use super::*;
use crate::types::Nonce;
use hex;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn rfc_key() -> [u8; CHACHA20_KEY_SIZE] {
    hex::decode("000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f")
        .unwrap()
        .try_into()
        .expect("Invalid key length")
}

#[test]
fn test_chacha20_rfc8439_block_function() {
    // RFC 8439 section 2.3.2
    let nonce: [u8; 12] = hex::decode("000000090000004a00000000")
        .unwrap()
        .try_into()
        .expect("Invalid nonce length");
    let expected = hex::decode("10f1e7e4d13b5915500fdd1fa32071c4c7d1f4c733c068030422aa9ac3d46c4ed2826446079faa0914c2d705d98b02a2b5129cd1de164eb9cbd083e8a2503c4e")
        .unwrap();

    let mut chacha = ChaCha20::with_counter(&rfc_key(), &Nonce::new(nonce), 1);
    let mut block = [0u8; 64];
    chacha.keystream(&mut block);

    assert_eq!(&block[..], &expected[..]);
    assert_eq!(chacha.block_counter(), 2);
}

#[test]
fn test_chacha20_rfc8439() {
    // RFC 8439 section 2.4.2
    let nonce: [u8; 12] = hex::decode("000000000000004a00000000")
        .unwrap()
        .try_into()
        .expect("Invalid nonce length");
    let plaintext = hex::decode("4c616469657320616e642047656e746c656d656e206f662074686520636c617373206f66202739393a204966204920636f756c64206f6666657220796f75206f6e6c79206f6e652074697020666f7220746865206675747572652c2073756e73637265656e20776f756c642062652069742e")
        .unwrap();
    let expected_ciphertext = hex::decode("6e2e359a2568f98041ba0728dd0d6981e97e7aec1d4360c20a27afccfd9fae0bf91b65c5524733ab8f593dabcd62b3571639d624e65152ab8f530c359f0861d807ca0dbf500d6a6156a38e088a22b65e52bc514d16ccf806818ce91ab77937365af90bbf74a35be6b40b8eedf2785e42874d")
        .unwrap();

    let nonce = Nonce::<12>::new(nonce);

    let mut chacha = ChaCha20::with_counter(&rfc_key(), &nonce, 1);
    let mut output = plaintext.clone();
    chacha.apply_keystream(&mut output);
    assert_eq!(output, expected_ciphertext);

    let mut chacha = ChaCha20::with_counter(&rfc_key(), &nonce, 1);
    let mut decrypted = vec![0u8; expected_ciphertext.len()];
    chacha.xor_keystream(&mut decrypted, &expected_ciphertext);
    assert_eq!(decrypted, plaintext);
}

#[test]
fn test_chacha20_original_layout_zero_key() {
    // RFC 8439 appendix A.1, test vectors 1 and 2: with an all-zero nonce the
    // original and IETF layouts produce the same blocks 0 and 1
    let expected = hex::decode(concat!(
        "76b8e0ada0f13d90405d6ae55386bd28bdd219b8a08ded1aa836efcc8b770dc7",
        "da41597c5157488d7724e03fb8d84a376a43b8f41518a11cc387b669b2ee6586",
        "9f07e7be5551387a98ba977c732d080dcb0f29a048e3656912c6533e32ee7aed",
        "29b721769ce64e43d57133b074d839d531ed1f28510afb45ace10a1f4b794d6f",
    ))
    .unwrap();

    let key = [0u8; 32];
    let mut original = ChaCha20::new(&key, &Nonce::<8>::zeroed());
    let mut ietf = ChaCha20::new(&key, &Nonce::<12>::zeroed());

    let mut a = [0u8; 128];
    let mut b = [0u8; 128];
    original.keystream(&mut a);
    ietf.keystream(&mut b);

    assert_eq!(&a[..], &expected[..]);
    assert_eq!(&b[..], &expected[..]);
    assert_eq!(original.nonce_size(), 8);
    assert_eq!(ietf.nonce_size(), 12);
}

#[test]
fn test_chacha20_bytewise_matches_one_shot() {
    let mut rng = ChaCha20Rng::seed_from_u64(8439);
    let mut key = [0u8; 32];
    rng.fill_bytes(&mut key);
    let nonce = Nonce::<12>::new([7u8; 12]);

    let mut message = vec![0u8; 300];
    rng.fill_bytes(&mut message);

    let mut one_shot = message.clone();
    ChaCha20::new(&key, &nonce).apply_keystream(&mut one_shot);

    let mut bytewise = message.clone();
    let mut cipher = ChaCha20::new(&key, &nonce);
    for byte in bytewise.chunks_mut(1) {
        cipher.apply_keystream(byte);
    }

    assert_eq!(one_shot, bytewise);
}

#[test]
fn test_chacha20_interleaved_keystream_and_xor() {
    let key = [0x42; CHACHA20_KEY_SIZE];
    let nonce = Nonce::<8>::new([0x24; 8]);

    let mut reference = [0u8; 200];
    ChaCha20::new(&key, &nonce).keystream(&mut reference);

    // keystream(5) + xor(40 zero bytes) + keystream(100) + xor(55 zero bytes)
    let mut cipher = ChaCha20::new(&key, &nonce);
    let mut out = [0u8; 200];
    cipher.keystream(&mut out[..5]);
    let zeros = [0u8; 55];
    cipher.xor_keystream(&mut out[5..45], &zeros[..40]);
    cipher.keystream(&mut out[45..145]);
    cipher.xor_keystream(&mut out[145..], &zeros);

    assert_eq!(&out[..], &reference[..]);
}

#[test]
fn test_chacha20_seek() {
    let key = [0x42; CHACHA20_KEY_SIZE];
    let nonce = Nonce::<12>::new([0x24; 12]);

    let mut chacha1 = ChaCha20::new(&key, &nonce);
    let mut chacha2 = ChaCha20::new(&key, &nonce);

    // 200 bytes = 3 full blocks + 8 bytes of block 3; a seek lands on block 4
    let mut data = [0u8; 200];
    chacha1.apply_keystream(&mut data);
    let mut skip = [0u8; 56];
    chacha1.apply_keystream(&mut skip);

    chacha2.seek(4);

    let mut ks1 = [0u8; 64];
    let mut ks2 = [0u8; 64];
    chacha1.keystream(&mut ks1);
    chacha2.keystream(&mut ks2);

    assert_eq!(ks1, ks2);
}

#[test]
fn test_chacha20_seek_discards_buffered_bytes() {
    let key = [1u8; 32];
    let nonce = Nonce::<12>::new([2u8; 12]);

    let mut fresh = ChaCha20::new(&key, &nonce);
    let mut expected = [0u8; 64];
    fresh.keystream(&mut expected);

    let mut cipher = ChaCha20::new(&key, &nonce);
    let mut partial = [0u8; 10];
    cipher.keystream(&mut partial);
    cipher.seek(0);
    let mut block = [0u8; 64];
    cipher.keystream(&mut block);

    assert_eq!(block, expected);
}

#[test]
#[should_panic(expected = "block counter exhausted")]
fn test_chacha20_ietf_counter_exhaustion() {
    let mut cipher = ChaCha20::with_counter(&[0u8; 32], &Nonce::<12>::zeroed(), u32::MAX as u64);
    let mut blocks = [0u8; 128];
    cipher.keystream(&mut blocks);
}

#[test]
fn test_chacha20_original_counter_is_64_bit() {
    let mut cipher = ChaCha20::with_counter(&[0u8; 32], &Nonce::<8>::zeroed(), u32::MAX as u64);
    let mut blocks = [0u8; 128];
    cipher.keystream(&mut blocks);

    assert_eq!(cipher.block_counter(), (u32::MAX as u64) + 2);
    // Block 2^32 must not repeat block 0
    let mut block0 = [0u8; 64];
    ChaCha20::new(&[0u8; 32], &Nonce::<8>::zeroed()).keystream(&mut block0);
    assert_ne!(&blocks[64..], &block0[..]);
}

#[test]
fn test_xchacha20_uses_hchacha20_subkey() {
    let key = [0x80u8; 32];
    let mut nonce = [0u8; 24];
    for (i, b) in nonce.iter_mut().enumerate() {
        *b = 0x40 + i as u8;
    }

    let mut input = [0u8; 16];
    input.copy_from_slice(&nonce[..16]);
    let subkey = hchacha20_block(&key, &input);
    let mut tail = [0u8; 8];
    tail.copy_from_slice(&nonce[16..]);

    let mut expected = [0u8; 100];
    ChaCha20::new(subkey.as_array(), &Nonce::new(tail)).keystream(&mut expected);

    let mut actual = [0u8; 100];
    let mut xchacha = ChaCha20::new(&key, &Nonce::<24>::new(nonce));
    xchacha.keystream(&mut actual);

    assert_eq!(actual, expected);
    assert_eq!(xchacha.nonce_size(), 24);
}

#[test]
fn test_xchacha20_known_keystream() {
    // libsodium crypto_stream_xchacha20
    let key: [u8; 32] = core::array::from_fn(|i| 0x80 + i as u8);
    let nonce: [u8; 24] = core::array::from_fn(|i| 0x40 + i as u8);
    let expected = hex::decode(
        "7b191f80f361f099094f6f4b8fb97df847cc6873a8f2b190dd73807183f907d5\
         a1cb27385b00329f7ddc127059d6882551a120e7631352e9b0381572e950155a",
    )
    .unwrap();

    let mut typed = [0u8; 64];
    ChaCha20::new(&key, &Nonce::new(nonce)).keystream(&mut typed);
    assert_eq!(&typed[..], &expected[..]);

    let mut untyped = [0u8; 64];
    ChaCha20::from_slices(&key, &nonce).keystream(&mut untyped);
    assert_eq!(untyped, typed);
}

#[test]
fn test_chacha20_rekey_matches_fresh_instance() {
    let mut cipher = ChaCha20::new(&[1u8; 32], &Nonce::<12>::zeroed());
    let mut junk = [0u8; 70];
    cipher.keystream(&mut junk);

    cipher.rekey(&[9u8; 32], &[3u8; 8]);
    let mut after = [0u8; 64];
    cipher.keystream(&mut after);

    let mut expected = [0u8; 64];
    ChaCha20::new(&[9u8; 32], &Nonce::<8>::new([3u8; 8])).keystream(&mut expected);

    assert_eq!(after, expected);
    assert_eq!(cipher.nonce_size(), 8);
}

#[test]
fn test_chacha20_wipe() {
    let mut cipher = ChaCha20::new(&[0x42u8; 32], &Nonce::<12>::zeroed());
    let mut keystream = [0u8; 10];
    cipher.keystream(&mut keystream);
    assert_ne!(keystream, [0u8; 10]);

    cipher.wipe();
    assert!(cipher.state.iter().all(|&w| w == 0));
    assert!(cipher.buffer.iter().all(|&b| b == 0));
    assert_eq!(cipher.position, CHACHA20_BLOCK_SIZE);
}

#[test]
#[should_panic(expected = "unsupported nonce length")]
fn test_chacha20_rejects_bad_nonce_slice() {
    let _ = ChaCha20::from_slices(&[0u8; 32], &[0u8; 16]);
}

#[test]
#[should_panic]
fn test_xor_keystream_short_destination() {
    let mut cipher = ChaCha20::new(&[0u8; 32], &Nonce::<12>::zeroed());
    let mut dst = [0u8; 4];
    cipher.xor_keystream(&mut dst, &[0u8; 5]);
}
