use super::*;
use crate::error::Error;
use crate::mac::poly1305::onetimeauth;
use hex;

fn nacl_key() -> [u8; 32] {
    hex::decode("1b27556473e985d462cd51197a9a46c76009549eac6474f206c4ee0844f68389")
        .unwrap()
        .try_into()
        .unwrap()
}

fn nacl_nonce() -> Nonce<24> {
    Nonce::from_slice(&hex::decode("69696ee955b62b73cd62bda875fc73d68219e0036b7a0b37").unwrap())
        .unwrap()
}

fn nacl_message() -> Vec<u8> {
    hex::decode(
        "be075fc53c81f2d5cf141316ebeb0c7b5228c52a4c62cbd44b66849b64244ffc\
         e5ecbaaf33bd751a1ac728d45e6c61296cdc3c01233561f41db66cce314adb31\
         0e3be8250c46f06dceea3a7fa1348057e2f6556ad6b1318a024a838f21af1fde\
         048977eb48f59ffd4924ca1c60902e52f0a089bc76897040e082f93776384864\
         5e0705",
    )
    .unwrap()
}

const NACL_TAG: &str = "f3ffc7703f9400e52a7dfb4b3d3305d9";
const NACL_CIPHERTEXT: &str = "8e993b9f48681273c29650ba32fc76ce48332ea7164d96a4476fb8c531a1186a\
                               c0dfc17c98dce87b4da7f011ec48c97271d2c20f9b928fe2270d6fb863d51738\
                               b48eeee314a7cc8ab932164548e526ae90224368517acfeabd6bb3732bc0e9da\
                               99832b61ca01b6de56244a9e88d5f9b37973f622a43d14a6599b1f654cb45a74\
                               e355a5";

#[test]
fn test_xsalsa20poly1305_nacl_vector() {
    // NaCl tests/secretbox.c
    let sbox = XSalsa20Poly1305::new(&nacl_key());
    let boxed = sbox.seal(&nacl_nonce(), &nacl_message()).unwrap();

    assert_eq!(hex::encode(&boxed[..16]), NACL_TAG);
    assert_eq!(hex::encode(&boxed[16..]), NACL_CIPHERTEXT);

    assert_eq!(sbox.open(&nacl_nonce(), &boxed).unwrap(), nacl_message());
}

#[test]
fn test_detached_matches_combined() {
    let sbox = XSalsa20Poly1305::new(&nacl_key());
    let (ciphertext, tag) = sbox.seal_detached(&nacl_nonce(), &nacl_message()).unwrap();

    assert_eq!(hex::encode(tag.as_ref()), NACL_TAG);
    assert_eq!(
        sbox.open_detached(&nacl_nonce(), &ciphertext, &tag).unwrap(),
        nacl_message()
    );

    let mut buffer = nacl_message();
    let in_place_tag = sbox.seal_in_place_detached(&nacl_nonce(), &mut buffer).unwrap();
    assert_eq!(buffer, ciphertext);
    assert_eq!(in_place_tag, tag);

    sbox.open_in_place_detached(&nacl_nonce(), &mut buffer, &tag).unwrap();
    assert_eq!(buffer, nacl_message());
}

#[test]
fn test_from_shared_secret() {
    // NaCl tests/box.c: the shared secret behind the secretbox key
    let shared: [u8; 32] = hex::decode("4a5d9d5ba4ce2de1728e3bf480350f25e07e21c947d19e3376f09b3c1e161742")
        .unwrap()
        .try_into()
        .unwrap();

    let from_dh = XSalsa20Poly1305::from_shared_secret(&shared);
    let direct = XSalsa20Poly1305::new(&nacl_key());
    assert_eq!(
        from_dh.seal(&nacl_nonce(), b"beforenm").unwrap(),
        direct.seal(&nacl_nonce(), b"beforenm").unwrap()
    );
}

#[test]
fn test_xchacha20poly1305_composition() {
    let key = [0x42u8; 32];
    let nonce = Nonce::new([0x24u8; 24]);
    let message = b"secretbox over XChaCha20";

    let boxed = XChaCha20Poly1305::new(&key).seal(&nonce, message).unwrap();

    // First 32 keystream bytes key the MAC, the rest encrypt
    let mut keystream = [0u8; 32 + 24];
    ChaCha20::new(&key, &nonce).keystream(&mut keystream);
    let ciphertext: Vec<u8> = message
        .iter()
        .zip(&keystream[32..])
        .map(|(m, k)| m ^ k)
        .collect();
    let mut mac_key = [0u8; 32];
    mac_key.copy_from_slice(&keystream[..32]);

    assert_eq!(&boxed[16..], &ciphertext[..]);
    assert_eq!(&boxed[..16], onetimeauth(&mac_key, &ciphertext).as_ref());
}

#[test]
fn test_families_are_distinct() {
    let key = [1u8; 32];
    let nonce = Nonce::new([2u8; 24]);
    let salsa = XSalsa20Poly1305::new(&key).seal(&nonce, b"message").unwrap();
    let chacha = XChaCha20Poly1305::new(&key).seal(&nonce, b"message").unwrap();
    assert_ne!(salsa, chacha);
}

#[test]
fn test_tamper_leaves_destination_untouched() {
    let sbox = XChaCha20Poly1305::new(&[3u8; 32]);
    let nonce = Nonce::new([4u8; 24]);
    let boxed = sbox.seal(&nonce, b"sixteen byte msg").unwrap();

    for i in 0..boxed.len() {
        let mut tampered = boxed.clone();
        tampered[i] ^= 0x10;

        let mut dst = [0u8; 16];
        assert_eq!(
            sbox.open_into(&mut dst, &nonce, &tampered),
            Err(Error::ForgedOrCorrupted {
                context: "XChaCha20Poly1305"
            })
        );
        assert_eq!(dst, [0u8; 16]);
    }
}

#[test]
fn test_length_errors() {
    let sbox = XSalsa20Poly1305::new(&[5u8; 32]);
    let nonce = Nonce::new([6u8; 24]);

    assert!(matches!(
        sbox.open(&nonce, &[0u8; 15]),
        Err(Error::CipherTooShort { minimum: 16, actual: 15, .. })
    ));

    let mut small = [0u8; 20];
    assert!(matches!(
        sbox.seal_into(&mut small, &nonce, b"five more"),
        Err(Error::BufferTooShort { expected: 25, actual: 20, .. })
    ));

    let empty = sbox.seal(&nonce, b"").unwrap();
    assert_eq!(empty.len(), 16);
    assert!(sbox.open(&nonce, &empty).unwrap().is_empty());
}

#[test]
fn test_wipe_zeroes_key() {
    let nonce = Nonce::new([0u8; 24]);
    let mut sbox = XSalsa20Poly1305::new(&[9u8; 32]);
    sbox.wipe();
    assert_eq!(
        sbox.seal(&nonce, b"m").unwrap(),
        XSalsa20Poly1305::new(&[0u8; 32]).seal(&nonce, b"m").unwrap()
    );
}
