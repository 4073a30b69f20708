//! Property-based tests for SecretBox

use proptest::prelude::*;
use sodix_algorithms::secretbox::{XChaCha20Poly1305, XSalsa20Poly1305, SECRETBOX_MAC_SIZE};
use sodix_algorithms::types::Nonce;

proptest! {
    #[test]
    fn xsalsa20poly1305_roundtrip(
        key in any::<[u8; 32]>(),
        nonce in any::<[u8; 24]>(),
        message in prop::collection::vec(any::<u8>(), 0..300),
    ) {
        let sbox = XSalsa20Poly1305::new(&key);
        let nonce = Nonce::new(nonce);
        let boxed = sbox.seal(&nonce, &message).unwrap();
        prop_assert_eq!(boxed.len(), message.len() + SECRETBOX_MAC_SIZE);
        prop_assert_eq!(sbox.open(&nonce, &boxed).unwrap(), message);
    }

    #[test]
    fn xchacha20poly1305_tamper_detected(
        key in any::<[u8; 32]>(),
        nonce in any::<[u8; 24]>(),
        message in prop::collection::vec(any::<u8>(), 0..300),
        flip in any::<prop::sample::Index>(),
    ) {
        let sbox = XChaCha20Poly1305::new(&key);
        let nonce = Nonce::new(nonce);
        let mut boxed = sbox.seal(&nonce, &message).unwrap();
        let i = flip.index(boxed.len());
        boxed[i] ^= 0x80;

        let mut dst = vec![0u8; message.len()];
        prop_assert!(sbox.open_into(&mut dst, &nonce, &boxed).unwrap_err().is_forged());
        prop_assert!(dst.iter().all(|&b| b == 0));
    }

    #[test]
    fn families_never_cross_open(
        key in any::<[u8; 32]>(),
        nonce in any::<[u8; 24]>(),
        message in prop::collection::vec(any::<u8>(), 0..64),
    ) {
        let nonce = Nonce::new(nonce);
        let boxed = XSalsa20Poly1305::new(&key).seal(&nonce, &message).unwrap();
        prop_assert!(XChaCha20Poly1305::new(&key).open(&nonce, &boxed).is_err());
    }
}
