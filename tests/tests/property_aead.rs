//! Property-based tests for the AEAD family

use proptest::prelude::*;
use sodix_algorithms::aead::{Aead, Aes256Gcm, ChaCha20Poly1305, ChaCha20Poly1305Ietf, XChaCha20Poly1305Ietf};
use sodix_algorithms::types::Nonce;
use sodix_api::Error;

/// Seal, open, then flip one bit anywhere and expect rejection
fn check_aead<A: Aead>(
    aead: &A,
    nonce: &A::Nonce,
    plaintext: &[u8],
    ad: &[u8],
    flip: prop::sample::Index,
    bit: u8,
) -> Result<(), TestCaseError> {
    let sealed = aead.seal(nonce, plaintext, ad).unwrap();
    prop_assert_eq!(sealed.len(), plaintext.len() + A::TAG_SIZE);
    prop_assert_eq!(aead.open(nonce, &sealed, ad).unwrap(), plaintext);

    let mut tampered = sealed.clone();
    tampered[flip.index(sealed.len())] ^= 1 << (bit % 8);
    let mut dst = vec![0u8; plaintext.len()];
    prop_assert_eq!(
        aead.open_into(&mut dst, nonce, &tampered, ad),
        Err(Error::ForgedOrCorrupted {
            context: aead.name()
        })
    );
    prop_assert!(dst.iter().all(|&b| b == 0));
    Ok(())
}

proptest! {
    #[test]
    fn chacha20poly1305_roundtrip_and_tamper(
        key in any::<[u8; 32]>(),
        nonce in any::<[u8; 8]>(),
        plaintext in prop::collection::vec(any::<u8>(), 0..300),
        ad in prop::collection::vec(any::<u8>(), 0..40),
        flip in any::<prop::sample::Index>(),
        bit in any::<u8>(),
    ) {
        check_aead(&ChaCha20Poly1305::new(&key), &Nonce::new(nonce), &plaintext, &ad, flip, bit)?;
    }

    #[test]
    fn chacha20poly1305_ietf_roundtrip_and_tamper(
        key in any::<[u8; 32]>(),
        nonce in any::<[u8; 12]>(),
        plaintext in prop::collection::vec(any::<u8>(), 0..300),
        ad in prop::collection::vec(any::<u8>(), 0..40),
        flip in any::<prop::sample::Index>(),
        bit in any::<u8>(),
    ) {
        check_aead(&ChaCha20Poly1305Ietf::new(&key), &Nonce::new(nonce), &plaintext, &ad, flip, bit)?;
    }

    #[test]
    fn xchacha20poly1305_ietf_roundtrip_and_tamper(
        key in any::<[u8; 32]>(),
        nonce in any::<[u8; 24]>(),
        plaintext in prop::collection::vec(any::<u8>(), 0..300),
        ad in prop::collection::vec(any::<u8>(), 0..40),
        flip in any::<prop::sample::Index>(),
        bit in any::<u8>(),
    ) {
        check_aead(&XChaCha20Poly1305Ietf::new(&key), &Nonce::new(nonce), &plaintext, &ad, flip, bit)?;
    }

    #[test]
    fn aes256gcm_roundtrip_and_tamper(
        key in any::<[u8; 32]>(),
        nonce in any::<[u8; 12]>(),
        plaintext in prop::collection::vec(any::<u8>(), 0..300),
        ad in prop::collection::vec(any::<u8>(), 0..40),
        flip in any::<prop::sample::Index>(),
        bit in any::<u8>(),
    ) {
        check_aead(&Aes256Gcm::new(&key), &Nonce::new(nonce), &plaintext, &ad, flip, bit)?;
    }

    #[test]
    fn detached_and_combined_agree(
        key in any::<[u8; 32]>(),
        nonce in any::<[u8; 24]>(),
        plaintext in prop::collection::vec(any::<u8>(), 0..200),
    ) {
        let aead = XChaCha20Poly1305Ietf::new(&key);
        let nonce = Nonce::new(nonce);
        let combined = aead.seal(&nonce, &plaintext, b"").unwrap();
        let (ciphertext, tag) = aead.seal_detached(&nonce, &plaintext, b"").unwrap();

        prop_assert_eq!(&combined[..plaintext.len()], &ciphertext[..]);
        prop_assert_eq!(&combined[plaintext.len()..], tag.as_ref());
    }

    #[test]
    fn wrong_ad_rejected(
        key in any::<[u8; 32]>(),
        nonce in any::<[u8; 12]>(),
        plaintext in prop::collection::vec(any::<u8>(), 0..100),
        ad in prop::collection::vec(any::<u8>(), 1..40),
    ) {
        let aead = ChaCha20Poly1305Ietf::new(&key);
        let nonce = Nonce::new(nonce);
        let sealed = aead.seal(&nonce, &plaintext, &ad).unwrap();
        prop_assert!(aead.open(&nonce, &sealed, &ad[1..]).unwrap_err().is_forged());
    }
}
