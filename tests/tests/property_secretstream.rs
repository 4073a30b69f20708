//! Property-based tests for SecretStream and its stream adapters

use proptest::prelude::*;
use sodix_symmetric::secretstream::{ChunkTag, Header, SecretStreamXChaCha20Poly1305, HEADERBYTES};
use sodix_symmetric::streaming::{
    decrypt_stream, encrypt_stream, SecretStreamReader, SecretStreamWriter, StreamingDecrypt,
    StreamingEncrypt,
};
use sodix_tests::{join_frames, seeded_rng, split_frames};

fn tag_strategy() -> impl Strategy<Value = ChunkTag> {
    prop_oneof![
        Just(ChunkTag::Message),
        Just(ChunkTag::Push),
        Just(ChunkTag::Rekey),
    ]
}

fn chunks_strategy() -> impl Strategy<Value = Vec<(Vec<u8>, ChunkTag)>> {
    prop::collection::vec(
        (prop::collection::vec(any::<u8>(), 0..100), tag_strategy()),
        1..8,
    )
}

proptest! {
    #[test]
    fn secretstream_roundtrip(
        key in any::<[u8; 32]>(),
        header in any::<[u8; HEADERBYTES]>(),
        chunks in chunks_strategy(),
        ad in prop::collection::vec(any::<u8>(), 0..20),
    ) {
        let header = Header::new(header);
        let mut tx = SecretStreamXChaCha20Poly1305::init_push_with_header(&key, &header);
        let mut rx = SecretStreamXChaCha20Poly1305::init_pull(&header, &key);

        for (message, tag) in &chunks {
            let chunk = tx.push(message, &ad, *tag).unwrap();
            let (plaintext, pulled) = rx.pull(&chunk, &ad).unwrap();
            prop_assert_eq!(&plaintext, message);
            prop_assert_eq!(pulled, *tag);
        }
    }

    #[test]
    fn secretstream_swapped_chunks_fail(
        key in any::<[u8; 32]>(),
        header in any::<[u8; HEADERBYTES]>(),
        chunks in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..50), 2..6),
        swap in any::<prop::sample::Index>(),
    ) {
        let header = Header::new(header);
        let mut tx = SecretStreamXChaCha20Poly1305::init_push_with_header(&key, &header);
        let sealed: Vec<Vec<u8>> = chunks
            .iter()
            .map(|m| tx.push(m, b"", ChunkTag::Message).unwrap())
            .collect();

        // Swap chunk i with chunk i + 1 and pull up to the swap
        let i = swap.index(sealed.len() - 1);
        let mut rx = SecretStreamXChaCha20Poly1305::init_pull(&header, &key);
        for chunk in &sealed[..i] {
            rx.pull(chunk, b"").unwrap();
        }
        prop_assert!(rx.pull(&sealed[i + 1], b"").unwrap_err().is_forged());
        prop_assert_eq!(&rx.pull(&sealed[i], b"").unwrap().0, &chunks[i]);
    }

    #[test]
    fn bytewise_streaming_matches_bulk(
        key in any::<[u8; 32]>(),
        header in any::<[u8; HEADERBYTES]>(),
        data in prop::collection::vec(any::<u8>(), 0..600),
        chunk_size in 1usize..128,
    ) {
        let header = Header::new(header);

        let mut bulk = SecretStreamWriter::with_header(Vec::new(), &key, &header, None, chunk_size).unwrap();
        bulk.write(&data).unwrap();
        let bulk = bulk.finalize().unwrap();

        let mut bytewise = SecretStreamWriter::with_header(Vec::new(), &key, &header, None, chunk_size).unwrap();
        for byte in &data {
            bytewise.write(std::slice::from_ref(byte)).unwrap();
        }
        prop_assert_eq!(&bytewise.finalize().unwrap(), &bulk);

        let mut reader = SecretStreamReader::new(&bulk[..], &key, None).unwrap();
        let mut recovered = Vec::new();
        let mut byte = [0u8; 1];
        while reader.read(&mut byte).unwrap() == 1 {
            recovered.push(byte[0]);
        }
        prop_assert_eq!(recovered, data);
    }

    #[test]
    fn dropped_frames_reported(
        key in any::<[u8; 32]>(),
        seed in any::<u64>(),
        data in prop::collection::vec(any::<u8>(), 0..40000),
        drop in any::<prop::sample::Index>(),
    ) {
        let mut framed = Vec::new();
        encrypt_stream(&data[..], &mut framed, &key, None, &mut seeded_rng(seed)).unwrap();

        let mut chunks = split_frames(&framed);
        chunks.remove(drop.index(chunks.len()));
        let damaged = join_frames(&framed[..HEADERBYTES], &chunks);

        let mut out = Vec::new();
        prop_assert!(decrypt_stream(&damaged[..], &mut out, &key, None).unwrap_err().is_forged());
    }
}
