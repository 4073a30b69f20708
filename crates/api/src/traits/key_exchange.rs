//! Key exchange capability (X25519 + BLAKE2b)

use crate::Result;
use zeroize::Zeroizing;

/// Session keys produced by a key exchange
///
/// `rx` decrypts traffic from the peer, `tx` encrypts traffic to it.
pub struct SessionKeys {
    /// Receive key
    pub rx: Zeroizing<[u8; 32]>,
    /// Transmit key
    pub tx: Zeroizing<[u8; 32]>,
}

/// Derive shared session keys with a peer
///
/// Implementations fail with `Error::InvalidPoint` when the peer's public key
/// is rejected.
pub trait KeyExchange: zeroize::Zeroize {
    /// Public key size in bytes
    const PUBLIC_KEY_BYTES: usize;

    /// Keys for the side that initiated the exchange
    fn client_session_keys(&self, server_public_key: &[u8]) -> Result<SessionKeys>;

    /// Keys for the side that accepted the exchange
    fn server_session_keys(&self, client_public_key: &[u8]) -> Result<SessionKeys>;
}
