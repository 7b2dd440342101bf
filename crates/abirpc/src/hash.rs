//! # Hashing
//!
//! Selectors and topics are derived from signature strings with a 256-bit hash
//! supplied by the caller. Any `Fn(&[u8]) -> [u8; 32]` works; `Keccak256` is the
//! default.

use sha3::Digest;

/// A 256-bit hash function.
pub trait Hasher256: Send + Sync {
    fn hash256(&self, data: &[u8]) -> [u8; 32];
}

impl<F> Hasher256 for F
where
    F: Fn(&[u8]) -> [u8; 32] + Send + Sync,
{
    fn hash256(&self, data: &[u8]) -> [u8; 32] {
        self(data)
    }
}

/// Keccak-256, the hash contract interfaces are normally keyed by.
#[derive(Debug, Clone, Copy, Default)]
pub struct Keccak256;

impl Hasher256 for Keccak256 {
    fn hash256(&self, data: &[u8]) -> [u8; 32] {
        let mut hasher = sha3::Keccak256::new();
        hasher.update(data);
        let out = hasher.finalize();
        let mut digest = [0u8; 32];
        digest.copy_from_slice(&out);
        digest
    }
}
