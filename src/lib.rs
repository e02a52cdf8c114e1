#![deny(clippy::pedantic)]
#![deny(warnings)]
#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

//! SM9: identity-based signature, key encapsulation, public-key encryption, and authenticated
//! key exchange over a 256-bit BN pairing-friendly curve (GM/T 0044-2016).
//!
//! The field, group, and pairing layer (`field`, `group`, `pairing`) is implemented entirely
//! in-crate rather than reaching for an external numeric crate, since no published crate
//! targets this specific curve. The four scheme-layer modules -- [`sign`], [`kem`], [`pke`],
//! and [`exchange`] -- build on top of it.

// Supports automatically clearing sensitive data on drop.
use zeroize::{Zeroize, ZeroizeOnDrop};

mod codec;
mod error;
mod exchange;
mod field;
mod group;
mod hash;
mod kdf;
mod kem;
mod keys;
mod params;
mod pairing;
mod pke;
mod sign;

/// All functionality is covered by a trait, [`traits::SerDes`], so consumers can keep key types
/// opaque and move them across a wire without reaching into this crate's internals.
pub mod traits;

pub use error::{Error, VerifyResult};
pub use exchange::{
    step_1a, step_1b, step_2a, verify_confirmation, Initiator, InitiatorOutput, ResponderOutput,
};
pub use kem::{decapsulate, encapsulate};
pub use keys::{
    EncryptionKey, EncryptionMasterKeyPair, EncryptionMasterPublicKey, ExchangeKey,
    SigningKey, SigningMasterKeyPair, SigningMasterPublicKey,
};
pub use params::{HID_ENC, HID_EXCH, HID_SIGN, SM9_MAX_PLAINTEXT_SIZE};
pub use pke::{decrypt, encrypt};
pub use sign::{sign, verify, Signer, Verifier};

/// Shared secret length this crate recommends for [`encapsulate`]/[`decapsulate`] callers who
/// don't have a protocol-specific length requirement (`klen` is otherwise caller-chosen).
pub const DEFAULT_SHARED_SECRET_LEN: usize = 32;

/// An SM3-authenticated shared secret produced by [`encapsulate`]/[`decapsulate`] or either
/// side of a key exchange. A thin, fixed-length, constant-time-comparable wrapper around the
/// raw KDF output.
#[derive(Clone, Debug, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecretKey(Vec<u8>);

impl SharedSecretKey {
    #[must_use]
    fn new(bytes: Vec<u8>) -> Self { Self(bytes) }

    /// Borrows the raw bytes. Exposed mainly for logging/test assertions; prefer comparing two
    /// `SharedSecretKey`s directly, which uses the constant-time [`PartialEq`] below.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] { &self.0 }
}

// Conservative (constant-time) comparison.
impl PartialEq for SharedSecretKey {
    fn eq(&self, other: &Self) -> bool {
        use subtle::ConstantTimeEq;
        bool::from(self.0.as_slice().ct_eq(other.0.as_slice())) && self.0.len() == other.0.len()
    }
}
impl Eq for SharedSecretKey {}

impl From<zeroize::Zeroizing<Vec<u8>>> for SharedSecretKey {
    fn from(bytes: zeroize::Zeroizing<Vec<u8>>) -> Self { Self::new(bytes.to_vec()) }
}

#[cfg(test)]
mod tests {
    use super::SharedSecretKey;

    #[test]
    fn shared_secret_key_equality_requires_equal_length() {
        let a = SharedSecretKey::new(vec![1, 2, 3]);
        let b = SharedSecretKey::new(vec![1, 2]);
        assert_ne!(a, b);
    }

    #[test]
    fn shared_secret_key_equality_is_content_based() {
        let a = SharedSecretKey::new(vec![1, 2, 3]);
        let b = SharedSecretKey::new(vec![1, 2, 3]);
        assert_eq!(a, b);
    }
}
