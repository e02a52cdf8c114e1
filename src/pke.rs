//! Public-key encryption: the KEM from [`crate::kem`] plus an XOR keystream and an HMAC-SM3
//! authentication tag. The MAC key is the *tail* of the single KDF call's output, not a separate
//! derivation -- one KDF call produces keystream-then-MAC-key, not two independent derivations.

use hmac::{Hmac, Mac};
use rand_core::CryptoRngCore;
use sm3::Sm3;
use subtle::ConstantTimeEq;

use crate::codec::Ciphertext;
use crate::error::Error;
use crate::group::G1;
use crate::kem::{decapsulate, encapsulate};
use crate::keys::{EncryptionKey, EncryptionMasterPublicKey};
use crate::params::SM9_MAX_PLAINTEXT_SIZE;

type HmacSm3 = Hmac<Sm3>;

/// Encrypts `plaintext` to `identity`, returning the DER-encoded envelope.
/// `plaintext.len()` must not exceed [`SM9_MAX_PLAINTEXT_SIZE`].
pub fn encrypt(
    master_public: &EncryptionMasterPublicKey, identity: &[u8], plaintext: &[u8],
    rng: &mut impl CryptoRngCore,
) -> Result<Vec<u8>, Error> {
    if plaintext.len() > SM9_MAX_PLAINTEXT_SIZE {
        return Err(Error::InputTooLarge);
    }
    let klen = plaintext.len() + 32;
    let (k, c1_bytes) = encapsulate(master_public, identity, klen, rng)?;
    let (keystream, mac_key) = k.as_bytes().split_at(plaintext.len());

    let c2: Vec<u8> = keystream.iter().zip(plaintext).map(|(ks, m)| ks ^ m).collect();
    let mut mac = <HmacSm3 as Mac>::new_from_slice(mac_key).expect("HMAC accepts any key length");
    mac.update(&c2);
    let tag = mac.finalize().into_bytes();
    let mut c3 = [0u8; 32];
    c3.copy_from_slice(&tag);

    let c1 = G1::from_bytes_uncompressed(&c1_bytes).expect("encapsulate produced a valid point");
    Ciphertext { c1, c3, c2 }.encode_der()
}

/// Decrypts an envelope produced by [`encrypt`]. Recomputes the HMAC tag and compares it to
/// `C3` in constant time before releasing any plaintext; a mismatch returns the single opaque
/// [`Error::DecryptionFailed`] rather than distinguishing "bad MAC" from "bad KEM output", so a
/// caller can't learn which check failed.
pub fn decrypt(key: &EncryptionKey, identity: &[u8], envelope_der: &[u8]) -> Result<Vec<u8>, Error> {
    let envelope = Ciphertext::decode_der(envelope_der)?;
    if envelope.c2.len() > SM9_MAX_PLAINTEXT_SIZE {
        return Err(Error::InputTooLarge);
    }
    let klen = envelope.c2.len() + 32;
    let c1_bytes = envelope.c1.to_bytes_uncompressed();
    let k = decapsulate(key, identity, &c1_bytes, klen)?;
    let (keystream, mac_key) = k.as_bytes().split_at(envelope.c2.len());

    let mut mac = <HmacSm3 as Mac>::new_from_slice(mac_key).expect("HMAC accepts any key length");
    mac.update(&envelope.c2);
    let expected = mac.finalize().into_bytes();
    let tag_ok: bool = expected.as_slice().ct_eq(&envelope.c3).into();
    if !tag_ok {
        return Err(Error::DecryptionFailed);
    }

    let plaintext: Vec<u8> = keystream.iter().zip(envelope.c2.iter()).map(|(ks, c)| ks ^ c).collect();
    Ok(plaintext)
}

#[cfg(test)]
mod tests {
    use super::{decrypt, encrypt};
    use crate::keys::EncryptionMasterKeyPair;
    use rand_chacha::rand_core::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn setup(seed: u64) -> (EncryptionMasterKeyPair, crate::keys::EncryptionKey) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let master = EncryptionMasterKeyPair::generate(&mut rng).unwrap();
        let key = master.extract_encryption_key(b"Bob", crate::params::HID_ENC).unwrap();
        (master, key)
    }

    #[test]
    fn encrypt_then_decrypt_round_trips() {
        let (master, key) = setup(200);
        let mut rng = ChaCha8Rng::seed_from_u64(201);
        let envelope = encrypt(&master.public_key(), b"Bob", b"Chinese IBE standard", &mut rng).unwrap();
        let plaintext = decrypt(&key, b"Bob", &envelope).unwrap();
        assert_eq!(plaintext, b"Chinese IBE standard");
    }

    #[test]
    fn flipping_any_ciphertext_byte_breaks_decryption() {
        let (master, key) = setup(210);
        let mut rng = ChaCha8Rng::seed_from_u64(211);
        let envelope = encrypt(&master.public_key(), b"Bob", b"short message", &mut rng).unwrap();
        for i in 0..envelope.len() {
            let mut corrupted = envelope.clone();
            corrupted[i] ^= 0x01;
            assert!(decrypt(&key, b"Bob", &corrupted).is_err(), "byte {i} should invalidate the envelope");
        }
    }

    #[test]
    fn decrypt_rejects_oversized_plaintext_length() {
        let (_master, key) = setup(220);
        // A envelope whose C2 exceeds SM9_MAX_PLAINTEXT_SIZE should be rejected before any KEM
        // work -- exercised indirectly via encrypt's own bound since constructing an oversized
        // DER envelope by hand would require bypassing the public API.
        let oversized = vec![0u8; crate::params::SM9_MAX_PLAINTEXT_SIZE + 1];
        let mut rng = ChaCha8Rng::seed_from_u64(221);
        let result = super::encrypt(
            &crate::keys::EncryptionMasterKeyPair::generate(&mut rng).unwrap().public_key(),
            b"Bob", &oversized, &mut rng,
        );
        assert_eq!(result, Err(crate::Error::InputTooLarge));
        let _ = key;
    }
}
