//! Signing and verification.
//!
//! Both directions share the same streaming context: an SM3 state pre-seeded with the `H2`
//! domain byte, fed the message incrementally, and only finalized (with the pairing-derived `w`
//! appended) once the whole message has passed through. [`Signer`] and [`Verifier`] expose that
//! context directly; [`sign`]/[`verify`] are one-shot convenience wrappers for callers that
//! already hold the whole message.

use rand_core::CryptoRngCore;
use zeroize::Zeroize;

use crate::codec::Signature;
use crate::error::{Error, VerifyResult};
use crate::field::{Fp12, Scalar};
use crate::group::{G1, G2};
use crate::hash::{h1, H2Hasher};
use crate::keys::{SigningKey, SigningMasterPublicKey};
use crate::pairing::pairing;
use crate::params::HID_SIGN;

/// The number of times the sign/verify retry loops will resample a degenerate scalar before
/// giving up. Each iteration is an independent, overwhelmingly likely success (the degenerate
/// case occurs with probability on the order of `1/N`), so this bound is never expected to bite
/// in practice; it exists only so a pathological RNG can't spin forever.
const MAX_RETRIES: usize = 64;

/// Streaming signer: construct once per message with the signing key and the signing master
/// public key, feed message bytes via [`Signer::update`] in however many calls are convenient,
/// then call [`Signer::finish`] with an RNG to produce the DER-encoded signature.
pub struct Signer<'a> {
    key: &'a SigningKey,
    g: Fp12,
    hasher: H2Hasher,
}

impl<'a> Signer<'a> {
    /// Starts a signing context. Computes `g = e(Ppubs, P1)` once; this value is preserved
    /// across every retry of [`Signer::finish`]'s loop rather than recomputed from a mutated
    /// copy on each iteration.
    #[must_use]
    pub fn new(key: &'a SigningKey, master_public: &SigningMasterPublicKey) -> Self {
        let g = pairing(master_public.point(), &G1::generator());
        Self { key, g, hasher: H2Hasher::new() }
    }

    /// Feeds the next chunk of the message into the running `H2` context.
    pub fn update(&mut self, chunk: &[u8]) { self.hasher.update(chunk); }

    /// Finalizes the signature: samples `r`, computes `w = g^r` and `h = H2(M || w)`, and
    /// restarts with a fresh `r` whenever `l = r - h` lands on zero.
    pub fn finish(mut self, rng: &mut impl CryptoRngCore) -> Result<Vec<u8>, Error> {
        for _ in 0..MAX_RETRIES {
            let mut r = Scalar::random(rng).map_err(|_| Error::RandomGenerationFailed)?;
            let mut w = self.g.pow_vartime(&r.0);
            let mut w_bytes = w.to_bytes_be();
            let mut candidate_hasher = self.hasher.clone();
            candidate_hasher.update(&w_bytes);
            let h = candidate_hasher.finalize();
            w.zeroize();
            w_bytes.zeroize();
            let mut l = r.sub(&h);
            r.zeroize();
            if l.is_zero() {
                l.zeroize();
                continue;
            }
            let s = self.key.point().mul(&l);
            l.zeroize();
            let sig = Signature { h, s };
            self.g.zeroize();
            return sig.encode_der();
        }
        Err(Error::RandomGenerationFailed)
    }
}

/// One-shot convenience wrapper over [`Signer`] for callers with the whole message in hand.
pub fn sign(
    key: &SigningKey, master_public: &SigningMasterPublicKey, message: &[u8],
    rng: &mut impl CryptoRngCore,
) -> Result<Vec<u8>, Error> {
    let mut signer = Signer::new(key, master_public);
    signer.update(message);
    signer.finish(rng)
}

/// Streaming verifier, mirroring [`Signer`]: feed the message via [`Verifier::update`], then
/// call [`Verifier::finish`] with the DER-encoded signature under test.
pub struct Verifier<'a> {
    master_public: &'a SigningMasterPublicKey,
    identity: &'a [u8],
    hasher: H2Hasher,
}

impl<'a> Verifier<'a> {
    /// Starts a verification context for a signature over `identity`'s signed message, checked
    /// against `master_public`.
    #[must_use]
    pub fn new(master_public: &'a SigningMasterPublicKey, identity: &'a [u8]) -> Self {
        Self { master_public, identity, hasher: H2Hasher::new() }
    }

    /// Feeds the next chunk of the message into the running `H2` context.
    pub fn update(&mut self, chunk: &[u8]) { self.hasher.update(chunk); }

    /// Finalizes verification. Returns `Ok(())` for a valid signature,
    /// `Err(Error::SignatureInvalid)` for a well-formed signature over the wrong
    /// message/identity, and a decode error for anything malformed.
    pub fn finish(self, signature_der: &[u8]) -> VerifyResult {
        let sig = Signature::decode_der(signature_der)?;

        let g = pairing(self.master_public.point(), &G1::generator());
        let mut t = g.pow_vartime(&sig.h.0);
        let h1_scalar = h1(self.identity, HID_SIGN);
        let p = G2::generator().mul(&h1_scalar).add(self.master_public.point());
        let u = pairing(&p, &sig.s);
        let mut w = u.mul(&t);
        t.zeroize();
        let mut w_bytes = w.to_bytes_be();
        w.zeroize();

        let mut hasher = self.hasher;
        hasher.update(&w_bytes);
        w_bytes.zeroize();
        let h2 = hasher.finalize();

        if h2 == sig.h {
            Ok(())
        } else {
            Err(Error::SignatureInvalid)
        }
    }
}

/// One-shot convenience wrapper over [`Verifier`].
pub fn verify(
    master_public: &SigningMasterPublicKey, identity: &[u8], message: &[u8], signature_der: &[u8],
) -> VerifyResult {
    let mut verifier = Verifier::new(master_public, identity);
    verifier.update(message);
    verifier.finish(signature_der)
}

#[cfg(test)]
mod tests {
    use super::{sign, verify};
    use crate::keys::SigningMasterKeyPair;
    use rand_chacha::rand_core::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn setup(seed: u64) -> (SigningMasterKeyPair, crate::keys::SigningKey) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let master = SigningMasterKeyPair::generate(&mut rng).unwrap();
        let key = master.extract_signing_key(b"Alice", crate::params::HID_SIGN).unwrap();
        (master, key)
    }

    #[test]
    fn sign_then_verify_round_trips() {
        let (master, key) = setup(10);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let sig = sign(&key, &master.public_key(), b"Chinese IBS standard", &mut rng).unwrap();
        verify(&master.public_key(), b"Alice", b"Chinese IBS standard", &sig).unwrap();
    }

    #[test]
    fn verify_rejects_flipped_message_bit() {
        let (master, key) = setup(20);
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let sig = sign(&key, &master.public_key(), b"Chinese IBS standard", &mut rng).unwrap();
        let mut flipped = *b"Chinese IBS standard";
        flipped[0] ^= 0x01;
        let result = verify(&master.public_key(), b"Alice", &flipped, &sig);
        assert_eq!(result, Err(crate::Error::SignatureInvalid));
    }

    #[test]
    fn verify_rejects_wrong_identity() {
        let (master, key) = setup(30);
        let mut rng = ChaCha8Rng::seed_from_u64(31);
        let sig = sign(&key, &master.public_key(), b"message", &mut rng).unwrap();
        let result = verify(&master.public_key(), b"Bob", b"message", &sig);
        assert_eq!(result, Err(crate::Error::SignatureInvalid));
    }

    #[test]
    fn verify_rejects_malformed_der() {
        let result = verify(&setup(40).0.public_key(), b"Alice", b"message", &[0x00, 0x01]);
        assert_eq!(result, Err(crate::Error::InvalidEncoding));
    }

    #[test]
    fn streaming_and_one_shot_agree() {
        let (master, key) = setup(50);
        let mut rng_a = ChaCha8Rng::seed_from_u64(51);
        let mut rng_b = ChaCha8Rng::seed_from_u64(51);

        let mut signer = super::Signer::new(&key, &master.public_key());
        signer.update(b"hello ");
        signer.update(b"world");
        let streamed = signer.finish(&mut rng_a).unwrap();

        let buffered = sign(&key, &master.public_key(), b"hello world", &mut rng_b).unwrap();
        assert_eq!(streamed, buffered);
    }
}
