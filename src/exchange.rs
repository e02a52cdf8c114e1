//! Two-round authenticated key exchange. `A` is the initiator, `B` the responder; both hold a
//! per-identity exchange key under [`crate::params::HID_EXCH`].
//!
//! The base protocol (steps 1A, 1B, 2A) completes without the optional key-confirmation tags,
//! so this module keeps confirmation as a separate, caller-opt-in step built on top of the
//! results each function already returns, rather than folding it into the main flow.

use rand_core::CryptoRngCore;
use sm3::Sm3;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, Zeroizing};

use digest::Digest;

use crate::error::Error;
use crate::field::{Fp12, Scalar};
use crate::group::{G1, G2};
use crate::hash::h1;
use crate::kdf::kdf;
use crate::keys::{EncryptionMasterPublicKey, ExchangeKey};
use crate::pairing::pairing;
use crate::params::{CONFIRM_PREFIX_A_TO_B, CONFIRM_PREFIX_B_TO_A, HID_EXCH};
use crate::SharedSecretKey;

const MAX_RETRIES: usize = 64;

fn inner_hash(g2: &Fp12, g3: &Fp12, id_a: &[u8], id_b: &[u8], r_a: &[u8; 65], r_b: &[u8; 65]) -> [u8; 32] {
    let mut hasher = Sm3::new();
    hasher.update(g2.to_bytes_be());
    hasher.update(g3.to_bytes_be());
    hasher.update(id_a);
    hasher.update(id_b);
    hasher.update(r_a);
    hasher.update(r_b);
    hasher.finalize().into()
}

fn confirmation_tag(prefix: u8, g1: &Fp12, inner: &[u8; 32]) -> [u8; 32] {
    let mut hasher = Sm3::new();
    hasher.update([prefix]);
    hasher.update(g1.to_bytes_be());
    hasher.update(inner);
    hasher.finalize().into()
}

/// Initiator state retained between [`step_1a`] and [`step_2a`]: the ephemeral scalar `rA` and
/// the point `RA` it produced, so step 2 doesn't need to resample or recompute either.
pub struct Initiator {
    r_a: Scalar,
    r_a_point: G1,
}

impl Drop for Initiator {
    fn drop(&mut self) { self.r_a.zeroize(); }
}

/// Step 1A: the initiator computes `RA` and sends it to the responder.
pub fn step_1a(
    master_public: &EncryptionMasterPublicKey, peer_identity: &[u8], rng: &mut impl CryptoRngCore,
) -> Result<(Initiator, [u8; 65]), Error> {
    let q_b = G1::generator().mul(&h1(peer_identity, HID_EXCH)).add(master_public.point());
    let r_a = Scalar::random(rng).map_err(|_| Error::RandomGenerationFailed)?;
    let r_a_point = q_b.mul(&r_a);
    let bytes = r_a_point.to_bytes_uncompressed();
    Ok((Initiator { r_a, r_a_point }, bytes))
}

/// Everything [`step_1b`] produces: the point `RB` to send back, the derived shared secret, the
/// optional confirmation tag `SB` the responder may send alongside `RB`, and the tag the
/// responder expects to receive back from the initiator (`SA`) -- computable here because the
/// bilinear identity `e(RA, deB) = e(Ppube, P2)^rA` makes both sides' `(G1, G2, G3)` triple
/// identical regardless of which pairing each side took to reach it.
pub struct ResponderOutput {
    /// The derived shared secret, `klen` bytes long.
    pub shared_secret: SharedSecretKey,
    /// `RB`, the point the responder sends back to the initiator.
    pub r_b: [u8; 65],
    /// `SB`, this side's confirmation tag (domain prefix `0x82`), optionally sent alongside `RB`.
    pub confirmation: [u8; 32],
    /// The confirmation tag (`SA`, domain prefix `0x83`) this side expects to receive from the
    /// initiator; pass it as `expected` to [`verify_confirmation`].
    pub expected_peer_confirmation: [u8; 32],
}

/// Step 1B: the responder receives `RA`, derives the shared secret, and computes `RB` plus the
/// optional confirmation tag `SB` (domain prefix `0x82`). Resamples `rB` internally if the
/// derived key happens to be all-zero.
#[allow(clippy::too_many_arguments)]
pub fn step_1b(
    master_public: &EncryptionMasterPublicKey, my_key: &ExchangeKey, my_identity: &[u8],
    peer_identity: &[u8], peer_r_a: &[u8; 65], klen: usize, rng: &mut impl CryptoRngCore,
) -> Result<ResponderOutput, Error> {
    let r_a_point = G1::from_bytes_uncompressed(peer_r_a)?;
    let q_a = G1::generator().mul(&h1(peer_identity, HID_EXCH)).add(master_public.point());

    for _ in 0..MAX_RETRIES {
        let mut r_b = Scalar::random(rng).map_err(|_| Error::RandomGenerationFailed)?;
        let r_b_point = q_a.mul(&r_b);
        let r_b_bytes = r_b_point.to_bytes_uncompressed();

        let g1_val = pairing(my_key.point(), &r_a_point);
        let g2_val = pairing(&G2::generator(), master_public.point()).pow_vartime(&r_b.0);
        let g3_val = g1_val.pow_vartime(&r_b.0);
        r_b.zeroize();

        let mut input = Zeroizing::new(Vec::with_capacity(
            peer_identity.len() + my_identity.len() + 128 + 3 * 384,
        ));
        input.extend_from_slice(peer_identity);
        input.extend_from_slice(my_identity);
        input.extend_from_slice(&peer_r_a[1..]);
        input.extend_from_slice(&r_b_bytes[1..]);
        input.extend_from_slice(&g1_val.to_bytes_be());
        input.extend_from_slice(&g2_val.to_bytes_be());
        input.extend_from_slice(&g3_val.to_bytes_be());

        let mut sk = Zeroizing::new(vec![0u8; klen]);
        kdf(&input, &mut sk);
        if sk.iter().all(|&b| b == 0) {
            continue;
        }

        let inner = inner_hash(&g2_val, &g3_val, peer_identity, my_identity, peer_r_a, &r_b_bytes);
        let confirmation = confirmation_tag(CONFIRM_PREFIX_B_TO_A, &g1_val, &inner);
        let expected_peer_confirmation = confirmation_tag(CONFIRM_PREFIX_A_TO_B, &g1_val, &inner);
        return Ok(ResponderOutput {
            shared_secret: sk.into(),
            r_b: r_b_bytes,
            confirmation,
            expected_peer_confirmation,
        });
    }
    Err(Error::RandomGenerationFailed)
}

/// Everything [`step_2a`] produces: the shared secret, the optional confirmation tag `SA` the
/// initiator may send to the responder (domain prefix `0x83`), and the tag the initiator
/// expects back from the responder (`SB`), for the same reason [`ResponderOutput`] exposes one.
pub struct InitiatorOutput {
    /// The derived shared secret, `klen` bytes long.
    pub shared_secret: SharedSecretKey,
    /// `SA`, this side's confirmation tag (domain prefix `0x83`), optionally sent to the
    /// responder.
    pub confirmation: [u8; 32],
    /// The confirmation tag (`SB`, domain prefix `0x82`) this side expects to receive from the
    /// responder; pass it as `expected` to [`verify_confirmation`].
    pub expected_peer_confirmation: [u8; 32],
}

/// Step 2A: the initiator receives `RB` and derives the same shared secret `B` computed in
/// [`step_1b`]. Unlike the responder, the initiator cannot resample on a degenerate result --
/// `RB` is fixed by the peer -- so this surfaces as an error instead of a retry.
pub fn step_2a(
    initiator: Initiator, master_public: &EncryptionMasterPublicKey, my_key: &ExchangeKey,
    my_identity: &[u8], peer_identity: &[u8], peer_r_b: &[u8; 65], klen: usize,
) -> Result<InitiatorOutput, Error> {
    let r_b_point = G1::from_bytes_uncompressed(peer_r_b)?;

    let g1_val = pairing(&G2::generator(), master_public.point()).pow_vartime(&initiator.r_a.0);
    let g2_val = pairing(my_key.point(), &r_b_point);
    let g3_val = g2_val.pow_vartime(&initiator.r_a.0);

    let r_a_bytes = initiator.r_a_point.to_bytes_uncompressed();
    let mut input =
        Zeroizing::new(Vec::with_capacity(my_identity.len() + peer_identity.len() + 128 + 3 * 384));
    input.extend_from_slice(my_identity);
    input.extend_from_slice(peer_identity);
    input.extend_from_slice(&r_a_bytes[1..]);
    input.extend_from_slice(&peer_r_b[1..]);
    input.extend_from_slice(&g1_val.to_bytes_be());
    input.extend_from_slice(&g2_val.to_bytes_be());
    input.extend_from_slice(&g3_val.to_bytes_be());

    let mut sk = Zeroizing::new(vec![0u8; klen]);
    kdf(&input, &mut sk);
    if sk.iter().all(|&b| b == 0) {
        return Err(Error::RetryableDegenerateValue);
    }

    let inner = inner_hash(&g2_val, &g3_val, my_identity, peer_identity, &r_a_bytes, peer_r_b);
    let confirmation = confirmation_tag(CONFIRM_PREFIX_A_TO_B, &g1_val, &inner);
    let expected_peer_confirmation = confirmation_tag(CONFIRM_PREFIX_B_TO_A, &g1_val, &inner);
    Ok(InitiatorOutput { shared_secret: sk.into(), confirmation, expected_peer_confirmation })
}

/// Verifies a confirmation tag received from the peer against the one this side computed,
/// in constant time.
pub fn verify_confirmation(expected: &[u8; 32], received: &[u8; 32]) -> Result<(), Error> {
    let ok: bool = expected.ct_eq(received).into();
    if ok {
        Ok(())
    } else {
        Err(Error::KeyConfirmationFailed)
    }
}
