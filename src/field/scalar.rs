//! `Scalar`: 256-bit prime-field arithmetic over the curve's group order `N` -- addition,
//! subtraction modulo `N`, random sampling in `[1, N-1]`, equality, zero test, and conversion
//! from a 64-byte hash.

use crate::field::bigint;
use rand_core::CryptoRngCore;

crate::field::field_element!(Scalar, crate::params::N);

impl Scalar {
    /// Samples uniformly from `[1, N-1]`. Rejection-samples 32-byte draws until one both
    /// reduces in-range and is nonzero.
    pub(crate) fn random(rng: &mut impl CryptoRngCore) -> Result<Self, &'static str> {
        for _ in 0..64 {
            let mut bytes = [0u8; 32];
            rng.try_fill_bytes(&mut bytes).map_err(|_| "Scalar::random: RNG failed")?;
            let candidate = Self::from_bytes_be(&bytes);
            if !candidate.is_zero() {
                return Ok(candidate);
            }
        }
        Err("Scalar::random: exhausted retries")
    }

    /// Reduces a 64-byte digest (e.g. two concatenated SM3 outputs) into `[1, N-1]` by mapping
    /// `h mod (N-1)` then adding one, so the all-zero digest never yields a zero scalar.
    #[must_use]
    pub(crate) fn from_hash(bytes: &[u8; 64]) -> Self {
        let wide = bigint::wide_from_bytes_be(bytes);
        let (n_minus_1, _) = bigint::sub(&Self::MODULUS, &[1, 0, 0, 0]);
        let reduced = bigint::reduce_wide(&wide, &n_minus_1);
        let (plus_one, _) = bigint::add(&reduced, &[1, 0, 0, 0]);
        Self(plus_one)
    }
}

#[cfg(test)]
mod tests {
    use super::Scalar;
    use rand_chacha::rand_core::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn random_is_in_range_and_nonzero() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..16 {
            let s = Scalar::random(&mut rng).unwrap();
            assert!(!s.is_zero());
        }
    }

    #[test]
    fn from_hash_never_zero() {
        let zero_hash = [0u8; 64];
        let s = Scalar::from_hash(&zero_hash);
        assert!(!s.is_zero());
        assert_eq!(s, Scalar::ONE);
    }
}
