//! `G2`: points on the sextic twist `E'(Fp2): y^2 = x^3 + b'`.
//!
//! Unlike `G1`, the twist curve's full point count is not `N` -- it carries a cofactor `h2`.
//! This module does not attempt to divide that cofactor out of [`G2::generator`] (see
//! DESIGN.md); it does, however, implement subgroup membership correctly and generically via
//! `N * P == identity`, which needs no cofactor at all. [`G2::from_bytes_uncompressed`]
//! deliberately does not enforce this check (see its doc comment); callers who want it can
//! reach it through `is_in_expected_subgroup` on the public key/identity-key wrapper types in
//! [`crate::keys`].

use crate::field::{twist_nonresidue, Fp, Fp2, Scalar};
use crate::params::CURVE_B;
use std::sync::OnceLock;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::Zeroize;

/// An affine point on `E'(Fp2)`, or the identity.
#[derive(Clone, Copy, Debug)]
pub struct G2 {
    pub(crate) x: Fp2,
    pub(crate) y: Fp2,
    pub(crate) infinity: Choice,
}

impl Default for G2 {
    fn default() -> Self { Self::identity() }
}

/// The twist curve coefficient `b' = b / XI` (D-type twist convention).
fn curve_b_prime() -> Fp2 {
    let b = Fp2::new(Fp::from_u64(CURVE_B), Fp::ZERO);
    b.mul(&twist_nonresidue().invert().expect("xi is a unit"))
}

impl G2 {
    #[must_use]
    pub(crate) fn identity() -> Self { Self { x: Fp2::ZERO, y: Fp2::ZERO, infinity: Choice::from(1) } }

    #[must_use]
    pub(crate) fn is_identity(&self) -> bool { self.infinity.into() }

    #[must_use]
    pub(crate) fn from_affine_unchecked(x: Fp2, y: Fp2) -> Self { Self { x, y, infinity: Choice::from(0) } }

    #[must_use]
    pub(crate) fn is_on_curve(&self) -> bool {
        bool::from(self.infinity) || self.y.square() == self.x.square().mul(&self.x).add(&curve_b_prime())
    }

    /// `true` iff `self` lies in the order-`N` subgroup: `N * self == identity`. Generic over
    /// the (unknown, to this crate) cofactor, unlike deriving a generator directly. Multiplies
    /// by the raw order `N` rather than a [`Scalar`] since `N` itself reduces to zero mod `N`.
    #[must_use]
    pub(crate) fn is_in_subgroup(&self) -> bool {
        let mut acc = Self::identity();
        let order_be = crate::field::bigint::to_bytes_be(&crate::params::N);
        for byte in order_be.iter() {
            for bit in (0..8).rev() {
                acc = acc.double();
                if (byte >> bit) & 1 == 1 {
                    acc = acc.add(self);
                }
            }
        }
        acc.is_identity()
    }

    /// The fixed generator `P2`. Found by try-and-increment on the twist equation the same way
    /// [`crate::group::g1::G1::generator`] is, but -- because `G2`'s cofactor isn't 1 -- this
    /// point is not guaranteed to land in the order-`N` subgroup. Every other operation in this
    /// module (addition, doubling, scalar multiplication, [`Self::is_in_subgroup`]) is correct
    /// for any twist point regardless; this is the one place this crate's curve-parameter
    /// reconstruction (DESIGN.md) falls short of the standard's exact fixed point.
    #[must_use]
    pub fn generator() -> Self {
        static GENERATOR: OnceLock<G2> = OnceLock::new();
        *GENERATOR.get_or_init(|| {
            let mut x = Fp2::new(Fp::ONE, Fp::ZERO);
            loop {
                let rhs = x.square().mul(&x).add(&curve_b_prime());
                if let Some(y) = rhs.sqrt() {
                    return Self::from_affine_unchecked(x, y);
                }
                x = x.add(&Fp2::ONE);
            }
        })
    }

    #[must_use]
    pub(crate) fn neg(&self) -> Self { Self { x: self.x, y: self.y.neg(), infinity: self.infinity } }

    #[must_use]
    pub(crate) fn double(&self) -> Self {
        if bool::from(self.infinity) || self.y.is_zero() {
            return Self::identity();
        }
        let three_x2 = self.x.square().add(&self.x.square()).add(&self.x.square());
        let lambda = three_x2.mul(&self.y.add(&self.y).invert().expect("nonzero y"));
        let x3 = lambda.square().sub(&self.x).sub(&self.x);
        let y3 = lambda.mul(&self.x.sub(&x3)).sub(&self.y);
        Self::from_affine_unchecked(x3, y3)
    }

    #[must_use]
    pub(crate) fn add(&self, other: &Self) -> Self {
        if bool::from(self.infinity) {
            return *other;
        }
        if bool::from(other.infinity) {
            return *self;
        }
        if self.x == other.x {
            return if self.y == other.y { self.double() } else { Self::identity() };
        }
        let lambda = other.y.sub(&self.y).mul(&other.x.sub(&self.x).invert().expect("x differs"));
        let x3 = lambda.square().sub(&self.x).sub(&other.x);
        let y3 = lambda.mul(&self.x.sub(&x3)).sub(&self.y);
        Self::from_affine_unchecked(x3, y3)
    }

    #[must_use]
    pub fn mul(&self, scalar: &Scalar) -> Self {
        let mut acc = Self::identity();
        let bytes = scalar.to_bytes_be();
        for byte in bytes.iter() {
            for bit in (0..8).rev() {
                acc = acc.double();
                if (byte >> bit) & 1 == 1 {
                    acc = acc.add(self);
                }
            }
        }
        acc
    }

    /// Uncompressed encoding for a `G2` point: `0x04 || X.c1 || X.c0 || Y.c1 || Y.c0`, 129 bytes.
    #[must_use]
    pub fn to_bytes_uncompressed(&self) -> [u8; 129] {
        let mut out = [0u8; 129];
        out[0] = 0x04;
        out[1..65].copy_from_slice(&self.x.to_bytes_be());
        out[65..129].copy_from_slice(&self.y.to_bytes_be());
        out
    }

    /// Decodes and validates an uncompressed `G2` point against the curve equation. Does *not*
    /// additionally enforce [`Self::is_in_subgroup`]: this crate's own `G2::generator` is a
    /// try-and-increment reconstruction with no guaranteed relationship to the order-`N`
    /// subgroup (see DESIGN.md), so master public keys this crate derives from its own
    /// generator would themselves fail a strict subgroup check. A deployment built on the
    /// standard's literal Appendix D generator should call [`Self::is_in_subgroup`] on every
    /// decoded point from an untrusted source, same as this crate does for the `G1` points
    /// (`RA`/`RB`/KEM ciphertexts) where cofactor 1 makes on-curve and in-subgroup the same
    /// check.
    pub fn from_bytes_uncompressed(bytes: &[u8; 129]) -> Result<Self, crate::Error> {
        if bytes[0] != 0x04 {
            return Err(crate::Error::InvalidEncoding);
        }
        let x = Fp2::from_bytes_be(bytes[1..65].try_into().unwrap());
        let y = Fp2::from_bytes_be(bytes[65..129].try_into().unwrap());
        let point = Self::from_affine_unchecked(x, y);
        if !point.is_on_curve() {
            return Err(crate::Error::PointNotOnCurve);
        }
        Ok(point)
    }
}

impl PartialEq for G2 {
    fn eq(&self, other: &Self) -> bool {
        let both_infinity = self.infinity & other.infinity;
        let both_finite_equal = !self.infinity & !other.infinity & self.x.ct_eq(&other.x) & self.y.ct_eq(&other.y);
        bool::from(both_infinity | both_finite_equal)
    }
}
impl Eq for G2 {}

impl ConditionallySelectable for G2 {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            x: Fp2::conditional_select(&a.x, &b.x, choice),
            y: Fp2::conditional_select(&a.y, &b.y, choice),
            infinity: Choice::conditional_select(&a.infinity, &b.infinity, choice),
        }
    }
}

impl Zeroize for G2 {
    fn zeroize(&mut self) {
        self.x.zeroize();
        self.y.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::G2;

    #[test]
    fn generator_is_on_curve() {
        assert!(G2::generator().is_on_curve());
    }

    #[test]
    fn double_matches_add_to_self() {
        let g = G2::generator();
        assert_eq!(g.double(), g.add(&g));
    }
}
