//! `G1`: points on `E(Fp): y^2 = x^3 + b`. A BN curve is built so `#E(Fp) = N` exactly, so every
//! curve point other than the identity has order `N` -- `G1`'s cofactor is 1 and subgroup
//! membership is just the on-curve check.

use crate::field::{Fp, Scalar};
use crate::params::CURVE_B;
use std::sync::OnceLock;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::Zeroize;

/// An affine point on `E(Fp)`, or the identity (point at infinity).
#[derive(Clone, Copy, Debug)]
pub struct G1 {
    pub(crate) x: Fp,
    pub(crate) y: Fp,
    pub(crate) infinity: Choice,
}

impl Default for G1 {
    fn default() -> Self { Self::identity() }
}

fn curve_b() -> Fp { Fp::from_u64(CURVE_B) }

impl G1 {
    #[must_use]
    pub(crate) fn identity() -> Self { Self { x: Fp::ZERO, y: Fp::ZERO, infinity: Choice::from(1) } }

    #[must_use]
    pub(crate) fn is_identity(&self) -> bool { self.infinity.into() }

    /// Constructs a point from affine coordinates without an on-curve check; callers that take
    /// coordinates from an untrusted source must call [`Self::is_on_curve`] themselves, as the
    /// DER/byte codec does before handing back a point.
    #[must_use]
    pub(crate) fn from_affine_unchecked(x: Fp, y: Fp) -> Self { Self { x, y, infinity: Choice::from(0) } }

    #[must_use]
    pub(crate) fn is_on_curve(&self) -> bool {
        bool::from(self.infinity) || self.y.square() == self.x.square().mul(&self.x).add(&curve_b())
    }

    /// The fixed generator `P1`. A BN curve's cofactor-1 property means any curve point (other
    /// than the identity) already generates the full order-`N` group, so this is derived by
    /// try-and-increment rather than transcribed from the standard (see DESIGN.md).
    #[must_use]
    pub fn generator() -> Self {
        static GENERATOR: OnceLock<G1> = OnceLock::new();
        *GENERATOR.get_or_init(|| {
            let mut x = Fp::ONE;
            loop {
                let rhs = x.square().mul(&x).add(&curve_b());
                if let Some(y) = rhs.sqrt() {
                    return Self::from_affine_unchecked(x, y);
                }
                x = x.add(&Fp::ONE);
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

    /// Double-and-add scalar multiplication. Runs in variable time; only key material feeding
    /// into it is zeroized on drop, not the multiplication itself.
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

    /// Uncompressed encoding: `0x04 || X || Y`, 65 bytes.
    #[must_use]
    pub fn to_bytes_uncompressed(&self) -> [u8; 65] {
        let mut out = [0u8; 65];
        out[0] = 0x04;
        out[1..33].copy_from_slice(&self.x.to_bytes_be());
        out[33..65].copy_from_slice(&self.y.to_bytes_be());
        out
    }

    /// Decodes and validates an uncompressed point. Rejects anything but the `0x04` tag and any
    /// coordinate pair that isn't on the curve.
    pub fn from_bytes_uncompressed(bytes: &[u8; 65]) -> Result<Self, crate::Error> {
        if bytes[0] != 0x04 {
            return Err(crate::Error::InvalidEncoding);
        }
        let x = Fp::from_bytes_be(bytes[1..33].try_into().unwrap());
        let y = Fp::from_bytes_be(bytes[33..65].try_into().unwrap());
        let point = Self::from_affine_unchecked(x, y);
        if !point.is_on_curve() {
            return Err(crate::Error::PointNotOnCurve);
        }
        Ok(point)
    }
}

impl PartialEq for G1 {
    fn eq(&self, other: &Self) -> bool {
        let both_infinity = self.infinity & other.infinity;
        let both_finite_equal = !self.infinity & !other.infinity & self.x.ct_eq(&other.x) & self.y.ct_eq(&other.y);
        bool::from(both_infinity | both_finite_equal)
    }
}
impl Eq for G1 {}

impl ConditionallySelectable for G1 {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            x: Fp::conditional_select(&a.x, &b.x, choice),
            y: Fp::conditional_select(&a.y, &b.y, choice),
            infinity: Choice::conditional_select(&a.infinity, &b.infinity, choice),
        }
    }
}

impl Zeroize for G1 {
    fn zeroize(&mut self) {
        self.x.zeroize();
        self.y.zeroize();
    }
}
