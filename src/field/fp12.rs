//! `Fp12 = Fp6[w] / (w^2 - v)`, the pairing target field `GT` embeds into as a subgroup of the
//! multiplicative group of `Fp12`.

use crate::field::bigint::U256;
use crate::field::Fp6;
use core::ops::{Add, Mul, Neg, Sub};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::Zeroize;

/// An element `c0 + c1*w` of `Fp12`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Fp12 {
    pub(crate) c0: Fp6,
    pub(crate) c1: Fp6,
}

impl Fp12 {
    pub(crate) const ZERO: Self = Self { c0: Fp6::ZERO, c1: Fp6::ZERO };
    pub(crate) const ONE: Self = Self { c0: Fp6::ONE, c1: Fp6::ZERO };

    #[must_use]
    pub(crate) fn new(c0: Fp6, c1: Fp6) -> Self { Self { c0, c1 } }

    #[must_use]
    pub(crate) fn is_zero(&self) -> bool { self.c0.is_zero() && self.c1.is_zero() }

    /// The fixed-length 384-byte big-endian encoding: the six `Fp` coordinates of `c1` (high)
    /// then `c0` (low), each coordinate itself high-coefficient first, mirroring
    /// `Fp2::to_bytes_be`.
    #[must_use]
    pub fn to_bytes_be(&self) -> [u8; 384] {
        let mut out = [0u8; 384];
        let parts = [
            self.c1.c2, self.c1.c1, self.c1.c0, self.c0.c2, self.c0.c1, self.c0.c0,
        ];
        for (i, part) in parts.iter().enumerate() {
            out[i * 64..(i + 1) * 64].copy_from_slice(&part.to_bytes_be());
        }
        out
    }

    #[must_use]
    pub fn from_bytes_be(bytes: &[u8; 384]) -> Self {
        let mut parts = [crate::field::Fp2::ZERO; 6];
        for (i, part) in parts.iter_mut().enumerate() {
            *part = crate::field::Fp2::from_bytes_be(bytes[i * 64..(i + 1) * 64].try_into().unwrap());
        }
        Self { c0: Fp6::new(parts[5], parts[4], parts[3]), c1: Fp6::new(parts[2], parts[1], parts[0]) }
    }

    #[must_use]
    pub(crate) fn add(&self, other: &Self) -> Self {
        Self { c0: self.c0.add(&other.c0), c1: self.c1.add(&other.c1) }
    }

    #[must_use]
    pub(crate) fn sub(&self, other: &Self) -> Self {
        Self { c0: self.c0.sub(&other.c0), c1: self.c1.sub(&other.c1) }
    }

    #[must_use]
    pub(crate) fn neg(&self) -> Self { Self { c0: self.c0.neg(), c1: self.c1.neg() } }

    #[must_use]
    pub(crate) fn mul(&self, other: &Self) -> Self {
        let a0b0 = self.c0.mul(&other.c0);
        let a1b1 = self.c1.mul(&other.c1);
        let cross = self.c0.add(&self.c1).mul(&other.c0.add(&other.c1));
        Self { c0: a0b0.add(&a1b1.mul_by_v()), c1: cross.sub(&a0b0).sub(&a1b1) }
    }

    #[must_use]
    pub(crate) fn square(&self) -> Self { self.mul(self) }

    /// The conjugate `c0 - c1*w`, equal to `x^(p^6)` for this tower's non-residue choice.
    /// Used as the cheap half of the pairing's "easy part" final exponentiation.
    #[must_use]
    pub(crate) fn conjugate(&self) -> Self { Self { c0: self.c0, c1: self.c1.neg() } }

    #[must_use]
    pub(crate) fn invert(&self) -> Option<Self> {
        if self.is_zero() {
            return None;
        }
        let norm = self.c0.square().sub(&self.c1.square().mul_by_v());
        let norm_inv = norm.invert()?;
        Some(Self { c0: self.c0.mul(&norm_inv), c1: self.c1.neg().mul(&norm_inv) })
    }

    /// Exponentiation by a public big-endian exponent, arbitrary byte length. Used both for the
    /// `x^p` Frobenius step (a 256-bit exponent) and for the final-exponentiation hard part
    /// (much wider); see [`crate::pairing`].
    #[must_use]
    pub(crate) fn pow_vartime_be(&self, exponent_be: &[u8]) -> Self {
        let mut result = Self::ONE;
        for byte in exponent_be {
            for bit in (0..8).rev() {
                result = result.square();
                if (byte >> bit) & 1 == 1 {
                    result = result.mul(self);
                }
            }
        }
        result
    }

    #[must_use]
    pub(crate) fn pow_vartime(&self, exponent: &U256) -> Self {
        let mut be = [0u8; 32];
        for (i, limb) in exponent.iter().enumerate() {
            be[24 - 8 * i..32 - 8 * i].copy_from_slice(&limb.to_be_bytes());
        }
        self.pow_vartime_be(&be)
    }
}

impl PartialEq for Fp12 {
    fn eq(&self, other: &Self) -> bool { self.ct_eq(other).into() }
}
impl Eq for Fp12 {}

impl ConstantTimeEq for Fp12 {
    fn ct_eq(&self, other: &Self) -> Choice { self.c0.ct_eq(&other.c0) & self.c1.ct_eq(&other.c1) }
}

impl ConditionallySelectable for Fp12 {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            c0: Fp6::conditional_select(&a.c0, &b.c0, choice),
            c1: Fp6::conditional_select(&a.c1, &b.c1, choice),
        }
    }
}

impl Zeroize for Fp12 {
    fn zeroize(&mut self) {
        self.c0.zeroize();
        self.c1.zeroize();
    }
}

impl Add for Fp12 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self { Fp12::add(&self, &rhs) }
}
impl Sub for Fp12 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self { Fp12::sub(&self, &rhs) }
}
impl Mul for Fp12 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self { Fp12::mul(&self, &rhs) }
}
impl Neg for Fp12 {
    type Output = Self;
    fn neg(self) -> Self { Fp12::neg(&self) }
}
