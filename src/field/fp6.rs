//! `Fp6 = Fp2[v] / (v^3 - XI)`, the cubic extension one level below `Fp12`. Used only as
//! plumbing for the `GT` pairing target.

use crate::field::Fp2;
use core::ops::{Add, Mul, Neg, Sub};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::Zeroize;

/// The cubic non-residue in `Fp2` defining the extension: `XI = u + 1`. Also used as the
/// sextic-twist non-residue for `G2` (see [`crate::group::g2`]), so the pairing's twist map and
/// this tower agree on which element of `Fp2` is "outside" the subfield.
#[must_use]
pub(crate) fn xi() -> Fp2 { Fp2::new(crate::field::Fp::ONE, crate::field::Fp::ONE) }

/// An element `c0 + c1*v + c2*v^2` of `Fp6`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Fp6 {
    pub(crate) c0: Fp2,
    pub(crate) c1: Fp2,
    pub(crate) c2: Fp2,
}

impl Fp6 {
    pub(crate) const ZERO: Self = Self { c0: Fp2::ZERO, c1: Fp2::ZERO, c2: Fp2::ZERO };
    pub(crate) const ONE: Self = Self { c0: Fp2::ONE, c1: Fp2::ZERO, c2: Fp2::ZERO };

    #[must_use]
    pub(crate) fn new(c0: Fp2, c1: Fp2, c2: Fp2) -> Self { Self { c0, c1, c2 } }

    #[must_use]
    pub(crate) fn is_zero(&self) -> bool { self.c0.is_zero() && self.c1.is_zero() && self.c2.is_zero() }

    #[must_use]
    pub(crate) fn add(&self, other: &Self) -> Self {
        Self { c0: self.c0.add(&other.c0), c1: self.c1.add(&other.c1), c2: self.c2.add(&other.c2) }
    }

    #[must_use]
    pub(crate) fn sub(&self, other: &Self) -> Self {
        Self { c0: self.c0.sub(&other.c0), c1: self.c1.sub(&other.c1), c2: self.c2.sub(&other.c2) }
    }

    #[must_use]
    pub(crate) fn neg(&self) -> Self { Self { c0: self.c0.neg(), c1: self.c1.neg(), c2: self.c2.neg() } }

    /// Multiplies a full `Fp6` element by the generator `v`: `(c0,c1,c2) -> (XI*c2, c0, c1)`.
    #[must_use]
    pub(crate) fn mul_by_v(&self) -> Self { Self { c0: self.c2.mul(&xi()), c1: self.c0, c2: self.c1 } }

    #[must_use]
    pub(crate) fn mul(&self, other: &Self) -> Self {
        let (a0, a1, a2) = (self.c0, self.c1, self.c2);
        let (b0, b1, b2) = (other.c0, other.c1, other.c2);
        let t0 = a0.mul(&b0);
        let t1 = a1.mul(&b1);
        let t2 = a2.mul(&b2);
        let c0 = t0.add(&a1.add(&a2).mul(&b1.add(&b2)).sub(&t1).sub(&t2).mul(&xi()));
        let c1 = a0.add(&a1).mul(&b0.add(&b1)).sub(&t0).sub(&t1).add(&t2.mul(&xi()));
        let c2 = a0.add(&a2).mul(&b0.add(&b2)).sub(&t0).sub(&t2).add(&t1);
        Self { c0, c1, c2 }
    }

    #[must_use]
    pub(crate) fn square(&self) -> Self { self.mul(self) }

    /// Inversion via the cubic-extension norm construction (the same shape as the quadratic
    /// `Fp2::invert`, one degree up).
    #[must_use]
    pub(crate) fn invert(&self) -> Option<Self> {
        if self.is_zero() {
            return None;
        }
        let (c0, c1, c2) = (self.c0, self.c1, self.c2);
        let s0 = c0.square().sub(&c1.mul(&c2).mul(&xi()));
        let s1 = c2.square().mul(&xi()).sub(&c0.mul(&c1));
        let s2 = c1.square().sub(&c0.mul(&c2));
        let norm = c0.mul(&s0).add(&c2.mul(&s1).add(&c1.mul(&s2)).mul(&xi()));
        let norm_inv = norm.invert()?;
        Some(Self { c0: s0.mul(&norm_inv), c1: s1.mul(&norm_inv), c2: s2.mul(&norm_inv) })
    }
}

impl PartialEq for Fp6 {
    fn eq(&self, other: &Self) -> bool { self.ct_eq(other).into() }
}
impl Eq for Fp6 {}

impl ConstantTimeEq for Fp6 {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.c0.ct_eq(&other.c0) & self.c1.ct_eq(&other.c1) & self.c2.ct_eq(&other.c2)
    }
}

impl ConditionallySelectable for Fp6 {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            c0: Fp2::conditional_select(&a.c0, &b.c0, choice),
            c1: Fp2::conditional_select(&a.c1, &b.c1, choice),
            c2: Fp2::conditional_select(&a.c2, &b.c2, choice),
        }
    }
}

impl Zeroize for Fp6 {
    fn zeroize(&mut self) {
        self.c0.zeroize();
        self.c1.zeroize();
        self.c2.zeroize();
    }
}

impl Add for Fp6 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self { Fp6::add(&self, &rhs) }
}
impl Sub for Fp6 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self { Fp6::sub(&self, &rhs) }
}
impl Mul for Fp6 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self { Fp6::mul(&self, &rhs) }
}
impl Neg for Fp6 {
    type Output = Self;
    fn neg(self) -> Self { Fp6::neg(&self) }
}
