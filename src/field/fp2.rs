//! `Fp2 = Fp[u] / (u^2 - BETA)`, the quadratic extension underlying the sextic twist that `G2`
//! lives on.

use crate::field::Fp;
use core::ops::{Add, Mul, Neg, Sub};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::Zeroize;

/// The quadratic non-residue defining the extension, `BETA = -2`.
#[must_use]
fn beta() -> Fp { Fp::from_u64(2).neg() }

/// An element `c0 + c1*u` of `Fp2`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Fp2 {
    pub(crate) c0: Fp,
    pub(crate) c1: Fp,
}

impl Fp2 {
    pub(crate) const ZERO: Self = Self { c0: Fp::ZERO, c1: Fp::ZERO };
    pub(crate) const ONE: Self = Self { c0: Fp::ONE, c1: Fp::ZERO };

    #[must_use]
    pub(crate) fn new(c0: Fp, c1: Fp) -> Self { Self { c0, c1 } }

    #[must_use]
    pub(crate) fn is_zero(&self) -> bool { self.c0.is_zero() && self.c1.is_zero() }

    /// Big-endian encoding: `c1 || c0` (64 bytes), matching the convention that the
    /// higher-degree coefficient comes first, consistent with the `Fp12` encoding.
    #[must_use]
    pub fn to_bytes_be(&self) -> [u8; 64] {
        let mut out = [0u8; 64];
        out[..32].copy_from_slice(&self.c1.to_bytes_be());
        out[32..].copy_from_slice(&self.c0.to_bytes_be());
        out
    }

    #[must_use]
    pub fn from_bytes_be(bytes: &[u8; 64]) -> Self {
        let c1 = Fp::from_bytes_be(bytes[..32].try_into().unwrap());
        let c0 = Fp::from_bytes_be(bytes[32..].try_into().unwrap());
        Self { c0, c1 }
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
        Self { c0: a0b0.add(&a1b1.mul(&beta())), c1: cross.sub(&a0b0).sub(&a1b1) }
    }

    #[must_use]
    pub(crate) fn square(&self) -> Self { self.mul(self) }

    /// The Frobenius conjugate, `a0 - a1*u` — equal to `x^p` since `u^p = -u` for a
    /// non-residue `BETA`. Needed for the twist map the pairing uses.
    #[must_use]
    pub(crate) fn conjugate(&self) -> Self { Self { c0: self.c0, c1: self.c1.neg() } }

    #[must_use]
    pub(crate) fn invert(&self) -> Option<Self> {
        if self.is_zero() {
            return None;
        }
        let norm = self.c0.square().sub(&self.c1.square().mul(&beta()));
        let norm_inv = norm.invert()?;
        Some(Self { c0: self.c0.mul(&norm_inv), c1: self.c1.neg().mul(&norm_inv) })
    }

    /// Multiplies by the non-residue `BETA`, used by `Fp6` multiplication.
    #[must_use]
    pub(crate) fn mul_by_beta(&self) -> Self { Self { c0: self.c0.mul(&beta()), c1: self.c1.mul(&beta()) } }

    #[must_use]
    fn pow_vartime_u512(&self, exponent: &crate::field::bigint::U512) -> Self {
        let mut result = Self::ONE;
        let mut base = *self;
        for limb in exponent.iter() {
            for bit in 0..64 {
                if (limb >> bit) & 1 == 1 {
                    result = result.mul(&base);
                }
                base = base.square();
            }
        }
        result
    }

    #[must_use]
    fn is_square(&self) -> bool {
        use crate::field::bigint;
        if self.is_zero() {
            return true;
        }
        let p2_minus_1 = bigint::sub_one_wide(&bigint::mul_wide(&Fp::MODULUS, &Fp::MODULUS));
        self.pow_vartime_u512(&bigint::shr1_wide(&p2_minus_1)) == Self::ONE
    }

    /// Square root over `Fp2` via Tonelli-Shanks run directly on the `p^2`-order field, used to
    /// construct a point on `G2`'s twist curve without a precomputed generator (see
    /// [`crate::group::g2`]).
    #[must_use]
    pub(crate) fn sqrt(&self) -> Option<Self> {
        use crate::field::bigint;
        if self.is_zero() {
            return Some(Self::ZERO);
        }
        if !self.is_square() {
            return None;
        }
        let p2_minus_1 = bigint::sub_one_wide(&bigint::mul_wide(&Fp::MODULUS, &Fp::MODULUS));
        let mut q = p2_minus_1;
        let mut s = 0u32;
        while q[0] & 1 == 0 {
            q = bigint::shr1_wide(&q);
            s += 1;
        }
        let mut z = Self::new(Fp::from_u64(2), Fp::ZERO);
        while z.is_square() {
            z = z.add(&Self::ONE);
        }
        let mut m = s;
        let mut c = z.pow_vartime_u512(&q);
        let mut t = self.pow_vartime_u512(&q);
        let mut q_plus_1 = q;
        let mut carry = 1u64;
        for limb in q_plus_1.iter_mut() {
            let (v, overflow) = limb.overflowing_add(carry);
            *limb = v;
            carry = u64::from(overflow);
        }
        debug_assert_eq!(carry, 0, "q + 1 does not overflow 512 bits");
        let mut r = self.pow_vartime_u512(&bigint::shr1_wide(&q_plus_1));
        loop {
            if t == Self::ONE {
                return Some(r);
            }
            let mut i = 0u32;
            let mut t2i = t;
            while t2i != Self::ONE {
                t2i = t2i.square();
                i += 1;
                if i == m {
                    return None;
                }
            }
            let mut b = c;
            for _ in 0..(m - i - 1) {
                b = b.square();
            }
            m = i;
            c = b.square();
            t = t.mul(&c);
            r = r.mul(&b);
        }
    }
}

impl PartialEq for Fp2 {
    fn eq(&self, other: &Self) -> bool { self.ct_eq(other).into() }
}
impl Eq for Fp2 {}

impl ConstantTimeEq for Fp2 {
    fn ct_eq(&self, other: &Self) -> Choice { self.c0.ct_eq(&other.c0) & self.c1.ct_eq(&other.c1) }
}

impl ConditionallySelectable for Fp2 {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            c0: Fp::conditional_select(&a.c0, &b.c0, choice),
            c1: Fp::conditional_select(&a.c1, &b.c1, choice),
        }
    }
}

impl Zeroize for Fp2 {
    fn zeroize(&mut self) {
        self.c0.zeroize();
        self.c1.zeroize();
    }
}

impl Add for Fp2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self { Fp2::add(&self, &rhs) }
}
impl Sub for Fp2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self { Fp2::sub(&self, &rhs) }
}
impl Mul for Fp2 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self { Fp2::mul(&self, &rhs) }
}
impl Neg for Fp2 {
    type Output = Self;
    fn neg(self) -> Self { Fp2::neg(&self) }
}
