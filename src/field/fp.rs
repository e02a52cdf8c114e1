//! `Fp`: the base field underlying `G1` (points on `E(Fp)`) and, via its quadratic extension,
//! `G2` and `GT`.

crate::field::field_element!(Fp, crate::params::P);

impl Fp {
    /// Euler's criterion: `true` iff `self` is a nonzero square, or `self` is zero.
    #[must_use]
    fn is_square(&self) -> bool {
        if self.is_zero() {
            return true;
        }
        let (exponent, _) = bigint::sub(&Self::MODULUS, &[1, 0, 0, 0]);
        self.pow_vartime(&bigint::shr1(&exponent)) == Self::ONE
    }

    /// Factors `modulus - 1 = q * 2^s` with `q` odd, for Tonelli-Shanks.
    fn factor_q_s() -> (U256, u32) {
        let (mut q, _) = bigint::sub(&Self::MODULUS, &[1, 0, 0, 0]);
        let mut s = 0u32;
        while q[0] & 1 == 0 {
            q = bigint::shr1(&q);
            s += 1;
        }
        (q, s)
    }

    /// Square root via Tonelli-Shanks. Returns `None` if `self` is not a quadratic residue.
    /// General-purpose (works for any odd prime modulus), used to construct a curve point of
    /// `G1` without needing a precomputed generator (see [`crate::group::g1`]).
    #[must_use]
    pub(crate) fn sqrt(&self) -> Option<Self> {
        if self.is_zero() {
            return Some(Self::ZERO);
        }
        if !self.is_square() {
            return None;
        }
        let (q, s) = Self::factor_q_s();
        let mut z = Self::from_u64(2);
        while z.is_square() {
            z = z.add(&Self::ONE);
        }
        let mut m = s;
        let mut c = z.pow_vartime(&q);
        let mut t = self.pow_vartime(&q);
        let (q_plus_1, _) = bigint::add(&q, &[1, 0, 0, 0]);
        let mut r = self.pow_vartime(&bigint::shr1(&q_plus_1));
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

#[cfg(test)]
mod tests {
    use super::Fp;

    #[test]
    fn add_sub_inverse() {
        let a = Fp::from_bytes_be(&[7u8; 32]);
        let b = Fp::from_bytes_be(&[3u8; 32]);
        assert_eq!(a.add(&b).sub(&b), a);
    }

    #[test]
    fn mul_by_inverse_is_one() {
        let a = Fp::from_bytes_be(&[9u8; 32]);
        let inv = a.invert().expect("nonzero has inverse");
        assert_eq!(a.mul(&inv), Fp::ONE);
    }

    #[test]
    fn zero_has_no_inverse() {
        assert!(Fp::ZERO.invert().is_none());
    }

    #[test]
    fn sqrt_of_square_roundtrips() {
        let a = Fp::from_u64(12345);
        let squared = a.square();
        let root = squared.sqrt().expect("square has a root");
        assert_eq!(root.square(), squared);
    }

    #[test]
    fn sqrt_of_zero_is_zero() {
        assert_eq!(Fp::ZERO.sqrt(), Some(Fp::ZERO));
    }
}
