//! 256-bit scalar arithmetic mod `N`, and the base field `Fp` underlying `G1`/`G2`. Both are
//! generated by [`field_element`] from the same 256-bit bignum primitives in [`bigint`].

pub(crate) mod bigint;
mod fp;
mod fp12;
mod fp2;
mod fp6;
mod scalar;

pub use fp::Fp;
pub use fp12::Fp12;
pub use fp2::Fp2;
pub use fp6::Fp6;
pub use scalar::Scalar;

/// The `Fp2` element used both as `Fp6`'s cubic non-residue and as the sextic-twist
/// non-residue `G2` is built over (see [`crate::group::g2`]).
pub(crate) use fp6::xi as twist_nonresidue;

/// Generates a 256-bit prime-field element type reducing modulo `$modulus`.
///
/// Shared by `Fp` (section 1: "a 256-bit prime-field scalar arithmetic module over the
/// curve's group order N") and `Scalar` (the base field `Fp` underlying `G1`). Both need
/// identical bignum plumbing and differ only in which modulus they reduce against.
macro_rules! field_element {
    ($name:ident, $modulus:expr) => {
        use crate::field::bigint::{self, U256};
        use core::ops::{Add, Mul, Neg, Sub};
        use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
        use zeroize::Zeroize;

        /// An element of this field, always held in fully-reduced (< modulus) form.
        #[derive(Clone, Copy, Debug, Default)]
        pub struct $name(pub(crate) U256);

        impl $name {
            /// The field modulus, big-endian limbs reversed to little-endian `U256`.
            pub(crate) const MODULUS: U256 = $modulus;

            pub(crate) const ZERO: Self = Self([0, 0, 0, 0]);
            pub(crate) const ONE: Self = Self([1, 0, 0, 0]);

            #[must_use]
            pub(crate) fn is_zero(&self) -> bool { bigint::is_zero(&self.0) }

            /// Constructs the element representing a small non-negative integer, reduced
            /// modulo the field modulus. Used for small fixed constants such as curve
            /// coefficients and tower non-residues.
            #[must_use]
            pub(crate) fn from_u64(value: u64) -> Self {
                let wide = [value, 0, 0, 0, 0, 0, 0, 0];
                Self(bigint::reduce_wide(&wide, &Self::MODULUS))
            }

            /// Constructs an element from a big-endian 32-byte encoding, reducing modulo the
            /// field modulus. Matches the uncompressed, big-endian coordinate convention used
            /// throughout this crate's wire formats.
            #[must_use]
            pub fn from_bytes_be(bytes: &[u8; 32]) -> Self {
                let raw = bigint::from_bytes_be(bytes);
                let wide = [raw[0], raw[1], raw[2], raw[3], 0, 0, 0, 0];
                Self(bigint::reduce_wide(&wide, &Self::MODULUS))
            }

            /// Big-endian 32-byte encoding of a fully-reduced element.
            #[must_use]
            pub fn to_bytes_be(&self) -> [u8; 32] { bigint::to_bytes_be(&self.0) }

            #[must_use]
            pub(crate) fn add(&self, other: &Self) -> Self {
                let (sum, carry) = bigint::add(&self.0, &other.0);
                if carry || bigint::cmp(&sum, &Self::MODULUS) != core::cmp::Ordering::Less {
                    Self(bigint::sub(&sum, &Self::MODULUS).0)
                } else {
                    Self(sum)
                }
            }

            #[must_use]
            pub(crate) fn sub(&self, other: &Self) -> Self {
                let (diff, borrow) = bigint::sub(&self.0, &other.0);
                if borrow {
                    Self(bigint::add(&diff, &Self::MODULUS).0)
                } else {
                    Self(diff)
                }
            }

            #[must_use]
            pub(crate) fn neg(&self) -> Self {
                if self.is_zero() {
                    *self
                } else {
                    Self(bigint::sub(&Self::MODULUS, &self.0).0)
                }
            }

            #[must_use]
            pub(crate) fn mul(&self, other: &Self) -> Self {
                let wide = bigint::mul_wide(&self.0, &other.0);
                Self(bigint::reduce_wide(&wide, &Self::MODULUS))
            }

            #[must_use]
            pub(crate) fn square(&self) -> Self { self.mul(self) }

            /// Exponentiation by a public (non-secret-length-sensitive) big-endian exponent.
            /// Used for inversion (Fermat) and for the Fp12 pairing exponentiations, neither
            /// of which needs to run in constant time.
            #[must_use]
            pub(crate) fn pow_vartime(&self, exponent: &U256) -> Self {
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

            /// Multiplicative inverse via Fermat's little theorem: `a^(p-2) mod p`.
            /// Returns `None` for zero.
            #[must_use]
            pub(crate) fn invert(&self) -> Option<Self> {
                if self.is_zero() {
                    return None;
                }
                let (exponent, _) = bigint::sub(&Self::MODULUS, &[2, 0, 0, 0]);
                Some(self.pow_vartime(&exponent))
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool { self.0.ct_eq(&other.0).into() }
        }
        impl Eq for $name {}

        impl ConstantTimeEq for $name {
            fn ct_eq(&self, other: &Self) -> Choice { self.0.ct_eq(&other.0) }
        }

        impl ConditionallySelectable for $name {
            fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
                let mut out = [0u64; 4];
                for i in 0..4 {
                    out[i] = u64::conditional_select(&a.0[i], &b.0[i], choice);
                }
                Self(out)
            }
        }

        impl Zeroize for $name {
            fn zeroize(&mut self) { self.0.zeroize(); }
        }

        impl Add for $name {
            type Output = Self;
            fn add(self, rhs: Self) -> Self { $name::add(&self, &rhs) }
        }
        impl Sub for $name {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self { $name::sub(&self, &rhs) }
        }
        impl Mul for $name {
            type Output = Self;
            fn mul(self, rhs: Self) -> Self { $name::mul(&self, &rhs) }
        }
        impl Neg for $name {
            type Output = Self;
            fn neg(self) -> Self { $name::neg(&self) }
        }
    };
}

pub(crate) use field_element;
