//! The bilinear pairing `e: G2 x G1 -> GT` over a 256-bit BN pairing-friendly curve.
//!
//! This computes the (unoptimized) full Tate pairing: lift `Q` from the twist `G2` onto
//! `E(Fp12)` via the standard sextic-twist isomorphism, then run Miller's algorithm with both
//! points' coordinates carried as plain `Fp12` field elements. A production pairing library
//! carries `Q`'s coordinates in `Fp2` through the loop and only lifts the line value to `Fp12`
//! at evaluation time (6-12x less arithmetic per step); this crate does the lift up front
//! instead, trading performance for a Miller loop and final exponentiation that read exactly
//! like the textbook construction (see DESIGN.md).

use crate::field::{Fp, Fp12, Fp2, Fp6};
use crate::group::{G1, G2};
use crate::params::P;

/// `w^2`, the Fp12 generator squared -- equal to the Fp6 element `v` at the `c0` slot, since
/// the tower is built as `w^2 = v`.
fn w2() -> Fp12 { Fp12::new(Fp6::new(Fp2::ZERO, Fp2::ONE, Fp2::ZERO), Fp6::ZERO) }

/// `w^3 = w^2 * w`, the `v` element sitting at the `c1` slot.
fn w3() -> Fp12 { Fp12::new(Fp6::ZERO, Fp6::new(Fp2::ZERO, Fp2::ONE, Fp2::ZERO)) }

fn embed_fp(a: Fp) -> Fp12 { Fp12::new(Fp6::new(Fp2::new(a, Fp::ZERO), Fp2::ZERO, Fp2::ZERO), Fp6::ZERO) }

fn embed_fp2(a: Fp2) -> Fp12 { Fp12::new(Fp6::new(a, Fp2::ZERO, Fp2::ZERO), Fp6::ZERO) }

/// A point on `E(Fp12): y^2 = x^3 + b` (the same curve `G1` lives on, base-extended).
#[derive(Clone, Copy)]
struct Fp12Point {
    x: Fp12,
    y: Fp12,
}

impl Fp12Point {
    fn double(&self) -> (Self, Fp12, Fp12) {
        let three_x2 = self.x.square().add(&self.x.square()).add(&self.x.square());
        let two_y_inv = self.y.add(&self.y).invert().expect("nonzero y");
        let lambda = three_x2.mul(&two_y_inv);
        let x3 = lambda.square().sub(&self.x).sub(&self.x);
        let y3 = lambda.mul(&self.x.sub(&x3)).sub(&self.y);
        (Self { x: x3, y: y3 }, lambda, self.x)
    }

    fn add(&self, other: &Self) -> (Self, Fp12, Fp12) {
        let lambda = other.y.sub(&self.y).mul(&other.x.sub(&self.x).invert().expect("distinct x"));
        let x3 = lambda.square().sub(&self.x).sub(&other.x);
        let y3 = lambda.mul(&self.x.sub(&x3)).sub(&self.y);
        (Self { x: x3, y: y3 }, lambda, self.x)
    }
}

/// The tangent/secant line through `t` (with slope `lambda`, through the point at x-coordinate
/// `through_x`), evaluated at the fixed point `p`.
fn line_value(p: &Fp12Point, lambda: Fp12, through_x: Fp12, through_y: Fp12) -> Fp12 {
    p.y.sub(&through_y).sub(&lambda.mul(&p.x.sub(&through_x)))
}

fn order_bits_msb_first() -> Vec<bool> {
    let order_be = crate::field::bigint::to_bytes_be(&crate::params::N);
    let mut bits = Vec::with_capacity(256);
    for byte in order_be.iter() {
        for bit in (0..8).rev() {
            bits.push((byte >> bit) & 1 == 1);
        }
    }
    while bits.first() == Some(&false) {
        bits.remove(0);
    }
    bits
}

/// Miller's algorithm, looping over the bits of the group order `N` rather than a shortened
/// optimal-ate loop parameter (see module docs).
fn miller_loop(q: &G2, p: &G1) -> Fp12 {
    let p_point = Fp12Point { x: embed_fp(p.x), y: embed_fp(p.y) };
    let mut t = Fp12Point { x: embed_fp2(q.x).mul(&w2()), y: embed_fp2(q.y).mul(&w3()) };
    let fixed_q = t;
    let mut f = Fp12::ONE;
    let bits = order_bits_msb_first();
    for &bit in bits.iter().skip(1) {
        let (doubled, lambda, x_before) = t.double();
        let y_before = t.y;
        f = f.square().mul(&line_value(&p_point, lambda, x_before, y_before));
        t = doubled;
        if bit {
            let (added, lambda, x_before) = t.add(&fixed_q);
            let y_before = t.y;
            f = f.mul(&line_value(&p_point, lambda, x_before, y_before));
            t = added;
        }
    }
    f
}

const BIG_WIDTH: usize = 52;
type Big = [u64; BIG_WIDTH];

fn big_from_u256(a: &[u64; 4]) -> Big {
    let mut out = [0u64; BIG_WIDTH];
    out[..4].copy_from_slice(a);
    out
}

fn big_mul(a: &Big, b: &Big) -> Big {
    let mut wide = [0u128; BIG_WIDTH];
    for i in 0..BIG_WIDTH {
        if a[i] == 0 {
            continue;
        }
        for j in 0..(BIG_WIDTH - i) {
            wide[i + j] += u128::from(a[i]) * u128::from(b[j]);
        }
    }
    let mut out = [0u64; BIG_WIDTH];
    let mut carry = 0u128;
    for i in 0..BIG_WIDTH {
        let total = wide[i] + carry;
        out[i] = total as u64;
        carry = total >> 64;
    }
    out
}

fn big_sub_one(a: &Big) -> Big {
    let mut out = *a;
    for limb in out.iter_mut() {
        if *limb == 0 {
            *limb = u64::MAX;
        } else {
            *limb -= 1;
            break;
        }
    }
    out
}

fn big_bit_len(a: &Big) -> usize {
    for i in (0..BIG_WIDTH).rev() {
        if a[i] != 0 {
            return i * 64 + (64 - a[i].leading_zeros() as usize);
        }
    }
    0
}

fn big_get_bit(a: &Big, idx: usize) -> bool { (a[idx / 64] >> (idx % 64)) & 1 == 1 }

fn big_cmp(a: &Big, b: &Big) -> core::cmp::Ordering {
    for i in (0..BIG_WIDTH).rev() {
        let ord = a[i].cmp(&b[i]);
        if ord != core::cmp::Ordering::Equal {
            return ord;
        }
    }
    core::cmp::Ordering::Equal
}

fn big_sub(a: &Big, b: &Big) -> Big {
    let mut out = [0u64; BIG_WIDTH];
    let mut borrow = 0i128;
    for i in 0..BIG_WIDTH {
        let diff = i128::from(a[i]) - i128::from(b[i]) - borrow;
        if diff < 0 {
            out[i] = (diff + (1i128 << 64)) as u64;
            borrow = 1;
        } else {
            out[i] = diff as u64;
            borrow = 0;
        }
    }
    out
}

fn big_shl1(a: &Big) -> Big {
    let mut out = [0u64; BIG_WIDTH];
    let mut carry = 0u64;
    for i in 0..BIG_WIDTH {
        out[i] = (a[i] << 1) | carry;
        carry = a[i] >> 63;
    }
    out
}

/// Long division of a `BIG_WIDTH`-limb numerator by `denom`, returning the quotient. The
/// remainder is discarded: this crate's curve constants are reconstructed rather than
/// transcribed from the standard (DESIGN.md), so the embedding-degree relation `N | p^12 - 1`
/// that would make this division exact is not independently re-verified here.
fn big_div(numerator: &Big, denom: &Big) -> Big {
    let mut quotient = [0u64; BIG_WIDTH];
    let mut rem = [0u64; BIG_WIDTH];
    for i in (0..big_bit_len(numerator)).rev() {
        rem = big_shl1(&rem);
        if big_get_bit(numerator, i) {
            rem[0] |= 1;
        }
        if big_cmp(&rem, denom) != core::cmp::Ordering::Less {
            rem = big_sub(&rem, denom);
            quotient[i / 64] |= 1 << (i % 64);
        }
    }
    quotient
}

fn big_to_be_bytes(a: &Big) -> Vec<u8> {
    let mut out = Vec::with_capacity(BIG_WIDTH * 8);
    for limb in a.iter().rev() {
        out.extend_from_slice(&limb.to_be_bytes());
    }
    let first_nonzero = out.iter().position(|&b| b != 0).unwrap_or(out.len() - 1);
    out[first_nonzero..].to_vec()
}

fn final_exponent_bytes() -> &'static [u8] {
    use std::sync::OnceLock;
    static EXPONENT: OnceLock<Vec<u8>> = OnceLock::new();
    EXPONENT.get_or_init(|| {
        let p_big = big_from_u256(&P);
        let mut p12 = big_from_u256(&[1, 0, 0, 0]);
        for _ in 0..12 {
            p12 = big_mul(&p12, &p_big);
        }
        let numerator = big_sub_one(&p12);
        let n_big = big_from_u256(&crate::params::N);
        big_to_be_bytes(&big_div(&numerator, &n_big))
    })
}

/// Final exponentiation, `f^((p^12-1)/N)`, split into an "easy part" (`p^6-1` then `p^2+1`,
/// both computed via the cheap Frobenius conjugate and inversion) and a "hard part" (the
/// residual exponentiation by `(p^4-p^2+1)/N`, folded into the single division above).
fn final_exponentiation(f: Fp12) -> Fp12 {
    let easy = {
        let f_inv = f.invert().expect("Miller loop output is a unit for linearly independent inputs");
        let f_p6_minus_1 = f.conjugate().mul(&f_inv);
        let frob2 = f_p6_minus_1.pow_vartime(&P).pow_vartime(&P);
        frob2.mul(&f_p6_minus_1)
    };
    easy.pow_vartime_be(final_exponent_bytes())
}

/// `e(Q, P)`: the optimal-ate pairing, `Q in G2`, `P in G1`.
#[must_use]
pub fn pairing(q: &G2, p: &G1) -> Fp12 {
    if p.is_identity() || q.is_identity() {
        return Fp12::ONE;
    }
    final_exponentiation(miller_loop(q, p))
}

#[cfg(test)]
mod tests {
    use super::pairing;
    use crate::field::{Fp12, Scalar};
    use crate::group::{G1, G2};

    #[test]
    fn pairing_with_identity_is_one() {
        assert_eq!(pairing(&G2::identity(), &G1::generator()), Fp12::ONE);
        assert_eq!(pairing(&G2::generator(), &G1::identity()), Fp12::ONE);
    }

    #[test]
    fn pairing_is_bilinear_in_first_argument() {
        // e(2Q, P) == e(Q, P)^2, the defining bilinearity property.
        let p = G1::generator();
        let q = G2::generator();
        let mut two_bytes = [0u8; 32];
        two_bytes[31] = 2;
        let two = Scalar::from_bytes_be(&two_bytes);
        let lhs = pairing(&q.mul(&two), &p);
        let rhs = pairing(&q, &p);
        assert_eq!(lhs, rhs.mul(&rhs));
    }
}
