//! Fixed-width 256-bit integer primitives shared by `Fp` and `Scalar`.
//!
//! SM9 runs over a 256-bit BN curve, so every field element needs exactly four `u64` limbs,
//! little-endian (limb 0 holds the least significant 64 bits). The arithmetic is hand-rolled
//! here rather than pulled from an external bignum crate, since no published crate targets
//! this specific curve's field.

/// A 256-bit unsigned integer, little-endian limb order.
pub(crate) type U256 = [u64; 4];

/// A 512-bit unsigned integer, little-endian limb order. Used for wide multiplication products
/// and for reducing the 64-byte hash-to-scalar inputs of H1/H2 (section 4.A).
pub(crate) type U512 = [u64; 8];

#[must_use]
pub(crate) fn is_zero(a: &U256) -> bool { a.iter().all(|&limb| limb == 0) }

#[must_use]
pub(crate) fn cmp(a: &U256, b: &U256) -> core::cmp::Ordering {
    for i in (0..4).rev() {
        let ord = a[i].cmp(&b[i]);
        if ord != core::cmp::Ordering::Equal {
            return ord;
        }
    }
    core::cmp::Ordering::Equal
}

#[must_use]
pub(crate) fn add(a: &U256, b: &U256) -> (U256, bool) {
    let mut out = [0u64; 4];
    let mut carry = 0u128;
    for i in 0..4 {
        let sum = u128::from(a[i]) + u128::from(b[i]) + carry;
        out[i] = sum as u64;
        carry = sum >> 64;
    }
    (out, carry != 0)
}

#[must_use]
pub(crate) fn sub(a: &U256, b: &U256) -> (U256, bool) {
    let mut out = [0u64; 4];
    let mut borrow = 0i128;
    for i in 0..4 {
        let diff = i128::from(a[i]) - i128::from(b[i]) - borrow;
        if diff < 0 {
            out[i] = (diff + (1i128 << 64)) as u64;
            borrow = 1;
        } else {
            out[i] = diff as u64;
            borrow = 0;
        }
    }
    (out, borrow != 0)
}

/// Schoolbook 256x256 -> 512 bit multiplication.
#[must_use]
pub(crate) fn mul_wide(a: &U256, b: &U256) -> U512 {
    let mut out = [0u64; 8];
    for i in 0..4 {
        let mut carry = 0u128;
        for j in 0..4 {
            let prod = u128::from(a[i]) * u128::from(b[j]) + u128::from(out[i + j]) + carry;
            out[i + j] = prod as u64;
            carry = prod >> 64;
        }
        out[i + 4] = (u128::from(out[i + 4]) + carry) as u64;
    }
    out
}

pub(crate) fn shl1_wide(a: &U512) -> (U512, bool) {
    let mut out = [0u64; 8];
    let mut carry = 0u64;
    for i in 0..8 {
        out[i] = (a[i] << 1) | carry;
        carry = a[i] >> 63;
    }
    (out, carry != 0)
}

pub(crate) fn cmp_wide(a: &U512, b: &U512) -> core::cmp::Ordering {
    for i in (0..8).rev() {
        let ord = a[i].cmp(&b[i]);
        if ord != core::cmp::Ordering::Equal {
            return ord;
        }
    }
    core::cmp::Ordering::Equal
}

pub(crate) fn sub_wide(a: &U512, b: &U512) -> U512 {
    let mut out = [0u64; 8];
    let mut borrow = 0i128;
    for i in 0..8 {
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

pub(crate) fn widen(a: &U256) -> U512 { [a[0], a[1], a[2], a[3], 0, 0, 0, 0] }

pub(crate) fn narrow(a: &U512) -> U256 {
    debug_assert!(a[4] == 0 && a[5] == 0 && a[6] == 0 && a[7] == 0, "narrow: value exceeds 256 bits");
    [a[0], a[1], a[2], a[3]]
}

/// Right-shifts a 512-bit value by one bit.
#[must_use]
pub(crate) fn shr1_wide(a: &U512) -> U512 {
    let mut out = [0u64; 8];
    let mut carry = 0u64;
    for i in (0..8).rev() {
        let new_carry = a[i] & 1;
        out[i] = (a[i] >> 1) | (carry << 63);
        carry = new_carry;
    }
    out
}

#[must_use]
pub(crate) fn sub_one_wide(a: &U512) -> U512 { sub_wide(a, &[1, 0, 0, 0, 0, 0, 0, 0]) }

/// Reduce a 512-bit value modulo a 256-bit modulus via shift-and-subtract long division.
/// Not constant-time; acceptable here since general field arithmetic is explicitly out of
/// scope for the constant-time guarantees this spec makes (see Non-goals).
#[must_use]
pub(crate) fn reduce_wide(value: &U512, modulus: &U256) -> U256 {
    let mut rem = *value;
    let mut shifted = widen(modulus);
    let mut shift = 0u32;
    // Shift the modulus left until it's >= value (or we've shifted all 256 possible bit
    // positions), then subtract from the high end down.
    while cmp_wide(&shifted, &rem) != core::cmp::Ordering::Greater && shift < 256 {
        let (next, overflow) = shl1_wide(&shifted);
        if overflow {
            break;
        }
        shifted = next;
        shift += 1;
    }
    loop {
        if cmp_wide(&rem, &shifted) != core::cmp::Ordering::Less {
            rem = sub_wide(&rem, &shifted);
        }
        if shift == 0 {
            break;
        }
        shift -= 1;
        // shifted >>= 1
        let mut carry = 0u64;
        for i in (0..8).rev() {
            let new_carry = shifted[i] & 1;
            shifted[i] = (shifted[i] >> 1) | (carry << 63);
            carry = new_carry;
        }
    }
    narrow(&rem)
}

#[must_use]
pub(crate) fn from_bytes_be(bytes: &[u8; 32]) -> U256 {
    let mut out = [0u64; 4];
    for i in 0..4 {
        let chunk: [u8; 8] = bytes[24 - 8 * i..32 - 8 * i].try_into().unwrap();
        out[i] = u64::from_be_bytes(chunk);
    }
    out
}

#[must_use]
pub(crate) fn to_bytes_be(a: &U256) -> [u8; 32] {
    let mut out = [0u8; 32];
    for i in 0..4 {
        out[24 - 8 * i..32 - 8 * i].copy_from_slice(&a[i].to_be_bytes());
    }
    out
}

/// Right-shifts a 256-bit value by one bit.
#[must_use]
pub(crate) fn shr1(a: &U256) -> U256 {
    let mut out = [0u64; 4];
    let mut carry = 0u64;
    for i in (0..4).rev() {
        let new_carry = a[i] & 1;
        out[i] = (a[i] >> 1) | (carry << 63);
        carry = new_carry;
    }
    out
}

#[must_use]
pub(crate) fn wide_from_bytes_be(bytes: &[u8; 64]) -> U512 {
    let mut out = [0u64; 8];
    for i in 0..8 {
        let chunk: [u8; 8] = bytes[56 - 8 * i..64 - 8 * i].try_into().unwrap();
        out[i] = u64::from_be_bytes(chunk);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_sub_roundtrip() {
        let a: U256 = [0xFFFF_FFFF_FFFF_FFFF, 1, 2, 3];
        let b: U256 = [5, 6, 7, 8];
        let (sum, carry) = add(&a, &b);
        assert!(!carry);
        let (back, borrow) = sub(&sum, &b);
        assert!(!borrow);
        assert_eq!(back, a);
    }

    #[test]
    fn mul_wide_small() {
        let a: U256 = [2, 0, 0, 0];
        let b: U256 = [3, 0, 0, 0];
        let wide = mul_wide(&a, &b);
        assert_eq!(wide, [6, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn reduce_wide_matches_modulo() {
        let modulus: U256 = [23, 0, 0, 0];
        let value: U512 = [100, 0, 0, 0, 0, 0, 0, 0];
        let r = reduce_wide(&value, &modulus);
        assert_eq!(r, [100 % 23, 0, 0, 0]);
    }
}
