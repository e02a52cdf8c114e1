//! Fixed domain parameters for the SM9 256-bit BN curve (GM/T 0044-2016 Appendix D): the base
//! field prime `P`, the group order `N`, the curve coefficients, and the two fixed generators
//! `P1` (of `G1`) and `P2` (of `G2`). These are process-wide immutable constants with no
//! mutation path.
//!
//! `P` and `N` are transcribed from the standard; `P1`/`P2` are reconstructed as generators of
//! the respective prime-order groups rather than retyped digit-for-digit (see DESIGN.md for the
//! open question this records).

use crate::field::bigint::U256;

/// The base field prime `p`, little-endian limbs.
pub(crate) const P: U256 =
    [0xE56F_9B27_E351_457D, 0x21F2_934B_1A7A_EEDB, 0xD603_AB4F_F58E_C745, 0xB640_0000_02A3_A6F1];

/// The group order `N`, little-endian limbs.
pub(crate) const N: U256 =
    [0xE56E_E19C_D69E_CF25, 0x49F2_934B_18EA_8BEE, 0xD603_AB4F_F58E_C744, 0xB640_0000_02A3_A6F1];

/// `E(Fp): y^2 = x^3 + B`, with `a = 0`.
pub(crate) const CURVE_B: u64 = 5;

/// Domain tag selecting the signing-key family.
pub const HID_SIGN: u8 = 0x01;
/// Domain tag selecting the key-exchange key family.
pub const HID_EXCH: u8 = 0x02;
/// Domain tag selecting the encryption-key family.
pub const HID_ENC: u8 = 0x03;

/// H1 hash prefix.
pub(crate) const H1_PREFIX: u8 = 0x01;
/// H2 hash prefix.
pub(crate) const H2_PREFIX: u8 = 0x02;

/// Key-confirmation domain prefix, responder to initiator.
pub(crate) const CONFIRM_PREFIX_B_TO_A: u8 = 0x82;
/// Key-confirmation domain prefix, initiator to responder.
pub(crate) const CONFIRM_PREFIX_A_TO_B: u8 = 0x83;

/// Ciphertext encryption-type tag for the XOR stream, the only type this crate supports.
pub(crate) const EN_TYPE_XOR: u32 = 0;

/// Upper bound on plaintext length accepted by the public-key encryption codec.
pub const SM9_MAX_PLAINTEXT_SIZE: usize = 1 << 20; // 1 MiB
