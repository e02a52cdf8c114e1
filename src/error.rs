//! Crate-wide error type. Every fallible operation in this crate returns `Result<T, Error>`
//! rather than panicking.

use core::fmt;

/// What went wrong. Deliberately coarse: callers can distinguish "malformed input" from "this
/// failed for a reason not attributable to the caller", but not reconstruct exactly which byte
/// was wrong.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// A DER or fixed-width encoding did not parse.
    InvalidEncoding,
    /// A decoded group element did not satisfy its curve equation.
    PointNotOnCurve,
    /// A decoded group element is on-curve but not in the expected order-`N` subgroup.
    PointNotInSubgroup,
    /// A signature failed to verify.
    SignatureInvalid,
    /// A key-confirmation tag failed to verify.
    KeyConfirmationFailed,
    /// An HMAC authentication tag failed to verify.
    DecryptionFailed,
    /// Plaintext or associated input exceeded `SM9_MAX_PLAINTEXT_SIZE`.
    InputTooLarge,
    /// The supplied RNG failed to produce randomness.
    RandomGenerationFailed,
    /// Key generation or key-derivation algebra produced a degenerate (identity/zero) value;
    /// the caller should resample any input scalar and retry.
    RetryableDegenerateValue,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Error::InvalidEncoding => "invalid encoding",
            Error::PointNotOnCurve => "decoded point is not on the curve",
            Error::PointNotInSubgroup => "decoded point is not in the expected subgroup",
            Error::SignatureInvalid => "signature verification failed",
            Error::KeyConfirmationFailed => "key confirmation tag verification failed",
            Error::DecryptionFailed => "decryption authentication failed",
            Error::InputTooLarge => "input exceeds the maximum supported size",
            Error::RandomGenerationFailed => "random number generation failed",
            Error::RetryableDegenerateValue => "internal value was degenerate; retry",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for Error {}

/// The result of a verification operation: `Ok(())` for valid, `Err` distinguishing malformed
/// input from a well-formed but incorrect signature or tag.
pub type VerifyResult = Result<(), Error>;
