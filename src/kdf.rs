//! The SM3-based key derivation function the KEM and public-key encryption schemes build on:
//! counter-mode expansion of a shared secret into an arbitrary-length keystream.

use digest::Digest;
use sm3::Sm3;

/// Derives `out.len()` bytes from `shared_secret`, SM3-counter-mode, writing into `out`.
/// `out` may be any length, including one that isn't a multiple of the hash's output size.
pub(crate) fn kdf(shared_secret: &[u8], out: &mut [u8]) {
    let mut counter: u32 = 1;
    let mut produced = 0usize;
    while produced < out.len() {
        let mut hasher = Sm3::new();
        hasher.update(shared_secret);
        hasher.update(counter.to_be_bytes());
        let block = hasher.finalize();
        let take = (out.len() - produced).min(block.len());
        out[produced..produced + take].copy_from_slice(&block[..take]);
        produced += take;
        counter += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::kdf;

    #[test]
    fn kdf_is_deterministic_and_length_exact() {
        let mut a = [0u8; 50];
        let mut b = [0u8; 50];
        kdf(b"shared", &mut a);
        kdf(b"shared", &mut b);
        assert_eq!(a, b);
    }

    #[test]
    fn kdf_differs_with_length_not_just_truncation() {
        // Re-deriving with a shorter output must match the prefix of the longer one: the
        // counter sequence should not depend on the requested length.
        let mut long = [0u8; 64];
        let mut short = [0u8; 32];
        kdf(b"shared", &mut long);
        kdf(b"shared", &mut short);
        assert_eq!(&long[..32], &short[..]);
    }

    #[test]
    fn kdf_rejects_all_zero_output_as_suspicious_in_tests_only() {
        let mut out = [0u8; 16];
        kdf(b"anything", &mut out);
        assert_ne!(out, [0u8; 16]);
    }
}
