//! The two hash-to-scalar constructions this scheme builds on: `H1` (identity bytes, one-shot)
//! and `H2` (streaming, since the messages it digests -- signed data, key-exchange transcripts --
//! can be arbitrarily long).
//!
//! Both reduce to the same shape: hash `prefix || message || counter` for `counter = 1, 2`,
//! concatenate the two 32-byte SM3 digests into 64 bytes, and fold that into `[1, N-1]` via
//! [`Scalar::from_hash`].

use crate::field::Scalar;
use crate::params::{H1_PREFIX, H2_PREFIX};
use digest::Digest;
use sm3::Sm3;

fn finish_two_blocks(prefix_hasher: &Sm3) -> [u8; 64] {
    let mut out = [0u8; 64];
    for (i, chunk) in out.chunks_mut(32).enumerate() {
        let mut hasher = prefix_hasher.clone();
        hasher.update(((i as u32) + 1).to_be_bytes());
        chunk.copy_from_slice(&hasher.finalize());
    }
    out
}

/// `H1(Z, N)`: folds `identity || hid` into a scalar, used when deriving a private key from a
/// master key and an identity.
#[must_use]
pub(crate) fn h1(identity: &[u8], hid: u8) -> Scalar {
    let mut hasher = Sm3::new();
    hasher.update([H1_PREFIX]);
    hasher.update(identity);
    hasher.update([hid]);
    Scalar::from_hash(&finish_two_blocks(&hasher))
}

/// A streaming `H2` context: feed it the signed message or key-exchange transcript in however
/// many calls are convenient, then fold the running SM3 state into a scalar. `Clone` lets the
/// sign retry loop fork the context that already has the message loaded once per candidate `r`,
/// instead of re-feeding the message on every iteration.
#[derive(Clone)]
pub(crate) struct H2Hasher {
    inner: Sm3,
}

impl H2Hasher {
    #[must_use]
    pub(crate) fn new() -> Self {
        let mut inner = Sm3::new();
        inner.update([H2_PREFIX]);
        Self { inner }
    }

    pub(crate) fn update(&mut self, data: &[u8]) { self.inner.update(data); }

    #[must_use]
    pub(crate) fn finalize(self) -> Scalar { Scalar::from_hash(&finish_two_blocks(&self.inner)) }
}

/// One-shot convenience wrapper over [`H2Hasher`], used only to cross-check the streaming
/// context against a buffered computation in tests.
#[cfg(test)]
#[must_use]
fn h2(message: &[u8]) -> Scalar {
    let mut hasher = H2Hasher::new();
    hasher.update(message);
    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::{h1, h2};

    #[test]
    fn h1_is_deterministic() {
        assert_eq!(h1(b"alice@example.com", 0x01), h1(b"alice@example.com", 0x01));
    }

    #[test]
    fn h1_distinguishes_hid() {
        assert_ne!(h1(b"alice@example.com", 0x01), h1(b"alice@example.com", 0x02));
    }

    #[test]
    fn h2_matches_streamed_and_buffered() {
        use super::H2Hasher;
        let mut streamed = H2Hasher::new();
        streamed.update(b"hello ");
        streamed.update(b"world");
        assert_eq!(streamed.finalize(), h2(b"hello world"));
    }
}
