//! DER wire framing for the two envelopes this scheme uses: the signature
//! `SEQUENCE { h OCTET STRING, S BIT STRING }` and the ciphertext
//! `SEQUENCE { en_type INTEGER, C1 BIT STRING, C3 OCTET STRING, C2 OCTET STRING }`. Built on the
//! `der` crate's `Sequence` derive the same way `pkcs8`/`spki` frame their own envelopes.
//!
//! `Decode::from_der` already rejects trailing bytes after the outer `SEQUENCE`; this module
//! adds the length and tag checks the `der` crate doesn't know are specific to SM9 (32-byte `h`,
//! 65-byte uncompressed `S`/`C1`, `en_type` restricted to 0).

use der::asn1::{BitStringRef, OctetStringRef};
use der::{Decode, Encode, Sequence};

use crate::error::Error;
use crate::field::bigint;
use crate::field::Scalar;
use crate::group::G1;
use crate::params::EN_TYPE_XOR;

#[derive(Sequence)]
struct SignatureFields<'a> {
    h: OctetStringRef<'a>,
    s: BitStringRef<'a>,
}

/// A decoded signature envelope: `h` already reduced mod `N`, `S` already validated on-curve.
/// `G1`'s cofactor is 1 here, so on-curve already implies subgroup membership and
/// [`crate::group::g1::G1::is_on_curve`] (checked during decode) is sufficient.
pub(crate) struct Signature {
    pub(crate) h: Scalar,
    pub(crate) s: G1,
}

impl Signature {
    pub(crate) fn encode_der(&self) -> Result<Vec<u8>, Error> {
        let h_bytes = self.h.to_bytes_be();
        let s_bytes = self.s.to_bytes_uncompressed();
        let fields = SignatureFields {
            h: OctetStringRef::new(&h_bytes).map_err(|_| Error::InvalidEncoding)?,
            s: BitStringRef::new(0, &s_bytes).map_err(|_| Error::InvalidEncoding)?,
        };
        fields.to_der().map_err(|_| Error::InvalidEncoding)
    }

    pub(crate) fn decode_der(bytes: &[u8]) -> Result<Self, Error> {
        let fields = SignatureFields::from_der(bytes).map_err(|_| Error::InvalidEncoding)?;
        let h_octets = fields.h.as_bytes();
        if h_octets.len() != 32 {
            return Err(Error::InvalidEncoding);
        }
        if fields.s.unused_bits() != 0 {
            return Err(Error::InvalidEncoding);
        }
        let s_octets = fields.s.raw_bytes();
        if s_octets.len() != 65 {
            return Err(Error::InvalidEncoding);
        }
        let h_raw = bigint::from_bytes_be(h_octets.try_into().expect("length checked above"));
        if bigint::cmp(&h_raw, &Scalar::MODULUS) != core::cmp::Ordering::Less {
            return Err(Error::InvalidEncoding);
        }
        let h = Scalar::from_bytes_be(h_octets.try_into().expect("length checked above"));
        if h.is_zero() {
            return Err(Error::InvalidEncoding);
        }
        let s = G1::from_bytes_uncompressed(s_octets.try_into().expect("length checked above"))?;
        Ok(Self { h, s })
    }
}

#[derive(Sequence)]
struct CiphertextFields<'a> {
    en_type: u32,
    c1: BitStringRef<'a>,
    c3: OctetStringRef<'a>,
    c2: OctetStringRef<'a>,
}

/// A decoded ciphertext envelope. `c1` is validated on-curve at decode time; `c2`'s length is
/// the plaintext length, checked against `SM9_MAX_PLAINTEXT_SIZE` by the caller.
pub(crate) struct Ciphertext {
    pub(crate) c1: G1,
    pub(crate) c3: [u8; 32],
    pub(crate) c2: Vec<u8>,
}

impl Ciphertext {
    pub(crate) fn encode_der(&self) -> Result<Vec<u8>, Error> {
        let c1_bytes = self.c1.to_bytes_uncompressed();
        let fields = CiphertextFields {
            en_type: EN_TYPE_XOR,
            c1: BitStringRef::new(0, &c1_bytes).map_err(|_| Error::InvalidEncoding)?,
            c3: OctetStringRef::new(&self.c3).map_err(|_| Error::InvalidEncoding)?,
            c2: OctetStringRef::new(&self.c2).map_err(|_| Error::InvalidEncoding)?,
        };
        fields.to_der().map_err(|_| Error::InvalidEncoding)
    }

    pub(crate) fn decode_der(bytes: &[u8]) -> Result<Self, Error> {
        let fields = CiphertextFields::from_der(bytes).map_err(|_| Error::InvalidEncoding)?;
        if fields.en_type != EN_TYPE_XOR {
            return Err(Error::InvalidEncoding);
        }
        if fields.c1.unused_bits() != 0 {
            return Err(Error::InvalidEncoding);
        }
        let c1_octets = fields.c1.raw_bytes();
        if c1_octets.len() != 65 {
            return Err(Error::InvalidEncoding);
        }
        let c3_octets = fields.c3.as_bytes();
        if c3_octets.len() != 32 {
            return Err(Error::InvalidEncoding);
        }
        let c1 = G1::from_bytes_uncompressed(c1_octets.try_into().expect("length checked above"))?;
        let mut c3 = [0u8; 32];
        c3.copy_from_slice(c3_octets);
        let c2 = fields.c2.as_bytes().to_vec();
        Ok(Self { c1, c3, c2 })
    }
}

#[cfg(test)]
mod tests {
    use super::{Ciphertext, Signature};
    use crate::field::Scalar;
    use crate::group::G1;

    #[test]
    fn signature_der_round_trips() {
        let sig = Signature { h: Scalar::ONE, s: G1::generator() };
        let der = sig.encode_der().unwrap();
        let decoded = Signature::decode_der(&der).unwrap();
        assert_eq!(decoded.h, sig.h);
        assert_eq!(decoded.s, sig.s);
    }

    #[test]
    fn signature_decode_rejects_trailing_bytes() {
        let sig = Signature { h: Scalar::ONE, s: G1::generator() };
        let mut der = sig.encode_der().unwrap();
        der.push(0x00);
        assert!(Signature::decode_der(&der).is_err());
    }

    #[test]
    fn signature_decode_rejects_wrong_s_length() {
        // Build a signature whose BIT STRING carries 64 octets instead of 65.
        let sig = Signature { h: Scalar::ONE, s: G1::generator() };
        let der = sig.encode_der().unwrap();
        // Flip the BIT STRING's length byte is brittle against DER structure; instead rebuild
        // with a truncated S buffer through the same encode path a malformed peer would use.
        let truncated = &sig.s.to_bytes_uncompressed()[..64];
        let fields = super::SignatureFields {
            h: der::asn1::OctetStringRef::new(&sig.h.to_bytes_be()).unwrap(),
            s: der::asn1::BitStringRef::new(0, truncated).unwrap(),
        };
        use der::Encode;
        let bad_der = fields.to_der().unwrap();
        assert_ne!(bad_der.len(), der.len());
        assert!(Signature::decode_der(&bad_der).is_err());
    }

    #[test]
    fn signature_decode_rejects_h_not_reduced_mod_n() {
        let sig = Signature { h: Scalar::ONE, s: G1::generator() };
        let der = sig.encode_der().unwrap();
        let oversized_h = Scalar::MODULUS;
        let fields = super::SignatureFields {
            h: der::asn1::OctetStringRef::new(&crate::field::bigint::to_bytes_be(&oversized_h))
                .unwrap(),
            s: der::asn1::BitStringRef::new(0, &sig.s.to_bytes_uncompressed()).unwrap(),
        };
        use der::Encode;
        let bad_der = fields.to_der().unwrap();
        assert_ne!(bad_der, der);
        assert!(Signature::decode_der(&bad_der).is_err());
    }

    #[test]
    fn ciphertext_der_round_trips() {
        let ct = Ciphertext { c1: G1::generator(), c3: [7u8; 32], c2: vec![1, 2, 3, 4, 5] };
        let der = ct.encode_der().unwrap();
        let decoded = Ciphertext::decode_der(&der).unwrap();
        assert_eq!(decoded.c1, ct.c1);
        assert_eq!(decoded.c3, ct.c3);
        assert_eq!(decoded.c2, ct.c2);
    }

    #[test]
    fn ciphertext_decode_rejects_unsupported_en_type() {
        let fields = super::CiphertextFields {
            en_type: 1,
            c1: der::asn1::BitStringRef::new(0, &G1::generator().to_bytes_uncompressed()).unwrap(),
            c3: der::asn1::OctetStringRef::new(&[0u8; 32]).unwrap(),
            c2: der::asn1::OctetStringRef::new(&[1, 2, 3]).unwrap(),
        };
        use der::Encode;
        let der = fields.to_der().unwrap();
        assert!(Ciphertext::decode_der(&der).is_err());
    }
}
