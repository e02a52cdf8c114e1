//! Serialization seam for opaque key/signature/ciphertext types: a fixed-size byte array in, a
//! fixed-size byte array out, with whatever validation the concrete type needs in between.
//! [`crate::keys`] offers key generation as a thin convenience built directly on GM/T 0044's own
//! extraction formula, but callers are equally free to treat master and identity keys as opaque
//! bytes handed to them by a separate key-generation center.

/// Converts a type to and from its fixed-size wire representation.
pub trait SerDes: Sized {
    /// The fixed-size byte array this type serializes to.
    type ByteArray;

    /// Serializes `self`, consuming it.
    fn into_bytes(self) -> Self::ByteArray;

    /// Deserializes from a fixed-size byte array, validating as appropriate for the concrete
    /// type (an on-curve check for a group element, a non-zero check for a scalar, and so on).
    fn try_from_bytes(bytes: Self::ByteArray) -> Result<Self, crate::Error>;
}
