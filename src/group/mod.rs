//! The two curve groups `G1` on `E(Fp)` and `G2` on the sextic twist `E'(Fp2)`. Both point types
//! share the same affine/Jacobian-free addition
//! shape; they differ only in which field their coordinates live in, so each gets its own small
//! module rather than a shared macro (the twist's extra non-residue multiplication doesn't
//! generalize cleanly across the two).

pub mod g1;
pub mod g2;

pub use g1::G1;
pub use g2::G2;
