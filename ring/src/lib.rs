//! This crate implements the polynomial-commitment layer backing the
//! Bandersnatch Ring VRF: a KZG commitment scheme as described in the paper
//! [Constant-Size Commitments to Polynomials and Their
//! Applications](https://www.iacr.org/archive/asiacrypt2010/6477178/6477178.pdf)
//! by Kate, Zaverucha and Goldberg, instantiated over BLS12-381, together
//! with a ring membership argument built on top of it.
//!
//! The protocol requires a structured reference string (SRS) that contains
//! powers of a generator of a group, and a pairing friendly curve. The SRS is
//! produced by an external trusted setup and handed to this crate as an
//! opaque byte blob.
//!
//! A ring is represented here as a column of scalar "key tags" (the caller
//! derives tags from public keys). The column is interpolated over a radix-2
//! evaluation domain and committed once per ring; the commitment is a pure
//! function of the column and the SRS, so prover and verifier recompute it
//! identically. The membership argument then shows that a hidden tag appears
//! somewhere in the committed column, without revealing the slot.

pub mod commitment;
pub mod error;
pub mod membership;
pub mod srs;
pub mod transcript;

pub use commitment::RingCommitment;
pub use error::RingError;
pub use membership::{MembershipProof, OpeningProof};
pub use srs::Srs;
pub use transcript::Transcript;

/// Scalar field of BLS12-381, which is also the base field of Bandersnatch.
pub type Scalar = ark_bls12_381::Fr;

/// Degree headroom the membership argument needs on top of the ring domain:
/// the booleanity quotient has degree `domain_size + 4`.
pub const SRS_HEADROOM: usize = 5;

/// Minimum number of G1 powers the SRS must hold to support rings over a
/// domain of the given size.
pub const fn min_srs_size(domain_size: usize) -> usize {
    domain_size + SRS_HEADROOM
}
