//! Verifiable Random Functions over the Bandersnatch curve.
//!
//! A VRF maps an input to a pseudorandom output together with a proof that
//! the output was computed correctly under a committed public key. This crate
//! implements the `Bandersnatch_SHA-512_ELL2` ciphersuite with three schemes
//! offering escalating privacy guarantees:
//!
//! - [`ietf`]: the plain ECVRF of
//!   [RFC-9381](https://datatracker.ietf.org/doc/rfc9381), extended with
//!   auxiliary data bound into the challenge;
//! - [`pedersen`]: hides the signer's public key behind a Pedersen
//!   commitment, revealing only that *some* key produced the output;
//! - [`ring`]: proves the committed key belongs to a public ring of keys via
//!   a KZG membership argument, without revealing which member signed.
//!
//! The VRF output is the same point `Gamma = sk * I` in all three schemes;
//! blinding and ring membership only change the proof, never the output.
//!
//! ```rust
//! use bandersnatch_vrf::{ietf::{Prover, Verifier}, Input, Secret};
//!
//! let secret = Secret::from_seed(b"example seed");
//! let public = secret.public();
//!
//! let input = Input::new(b"example input").unwrap();
//! let output = secret.output(input);
//!
//! let proof = secret.prove(input, output, b"aux data");
//! assert!(public.verify(input, output, b"aux data", &proof));
//!
//! // Pseudorandom bytes for the application:
//! let bytes = output.hash();
//! ```

use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::{MontFp, One, PrimeField, Zero};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use sha2::{Digest, Sha512};
use thiserror::Error;
use zeroize::Zeroize;

pub mod codec;
pub mod hash2curve;
pub mod ietf;
pub mod oracle;
pub mod pedersen;
pub mod ring;

pub use hash2curve::hash_to_curve;

/// Affine curve point type.
pub type AffinePoint = ark_ed_on_bls12_381_bandersnatch::EdwardsAffine;
/// Projective curve point type.
pub type Projective = ark_ed_on_bls12_381_bandersnatch::EdwardsProjective;
/// Base field element type.
pub type BaseField = ark_ed_on_bls12_381_bandersnatch::Fq;
/// Scalar field element type.
pub type ScalarField = ark_ed_on_bls12_381_bandersnatch::Fr;

/// Suite identifier (`suite_string` in RFC-9381 terms).
pub const SUITE_ID: &[u8] = b"Bandersnatch_SHA-512_ELL2";

/// Challenge length in bytes.
pub const CHALLENGE_LEN: usize = 32;

/// Blinding base for the Pedersen scheme: a fixed point with unknown
/// discrete log relative to the generator.
pub const BLINDING_BASE: AffinePoint = {
    const X: BaseField =
        MontFp!("6150229251051246713677296363717454238956877613358614224171740096471278798312");
    const Y: BaseField =
        MontFp!("28442734166467795856797249030329035618871580593056783094884474814923353898473");
    AffinePoint::new_unchecked(X, Y)
};

/// Padding point filling unused ring slots. Its discrete log is unknown, so
/// padding slots cannot double as signing keys.
pub const RING_PADDING: AffinePoint = {
    const X: BaseField =
        MontFp!("26287722405578650394504321825321286533153045350760430979437739593351290020913");
    const Y: BaseField =
        MontFp!("19058981610000167534379068105702216971787064146691007947119244515951752366738");
    AffinePoint::new_unchecked(X, Y)
};

/// Structural and configuration errors.
///
/// These are detected before any verification equation is evaluated and are
/// kept apart from verification outcomes on purpose: a proof that merely
/// fails its equations is reported as `false` by the `verify` functions,
/// never through this type, so callers can branch on "proof is invalid"
/// without an error-handling detour.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("invalid proof length: expected {expected} bytes, got {got}")]
    InvalidProofLength { expected: usize, got: usize },

    #[error("point bytes do not decode to a point of the prime-order subgroup")]
    InvalidPoint,

    #[error("identity point where a nonzero point is required")]
    IdentityPoint,

    #[error("scalar bytes are not canonical (value not below the curve order)")]
    InvalidScalar,

    #[error("malformed proof encoding")]
    InvalidEncoding,

    #[error("hash-to-curve did not produce a usable point")]
    HashToCurve,

    #[error(transparent)]
    Ring(#[from] bandersnatch_ring::RingError),
}

/// Secret key for VRF operations.
///
/// Holds the secret scalar and caches the corresponding public key. The
/// scalar is zeroized on drop. Deliberately no `Debug` or `Display`.
#[derive(Clone, PartialEq)]
pub struct Secret {
    pub(crate) scalar: ScalarField,
    pub(crate) public: Public,
}

impl Drop for Secret {
    fn drop(&mut self) {
        self.scalar.zeroize()
    }
}

impl Secret {
    /// Construct a secret from the given scalar.
    pub fn from_scalar(scalar: ScalarField) -> Self {
        let public = Public((AffinePoint::generator() * scalar).into_affine());
        Self { scalar, public }
    }

    /// Construct a secret from a seed, hashed to the secret scalar.
    ///
    /// The all-but-impossible zero scalar is remapped to one so the public
    /// key is never the identity.
    pub fn from_seed(seed: &[u8]) -> Self {
        let digest = Sha512::digest(seed);
        let mut scalar = ScalarField::from_le_bytes_mod_order(&digest);
        if scalar.is_zero() {
            scalar.set_one();
        }
        Self::from_scalar(scalar)
    }

    /// Construct an ephemeral secret from the provided randomness source.
    pub fn from_rand(rng: &mut impl rand::RngCore) -> Self {
        let mut seed = [0u8; 32];
        rng.fill_bytes(&mut seed);
        Self::from_seed(&seed)
    }

    /// The associated public key.
    pub fn public(&self) -> Public {
        self.public
    }

    /// The VRF output point for the given input: `Gamma = sk * I`.
    ///
    /// Identical across all three schemes for a fixed `(sk, input)`.
    pub fn output(&self, input: Input) -> Output {
        Output((input.0 * self.scalar).into_affine())
    }
}

/// Public key: a point of the prime-order subgroup.
#[derive(Debug, Copy, Clone, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct Public(pub AffinePoint);

impl Public {
    /// Decode a public key from its canonical 32-byte encoding.
    ///
    /// Rejects encodings that are off-curve, outside the prime-order
    /// subgroup, or the identity.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        codec::point_decode(bytes).map(Public)
    }

    /// Canonical 32-byte encoding.
    pub fn to_bytes(&self) -> [u8; codec::POINT_LEN] {
        codec::point_encode(&self.0)
    }
}

/// VRF input point, obtained by hashing arbitrary data to the curve.
#[derive(Debug, Copy, Clone, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct Input(pub AffinePoint);

impl Input {
    /// Map arbitrary data to a VRF input point via [`hash_to_curve`].
    pub fn new(data: &[u8]) -> Result<Self, Error> {
        hash_to_curve(data).map(Input)
    }

    /// Construct from an existing point.
    pub fn from(value: AffinePoint) -> Self {
        Self(value)
    }
}

/// VRF output point (`Gamma`), before hashing to bytes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct Output(pub AffinePoint);

impl Output {
    /// Construct from an existing point.
    pub fn from(value: AffinePoint) -> Self {
        Self(value)
    }

    /// Hash the output point to the pseudorandom bytes consumed by
    /// applications.
    pub fn hash(&self) -> [u8; 64] {
        oracle::point_to_hash_rfc_9381(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secret_derivation_is_deterministic() {
        let a = Secret::from_seed(b"seed");
        let b = Secret::from_seed(b"seed");
        assert_eq!(a.public(), b.public());

        let c = Secret::from_seed(b"other seed");
        assert_ne!(a.public(), c.public());
    }

    #[test]
    fn suite_constants_are_subgroup_points() {
        for point in [BLINDING_BASE, RING_PADDING] {
            assert!(point.is_on_curve());
            assert!(point.is_in_correct_subgroup_assuming_on_curve());
            assert!(!point.is_zero());
        }
        assert_ne!(BLINDING_BASE, AffinePoint::generator());
        assert_ne!(BLINDING_BASE, RING_PADDING);
    }

    #[test]
    fn output_is_scheme_independent() {
        let secret = Secret::from_seed(b"seed");
        let input = Input::new(b"input").unwrap();
        assert_eq!(secret.output(input), secret.output(input));
        assert_eq!(secret.output(input).hash(), secret.output(input).hash());
    }

    #[test]
    fn public_key_codec_rejects_garbage() {
        let secret = Secret::from_seed(b"seed");
        let bytes = secret.public().to_bytes();
        assert_eq!(Public::from_bytes(&bytes).unwrap(), secret.public());

        assert!(Public::from_bytes(&bytes[..31]).is_err());
        assert!(Public::from_bytes(&[0xffu8; 32]).is_err());
    }
}
