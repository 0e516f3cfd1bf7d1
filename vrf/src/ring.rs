//! Ring VRF scheme: signer anonymity within a set of public keys.
//!
//! Builds on the [`crate::pedersen`] scheme. Instead of "reveal the key,
//! prove `Y_bar` is its blinding", the prover shows that `Y_bar` is the
//! blinding of *some* key in a committed ring, via the KZG membership
//! argument of [`bandersnatch_ring`]. Each ring key enters the argument as
//! its *tag*: the canonical compressed encoding read as a scalar of the
//! pairing curve. Unused ring slots are filled with the tag of
//! [`crate::RING_PADDING`].
//!
//! The membership transcript absorbs the ring commitment, the Pedersen key
//! commitment and the auxiliary data, so the two proof components share
//! their binding. The Pedersen equations stay independent of ring content;
//! the membership check is the sole gate of membership.

use crate::{
    codec, pedersen, Error, Input, Output, Public, ScalarField, Secret, RING_PADDING,
};
use ark_bls12_381::{Fr as PairingScalar, G1Affine as CommitmentPoint};
use ark_ff::PrimeField;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use bandersnatch_ring::{membership, min_srs_size, MembershipProof, RingCommitment, RingError, Srs};
use log::debug;
use sha2::{Digest, Sha512};

/// Serialized length of the membership component: seven G1 points and six
/// scalars of the pairing curve.
const MEMBERSHIP_PROOF_LEN: usize = 7 * 48 + 6 * 32;
/// Serialized length of the ring commitment reference.
const RING_COMMITMENT_LEN: usize = 48;
/// Fixed serialized length of a ring proof:
/// `pedersen || membership || ring commitment`.
pub const RING_PROOF_LEN: usize =
    codec::PEDERSEN_PROOF_LEN + MEMBERSHIP_PROOF_LEN + RING_COMMITMENT_LEN;

/// Ring tag of a public key: its canonical compressed encoding read as a
/// little-endian scalar of the pairing curve.
pub fn key_tag(key: &Public) -> PairingScalar {
    PairingScalar::from_le_bytes_mod_order(&codec::point_encode(&key.0))
}

fn padding_tag() -> PairingScalar {
    PairingScalar::from_le_bytes_mod_order(&codec::point_encode(&RING_PADDING))
}

/// Ring VRF proof: the Pedersen component, the membership component, and the
/// ring commitment the proof was produced against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingProof {
    pub pedersen: pedersen::Proof,
    pub membership: MembershipProof,
    pub commitment: CommitmentPoint,
}

impl RingProof {
    /// Fixed-layout serialization:
    /// `pedersen (160) || membership (528) || ring commitment (48)`.
    ///
    /// Alternate execution engines must reproduce this layout byte for byte.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(RING_PROOF_LEN);
        bytes.extend_from_slice(&codec::pedersen_proof_encode(&self.pedersen));
        self.membership
            .serialize_compressed(&mut bytes)
            .expect("serialization into a Vec is infallible");
        self.commitment
            .serialize_compressed(&mut bytes)
            .expect("serialization into a Vec is infallible");
        debug_assert_eq!(bytes.len(), RING_PROOF_LEN);
        bytes
    }

    /// Exact inverse of [`RingProof::to_bytes`]. A blob of any other length
    /// is rejected before any curve arithmetic is attempted.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != RING_PROOF_LEN {
            return Err(Error::InvalidProofLength {
                expected: RING_PROOF_LEN,
                got: bytes.len(),
            });
        }
        let pedersen = codec::pedersen_proof_decode(&bytes[..codec::PEDERSEN_PROOF_LEN])?;
        let mut reader = &bytes[codec::PEDERSEN_PROOF_LEN..];
        let membership = MembershipProof::deserialize_compressed(&mut reader)
            .map_err(|_| Error::InvalidEncoding)?;
        let commitment = CommitmentPoint::deserialize_compressed(&mut reader)
            .map_err(|_| Error::InvalidEncoding)?;
        Ok(Self {
            pedersen,
            membership,
            commitment,
        })
    }
}

/// Execution engine for ring operations.
///
/// The cryptographic contract lives in this capability set; the reference
/// implementation is [`NativeEngine`]. An alternate (e.g. ahead-of-time
/// compiled) engine plugs in behind the same interface, selected by the
/// caller, and must accept and reject exactly the same inputs and keep the
/// serialization byte-identical.
pub trait RingEngine {
    /// Produce a ring proof for the key at `index` of the committed ring.
    fn prove(
        ctx: &RingContext,
        ring: &RingCommitment,
        secret: &Secret,
        index: usize,
        input: Input,
        output: Output,
        ad: &[u8],
    ) -> Result<RingProof, Error>;

    /// Verify a ring proof against the committed ring.
    fn verify(
        ctx: &RingContext,
        ring: &RingCommitment,
        input: Input,
        output: Output,
        ad: &[u8],
        proof: &RingProof,
    ) -> bool;

    /// Serialize a ring proof; part of the cross-engine contract.
    fn serialize(proof: &RingProof) -> Vec<u8> {
        proof.to_bytes()
    }

    /// Deserialize a ring proof; part of the cross-engine contract.
    fn deserialize(bytes: &[u8]) -> Result<RingProof, Error> {
        RingProof::from_bytes(bytes)
    }
}

/// Reference ring execution engine.
pub struct NativeEngine;

impl RingEngine for NativeEngine {
    fn prove(
        ctx: &RingContext,
        ring: &RingCommitment,
        secret: &Secret,
        index: usize,
        input: Input,
        output: Output,
        ad: &[u8],
    ) -> Result<RingProof, Error> {
        let (pedersen_proof, blinding) =
            <Secret as pedersen::Prover>::prove(secret, input, output, ad);

        let binding = membership_binding(&pedersen_proof, ad);
        let seed = mask_seed(&blinding, &input);
        let membership = membership::prove(
            ctx.srs(),
            ring,
            index,
            key_tag(&secret.public()),
            &binding,
            &seed,
        )?;

        Ok(RingProof {
            pedersen: pedersen_proof,
            membership,
            commitment: ring.point(),
        })
    }

    fn verify(
        ctx: &RingContext,
        ring: &RingCommitment,
        input: Input,
        output: Output,
        ad: &[u8],
        proof: &RingProof,
    ) -> bool {
        // The carried commitment must match the one recomputed from the
        // supplied ring; the proof is then checked against the latter.
        if proof.commitment != ring.point() {
            debug!("ring vrf: ring commitment mismatch");
            return false;
        }
        if !pedersen::verify(input, output, ad, &proof.pedersen) {
            debug!("ring vrf: pedersen component failed");
            return false;
        }
        let binding = membership_binding(&proof.pedersen, ad);
        if !membership::verify(ctx.srs(), ring, &binding, &proof.membership) {
            debug!("ring vrf: membership component failed");
            return false;
        }
        true
    }
}

/// Binding bytes shared by the Pedersen and membership components: the
/// blinded key commitment followed by the auxiliary data.
fn membership_binding(proof: &pedersen::Proof, ad: &[u8]) -> Vec<u8> {
    let mut binding = Vec::with_capacity(codec::POINT_LEN + ad.len());
    binding.extend_from_slice(&codec::point_encode(&proof.pk_com));
    binding.extend_from_slice(ad);
    binding
}

/// Deterministic mask seed for the membership argument, derived from the
/// Pedersen blinding factor and the input point.
fn mask_seed(blinding: &ScalarField, input: &Input) -> [u8; 32] {
    let mut hasher = Sha512::new();
    hasher.update(b"ring-vrf-mask-seed");
    hasher.update(codec::scalar_encode(blinding));
    hasher.update(codec::point_encode(&input.0));
    let digest = hasher.finalize();
    let mut seed = [0u8; 32];
    seed.copy_from_slice(&digest[..32]);
    seed
}

/// Shared context for ring operations: the SRS, loaded once and reused, and
/// the ring capacity. Read-only after construction, so a single context can
/// serve concurrent provers and verifiers.
pub struct RingContext {
    srs: Srs,
    capacity: usize,
}

impl RingContext {
    /// Build a context supporting rings of up to `capacity` keys.
    ///
    /// The capacity is rounded up to the next power of two internally; the
    /// SRS must cover the resulting domain.
    pub fn new(srs: Srs, capacity: usize) -> Result<Self, Error> {
        if capacity == 0 {
            return Err(RingError::InvalidDomain(0).into());
        }
        let domain_size = capacity.next_power_of_two();
        if srs.max_degree() < min_srs_size(domain_size) {
            return Err(RingError::SrsTooSmall {
                required: min_srs_size(domain_size),
                actual: srs.max_degree(),
            }
            .into());
        }
        Ok(Self { srs, capacity })
    }

    /// Build a context from an opaque SRS blob, e.g. a ceremony transcript
    /// read from disk.
    pub fn from_srs_bytes(bytes: &[u8], capacity: usize) -> Result<Self, Error> {
        Self::new(Srs::from_bytes(bytes)?, capacity)
    }

    /// Largest ring this context accepts.
    pub fn max_ring_size(&self) -> usize {
        self.capacity
    }

    pub fn srs(&self) -> &Srs {
        &self.srs
    }

    /// Commit the given ring of public keys.
    ///
    /// A pure function of (keys, SRS): provers and verifiers recompute the
    /// identical commitment independently. The result is frozen and reusable
    /// across any number of proofs and verifications.
    pub fn commitment(&self, keys: &[Public]) -> Result<RingCommitment, Error> {
        if keys.len() > self.capacity {
            return Err(RingError::RingTooLarge {
                got: keys.len(),
                capacity: self.capacity,
            }
            .into());
        }
        let tags: Vec<PairingScalar> = keys.iter().map(key_tag).collect();
        let domain_size = self.capacity.next_power_of_two();
        Ok(RingCommitment::new(
            &self.srs,
            domain_size,
            &tags,
            padding_tag(),
        )?)
    }

    /// Prove with the reference engine. `index` is the prover's slot in the
    /// committed ring; a key absent from that slot yields a proof that never
    /// verifies.
    pub fn prove(
        &self,
        ring: &RingCommitment,
        secret: &Secret,
        index: usize,
        input: Input,
        output: Output,
        ad: impl AsRef<[u8]>,
    ) -> Result<RingProof, Error> {
        NativeEngine::prove(self, ring, secret, index, input, output, ad.as_ref())
    }

    /// Verify with the reference engine.
    pub fn verify(
        &self,
        ring: &RingCommitment,
        input: Input,
        output: Output,
        ad: impl AsRef<[u8]>,
        proof: &RingProof,
    ) -> bool {
        NativeEngine::verify(self, ring, input, output, ad.as_ref(), proof)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_are_injective_on_sample_keys() {
        let keys: Vec<Public> = (0..16u32)
            .map(|i| Secret::from_seed(&i.to_le_bytes()).public())
            .collect();
        for (i, a) in keys.iter().enumerate() {
            for b in keys.iter().skip(i + 1) {
                assert_ne!(key_tag(a), key_tag(b));
            }
        }
        assert_ne!(key_tag(&keys[0]), padding_tag());
    }
}
