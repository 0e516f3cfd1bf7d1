//! Structured reference string for the KZG commitment scheme.
//!
//! The SRS consists of powers of an element `g^tau` for some toxic waste
//! `tau`, a blinding base `h` with unknown discrete log relative to the
//! powers, and the two G2 elements `g2` and `tau*g2` needed by the verifier's
//! pairing check. It is produced by an external ceremony and loaded here from
//! an opaque byte blob, once per prover/verifier instance, then shared
//! read-only across all operations.

use crate::error::RingError;
use ark_bls12_381::{Fr, G1Affine, G1Projective, G2Affine};
use ark_ec::{AffineRepr, CurveGroup, VariableBaseMSM};
use ark_ff::{One, PrimeField, Zero};
use ark_poly::{univariate::DensePolynomial, DenseUVPolynomial};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use blake2::{Blake2b512, Digest};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

/// Chunk size for the parallel MSM used by commitments. Chunks are summed
/// with point addition, which is commutative, so the parallel reduction is
/// bit-identical to the sequential one.
const MSM_CHUNK_SIZE: usize = 1 << 10;

#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, CanonicalSerialize, CanonicalDeserialize)]
pub struct Srs {
    /// The vector of group elements for committing to polynomials in
    /// coefficient form.
    #[serde_as(as = "Vec<vrf_utils::serialization::SerdeAs>")]
    pub g: Vec<G1Affine>,
    /// A group element used for blinding commitments.
    #[serde_as(as = "vrf_utils::serialization::SerdeAs")]
    pub h: G1Affine,
    /// The G2 generator.
    #[serde_as(as = "vrf_utils::serialization::SerdeAs")]
    pub g2: G2Affine,
    /// `tau` times the G2 generator.
    #[serde_as(as = "vrf_utils::serialization::SerdeAs")]
    pub tau_g2: G2Affine,
}

impl Srs {
    /// The maximum polynomial size (number of coefficients) that can be
    /// committed to with this SRS.
    pub fn max_degree(&self) -> usize {
        self.g.len()
    }

    /// Load an SRS from its canonical byte encoding.
    ///
    /// The blob is treated as opaque ceremony output; every point is
    /// validated for curve and subgroup membership while decoding.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RingError> {
        let srs = Self::deserialize_compressed(&mut &bytes[..])?;
        srs.validate()?;
        Ok(srs)
    }

    /// Load an SRS from a reader, e.g. an open ceremony transcript file.
    pub fn from_reader<R: std::io::Read>(mut reader: R) -> Result<Self, RingError> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|_| RingError::InvalidSetup("unreadable SRS blob"))?;
        Self::from_bytes(&bytes)
    }

    /// Canonical byte encoding of the SRS.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        self.serialize_compressed(&mut bytes)
            .expect("serialization into a Vec is infallible");
        bytes
    }

    fn validate(&self) -> Result<(), RingError> {
        if self.g.len() < 2 {
            return Err(RingError::InvalidSetup("fewer than two G1 powers"));
        }
        if self.g[0].is_zero() || self.h.is_zero() {
            return Err(RingError::InvalidSetup("identity base point"));
        }
        if self.g2.is_zero() || self.tau_g2.is_zero() {
            return Err(RingError::InvalidSetup("identity G2 point"));
        }
        Ok(())
    }

    /// This function creates a trusted-setup SRS instance supporting
    /// polynomials with up to `depth` coefficients.
    ///
    /// # Safety
    ///
    /// This function is unsafe because it creates a trusted setup and the
    /// toxic waste is passed as a parameter. A safe method is to load an
    /// existing SRS where it is broadly accepted that the trapdoor is not
    /// recoverable.
    pub unsafe fn create_trusted_setup(tau: Fr, depth: usize) -> Self {
        let mut tau_pow = Fr::one();
        let g: Vec<_> = (0..depth)
            .map(|_| {
                let res = G1Affine::generator() * tau_pow;
                tau_pow *= tau;
                res.into_affine()
            })
            .collect();

        // Blinder with unknown discrete log: hash-derived point, cofactor
        // cleared.
        let h = {
            let mut ctr = 0u32;
            loop {
                let mut hasher = Blake2b512::new();
                hasher.update(b"srs_misc");
                hasher.update(ctr.to_be_bytes());
                if let Some(p) = G1Affine::from_random_bytes(&hasher.finalize()) {
                    let p = p.clear_cofactor();
                    if !p.is_zero() {
                        break p;
                    }
                }
                ctr += 1;
            }
        };

        let g2 = G2Affine::generator();
        let tau_g2 = (g2 * tau).into_affine();

        Srs { g, h, g2, tau_g2 }
    }

    /// Non-hiding commitment to a polynomial in coefficient form.
    pub fn commit(&self, plnm: &DensePolynomial<Fr>) -> Result<G1Affine, RingError> {
        let coeffs = plnm.coeffs();
        if coeffs.len() > self.g.len() {
            return Err(RingError::SrsTooSmall {
                required: coeffs.len(),
                actual: self.g.len(),
            });
        }

        let coeffs: Vec<_> = coeffs.iter().map(|c| c.into_bigint()).collect();
        let msm = coeffs
            .par_chunks(MSM_CHUNK_SIZE)
            .zip(self.g[..coeffs.len()].par_chunks(MSM_CHUNK_SIZE))
            .map(|(cs, bases)| G1Projective::msm_bigint(bases, cs))
            .reduce(G1Projective::zero, |mut l, r| {
                l += r;
                l
            });

        Ok(msm.into_affine())
    }

    /// Hiding commitment: `commit(plnm) + blinder * h`.
    pub fn commit_blinded(
        &self,
        plnm: &DensePolynomial<Fr>,
        blinder: Fr,
    ) -> Result<G1Affine, RingError> {
        let com = self.commit(plnm)?;
        Ok((com + self.h * blinder).into_affine())
    }
}
