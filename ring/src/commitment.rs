//! Ring commitment: a KZG commitment to the column of key tags.
//!
//! The column polynomial interpolates one tag per domain slot; slots beyond
//! the supplied ring are filled with a fixed padding tag. The commitment is a
//! pure function of (tags, padding, SRS): prover and verifier compute the
//! same point independently, and the structure is frozen after construction
//! so it can be shared across concurrent verifications without locking.

use crate::{error::RingError, min_srs_size, srs::Srs};
use ark_bls12_381::{Fr, G1Affine};
use ark_poly::{
    univariate::DensePolynomial, DenseUVPolynomial, EvaluationDomain, Polynomial,
    Radix2EvaluationDomain,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingCommitment {
    domain: Radix2EvaluationDomain<Fr>,
    /// Tag column in coefficient form.
    column: DensePolynomial<Fr>,
    /// KZG commitment to the column.
    point: G1Affine,
}

impl RingCommitment {
    /// Interpolate and commit the tag column over a domain of (at least)
    /// `capacity` slots.
    ///
    /// Fails fast on configuration problems: empty ring, ring larger than
    /// the domain, or an SRS too small for the membership argument built on
    /// top of this domain.
    pub fn new(
        srs: &Srs,
        capacity: usize,
        tags: &[Fr],
        padding: Fr,
    ) -> Result<Self, RingError> {
        if tags.is_empty() {
            return Err(RingError::EmptyRing);
        }
        let domain = Radix2EvaluationDomain::<Fr>::new(capacity)
            .ok_or(RingError::InvalidDomain(capacity))?;
        if tags.len() > domain.size() {
            return Err(RingError::RingTooLarge {
                got: tags.len(),
                capacity: domain.size(),
            });
        }
        if srs.max_degree() < min_srs_size(domain.size()) {
            return Err(RingError::SrsTooSmall {
                required: min_srs_size(domain.size()),
                actual: srs.max_degree(),
            });
        }

        let mut evals = tags.to_vec();
        evals.resize(domain.size(), padding);
        let column = DensePolynomial::from_coefficients_vec(domain.ifft(&evals));
        let point = srs.commit(&column)?;

        Ok(Self {
            domain,
            column,
            point,
        })
    }

    /// The committed column point, i.e. the public ring commitment.
    pub fn point(&self) -> G1Affine {
        self.point
    }

    pub fn domain(&self) -> Radix2EvaluationDomain<Fr> {
        self.domain
    }

    /// Number of slots in the ring domain.
    pub fn capacity(&self) -> usize {
        self.domain.size()
    }

    /// Tag column in coefficient form.
    pub(crate) fn column(&self) -> &DensePolynomial<Fr> {
        &self.column
    }

    /// Evaluate the tag column at an arbitrary point.
    pub fn evaluate_column(&self, at: Fr) -> Fr {
        self.column.evaluate(&at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_ff::UniformRand;

    fn test_srs(size: usize) -> Srs {
        let mut rng = vrf_utils::tests::make_test_rng(None);
        let tau = Fr::rand(&mut rng);
        unsafe { Srs::create_trusted_setup(tau, min_srs_size(size)) }
    }

    #[test]
    fn column_interpolates_tags() {
        let mut rng = vrf_utils::tests::make_test_rng(None);
        let srs = test_srs(8);
        let tags: Vec<Fr> = (0..5).map(|_| Fr::rand(&mut rng)).collect();
        let padding = Fr::rand(&mut rng);

        let ring = RingCommitment::new(&srs, 8, &tags, padding).unwrap();
        let domain = ring.domain();
        for (i, tag) in tags.iter().enumerate() {
            assert_eq!(ring.evaluate_column(domain.element(i)), *tag);
        }
        // Slots past the ring hold the padding tag.
        for i in tags.len()..domain.size() {
            assert_eq!(ring.evaluate_column(domain.element(i)), padding);
        }
    }

    #[test]
    fn commitment_is_a_pure_function_of_the_ring() {
        let mut rng = vrf_utils::tests::make_test_rng(None);
        let srs = test_srs(8);
        let tags: Vec<Fr> = (0..6).map(|_| Fr::rand(&mut rng)).collect();
        let padding = Fr::rand(&mut rng);

        let a = RingCommitment::new(&srs, 8, &tags, padding).unwrap();
        let b = RingCommitment::new(&srs, 8, &tags, padding).unwrap();
        assert_eq!(a.point(), b.point());

        // Different ring, different commitment.
        let mut other = tags.clone();
        other[0] = Fr::rand(&mut rng);
        let c = RingCommitment::new(&srs, 8, &other, padding).unwrap();
        assert_ne!(a.point(), c.point());
    }

    #[test]
    fn duplicate_tags_are_tolerated() {
        let mut rng = vrf_utils::tests::make_test_rng(None);
        let srs = test_srs(8);
        let tag = Fr::rand(&mut rng);
        let ring = RingCommitment::new(&srs, 8, &[tag, tag, tag], tag).unwrap();
        assert_eq!(ring.evaluate_column(ring.domain().element(1)), tag);
    }

    #[test]
    fn configuration_errors() {
        let mut rng = vrf_utils::tests::make_test_rng(None);
        let srs = test_srs(8);
        let padding = Fr::rand(&mut rng);

        assert_eq!(
            RingCommitment::new(&srs, 8, &[], padding),
            Err(RingError::EmptyRing)
        );

        let tags: Vec<Fr> = (0..9).map(|_| Fr::rand(&mut rng)).collect();
        assert!(matches!(
            RingCommitment::new(&srs, 8, &tags, padding),
            Err(RingError::RingTooLarge { .. })
        ));

        let tags: Vec<Fr> = (0..8).map(|_| Fr::rand(&mut rng)).collect();
        assert!(matches!(
            RingCommitment::new(&srs, 16, &tags, padding),
            Err(RingError::SrsTooSmall { .. })
        ));
    }
}
