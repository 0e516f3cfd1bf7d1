//! Ring membership argument over the committed tag column.
//!
//! The prover shows that a hidden tag `t` appears in some slot of the
//! committed ring column `r(X)` without revealing which slot. Writing `D` for
//! the ring domain, `Z_D` for its vanishing polynomial and `L_i` for the
//! Lagrange basis at the prover's slot, the prover commits to:
//!
//! - a slot selector `s(X) = L_i(X) + Z_D(X) * m_s(X)`, masked off-domain so
//!   its evaluations do not identify the slot. Every `L_i` evaluates to `1/n`
//!   at zero, so `m_s` is chosen with `m_s(0) = 0` and the normalization
//!   `s(0) = 1/n` holds independently of the slot;
//! - the selected tag column `w(X) = t * s(X) + Z_D(X) * m_w(X)`;
//! - the booleanity quotient `q_b = (s^2 - s) / Z_D`;
//! - the membership quotient `q_m = (r * s - w) / Z_D`.
//!
//! On the domain, `r * s - w` reduces to `(r - t) * L_i`, which vanishes
//! exactly when the slot holds the prover's tag; the quotient division is
//! exact in that case and leaves a remainder otherwise, which the prover
//! discards, yielding a proof the verifier rejects.
//!
//! The verifier derives an evaluation point `zeta` and an aggregation scalar
//! `alpha` by Fiat-Shamir from the ring commitment, the caller-supplied
//! binding bytes (the Pedersen key commitment and auxiliary data) and the
//! proof commitments, checks both quotient identities at `zeta`, and checks
//! two KZG openings with the pairing
//! `e(C - v*g - blinding*h, g2) * e(-W, tau*g2 - z*g2) == 1`.

use crate::{commitment::RingCommitment, error::RingError, srs::Srs, transcript::Transcript};
use ark_bls12_381::{Bls12_381, Fr, G1Affine, G1Projective};
use ark_ec::{pairing::Pairing, AffineRepr, CurveGroup};
use ark_ff::{Field, One, PrimeField, Zero};
use ark_poly::{
    univariate::{DenseOrSparsePolynomial, DensePolynomial},
    DenseUVPolynomial, EvaluationDomain, Polynomial,
};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use sha2::{Digest, Sha512};

const TRANSCRIPT_LABEL: &[u8] = b"bandersnatch-ring-membership";
const MASK_LABEL: &[u8] = b"ring-membership-mask";

/// Number of mask scalars drawn per proof: four polynomial mask
/// coefficients and five commitment blinders.
const MASK_COUNT: usize = 9;

/// KZG opening proof: the committed quotient polynomial, plus the blinding
/// factor of the opened commitment so the verifier can strip the hiding term
/// before the pairing check.
#[serde_as]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, CanonicalSerialize,
    CanonicalDeserialize,
)]
pub struct OpeningProof {
    #[serde_as(as = "vrf_utils::serialization::SerdeAs")]
    pub quotient: G1Affine,
    /// A blinding factor used to hide the polynomial, if necessary.
    #[serde_as(as = "vrf_utils::serialization::SerdeAs")]
    pub blinding: Fr,
}

/// Proof that the committed key tag sits in some slot of the ring column.
#[serde_as]
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, CanonicalSerialize, CanonicalDeserialize,
)]
pub struct MembershipProof {
    /// Hiding commitment to the slot selector.
    #[serde_as(as = "vrf_utils::serialization::SerdeAs")]
    pub selector: G1Affine,
    /// Hiding commitment to the selected tag column.
    #[serde_as(as = "vrf_utils::serialization::SerdeAs")]
    pub selected: G1Affine,
    /// Pedersen commitment to the prover's key tag over `(g, h)`.
    #[serde_as(as = "vrf_utils::serialization::SerdeAs")]
    pub key_tag: G1Affine,
    /// Hiding commitment to the booleanity quotient.
    #[serde_as(as = "vrf_utils::serialization::SerdeAs")]
    pub boolean_q: G1Affine,
    /// Hiding commitment to the membership quotient.
    #[serde_as(as = "vrf_utils::serialization::SerdeAs")]
    pub member_q: G1Affine,
    /// Evaluation of the selector at the Fiat-Shamir point.
    #[serde_as(as = "vrf_utils::serialization::SerdeAs")]
    pub selector_eval: Fr,
    /// Evaluation of the selected tag column at the Fiat-Shamir point.
    #[serde_as(as = "vrf_utils::serialization::SerdeAs")]
    pub selected_eval: Fr,
    /// Evaluation of the booleanity quotient at the Fiat-Shamir point.
    #[serde_as(as = "vrf_utils::serialization::SerdeAs")]
    pub boolean_q_eval: Fr,
    /// Evaluation of the membership quotient at the Fiat-Shamir point.
    #[serde_as(as = "vrf_utils::serialization::SerdeAs")]
    pub member_q_eval: Fr,
    /// Aggregated opening of the four committed polynomials at the
    /// Fiat-Shamir point.
    pub opening: OpeningProof,
    /// Opening of the selector at zero, pinning `s(0) = 1/n`.
    pub normalization: OpeningProof,
}

/// Produce a membership proof for the tag expected in slot `index`.
///
/// `binding` is absorbed into the Fiat-Shamir transcript before any proof
/// commitment; callers pass the data the proof must be bound to (for the Ring
/// VRF: the Pedersen key commitment and the auxiliary data). `seed` drives
/// the deterministic mask derivation, so no randomness source is required at
/// proving time.
///
/// If `tag` does not match the committed column at `index`, a proof is still
/// produced (the quotient remainder is discarded) but it will not verify.
pub fn prove(
    srs: &Srs,
    ring: &RingCommitment,
    index: usize,
    tag: Fr,
    binding: &[u8],
    seed: &[u8; 32],
) -> Result<MembershipProof, RingError> {
    let domain = ring.domain();
    let n = domain.size();
    if index >= n {
        return Err(RingError::IndexOutOfRange { index, size: n });
    }

    let masks = expand_masks(seed);
    let (gamma_1, gamma_2, delta_0, delta_1) = (masks[0], masks[1], masks[2], masks[3]);
    let (rho_s, rho_w, rho_t, rho_qb, rho_qm) =
        (masks[4], masks[5], masks[6], masks[7], masks[8]);

    // Selector: Lagrange basis at `index`, masked off-domain. The mask has a
    // zero constant term so s(0) = L_i(0) = 1/n survives.
    let lagrange = {
        let mut evals = vec![Fr::zero(); n];
        evals[index] = Fr::one();
        DensePolynomial::from_coefficients_vec(domain.ifft(&evals))
    };
    let vanishing = vanishing_poly(n);
    let selector = &lagrange + &(&vanishing * &DensePolynomial::from_coefficients_vec(vec![
        Fr::zero(),
        gamma_1,
        gamma_2,
    ]));

    // Selected tag column: t * s, masked off-domain.
    let selected = &scale(&selector, tag)
        + &(&vanishing * &DensePolynomial::from_coefficients_vec(vec![delta_0, delta_1]));

    // Booleanity quotient: (s^2 - s) / Z_D. Exact for every selector of the
    // above shape.
    let boolean_q = {
        let numerator = &(&selector * &selector) - &selector;
        divide_exact(&numerator, &vanishing)
    };

    // Membership quotient: (r * s - w) / Z_D. Exact iff the column holds
    // `tag` at `index`; the remainder is dropped otherwise.
    let member_q = {
        let numerator = &(ring.column() * &selector) - &selected;
        divide_exact(&numerator, &vanishing)
    };

    let selector_com = srs.commit_blinded(&selector, rho_s)?;
    let selected_com = srs.commit_blinded(&selected, rho_w)?;
    let boolean_q_com = srs.commit_blinded(&boolean_q, rho_qb)?;
    let member_q_com = srs.commit_blinded(&member_q, rho_qm)?;
    let key_tag_com = (srs.g[0] * tag + srs.h * rho_t).into_affine();

    let mut transcript = Transcript::new(TRANSCRIPT_LABEL);
    transcript.append(b"ring", &ring.point());
    transcript.append_bytes(b"binding", binding);
    transcript.append(b"key-tag", &key_tag_com);
    transcript.append(b"selector", &selector_com);
    transcript.append(b"selected", &selected_com);
    transcript.append(b"boolean-q", &boolean_q_com);
    transcript.append(b"member-q", &member_q_com);
    let zeta = transcript.challenge(b"zeta");

    let selector_eval = selector.evaluate(&zeta);
    let selected_eval = selected.evaluate(&zeta);
    let boolean_q_eval = boolean_q.evaluate(&zeta);
    let member_q_eval = member_q.evaluate(&zeta);

    transcript.append(b"selector-eval", &selector_eval);
    transcript.append(b"selected-eval", &selected_eval);
    transcript.append(b"boolean-q-eval", &boolean_q_eval);
    transcript.append(b"member-q-eval", &member_q_eval);
    let alpha = transcript.challenge(b"alpha");

    // Aggregated opening at zeta.
    let alpha_2 = alpha.square();
    let alpha_3 = alpha_2 * alpha;
    let aggregate = &(&selector + &scale(&selected, alpha))
        + &(&scale(&boolean_q, alpha_2) + &scale(&member_q, alpha_3));
    let aggregate_eval =
        selector_eval + alpha * selected_eval + alpha_2 * boolean_q_eval + alpha_3 * member_q_eval;
    let aggregate_blinding = rho_s + alpha * rho_w + alpha_2 * rho_qb + alpha_3 * rho_qm;
    let opening = OpeningProof {
        quotient: srs.commit(&open_quotient(&aggregate, zeta, aggregate_eval))?,
        blinding: aggregate_blinding,
    };

    // Normalization opening at zero.
    let one_over_n = Fr::from(n as u64)
        .inverse()
        .expect("domain size is invertible");
    let normalization = OpeningProof {
        quotient: srs.commit(&open_quotient(&selector, Fr::zero(), one_over_n))?,
        blinding: rho_s,
    };

    Ok(MembershipProof {
        selector: selector_com,
        selected: selected_com,
        key_tag: key_tag_com,
        boolean_q: boolean_q_com,
        member_q: member_q_com,
        selector_eval,
        selected_eval,
        boolean_q_eval,
        member_q_eval,
        opening,
        normalization,
    })
}

/// Verify a membership proof against the ring commitment and binding bytes.
///
/// Completes the full protocol and reports the outcome as a boolean; no
/// partial result other than diagnostic logging is exposed.
pub fn verify(srs: &Srs, ring: &RingCommitment, binding: &[u8], proof: &MembershipProof) -> bool {
    let domain = ring.domain();
    let n = domain.size();

    let mut transcript = Transcript::new(TRANSCRIPT_LABEL);
    transcript.append(b"ring", &ring.point());
    transcript.append_bytes(b"binding", binding);
    transcript.append(b"key-tag", &proof.key_tag);
    transcript.append(b"selector", &proof.selector);
    transcript.append(b"selected", &proof.selected);
    transcript.append(b"boolean-q", &proof.boolean_q);
    transcript.append(b"member-q", &proof.member_q);
    let zeta = transcript.challenge(b"zeta");

    transcript.append(b"selector-eval", &proof.selector_eval);
    transcript.append(b"selected-eval", &proof.selected_eval);
    transcript.append(b"boolean-q-eval", &proof.boolean_q_eval);
    transcript.append(b"member-q-eval", &proof.member_q_eval);
    let alpha = transcript.challenge(b"alpha");

    let vanishing_at_zeta = domain.evaluate_vanishing_polynomial(zeta);

    // Booleanity: s(zeta)^2 - s(zeta) == q_b(zeta) * Z_D(zeta).
    if proof.selector_eval.square() - proof.selector_eval
        != proof.boolean_q_eval * vanishing_at_zeta
    {
        debug!("ring membership: booleanity identity failed");
        return false;
    }

    // Membership: r(zeta) * s(zeta) - w(zeta) == q_m(zeta) * Z_D(zeta).
    let column_at_zeta = ring.evaluate_column(zeta);
    if column_at_zeta * proof.selector_eval - proof.selected_eval
        != proof.member_q_eval * vanishing_at_zeta
    {
        debug!("ring membership: membership identity failed");
        return false;
    }

    // Aggregated KZG opening at zeta.
    let alpha_2 = alpha.square();
    let alpha_3 = alpha_2 * alpha;
    let aggregate = proof.selected * alpha
        + proof.boolean_q * alpha_2
        + proof.member_q * alpha_3
        + proof.selector;
    let aggregate_eval = proof.selector_eval
        + alpha * proof.selected_eval
        + alpha_2 * proof.boolean_q_eval
        + alpha_3 * proof.member_q_eval;
    if !kzg_check(srs, aggregate, zeta, aggregate_eval, &proof.opening) {
        debug!("ring membership: aggregated opening failed");
        return false;
    }

    // Normalization: the selector opens to 1/n at zero, for every slot.
    let one_over_n = Fr::from(n as u64)
        .inverse()
        .expect("domain size is invertible");
    if !kzg_check(
        srs,
        proof.selector.into_group(),
        Fr::zero(),
        one_over_n,
        &proof.normalization,
    ) {
        debug!("ring membership: normalization opening failed");
        return false;
    }

    true
}

/// Single-point KZG check:
/// `e(C - v*g - blinding*h, g2) * e(-W, tau*g2 - z*g2) == 1`.
fn kzg_check(
    srs: &Srs,
    commitment: G1Projective,
    point: Fr,
    value: Fr,
    opening: &OpeningProof,
) -> bool {
    let numerator = commitment - srs.g[0] * value - srs.h * opening.blinding;
    let divisor = (srs.tau_g2.into_group() - srs.g2 * point).into_affine();
    let loops = Bls12_381::multi_miller_loop(
        [numerator.into_affine(), -opening.quotient],
        [srs.g2, divisor],
    );
    match Bls12_381::final_exponentiation(loops) {
        Some(res) => res.0 == <Bls12_381 as Pairing>::TargetField::one(),
        None => false,
    }
}

/// Deterministic mask expansion from a caller-provided seed.
fn expand_masks(seed: &[u8; 32]) -> Vec<Fr> {
    (0..MASK_COUNT as u32)
        .map(|i| {
            let mut hasher = Sha512::new();
            hasher.update(MASK_LABEL);
            hasher.update(seed);
            hasher.update(i.to_le_bytes());
            Fr::from_le_bytes_mod_order(&hasher.finalize())
        })
        .collect()
}

/// `X^n - 1` in dense form.
fn vanishing_poly(n: usize) -> DensePolynomial<Fr> {
    let mut coeffs = vec![Fr::zero(); n + 1];
    coeffs[0] = -Fr::one();
    coeffs[n] = Fr::one();
    DensePolynomial::from_coefficients_vec(coeffs)
}

fn scale(plnm: &DensePolynomial<Fr>, by: Fr) -> DensePolynomial<Fr> {
    DensePolynomial::from_coefficients_vec(plnm.coeffs.iter().map(|c| *c * by).collect())
}

/// Quotient of an exact polynomial division, with the remainder dropped.
fn divide_exact(
    numerator: &DensePolynomial<Fr>,
    divisor: &DensePolynomial<Fr>,
) -> DensePolynomial<Fr> {
    let (quotient, _remainder) = DenseOrSparsePolynomial::divide_with_q_and_r(
        &numerator.into(),
        &divisor.into(),
    )
    .expect("divisor is nonzero");
    quotient
}

/// Witness polynomial `(p - value) / (X - point)` for a KZG opening.
fn open_quotient(
    plnm: &DensePolynomial<Fr>,
    point: Fr,
    value: Fr,
) -> DensePolynomial<Fr> {
    let numerator = plnm - &DensePolynomial::from_coefficients_vec(vec![value]);
    let divisor = DensePolynomial::from_coefficients_vec(vec![-point, Fr::one()]);
    divide_exact(&numerator, &divisor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_ff::UniformRand;

    #[test]
    fn masks_are_deterministic() {
        let a = expand_masks(&[7u8; 32]);
        let b = expand_masks(&[7u8; 32]);
        assert_eq!(a, b);
        let c = expand_masks(&[8u8; 32]);
        assert_ne!(a, c);
    }

    #[test]
    fn open_quotient_is_exact() {
        let mut rng = vrf_utils::tests::make_test_rng(None);
        let coeffs: Vec<Fr> = (0..8).map(|_| Fr::rand(&mut rng)).collect();
        let plnm = DensePolynomial::from_coefficients_vec(coeffs);
        let point = Fr::rand(&mut rng);
        let value = plnm.evaluate(&point);

        let witness = open_quotient(&plnm, point, value);
        // (X - point) * witness + value == plnm
        let divisor = DensePolynomial::from_coefficients_vec(vec![-point, Fr::one()]);
        let recomposed =
            &(&witness * &divisor) + &DensePolynomial::from_coefficients_vec(vec![value]);
        assert_eq!(recomposed, plnm);
    }
}
