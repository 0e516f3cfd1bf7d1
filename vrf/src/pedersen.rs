//! Pedersen VRF scheme, described in
//! [BCHSV23](https://eprint.iacr.org/2023/002).
//!
//! The signer's public key is hidden behind the commitment
//! `Y_bar = Y + b*B`, where `B` is the fixed [`crate::BLINDING_BASE`] and
//! `b` a secret blinding factor returned to the caller. Verification checks
//! two equations against the commitment instead of the key:
//!
//! ```text
//! theta0:  O_k + c*Gamma == s*I
//! theta1:  R + c*Y_bar   == s*G + s_b*B
//! ```
//!
//! The VRF output is the same `Gamma = sk*I` as in the IETF scheme; blinding
//! changes only the proof.

use crate::{
    oracle, AffinePoint, Input, Output, Projective, ScalarField, Secret, BLINDING_BASE,
};
use ark_ec::{AffineRepr, CurveGroup};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

/// Pedersen VRF proof.
///
/// Wire layout (160 bytes): `Y_bar || R || O_k || s || s_b`, see
/// [`crate::codec`].
#[serde_as]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, CanonicalSerialize,
    CanonicalDeserialize,
)]
pub struct Proof {
    /// Blinded public key commitment `Y_bar = Y + b*B`.
    #[serde_as(as = "vrf_utils::serialization::SerdeAs")]
    pub pk_com: AffinePoint,
    /// Nonce commitment `R = k*G + k_b*B`.
    #[serde_as(as = "vrf_utils::serialization::SerdeAs")]
    pub r: AffinePoint,
    /// Nonce commitment `O_k = k*I`.
    #[serde_as(as = "vrf_utils::serialization::SerdeAs")]
    pub ok: AffinePoint,
    /// Response `s = k + c*sk`.
    #[serde_as(as = "vrf_utils::serialization::SerdeAs")]
    pub s: ScalarField,
    /// Response `s_b = k_b + c*b`.
    #[serde_as(as = "vrf_utils::serialization::SerdeAs")]
    pub sb: ScalarField,
}

impl Proof {
    /// The blinded public key commitment this proof opens against.
    pub fn key_commitment(&self) -> AffinePoint {
        self.pk_com
    }
}

impl core::fmt::Display for Proof {
    /// Formats the proof as the hex encoding of its fixed 160-byte layout.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", hex::encode(crate::codec::pedersen_proof_encode(self)))
    }
}

/// Types able to produce Pedersen VRF proofs.
pub trait Prover {
    /// Generate a proof for the given input/output and additional data.
    ///
    /// Returns the proof together with the secret blinding factor of the key
    /// commitment; the Ring VRF feeds the blinding into its membership
    /// component, other callers can discard it.
    fn prove(&self, input: Input, output: Output, ad: impl AsRef<[u8]>) -> (Proof, ScalarField);
}

impl Prover for Secret {
    fn prove(&self, input: Input, output: Output, ad: impl AsRef<[u8]>) -> (Proof, ScalarField) {
        // Blinding and both nonces are chained through the deterministic
        // nonce construction, so the three scalars are pairwise
        // input-separated and none is shared with the IETF scheme's nonce.
        let b = oracle::nonce_rfc_8032(&self.scalar, &input.0);
        let k = oracle::nonce_rfc_8032(&b, &input.0);
        let kb = oracle::nonce_rfc_8032(&k, &input.0);

        let points = Projective::normalize_batch(&[
            BLINDING_BASE * b + self.public.0,
            AffinePoint::generator() * k + BLINDING_BASE * kb,
            input.0 * k,
        ]);
        let (pk_com, r, ok) = (points[0], points[1], points[2]);

        let c = oracle::challenge_rfc_9381(
            &[&pk_com, &input.0, &output.0, &r, &ok],
            ad.as_ref(),
        );
        let s = k + c * self.scalar;
        let sb = kb + c * b;

        (Proof { pk_com, r, ok, s, sb }, b)
    }
}

/// Verify a Pedersen VRF proof.
///
/// No public key is taken: the proof carries the blinded commitment, and
/// anyone holding the blinding factor can link it to a key out of band.
pub fn verify(input: Input, output: Output, ad: impl AsRef<[u8]>, proof: &Proof) -> bool {
    let c = oracle::challenge_rfc_9381(
        &[&proof.pk_com, &input.0, &output.0, &proof.r, &proof.ok],
        ad.as_ref(),
    );

    // theta0: O_k + c*Gamma == s*I
    if output.0 * c + proof.ok != input.0 * proof.s {
        debug!("pedersen vrf: output equation failed");
        return false;
    }

    // theta1: R + c*Y_bar == s*G + s_b*B
    if proof.pk_com * c + proof.r
        != AffinePoint::generator() * proof.s + BLINDING_BASE * proof.sb
    {
        debug!("pedersen vrf: key commitment equation failed");
        return false;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ietf;

    #[test]
    fn prove_verify() {
        let secret = Secret::from_seed(b"seed");
        let input = Input::new(b"input").unwrap();
        let output = secret.output(input);

        let (proof, _blinding) = secret.prove(input, output, b"aux");
        assert!(verify(input, output, b"aux", &proof));
    }

    #[test]
    fn blinding_opens_the_key_commitment() {
        let secret = Secret::from_seed(b"seed");
        let input = Input::new(b"input").unwrap();
        let output = secret.output(input);

        let (proof, blinding) = secret.prove(input, output, b"");
        let unblinded = -(BLINDING_BASE * blinding) + proof.key_commitment();
        assert_eq!(unblinded.into_affine(), secret.public().0);
    }

    #[test]
    fn output_matches_ietf_scheme() {
        let secret = Secret::from_seed(b"seed");
        let input = Input::new(b"input").unwrap();
        let output = secret.output(input);

        let (proof, _) = secret.prove(input, output, b"");
        assert!(verify(input, output, b"", &proof));

        // Same Gamma, same output bytes, regardless of the proof scheme.
        let ietf_proof = <Secret as ietf::Prover>::prove(&secret, input, output, b"");
        assert!(<crate::Public as ietf::Verifier>::verify(
            &secret.public(),
            input,
            output,
            b"",
            &ietf_proof
        ));
        assert_eq!(output.hash(), secret.output(input).hash());
    }

    #[test]
    fn tampered_responses_fail() {
        let secret = Secret::from_seed(b"seed");
        let input = Input::new(b"input").unwrap();
        let output = secret.output(input);

        let (proof, _) = secret.prove(input, output, b"");

        let mut swapped = proof;
        core::mem::swap(&mut swapped.s, &mut swapped.sb);
        assert!(!verify(input, output, b"", &swapped));
    }
}
