//! IETF VRF scheme, complying with the ECVRF construction of
//! [RFC-9381](https://datatracker.ietf.org/doc/rfc9381), extended to bind
//! optional auxiliary data into the challenge.
//!
//! The proof is a Schnorr-style proof of knowledge of the secret key: the
//! challenge scalar and the response scalar. Verification reconstructs the
//! nonce commitments `U = s*G - c*Y` and `V = s*I - c*Gamma` and recomputes
//! the challenge over them.

use crate::{oracle, AffinePoint, Input, Output, Projective, Public, ScalarField, Secret};
use ark_ec::{AffineRepr, CurveGroup};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

/// IETF VRF proof: challenge and response.
#[serde_as]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, CanonicalSerialize,
    CanonicalDeserialize,
)]
pub struct Proof {
    /// Fiat-Shamir challenge.
    #[serde_as(as = "vrf_utils::serialization::SerdeAs")]
    pub c: ScalarField,
    /// Response scalar `s = k + c*sk`.
    #[serde_as(as = "vrf_utils::serialization::SerdeAs")]
    pub s: ScalarField,
}

impl core::fmt::Display for Proof {
    /// Formats the proof as the hex encoding of its fixed 64-byte layout.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", hex::encode(crate::codec::ietf_proof_encode(self)))
    }
}

/// Types able to produce IETF VRF proofs.
pub trait Prover {
    /// Generate a proof for the given input/output and additional data.
    fn prove(&self, input: Input, output: Output, ad: impl AsRef<[u8]>) -> Proof;
}

/// Types able to verify IETF VRF proofs.
pub trait Verifier {
    /// Verify a proof for the given input/output and additional data.
    ///
    /// A proof that completes the protocol but fails its equations yields
    /// `false`; malformed encodings never reach this point (see
    /// [`crate::codec`]).
    fn verify(&self, input: Input, output: Output, ad: impl AsRef<[u8]>, proof: &Proof) -> bool;
}

impl Prover for Secret {
    fn prove(&self, input: Input, output: Output, ad: impl AsRef<[u8]>) -> Proof {
        let k = oracle::nonce_rfc_8032(&self.scalar, &input.0);

        let points = Projective::normalize_batch(&[
            AffinePoint::generator() * k,
            input.0 * k,
        ]);
        let (u, v) = (points[0], points[1]);

        let c = oracle::challenge_rfc_9381(
            &[&self.public.0, &input.0, &output.0, &u, &v],
            ad.as_ref(),
        );
        let s = k + c * self.scalar;

        Proof { c, s }
    }
}

impl Verifier for Public {
    fn verify(&self, input: Input, output: Output, ad: impl AsRef<[u8]>, proof: &Proof) -> bool {
        let points = Projective::normalize_batch(&[
            AffinePoint::generator() * proof.s - self.0 * proof.c,
            input.0 * proof.s - output.0 * proof.c,
        ]);
        let (u, v) = (points[0], points[1]);

        let c = oracle::challenge_rfc_9381(&[&self.0, &input.0, &output.0, &u, &v], ad.as_ref());
        if c != proof.c {
            debug!("ietf vrf: challenge mismatch");
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prove_verify() {
        let secret = Secret::from_seed(b"seed");
        let public = secret.public();
        let input = Input::new(b"input").unwrap();
        let output = secret.output(input);

        let proof = secret.prove(input, output, b"aux");
        assert!(public.verify(input, output, b"aux", &proof));
    }

    #[test]
    fn proving_is_deterministic() {
        let secret = Secret::from_seed(b"seed");
        let input = Input::new(b"input").unwrap();
        let output = secret.output(input);

        assert_eq!(
            secret.prove(input, output, b"aux"),
            secret.prove(input, output, b"aux")
        );
    }

    #[test]
    fn aux_data_is_bound() {
        let secret = Secret::from_seed(b"seed");
        let public = secret.public();
        let input = Input::new(b"input").unwrap();
        let output = secret.output(input);

        let proof = secret.prove(input, output, b"aux");
        assert!(!public.verify(input, output, b"other", &proof));
    }

    #[test]
    fn wrong_key_or_output_fails() {
        let secret = Secret::from_seed(b"seed");
        let public = secret.public();
        let input = Input::new(b"input").unwrap();
        let output = secret.output(input);
        let proof = secret.prove(input, output, b"");

        let other = Secret::from_seed(b"other");
        assert!(!other.public().verify(input, output, b"", &proof));
        assert!(!public.verify(input, other.output(input), b"", &proof));
    }
}
