//! Deterministic nonce and challenge derivation.
//!
//! Nonces follow the construction of
//! [RFC-8032](https://tools.ietf.org/html/rfc8032) section 5.1.6 (steps 2-3),
//! as adopted by RFC-9381 section 5.4.2.2: proving never needs a randomness
//! source, so a faulty RNG can never cause nonce reuse. Challenges follow
//! RFC-9381 section 5.4.3, extended to bind optional auxiliary data.

use crate::{codec, AffinePoint, ScalarField, CHALLENGE_LEN, SUITE_ID};
use ark_ff::PrimeField;
use sha2::{Digest, Sha512};

/// Deterministic nonce from a secret scalar and an input point.
///
/// Computed as `SHA-512(SHA-512(sk)[32..] || point)` reduced modulo the
/// curve order. Identical arguments always produce the identical scalar;
/// distinct input points produce independent nonces.
pub fn nonce_rfc_8032(sk: &ScalarField, input: &AffinePoint) -> ScalarField {
    let sk_digest = Sha512::digest(codec::scalar_encode(sk));

    let mut hasher = Sha512::new();
    hasher.update(&sk_digest[32..]);
    hasher.update(codec::point_encode(input));
    ScalarField::from_le_bytes_mod_order(&hasher.finalize())
}

/// Fiat-Shamir challenge over an ordered sequence of points plus auxiliary
/// data.
///
/// The point order is part of the protocol transcript: prover and verifier
/// must pass the exact same sequence.
pub fn challenge_rfc_9381(points: &[&AffinePoint], ad: &[u8]) -> ScalarField {
    const DOM_SEP_START: u8 = 0x02;
    const DOM_SEP_END: u8 = 0x00;

    let mut hasher = Sha512::new();
    hasher.update(SUITE_ID);
    hasher.update([DOM_SEP_START]);
    for point in points {
        hasher.update(codec::point_encode(point));
    }
    hasher.update(ad);
    hasher.update([DOM_SEP_END]);
    ScalarField::from_le_bytes_mod_order(&hasher.finalize()[..CHALLENGE_LEN])
}

/// Hash a VRF output point into the pseudorandom bytes handed to
/// applications (RFC-9381 section 5.2, without cofactor clearing).
pub fn point_to_hash_rfc_9381(point: &AffinePoint) -> [u8; 64] {
    const DOM_SEP_START: u8 = 0x03;
    const DOM_SEP_END: u8 = 0x00;

    let mut hasher = Sha512::new();
    hasher.update(SUITE_ID);
    hasher.update([DOM_SEP_START]);
    hasher.update(codec::point_encode(point));
    hasher.update([DOM_SEP_END]);
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{hash_to_curve, Secret};

    #[test]
    fn nonce_is_deterministic() {
        let secret = Secret::from_seed(b"seed");
        let input = hash_to_curve(b"input").unwrap();

        let a = nonce_rfc_8032(&secret.scalar, &input);
        let b = nonce_rfc_8032(&secret.scalar, &input);
        assert_eq!(a, b);
    }

    #[test]
    fn nonce_separates_inputs() {
        let secret = Secret::from_seed(b"seed");
        for i in 0..16u32 {
            let a = hash_to_curve(&i.to_le_bytes()).unwrap();
            let b = hash_to_curve(&(i + 1).to_le_bytes()).unwrap();
            assert_ne!(
                nonce_rfc_8032(&secret.scalar, &a),
                nonce_rfc_8032(&secret.scalar, &b)
            );
        }
    }

    #[test]
    fn nonce_separates_keys() {
        let input = hash_to_curve(b"input").unwrap();
        let a = Secret::from_seed(b"seed a");
        let b = Secret::from_seed(b"seed b");
        assert_ne!(
            nonce_rfc_8032(&a.scalar, &input),
            nonce_rfc_8032(&b.scalar, &input)
        );
    }

    #[test]
    fn challenge_depends_on_point_order() {
        let p = hash_to_curve(b"p").unwrap();
        let q = hash_to_curve(b"q").unwrap();

        let a = challenge_rfc_9381(&[&p, &q], b"");
        let b = challenge_rfc_9381(&[&q, &p], b"");
        assert_ne!(a, b);
    }

    #[test]
    fn challenge_binds_aux_data() {
        let p = hash_to_curve(b"p").unwrap();
        assert_ne!(
            challenge_rfc_9381(&[&p], b"one"),
            challenge_rfc_9381(&[&p], b"two")
        );
    }

    #[test]
    fn output_hash_is_stable() {
        let p = hash_to_curve(b"gamma").unwrap();
        assert_eq!(point_to_hash_rfc_9381(&p), point_to_hash_rfc_9381(&p));
        let q = hash_to_curve(b"other").unwrap();
        assert_ne!(point_to_hash_rfc_9381(&p), point_to_hash_rfc_9381(&q));
    }
}
