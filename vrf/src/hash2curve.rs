//! Hash-to-curve for the Bandersnatch suite.
//!
//! Uses the Elligator2 method of
//! [RFC-9380](https://datatracker.ietf.org/doc/rfc9380) section 6.8.2, as
//! required by [RFC-9381](https://datatracker.ietf.org/doc/rfc9381) section
//! 5.4.1.2: `expand_message_xmd` over SHA-512, two field elements mapped
//! through Elligator2, summed, then cofactor-cleared into the prime-order
//! subgroup.

use crate::{AffinePoint, Error};
use ark_ec::{
    hashing::{
        curve_maps::elligator2::Elligator2Map, map_to_curve_hasher::MapToCurveBasedHasher,
        HashToCurve,
    },
    AffineRepr,
};
use ark_ed_on_bls12_381_bandersnatch::{BandersnatchConfig, EdwardsProjective};
use ark_ff::field_hashers::DefaultFieldHasher;
use sha2::Sha512;

/// Domain separation tag:
/// `"ECVRF_" || h2c_suite_ID_string || suite_string`.
pub const DST: &[u8] = b"ECVRF_Bandersnatch_XMD:SHA-512_ELL2_RO_Bandersnatch_SHA-512_ELL2";

type Hasher = MapToCurveBasedHasher<
    EdwardsProjective,
    DefaultFieldHasher<Sha512, 128>,
    Elligator2Map<BandersnatchConfig>,
>;

/// Map arbitrary data to a point of the prime-order subgroup.
///
/// Deterministic and defined for every byte string, including the empty one.
/// The identity, reachable only with negligible probability after cofactor
/// clearing, is reported as a structural error rather than returned.
pub fn hash_to_curve(data: &[u8]) -> Result<AffinePoint, Error> {
    let point = Hasher::new(DST)
        .and_then(|hasher| hasher.hash(data))
        .map_err(|_| Error::HashToCurve)?;
    if point.is_zero() {
        return Err(Error::HashToCurve);
    }
    Ok(point)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;

    fn check(point: AffinePoint) {
        assert!(point.is_on_curve());
        assert!(point.is_in_correct_subgroup_assuming_on_curve());
        assert!(!point.is_zero());
    }

    #[test]
    fn total_on_degenerate_inputs() {
        check(hash_to_curve(b"").unwrap());
        check(hash_to_curve(&[0u8; 32]).unwrap());
        check(hash_to_curve(&[0u8; 1024]).unwrap());
    }

    #[test]
    fn total_on_random_inputs() {
        let mut rng = vrf_utils::tests::make_test_rng(None);
        let mut buf = [0u8; 64];
        for _ in 0..10_000 {
            rng.fill_bytes(&mut buf);
            check(hash_to_curve(&buf).unwrap());
        }
    }

    #[test]
    fn deterministic() {
        assert_eq!(
            hash_to_curve(b"some data").unwrap(),
            hash_to_curve(b"some data").unwrap()
        );
        assert_ne!(
            hash_to_curve(b"some data").unwrap(),
            hash_to_curve(b"some datb").unwrap()
        );
    }
}
