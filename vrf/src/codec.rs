//! Fixed-layout byte encodings for points, scalars and proofs.
//!
//! Points and scalars are both 32 bytes, little endian; a point is encoded
//! as its `y` coordinate with the sign of `x` in the top bit of the last
//! byte. Length and validity are checked before any curve arithmetic is
//! attempted, and a malformed encoding is a structural error, distinct from
//! a proof that decodes fine but fails verification.

use crate::{ietf, pedersen, AffinePoint, Error, ScalarField};
use ark_ec::AffineRepr;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};

/// Compressed point encoding length.
pub const POINT_LEN: usize = 32;
/// Canonical scalar encoding length.
pub const SCALAR_LEN: usize = 32;
/// IETF proof layout: `c || s`.
pub const IETF_PROOF_LEN: usize = 2 * SCALAR_LEN;
/// Pedersen proof layout: `Y_bar || R || O_k || s || s_b`.
pub const PEDERSEN_PROOF_LEN: usize = 3 * POINT_LEN + 2 * SCALAR_LEN;

/// Canonical compressed encoding of a point.
pub fn point_encode(point: &AffinePoint) -> [u8; POINT_LEN] {
    let mut buf = Vec::with_capacity(POINT_LEN);
    point
        .serialize_compressed(&mut buf)
        .expect("serialization into a Vec is infallible");
    buf.try_into().expect("compressed points are 32 bytes")
}

/// Decode a compressed point, validating curve and subgroup membership and
/// rejecting the identity.
pub fn point_decode(bytes: &[u8]) -> Result<AffinePoint, Error> {
    if bytes.len() != POINT_LEN {
        return Err(Error::InvalidPoint);
    }
    let point = AffinePoint::deserialize_compressed(bytes).map_err(|_| Error::InvalidPoint)?;
    if point.is_zero() {
        return Err(Error::IdentityPoint);
    }
    Ok(point)
}

/// Canonical little-endian encoding of a scalar.
pub fn scalar_encode(scalar: &ScalarField) -> [u8; SCALAR_LEN] {
    let mut buf = Vec::with_capacity(SCALAR_LEN);
    scalar
        .serialize_compressed(&mut buf)
        .expect("serialization into a Vec is infallible");
    buf.try_into().expect("scalars are 32 bytes")
}

/// Decode a scalar, rejecting non-canonical values (>= the curve order).
pub fn scalar_decode(bytes: &[u8]) -> Result<ScalarField, Error> {
    if bytes.len() != SCALAR_LEN {
        return Err(Error::InvalidScalar);
    }
    ScalarField::deserialize_compressed(bytes).map_err(|_| Error::InvalidScalar)
}

/// Serialize an IETF proof: `c || s`, 64 bytes.
pub fn ietf_proof_encode(proof: &ietf::Proof) -> [u8; IETF_PROOF_LEN] {
    let mut buf = [0u8; IETF_PROOF_LEN];
    buf[..SCALAR_LEN].copy_from_slice(&scalar_encode(&proof.c));
    buf[SCALAR_LEN..].copy_from_slice(&scalar_encode(&proof.s));
    buf
}

/// Deserialize an IETF proof. Wrong length is a structural error, reported
/// before any field is decoded.
pub fn ietf_proof_decode(bytes: &[u8]) -> Result<ietf::Proof, Error> {
    if bytes.len() != IETF_PROOF_LEN {
        return Err(Error::InvalidProofLength {
            expected: IETF_PROOF_LEN,
            got: bytes.len(),
        });
    }
    Ok(ietf::Proof {
        c: scalar_decode(&bytes[..SCALAR_LEN])?,
        s: scalar_decode(&bytes[SCALAR_LEN..])?,
    })
}

/// Serialize a Pedersen proof: `Y_bar || R || O_k || s || s_b`, 160 bytes.
pub fn pedersen_proof_encode(proof: &pedersen::Proof) -> [u8; PEDERSEN_PROOF_LEN] {
    let mut buf = [0u8; PEDERSEN_PROOF_LEN];
    buf[..32].copy_from_slice(&point_encode(&proof.pk_com));
    buf[32..64].copy_from_slice(&point_encode(&proof.r));
    buf[64..96].copy_from_slice(&point_encode(&proof.ok));
    buf[96..128].copy_from_slice(&scalar_encode(&proof.s));
    buf[128..].copy_from_slice(&scalar_encode(&proof.sb));
    buf
}

/// Deserialize a Pedersen proof. Wrong length is a structural error,
/// reported before any field is decoded.
pub fn pedersen_proof_decode(bytes: &[u8]) -> Result<pedersen::Proof, Error> {
    if bytes.len() != PEDERSEN_PROOF_LEN {
        return Err(Error::InvalidProofLength {
            expected: PEDERSEN_PROOF_LEN,
            got: bytes.len(),
        });
    }
    Ok(pedersen::Proof {
        pk_com: point_decode(&bytes[..32])?,
        r: point_decode(&bytes[32..64])?,
        ok: point_decode(&bytes[64..96])?,
        s: scalar_decode(&bytes[96..128])?,
        sb: scalar_decode(&bytes[128..])?,
    })
}
