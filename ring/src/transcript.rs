//! Fiat-Shamir transcript for the membership argument.
//!
//! Every absorbed item is framed with a label and a length prefix, so
//! distinct absorption sequences can never collide on the same byte stream.
//! Challenges are squeezed by forking the running hash; the squeezed digest
//! is absorbed back so later challenges depend on earlier ones.

use ark_bls12_381::Fr;
use ark_ff::PrimeField;
use ark_serialize::CanonicalSerialize;
use sha2::{Digest, Sha512};

#[derive(Clone)]
pub struct Transcript {
    state: Sha512,
}

impl Transcript {
    pub fn new(label: &'static [u8]) -> Self {
        let mut state = Sha512::new();
        state.update(label);
        Self { state }
    }

    /// Absorb raw bytes under a label.
    pub fn append_bytes(&mut self, label: &'static [u8], data: &[u8]) {
        self.state.update(label);
        self.state.update((data.len() as u64).to_le_bytes());
        self.state.update(data);
    }

    /// Absorb any canonically-serializable value (points, scalars) under a
    /// label.
    pub fn append(&mut self, label: &'static [u8], value: &impl CanonicalSerialize) {
        let mut bytes = Vec::new();
        value
            .serialize_compressed(&mut bytes)
            .expect("serialization into a Vec is infallible");
        self.append_bytes(label, &bytes);
    }

    /// Squeeze a scalar challenge. The transcript state advances, so repeated
    /// calls yield independent challenges.
    pub fn challenge(&mut self, label: &'static [u8]) -> Fr {
        self.state.update(label);
        let digest = self.state.clone().finalize();
        self.state.update(digest);
        Fr::from_le_bytes_mod_order(&digest)
    }
}
