//! This adds a few utility functions for serializing and deserializing
//! [arkworks](http://arkworks.rs/) types that implement [CanonicalSerialize]
//! and [CanonicalDeserialize].

use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use serde_with::Bytes;

pub mod ser {
    //! You can use this module for serialization and deserializing arkworks
    //! types with [serde]. Simply use the following attribute on your field:
    //! `#[serde(with = "vrf_utils::serialization::ser")]`

    use super::*;
    use serde_with::{DeserializeAs, SerializeAs};

    /// You can use this to serialize an arkworks type with serde and the
    /// "serialize_with" attribute. See <https://serde.rs/field-attrs.html>
    pub fn serialize<S>(val: impl CanonicalSerialize, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut bytes = vec![];
        val.serialize_compressed(&mut bytes)
            .map_err(serde::ser::Error::custom)?;

        Bytes::serialize_as(&bytes, serializer)
    }

    /// You can use this to deserialize an arkworks type with serde and the
    /// "deserialize_with" attribute. See <https://serde.rs/field-attrs.html>
    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: CanonicalDeserialize,
        D: serde::Deserializer<'de>,
    {
        let bytes: Vec<u8> = Bytes::deserialize_as(deserializer)?;
        T::deserialize_compressed(&mut &bytes[..]).map_err(serde::de::Error::custom)
    }
}

/// You can use [SerdeAs] with [serde_with] in order to serialize and
/// deserialize types that implement [CanonicalSerialize] and
/// [CanonicalDeserialize], or containers of such types (Vec, arrays, etc.).
/// Simply add annotations like
/// `#[serde_as(as = "vrf_utils::serialization::SerdeAs")]`
pub struct SerdeAs;

impl<T> serde_with::SerializeAs<T> for SerdeAs
where
    T: CanonicalSerialize,
{
    fn serialize_as<S>(val: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut bytes = vec![];
        val.serialize_compressed(&mut bytes)
            .map_err(serde::ser::Error::custom)?;

        Bytes::serialize_as(&bytes, serializer)
    }
}

impl<'de, T> serde_with::DeserializeAs<'de, T> for SerdeAs
where
    T: CanonicalDeserialize,
{
    fn deserialize_as<D>(deserializer: D) -> Result<T, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bytes: Vec<u8> = Bytes::deserialize_as(deserializer)?;
        T::deserialize_compressed(&mut &bytes[..]).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use ark_ed_on_bls12_381_bandersnatch::Fr;
    use ark_ff::One;
    use serde_with::serde_as;

    #[serde_as]
    #[derive(serde::Serialize, serde::Deserialize, PartialEq, Eq, Debug)]
    struct Wrapper {
        #[serde_as(as = "SerdeAs")]
        scalar: Fr,
    }

    #[test]
    fn serde_roundtrip() {
        let wrapper = Wrapper { scalar: Fr::one() };
        let encoded = serde_json::to_string(&wrapper).unwrap();
        let decoded: Wrapper = serde_json::from_str(&encoded).unwrap();
        assert_eq!(wrapper, decoded);
    }
}
