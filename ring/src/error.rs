use thiserror::Error;

/// Errors surfaced by SRS handling and ring commitment construction.
///
/// These are all structural or configuration errors: they are detected before
/// any cryptographic equation is evaluated. A proof that merely fails to
/// verify is reported as a plain `false`, never through this type.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingError {
    #[error("SRS supports polynomials up to degree {actual}, need at least {required}")]
    SrsTooSmall { required: usize, actual: usize },

    #[error("invalid SRS: {0}")]
    InvalidSetup(&'static str),

    #[error("cannot build a radix-2 evaluation domain of size {0}")]
    InvalidDomain(usize),

    #[error("ring is empty")]
    EmptyRing,

    #[error("ring of {got} members exceeds the domain capacity {capacity}")]
    RingTooLarge { got: usize, capacity: usize },

    #[error("member index {index} out of range for a domain of size {size}")]
    IndexOutOfRange { index: usize, size: usize },

    #[error("malformed byte encoding")]
    Serialization,
}

impl From<ark_serialize::SerializationError> for RingError {
    fn from(_err: ark_serialize::SerializationError) -> Self {
        RingError::Serialization
    }
}
