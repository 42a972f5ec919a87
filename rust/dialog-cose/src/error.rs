//! Error types for credential public key operations.

use crate::{algorithm::Algorithm, key_type::KeyType};
use thiserror::Error;

/// Errors raised while constructing, resolving, encoding or verifying a
/// [`CredentialPublicKey`](crate::CredentialPublicKey).
///
/// A signature that simply does not match is not an error: verification
/// reports it as `Ok(false)`. Every variant here describes a record or
/// configuration that cannot be verified at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoseKeyError {
    /// The `kty` value is not one of OKP, EC2 or RSA.
    #[error("unsupported key type {0}")]
    UnsupportedKeyType(i64),

    /// The `alg` value is not a recognized signature algorithm.
    #[error("unsupported algorithm {0}")]
    UnsupportedAlgorithm(i64),

    /// The algorithm cannot be used with the record's key type.
    #[error("algorithm {algorithm} is not valid for {key_type} keys")]
    UnsupportedAlgorithmForKeyType {
        /// Key type declared by the record.
        key_type: KeyType,
        /// Algorithm declared by the record.
        algorithm: Algorithm,
    },

    /// The curve is not permitted for the algorithm, or is not a curve
    /// this crate recognizes.
    #[error("unsupported curve: {0}")]
    UnsupportedCurve(String),

    /// A certificate declared a public key algorithm that cannot be imported.
    #[error("unrecognized key algorithm identifier {0}")]
    UnrecognizedKeyAlgorithm(String),

    /// A required parameter is missing, has the wrong type, or an
    /// unexpected parameter is present.
    #[error("malformed key parameters: {0}")]
    MalformedParameters(String),

    /// The primitive rejected the public key material.
    #[error("invalid key material: {0}")]
    InvalidKeyMaterial(String),

    /// The primitive backing this configuration was compiled out.
    #[error("{0} support is not enabled")]
    PrimitiveUnavailable(&'static str),

    /// The record could not be encoded.
    #[error("failed to encode key record: {0}")]
    Encode(String),

    /// The bytes could not be decoded into a record.
    #[error("failed to decode key record: {0}")]
    Decode(String),
}
