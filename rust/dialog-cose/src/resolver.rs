//! Resolution of a key record into a concrete primitive configuration.

use crate::{
    algorithm::{
        Algorithm, ecdsa::EcdsaCurve, eddsa::EdwardsCurve, hash::HashAlgorithm, rsa::RsaPadding,
    },
    error::CoseKeyError,
    key_type::KeyType,
};

/// The primitive configuration a key record implies.
///
/// Resolution is a closed mapping: every (key type, algorithm, curve)
/// combination either matches an explicit entry here or fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// ECDSA over a named curve.
    Ecdsa {
        /// Curve the public point lives on.
        curve: EcdsaCurve,
        /// Hash applied to the message.
        hash: HashAlgorithm,
    },
    /// RSA signature with a padding scheme.
    Rsa {
        /// Padding scheme.
        padding: RsaPadding,
        /// Hash applied to the message.
        hash: HashAlgorithm,
    },
    /// EdDSA over an Edwards curve, verified against the SHA-512 digest of
    /// the message.
    EdDsa {
        /// Edwards curve.
        curve: EdwardsCurve,
    },
}

impl Primitive {
    /// Resolve the primitive for a key type, algorithm and (for EC2 and OKP
    /// keys) declared curve id.
    ///
    /// # Errors
    ///
    /// - [`CoseKeyError::UnsupportedAlgorithmForKeyType`] when the algorithm
    ///   belongs to another key family.
    /// - [`CoseKeyError::UnsupportedCurve`] when the curve is not permitted
    ///   for the algorithm.
    /// - [`CoseKeyError::MalformedParameters`] when an EC2 or OKP key has no
    ///   curve.
    pub fn resolve(
        key_type: KeyType,
        algorithm: Algorithm,
        curve: Option<i64>,
    ) -> Result<Self, CoseKeyError> {
        let resolved = match key_type {
            KeyType::Ec2 => require_curve(key_type, curve)
                .and_then(|curve| EcdsaCurve::resolve(algorithm, curve))
                .map(|curve| Primitive::Ecdsa {
                    curve,
                    hash: algorithm.hash(),
                }),
            KeyType::Rsa => RsaPadding::resolve(algorithm).map(|padding| Primitive::Rsa {
                padding,
                hash: algorithm.hash(),
            }),
            KeyType::Okp => require_curve(key_type, curve)
                .and_then(|curve| EdwardsCurve::resolve(algorithm, curve))
                .map(|curve| Primitive::EdDsa { curve }),
        };

        if let Err(error) = &resolved {
            tracing::debug!(%key_type, %algorithm, ?curve, %error, "unable to resolve signature primitive");
        }

        resolved
    }

    /// The hash applied to the message before the primitive verifies it.
    #[must_use]
    pub const fn hash(&self) -> HashAlgorithm {
        match self {
            Primitive::Ecdsa { hash, .. } | Primitive::Rsa { hash, .. } => *hash,
            Primitive::EdDsa { .. } => HashAlgorithm::Sha512,
        }
    }

    /// The key family this primitive verifies for.
    #[must_use]
    pub const fn key_type(&self) -> KeyType {
        match self {
            Primitive::Ecdsa { .. } => KeyType::Ec2,
            Primitive::Rsa { .. } => KeyType::Rsa,
            Primitive::EdDsa { .. } => KeyType::Okp,
        }
    }
}

fn require_curve(key_type: KeyType, curve: Option<i64>) -> Result<i64, CoseKeyError> {
    match curve {
        Some(curve) => Ok(curve),
        None => Err(CoseKeyError::MalformedParameters(format!(
            "{key_type} key has no curve"
        ))),
    }
}
