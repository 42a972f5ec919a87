//! COSE signature algorithms and their per-family primitives.

pub mod ecdsa;
pub mod eddsa;
pub mod hash;
pub mod rsa;

use crate::error::CoseKeyError;
use hash::HashAlgorithm;
use std::fmt;

/// Signature algorithms a credential public key can be bound to.
///
/// Discriminants are the values registered for the `alg` label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// ECDSA with SHA-256.
    Es256 = -7,
    /// EdDSA.
    EdDsa = -8,
    /// ECDSA with SHA-384.
    Es384 = -35,
    /// ECDSA with SHA-512.
    Es512 = -36,
    /// RSASSA-PSS with SHA-256.
    Ps256 = -37,
    /// RSASSA-PSS with SHA-384.
    Ps384 = -38,
    /// RSASSA-PSS with SHA-512.
    Ps512 = -39,
    /// ECDSA over secp256k1 with SHA-256.
    Es256K = -47,
    /// RSASSA-PKCS1-v1_5 with SHA-256.
    Rs256 = -257,
    /// RSASSA-PKCS1-v1_5 with SHA-384.
    Rs384 = -258,
    /// RSASSA-PKCS1-v1_5 with SHA-512.
    Rs512 = -259,
    /// RSASSA-PKCS1-v1_5 with SHA-1.
    Rs1 = -65535,
}

impl Algorithm {
    /// The registered `alg` value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self as i64
    }

    /// The hash function the message is digested with before the
    /// primitive sees it.
    ///
    /// For [`Algorithm::EdDsa`] this is the SHA-512 pre-hash applied to the
    /// message before Ed25519 verification.
    #[must_use]
    pub const fn hash(self) -> HashAlgorithm {
        match self {
            Algorithm::Rs1 => HashAlgorithm::Sha1,
            Algorithm::Es256 | Algorithm::Es256K | Algorithm::Ps256 | Algorithm::Rs256 => {
                HashAlgorithm::Sha256
            }
            Algorithm::Es384 | Algorithm::Ps384 | Algorithm::Rs384 => HashAlgorithm::Sha384,
            Algorithm::Es512 | Algorithm::Ps512 | Algorithm::Rs512 | Algorithm::EdDsa => {
                HashAlgorithm::Sha512
            }
        }
    }
}

impl TryFrom<i64> for Algorithm {
    type Error = CoseKeyError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            -7 => Ok(Algorithm::Es256),
            -8 => Ok(Algorithm::EdDsa),
            -35 => Ok(Algorithm::Es384),
            -36 => Ok(Algorithm::Es512),
            -37 => Ok(Algorithm::Ps256),
            -38 => Ok(Algorithm::Ps384),
            -39 => Ok(Algorithm::Ps512),
            -47 => Ok(Algorithm::Es256K),
            -257 => Ok(Algorithm::Rs256),
            -258 => Ok(Algorithm::Rs384),
            -259 => Ok(Algorithm::Rs512),
            -65535 => Ok(Algorithm::Rs1),
            other => Err(CoseKeyError::UnsupportedAlgorithm(other)),
        }
    }
}

impl From<Algorithm> for i64 {
    fn from(algorithm: Algorithm) -> Self {
        algorithm.value()
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Algorithm::Es256 => "ES256",
            Algorithm::EdDsa => "EdDSA",
            Algorithm::Es384 => "ES384",
            Algorithm::Es512 => "ES512",
            Algorithm::Ps256 => "PS256",
            Algorithm::Ps384 => "PS384",
            Algorithm::Ps512 => "PS512",
            Algorithm::Es256K => "ES256K",
            Algorithm::Rs256 => "RS256",
            Algorithm::Rs384 => "RS384",
            Algorithm::Rs512 => "RS512",
            Algorithm::Rs1 => "RS1",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Algorithm; 12] = [
        Algorithm::Es256,
        Algorithm::EdDsa,
        Algorithm::Es384,
        Algorithm::Es512,
        Algorithm::Ps256,
        Algorithm::Ps384,
        Algorithm::Ps512,
        Algorithm::Es256K,
        Algorithm::Rs256,
        Algorithm::Rs384,
        Algorithm::Rs512,
        Algorithm::Rs1,
    ];

    #[test]
    fn it_maps_every_algorithm_to_its_registered_value() {
        for algorithm in ALL {
            assert_eq!(Algorithm::try_from(algorithm.value()), Ok(algorithm));
        }
        assert_eq!(Algorithm::Rs1.value(), -65535);
        assert_eq!(Algorithm::Es256.value(), -7);
    }

    #[test]
    fn it_rejects_unregistered_algorithms() {
        assert_eq!(
            Algorithm::try_from(-65534),
            Err(CoseKeyError::UnsupportedAlgorithm(-65534))
        );
        assert_eq!(
            Algorithm::try_from(1),
            Err(CoseKeyError::UnsupportedAlgorithm(1))
        );
    }

    #[test]
    fn it_derives_hash_from_the_algorithm_suffix() {
        assert_eq!(Algorithm::Rs1.hash(), HashAlgorithm::Sha1);
        assert_eq!(Algorithm::Ps384.hash(), HashAlgorithm::Sha384);
        assert_eq!(Algorithm::Es512.hash(), HashAlgorithm::Sha512);
        assert_eq!(Algorithm::Es256K.hash(), HashAlgorithm::Sha256);
        assert_eq!(Algorithm::EdDsa.hash(), HashAlgorithm::Sha512);
    }
}
