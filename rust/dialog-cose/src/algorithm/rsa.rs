//! RSA padding resolution and verification for RSA keys.

use super::{Algorithm, hash::HashAlgorithm};
use crate::{error::CoseKeyError, key_type::KeyType, verifier::Verifier};
use std::fmt;

#[cfg(feature = "rsa")]
use {
    rsa::{BigUint, Pkcs1v15Sign, Pss, RsaPublicKey},
    sha1::Sha1,
    sha2::{Sha256, Sha384, Sha512},
};

/// The signature padding an RSA record resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RsaPadding {
    /// RSASSA-PSS, salt length equal to the digest length.
    Pss,
    /// RSASSA-PKCS1-v1_5.
    Pkcs1v15,
}

impl RsaPadding {
    /// Resolve the padding for an RSA record.
    ///
    /// PS256, PS384 and PS512 use PSS; RS1, RS256, RS384 and RS512 use
    /// PKCS#1 v1.5.
    ///
    /// # Errors
    ///
    /// Returns [`CoseKeyError::UnsupportedAlgorithmForKeyType`] for any
    /// other algorithm.
    pub fn resolve(algorithm: Algorithm) -> Result<Self, CoseKeyError> {
        match algorithm {
            Algorithm::Ps256 | Algorithm::Ps384 | Algorithm::Ps512 => Ok(RsaPadding::Pss),
            Algorithm::Rs1 | Algorithm::Rs256 | Algorithm::Rs384 | Algorithm::Rs512 => {
                Ok(RsaPadding::Pkcs1v15)
            }
            Algorithm::Es256
            | Algorithm::Es384
            | Algorithm::Es512
            | Algorithm::Es256K
            | Algorithm::EdDsa => Err(CoseKeyError::UnsupportedAlgorithmForKeyType {
                key_type: KeyType::Rsa,
                algorithm,
            }),
        }
    }
}

impl fmt::Display for RsaPadding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RsaPadding::Pss => "PSS",
            RsaPadding::Pkcs1v15 => "PKCS#1 v1.5",
        })
    }
}

/// Verifies RSA signatures for one public key.
#[derive(Debug, Clone)]
pub struct RsaVerifier {
    #[cfg(feature = "rsa")]
    key: RsaPublicKey,
    padding: RsaPadding,
    hash: HashAlgorithm,
}

impl RsaVerifier {
    /// Build a verifier from a big-endian modulus and exponent.
    ///
    /// # Errors
    ///
    /// Returns [`CoseKeyError::InvalidKeyMaterial`] if the primitive rejects
    /// the modulus or exponent, and [`CoseKeyError::PrimitiveUnavailable`]
    /// if RSA support was compiled out.
    #[cfg(feature = "rsa")]
    pub fn new(
        padding: RsaPadding,
        hash: HashAlgorithm,
        n: &[u8],
        e: &[u8],
    ) -> Result<Self, CoseKeyError> {
        let key = RsaPublicKey::new(BigUint::from_bytes_be(n), BigUint::from_bytes_be(e))
            .map_err(|error| CoseKeyError::InvalidKeyMaterial(error.to_string()))?;

        Ok(Self { key, padding, hash })
    }

    /// Build a verifier from a big-endian modulus and exponent.
    ///
    /// # Errors
    ///
    /// Always returns [`CoseKeyError::PrimitiveUnavailable`]: RSA support
    /// was compiled out.
    #[cfg(not(feature = "rsa"))]
    pub fn new(
        _padding: RsaPadding,
        _hash: HashAlgorithm,
        _n: &[u8],
        _e: &[u8],
    ) -> Result<Self, CoseKeyError> {
        Err(CoseKeyError::PrimitiveUnavailable("RSA"))
    }

    /// The padding this verifier checks.
    #[must_use]
    pub const fn padding(&self) -> RsaPadding {
        self.padding
    }

    /// The hash the message is digested with.
    #[must_use]
    pub const fn hash(&self) -> HashAlgorithm {
        self.hash
    }
}

impl Verifier for RsaVerifier {
    #[cfg(feature = "rsa")]
    fn verify(&self, message: &[u8], signature: &[u8]) -> Result<bool, CoseKeyError> {
        let digest = self.hash.digest(message);

        let verified = match self.padding {
            RsaPadding::Pss => self.key.verify(pss(self.hash), &digest, signature),
            RsaPadding::Pkcs1v15 => self.key.verify(pkcs1v15(self.hash), &digest, signature),
        };

        Ok(verified.is_ok())
    }

    #[cfg(not(feature = "rsa"))]
    fn verify(&self, _message: &[u8], _signature: &[u8]) -> Result<bool, CoseKeyError> {
        Err(CoseKeyError::PrimitiveUnavailable("RSA"))
    }
}

#[cfg(feature = "rsa")]
fn pss(hash: HashAlgorithm) -> Pss {
    match hash {
        HashAlgorithm::Sha1 => Pss::new::<Sha1>(),
        HashAlgorithm::Sha256 => Pss::new::<Sha256>(),
        HashAlgorithm::Sha384 => Pss::new::<Sha384>(),
        HashAlgorithm::Sha512 => Pss::new::<Sha512>(),
    }
}

#[cfg(feature = "rsa")]
fn pkcs1v15(hash: HashAlgorithm) -> Pkcs1v15Sign {
    match hash {
        HashAlgorithm::Sha1 => Pkcs1v15Sign::new::<Sha1>(),
        HashAlgorithm::Sha256 => Pkcs1v15Sign::new::<Sha256>(),
        HashAlgorithm::Sha384 => Pkcs1v15Sign::new::<Sha384>(),
        HashAlgorithm::Sha512 => Pkcs1v15Sign::new::<Sha512>(),
    }
}
