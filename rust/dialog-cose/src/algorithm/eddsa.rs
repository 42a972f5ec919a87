//! EdDSA resolution and verification for OKP keys.
//!
//! Credentials bound to EdDSA are verified over the SHA-512 digest of the
//! message rather than over the message itself: producers hash the data
//! with SHA-512 and sign the 64-byte digest with Ed25519. The digest is
//! what Ed25519 verifies here, so signatures over the raw message do not
//! verify.

use super::Algorithm;
use crate::{curve::Curve, error::CoseKeyError, key_type::KeyType, verifier::Verifier};
use std::fmt;

#[cfg(feature = "edwards25519")]
use {super::hash::HashAlgorithm, signature::Verifier as _};

/// Length of an Ed25519 public key.
pub const ED25519_PUBLIC_KEY_LEN: usize = 32;

/// The Edwards curve an OKP record resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdwardsCurve {
    /// Ed25519.
    Ed25519,
}

impl EdwardsCurve {
    /// Resolve the curve for an OKP record. Only EdDSA over Ed25519 is
    /// supported.
    ///
    /// # Errors
    ///
    /// Returns [`CoseKeyError::UnsupportedAlgorithmForKeyType`] for an
    /// algorithm other than EdDSA and [`CoseKeyError::UnsupportedCurve`] for
    /// a curve other than Ed25519.
    pub fn resolve(algorithm: Algorithm, curve: i64) -> Result<Self, CoseKeyError> {
        if algorithm != Algorithm::EdDsa {
            return Err(CoseKeyError::UnsupportedAlgorithmForKeyType {
                key_type: KeyType::Okp,
                algorithm,
            });
        }

        match Curve::try_from(curve)? {
            Curve::Ed25519 => Ok(EdwardsCurve::Ed25519),
            other => Err(CoseKeyError::UnsupportedCurve(format!(
                "{other} is not permitted for {algorithm}"
            ))),
        }
    }
}

impl fmt::Display for EdwardsCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Ed25519")
    }
}

/// Verifies pre-hashed Ed25519 signatures for one public key.
#[derive(Debug, Clone)]
pub struct Ed25519Verifier {
    #[cfg(feature = "edwards25519")]
    key: ed25519_dalek::VerifyingKey,
}

impl Ed25519Verifier {
    /// Build a verifier from the raw 32-byte public key.
    ///
    /// # Errors
    ///
    /// Returns [`CoseKeyError::InvalidKeyMaterial`] if the bytes are not a
    /// valid Ed25519 point.
    #[cfg(feature = "edwards25519")]
    pub fn new(x: &[u8]) -> Result<Self, CoseKeyError> {
        let bytes: [u8; ED25519_PUBLIC_KEY_LEN] = x.try_into().map_err(|_| {
            CoseKeyError::InvalidKeyMaterial(format!(
                "Ed25519 public key must be {ED25519_PUBLIC_KEY_LEN} bytes, got {}",
                x.len()
            ))
        })?;
        let key = ed25519_dalek::VerifyingKey::from_bytes(&bytes)
            .map_err(|error| CoseKeyError::InvalidKeyMaterial(error.to_string()))?;

        Ok(Self { key })
    }

    /// Build a verifier from the raw 32-byte public key.
    ///
    /// # Errors
    ///
    /// Always returns [`CoseKeyError::PrimitiveUnavailable`]: Ed25519
    /// support was compiled out.
    #[cfg(not(feature = "edwards25519"))]
    pub fn new(_x: &[u8]) -> Result<Self, CoseKeyError> {
        Err(CoseKeyError::PrimitiveUnavailable("Ed25519"))
    }
}

impl Verifier for Ed25519Verifier {
    #[cfg(feature = "edwards25519")]
    fn verify(&self, message: &[u8], signature: &[u8]) -> Result<bool, CoseKeyError> {
        let Ok(signature) = ed25519_dalek::Signature::from_slice(signature) else {
            return Ok(false);
        };
        let digest = HashAlgorithm::Sha512.digest(message);

        Ok(self.key.verify(&digest, &signature).is_ok())
    }

    #[cfg(not(feature = "edwards25519"))]
    fn verify(&self, _message: &[u8], _signature: &[u8]) -> Result<bool, CoseKeyError> {
        Err(CoseKeyError::PrimitiveUnavailable("Ed25519"))
    }
}
