//! Signature verification trait and the dispatch over resolved primitives.

use crate::{
    algorithm::{ecdsa::EcdsaVerifier, eddsa::Ed25519Verifier, rsa::RsaVerifier},
    error::CoseKeyError,
    parameters::KeyMaterial,
    resolver::Primitive,
};

/// Verifies that a signature is valid for a message.
///
/// `Ok(false)` means the signature does not match, which is an ordinary
/// outcome. `Err` means the key or its configuration cannot be used to
/// verify anything.
pub trait Verifier {
    /// Verify `signature` over `message`.
    ///
    /// # Errors
    ///
    /// Returns a [`CoseKeyError`] when the key cannot be resolved or its
    /// material is rejected by the primitive.
    fn verify(&self, message: &[u8], signature: &[u8]) -> Result<bool, CoseKeyError>;
}

/// A verifier for one of the supported key families.
#[derive(Debug, Clone)]
pub enum PrimitiveVerifier {
    /// ECDSA verifier for EC2 keys.
    Ecdsa(EcdsaVerifier),
    /// RSA verifier.
    Rsa(RsaVerifier),
    /// Ed25519 verifier for OKP keys.
    Ed25519(Ed25519Verifier),
}

impl PrimitiveVerifier {
    /// Instantiate the primitive for the given key material.
    ///
    /// # Errors
    ///
    /// Returns [`CoseKeyError::MalformedParameters`] if the material belongs
    /// to a different key family than the primitive, and whatever the
    /// family's constructor reports for rejected key material.
    pub fn new(primitive: Primitive, material: KeyMaterial<'_>) -> Result<Self, CoseKeyError> {
        match (primitive, material) {
            (Primitive::Ecdsa { curve, hash }, KeyMaterial::Ec2 { x, y, .. }) => {
                EcdsaVerifier::new(curve, hash, x, y).map(PrimitiveVerifier::Ecdsa)
            }
            (Primitive::Rsa { padding, hash }, KeyMaterial::Rsa { n, e }) => {
                RsaVerifier::new(padding, hash, n, e).map(PrimitiveVerifier::Rsa)
            }
            (Primitive::EdDsa { .. }, KeyMaterial::Okp { x, .. }) => {
                Ed25519Verifier::new(x).map(PrimitiveVerifier::Ed25519)
            }
            (primitive, _) => Err(CoseKeyError::MalformedParameters(format!(
                "key material does not belong to a {} key",
                primitive.key_type()
            ))),
        }
    }
}

impl Verifier for PrimitiveVerifier {
    fn verify(&self, message: &[u8], signature: &[u8]) -> Result<bool, CoseKeyError> {
        match self {
            PrimitiveVerifier::Ecdsa(verifier) => verifier.verify(message, signature),
            PrimitiveVerifier::Rsa(verifier) => verifier.verify(message, signature),
            PrimitiveVerifier::Ed25519(verifier) => verifier.verify(message, signature),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::{hash::HashAlgorithm, rsa::RsaPadding};

    #[test]
    fn it_rejects_material_from_another_family() {
        let material = KeyMaterial::Okp {
            curve: 6,
            x: &[0u8; 32],
        };
        let primitive = Primitive::Rsa {
            padding: RsaPadding::Pss,
            hash: HashAlgorithm::Sha256,
        };

        assert!(matches!(
            PrimitiveVerifier::new(primitive, material),
            Err(CoseKeyError::MalformedParameters(_))
        ));
    }
}
