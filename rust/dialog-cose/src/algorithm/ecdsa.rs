//! ECDSA curve resolution and verification for EC2 keys.
//!
//! Signatures arrive as the fixed-length concatenation `r || s`, each
//! integer padded to the curve's field width. The message is hashed with
//! the algorithm's hash and handed to the curve's prehash verifier.

use super::{Algorithm, hash::HashAlgorithm};
use crate::{curve::Curve, error::CoseKeyError, key_type::KeyType, verifier::Verifier};
use std::fmt;

#[cfg(any(
    feature = "secp256r1",
    feature = "secp384r1",
    feature = "secp521r1",
    feature = "secp256k1"
))]
use signature::hazmat::PrehashVerifier;

/// Tag byte of an uncompressed SEC1 point.
#[cfg(any(
    feature = "secp256r1",
    feature = "secp384r1",
    feature = "secp521r1",
    feature = "secp256k1"
))]
const SEC1_UNCOMPRESSED: u8 = 0x04;

/// The named curve an EC2 record resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EcdsaCurve {
    /// NIST P-256.
    NistP256,
    /// NIST P-384.
    NistP384,
    /// NIST P-521.
    NistP521,
    /// SECG secp256k1.
    Secp256k1,
}

impl EcdsaCurve {
    /// Resolve the curve for an EC2 record.
    ///
    /// | Algorithm | Curve ids | Curve |
    /// |---|---|---|
    /// | ES256 | P-256, P-256K | NIST P-256 |
    /// | ES384 | P-384 | NIST P-384 |
    /// | ES512 | P-521 | NIST P-521 |
    /// | ES256K | P-256K | secp256k1 |
    ///
    /// # Errors
    ///
    /// Returns [`CoseKeyError::UnsupportedAlgorithmForKeyType`] for a
    /// non-ECDSA algorithm and [`CoseKeyError::UnsupportedCurve`] for any
    /// pair outside the table.
    pub fn resolve(algorithm: Algorithm, curve: i64) -> Result<Self, CoseKeyError> {
        if !matches!(
            algorithm,
            Algorithm::Es256 | Algorithm::Es384 | Algorithm::Es512 | Algorithm::Es256K
        ) {
            return Err(CoseKeyError::UnsupportedAlgorithmForKeyType {
                key_type: KeyType::Ec2,
                algorithm,
            });
        }

        match (algorithm, Curve::try_from(curve)?) {
            (Algorithm::Es256, Curve::P256 | Curve::P256K) => Ok(EcdsaCurve::NistP256),
            (Algorithm::Es384, Curve::P384) => Ok(EcdsaCurve::NistP384),
            (Algorithm::Es512, Curve::P521) => Ok(EcdsaCurve::NistP521),
            (Algorithm::Es256K, Curve::P256K) => Ok(EcdsaCurve::Secp256k1),
            (algorithm, curve) => Err(CoseKeyError::UnsupportedCurve(format!(
                "{curve} is not permitted for {algorithm}"
            ))),
        }
    }

    /// Size in bytes of a field element, and so of each coordinate and of
    /// each half of a signature.
    #[must_use]
    pub const fn field_len(self) -> usize {
        match self {
            EcdsaCurve::NistP256 | EcdsaCurve::Secp256k1 => 32,
            EcdsaCurve::NistP384 => 48,
            EcdsaCurve::NistP521 => 66,
        }
    }

    /// Size in bytes of an `r || s` signature.
    #[must_use]
    pub const fn signature_len(self) -> usize {
        2 * self.field_len()
    }
}

impl fmt::Display for EcdsaCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EcdsaCurve::NistP256 => "P-256",
            EcdsaCurve::NistP384 => "P-384",
            EcdsaCurve::NistP521 => "P-521",
            EcdsaCurve::Secp256k1 => "secp256k1",
        })
    }
}

#[derive(Clone)]
enum VerifyingKey {
    #[cfg(feature = "secp256r1")]
    P256(p256::ecdsa::VerifyingKey),
    #[cfg(feature = "secp384r1")]
    P384(p384::ecdsa::VerifyingKey),
    #[cfg(feature = "secp521r1")]
    P521(p521::ecdsa::VerifyingKey),
    #[cfg(feature = "secp256k1")]
    K256(k256::ecdsa::VerifyingKey),
}

impl fmt::Debug for VerifyingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            #[cfg(feature = "secp256r1")]
            VerifyingKey::P256(_) => f.debug_tuple("P256").finish_non_exhaustive(),
            #[cfg(feature = "secp384r1")]
            VerifyingKey::P384(_) => f.debug_tuple("P384").finish_non_exhaustive(),
            #[cfg(feature = "secp521r1")]
            VerifyingKey::P521(_) => f.debug_tuple("P521").finish_non_exhaustive(),
            #[cfg(feature = "secp256k1")]
            VerifyingKey::K256(_) => f.debug_tuple("K256").finish_non_exhaustive(),
        }
    }
}

/// Verifies `r || s` ECDSA signatures for one public point.
#[derive(Debug, Clone)]
pub struct EcdsaVerifier {
    key: VerifyingKey,
    #[cfg(any(
        feature = "secp256r1",
        feature = "secp384r1",
        feature = "secp521r1",
        feature = "secp256k1"
    ))]
    hash: HashAlgorithm,
}

#[cfg(any(
    feature = "secp256r1",
    feature = "secp384r1",
    feature = "secp521r1",
    feature = "secp256k1"
))]
impl EcdsaVerifier {
    /// Build a verifier from affine coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`CoseKeyError::InvalidKeyMaterial`] if a coordinate has the
    /// wrong width or the point is not on the curve, and
    /// [`CoseKeyError::PrimitiveUnavailable`] if the curve was compiled out.
    pub fn new(
        curve: EcdsaCurve,
        hash: HashAlgorithm,
        x: &[u8],
        y: &[u8],
    ) -> Result<Self, CoseKeyError> {
        let width = curve.field_len();
        if x.len() != width || y.len() != width {
            return Err(CoseKeyError::InvalidKeyMaterial(format!(
                "{curve} coordinates must be {width} bytes, got {} and {}",
                x.len(),
                y.len()
            )));
        }

        let mut sec1 = Vec::with_capacity(1 + 2 * width);
        sec1.push(SEC1_UNCOMPRESSED);
        sec1.extend_from_slice(x);
        sec1.extend_from_slice(y);

        let key = match curve {
            #[cfg(feature = "secp256r1")]
            EcdsaCurve::NistP256 => p256::ecdsa::VerifyingKey::from_sec1_bytes(&sec1)
                .map(VerifyingKey::P256)
                .map_err(|_| not_on_curve(curve))?,
            #[cfg(not(feature = "secp256r1"))]
            EcdsaCurve::NistP256 => return Err(unavailable(curve)),
            #[cfg(feature = "secp384r1")]
            EcdsaCurve::NistP384 => p384::ecdsa::VerifyingKey::from_sec1_bytes(&sec1)
                .map(VerifyingKey::P384)
                .map_err(|_| not_on_curve(curve))?,
            #[cfg(not(feature = "secp384r1"))]
            EcdsaCurve::NistP384 => return Err(unavailable(curve)),
            #[cfg(feature = "secp521r1")]
            EcdsaCurve::NistP521 => p521::ecdsa::VerifyingKey::from_sec1_bytes(&sec1)
                .map(VerifyingKey::P521)
                .map_err(|_| not_on_curve(curve))?,
            #[cfg(not(feature = "secp521r1"))]
            EcdsaCurve::NistP521 => return Err(unavailable(curve)),
            #[cfg(feature = "secp256k1")]
            EcdsaCurve::Secp256k1 => k256::ecdsa::VerifyingKey::from_sec1_bytes(&sec1)
                .map(VerifyingKey::K256)
                .map_err(|_| not_on_curve(curve))?,
            #[cfg(not(feature = "secp256k1"))]
            EcdsaCurve::Secp256k1 => return Err(unavailable(curve)),
        };

        Ok(Self { key, hash })
    }
}

#[cfg(not(any(
    feature = "secp256r1",
    feature = "secp384r1",
    feature = "secp521r1",
    feature = "secp256k1"
)))]
impl EcdsaVerifier {
    /// Build a verifier from affine coordinates.
    ///
    /// # Errors
    ///
    /// Always returns [`CoseKeyError::PrimitiveUnavailable`]: ECDSA support
    /// was compiled out.
    pub fn new(
        curve: EcdsaCurve,
        _hash: HashAlgorithm,
        _x: &[u8],
        _y: &[u8],
    ) -> Result<Self, CoseKeyError> {
        Err(unavailable(curve))
    }
}

impl Verifier for EcdsaVerifier {
    #[cfg(any(
        feature = "secp256r1",
        feature = "secp384r1",
        feature = "secp521r1",
        feature = "secp256k1"
    ))]
    fn verify(&self, message: &[u8], signature: &[u8]) -> Result<bool, CoseKeyError> {
        let digest = self.hash.digest(message);

        // A signature of the wrong width, or with a zero or out-of-range
        // scalar, is a mismatch rather than a configuration error.
        let verified = match &self.key {
            #[cfg(feature = "secp256r1")]
            VerifyingKey::P256(key) => p256::ecdsa::Signature::from_slice(signature)
                .is_ok_and(|signature| key.verify_prehash(&digest, &signature).is_ok()),
            #[cfg(feature = "secp384r1")]
            VerifyingKey::P384(key) => p384::ecdsa::Signature::from_slice(signature)
                .is_ok_and(|signature| key.verify_prehash(&digest, &signature).is_ok()),
            #[cfg(feature = "secp521r1")]
            VerifyingKey::P521(key) => p521::ecdsa::Signature::from_slice(signature)
                .is_ok_and(|signature| key.verify_prehash(&digest, &signature).is_ok()),
            #[cfg(feature = "secp256k1")]
            VerifyingKey::K256(key) => k256::ecdsa::Signature::from_slice(signature)
                .is_ok_and(|signature| key.verify_prehash(&digest, &signature).is_ok()),
        };

        Ok(verified)
    }

    #[cfg(not(any(
        feature = "secp256r1",
        feature = "secp384r1",
        feature = "secp521r1",
        feature = "secp256k1"
    )))]
    fn verify(&self, _message: &[u8], _signature: &[u8]) -> Result<bool, CoseKeyError> {
        match self.key {}
    }
}

#[cfg(any(
    feature = "secp256r1",
    feature = "secp384r1",
    feature = "secp521r1",
    feature = "secp256k1"
))]
fn not_on_curve(curve: EcdsaCurve) -> CoseKeyError {
    CoseKeyError::InvalidKeyMaterial(format!("point is not on {curve}"))
}

#[cfg(not(all(
    feature = "secp256r1",
    feature = "secp384r1",
    feature = "secp521r1",
    feature = "secp256k1"
)))]
fn unavailable(curve: EcdsaCurve) -> CoseKeyError {
    CoseKeyError::PrimitiveUnavailable(match curve {
        EcdsaCurve::NistP256 => "P-256",
        EcdsaCurve::NistP384 => "P-384",
        EcdsaCurve::NistP521 => "P-521",
        EcdsaCurve::Secp256k1 => "secp256k1",
    })
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_resolves_every_permitted_pair() {
        let table = [
            (Algorithm::Es256, Curve::P256, EcdsaCurve::NistP256),
            (Algorithm::Es256, Curve::P256K, EcdsaCurve::NistP256),
            (Algorithm::Es384, Curve::P384, EcdsaCurve::NistP384),
            (Algorithm::Es512, Curve::P521, EcdsaCurve::NistP521),
            (Algorithm::Es256K, Curve::P256K, EcdsaCurve::Secp256k1),
        ];

        for (algorithm, curve, expected) in table {
            assert_eq!(EcdsaCurve::resolve(algorithm, curve.value()), Ok(expected));
        }
    }

    #[test]
    fn it_rejects_every_other_pair() {
        let algorithms = [
            Algorithm::Es256,
            Algorithm::Es384,
            Algorithm::Es512,
            Algorithm::Es256K,
        ];
        let permitted = [
            (Algorithm::Es256, Curve::P256),
            (Algorithm::Es256, Curve::P256K),
            (Algorithm::Es384, Curve::P384),
            (Algorithm::Es512, Curve::P521),
            (Algorithm::Es256K, Curve::P256K),
        ];

        for algorithm in algorithms {
            for curve in 1..=8 {
                let curve = Curve::try_from(curve).unwrap();
                if permitted.contains(&(algorithm, curve)) {
                    continue;
                }
                assert!(
                    matches!(
                        EcdsaCurve::resolve(algorithm, curve.value()),
                        Err(CoseKeyError::UnsupportedCurve(_))
                    ),
                    "{algorithm} with {curve} should not resolve"
                );
            }
        }
    }

    #[test]
    fn it_rejects_non_ecdsa_algorithms() {
        assert_eq!(
            EcdsaCurve::resolve(Algorithm::Ps256, Curve::P256.value()),
            Err(CoseKeyError::UnsupportedAlgorithmForKeyType {
                key_type: KeyType::Ec2,
                algorithm: Algorithm::Ps256,
            })
        );
        assert!(matches!(
            EcdsaCurve::resolve(Algorithm::EdDsa, Curve::Ed25519.value()),
            Err(CoseKeyError::UnsupportedAlgorithmForKeyType { .. })
        ));
    }

    #[test]
    fn it_sizes_signatures_by_field_width() {
        assert_eq!(EcdsaCurve::NistP256.signature_len(), 64);
        assert_eq!(EcdsaCurve::NistP384.signature_len(), 96);
        assert_eq!(EcdsaCurve::NistP521.signature_len(), 132);
        assert_eq!(EcdsaCurve::Secp256k1.signature_len(), 64);
    }

    #[cfg(feature = "secp256r1")]
    #[test]
    fn it_rejects_a_point_off_the_curve() {
        let result = EcdsaVerifier::new(
            EcdsaCurve::NistP256,
            HashAlgorithm::Sha256,
            &[1u8; 32],
            &[1u8; 32],
        );
        assert!(matches!(result, Err(CoseKeyError::InvalidKeyMaterial(_))));
    }

    #[cfg(feature = "secp256r1")]
    #[test]
    fn it_rejects_short_coordinates() {
        let result = EcdsaVerifier::new(
            EcdsaCurve::NistP256,
            HashAlgorithm::Sha256,
            &[1u8; 31],
            &[1u8; 32],
        );
        assert!(matches!(result, Err(CoseKeyError::InvalidKeyMaterial(_))));
    }

    #[cfg(feature = "secp256r1")]
    #[test]
    fn it_treats_a_truncated_signature_as_a_mismatch() {
        use p256::ecdsa::SigningKey;
        use signature::Signer;

        let signing_key = SigningKey::from_slice(&[7u8; 32]).unwrap();
        let point = signing_key.verifying_key().to_encoded_point(false);
        let verifier = EcdsaVerifier::new(
            EcdsaCurve::NistP256,
            HashAlgorithm::Sha256,
            point.x().unwrap(),
            point.y().unwrap(),
        )
        .unwrap();

        let signature: p256::ecdsa::Signature = signing_key.sign(b"message");
        let bytes = signature.to_bytes();

        assert_eq!(verifier.verify(b"message", &bytes), Ok(true));
        assert_eq!(verifier.verify(b"message", &bytes[..63]), Ok(false));
        assert_eq!(verifier.verify(b"message", &[0u8; 64]), Ok(false));
    }

    #[cfg(feature = "secp521r1")]
    #[test]
    fn it_formats_a_p521_verifier_by_curve() {
        let mut secret = [0x3bu8; 66];
        secret[0] = 0x00;
        let signing_key = p521::ecdsa::SigningKey::from_slice(&secret).unwrap();
        let point = p521::ecdsa::VerifyingKey::from(&signing_key).to_encoded_point(false);
        let verifier = EcdsaVerifier::new(
            EcdsaCurve::NistP521,
            HashAlgorithm::Sha512,
            point.x().unwrap(),
            point.y().unwrap(),
        )
        .unwrap();

        let formatted = format!("{verifier:?}");
        assert!(formatted.contains("P521"), "{formatted}");
        assert!(formatted.contains("Sha512"), "{formatted}");
    }

    #[cfg(not(feature = "secp384r1"))]
    #[test]
    fn it_reports_a_compiled_out_curve_as_unavailable() {
        let result = EcdsaVerifier::new(
            EcdsaCurve::NistP384,
            HashAlgorithm::Sha384,
            &[1u8; 48],
            &[2u8; 48],
        );
        assert!(matches!(result, Err(CoseKeyError::PrimitiveUnavailable("P-384"))));
    }
}
