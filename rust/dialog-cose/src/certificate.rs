//! Import of credential public keys from parsed certificates.
//!
//! The importer does not parse X.509 itself. It reads the raw key numbers
//! through [`CertificatePublicKey`], which certificate parsers implement,
//! and takes the signature algorithm from the caller: a certificate names
//! its key type but not the algorithm the credential is bound to.

use crate::{
    algorithm::Algorithm, curve::Curve, error::CoseKeyError, key::CredentialPublicKey,
    key_type::KeyType,
};

/// `id-ecPublicKey`.
pub const EC_PUBLIC_KEY_OID: &str = "1.2.840.10045.2.1";

/// `rsaEncryption`.
pub const RSA_ENCRYPTION_OID: &str = "1.2.840.113549.1.1.1";

/// RSA public key numbers, big-endian.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPublicKeyParameters {
    /// Modulus.
    pub modulus: Vec<u8>,
    /// Public exponent.
    pub exponent: Vec<u8>,
}

/// EC public key numbers: the named curve and the affine coordinates of
/// the point, big-endian.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EcPublicKeyParameters {
    /// Curve name as reported by the certificate parser, e.g. `P-256` or
    /// `secp256r1`.
    pub curve_name: String,
    /// x coordinate.
    pub x: Vec<u8>,
    /// y coordinate.
    pub y: Vec<u8>,
}

/// Read access to the public key of a parsed certificate.
pub trait CertificatePublicKey {
    /// Dotted OID of the subject public key algorithm.
    fn public_key_algorithm(&self) -> &str;

    /// RSA key numbers, if the key is an RSA key.
    fn rsa_public_key(&self) -> Option<RsaPublicKeyParameters>;

    /// EC key numbers, if the key is an EC key.
    fn ec_public_key(&self) -> Option<EcPublicKeyParameters>;
}

/// An already extracted certificate public key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CertificateKey {
    /// RSA key.
    Rsa(RsaPublicKeyParameters),
    /// EC key.
    Ec(EcPublicKeyParameters),
    /// Key with some other algorithm, identified by OID.
    Other(String),
}

impl CertificatePublicKey for CertificateKey {
    fn public_key_algorithm(&self) -> &str {
        match self {
            CertificateKey::Rsa(_) => RSA_ENCRYPTION_OID,
            CertificateKey::Ec(_) => EC_PUBLIC_KEY_OID,
            CertificateKey::Other(oid) => oid,
        }
    }

    fn rsa_public_key(&self) -> Option<RsaPublicKeyParameters> {
        match self {
            CertificateKey::Rsa(parameters) => Some(parameters.clone()),
            _ => None,
        }
    }

    fn ec_public_key(&self) -> Option<EcPublicKeyParameters> {
        match self {
            CertificateKey::Ec(parameters) => Some(parameters.clone()),
            _ => None,
        }
    }
}

fn key_type_for(oid: &str) -> Result<KeyType, CoseKeyError> {
    match oid {
        EC_PUBLIC_KEY_OID => Ok(KeyType::Ec2),
        RSA_ENCRYPTION_OID => Ok(KeyType::Rsa),
        other => Err(CoseKeyError::UnrecognizedKeyAlgorithm(other.to_string())),
    }
}

impl CredentialPublicKey {
    /// Build a record from a certificate's public key, bound to `algorithm`.
    ///
    /// OKP keys cannot be imported this way. The algorithm is not checked
    /// against the key type here; that happens when the key is resolved.
    ///
    /// # Errors
    ///
    /// - [`CoseKeyError::UnrecognizedKeyAlgorithm`] if the key algorithm is
    ///   neither `id-ecPublicKey` nor `rsaEncryption`.
    /// - [`CoseKeyError::UnsupportedCurve`] if the EC curve name is not one
    ///   of P-256, secp256k1, P-384 or P-521.
    /// - [`CoseKeyError::MalformedParameters`] if the certificate does not
    ///   expose the numbers for its declared key algorithm.
    pub fn from_certificate(
        certificate: &impl CertificatePublicKey,
        algorithm: Algorithm,
    ) -> Result<Self, CoseKeyError> {
        let oid = certificate.public_key_algorithm();
        let imported = key_type_for(oid).and_then(|key_type| match key_type {
            KeyType::Rsa => {
                let rsa = certificate.rsa_public_key().ok_or_else(|| missing(key_type))?;
                Ok(CredentialPublicKey::rsa(algorithm, rsa.modulus, rsa.exponent))
            }
            KeyType::Ec2 => {
                let ec = certificate.ec_public_key().ok_or_else(|| missing(key_type))?;
                let curve = Curve::from_name(&ec.curve_name)?;
                Ok(CredentialPublicKey::ec2(algorithm, curve, ec.x, ec.y))
            }
            KeyType::Okp => Err(CoseKeyError::UnrecognizedKeyAlgorithm(oid.to_string())),
        });

        if let Err(error) = &imported {
            tracing::warn!(oid, %algorithm, %error, "unable to import certificate public key");
        }

        imported
    }
}

fn missing(key_type: KeyType) -> CoseKeyError {
    CoseKeyError::MalformedParameters(format!("certificate has no {key_type} public key"))
}
