//! COSE credential public keys.
//!
//! A [`CredentialPublicKey`] holds the [COSE_Key] parameter map of an EC2,
//! RSA or OKP public key bound to one signature algorithm, and verifies
//! signatures made with it. Keys are built from decoded CBOR, from a
//! certificate's public key, or directly from key numbers.
//!
//! ```
//! use dialog_cose::{Algorithm, CredentialPublicKey, Curve};
//!
//! let key = CredentialPublicKey::okp(Algorithm::EdDsa, Curve::Ed25519, [0u8; 32]);
//! let restored = CredentialPublicKey::from_bytes(&key.to_bytes()?)?;
//!
//! assert_eq!(restored, key);
//! assert!(restored.algorithm_eq(Algorithm::EdDsa));
//! # Ok::<_, dialog_cose::CoseKeyError>(())
//! ```
//!
//! Verification returns `Ok(false)` for a signature that does not match and
//! an error when the key itself cannot be used, such as an algorithm that
//! does not belong to the key type or a curve the algorithm does not permit.
//!
//! [COSE_Key]: https://www.rfc-editor.org/rfc/rfc9052#section-7

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod algorithm;
pub mod certificate;
pub mod codec;
pub mod curve;
pub mod error;
pub mod key;
pub mod key_type;
pub mod parameters;
pub mod resolver;
pub mod verifier;

pub use algorithm::{
    Algorithm, ecdsa::EcdsaCurve, eddsa::EdwardsCurve, hash::HashAlgorithm, rsa::RsaPadding,
};
pub use certificate::{
    CertificateKey, CertificatePublicKey, EC_PUBLIC_KEY_OID, EcPublicKeyParameters,
    RSA_ENCRYPTION_OID, RsaPublicKeyParameters,
};
pub use codec::{Cbor, Codec};
pub use curve::Curve;
pub use error::CoseKeyError;
pub use key::CredentialPublicKey;
pub use key_type::KeyType;
pub use parameters::{KeyMaterial, Parameters, Value};
pub use resolver::Primitive;
pub use verifier::{PrimitiveVerifier, Verifier};
