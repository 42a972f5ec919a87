//! COSE elliptic curve identifiers.

use crate::error::CoseKeyError;
use std::fmt;

/// Curves registered for the `crv` label.
///
/// Only some of these resolve to a verifier; see
/// [`Primitive::resolve`](crate::Primitive::resolve) for which
/// algorithm/curve pairs are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Curve {
    /// NIST P-256, also known as secp256r1.
    P256 = 1,
    /// NIST P-384.
    P384 = 2,
    /// NIST P-521.
    P521 = 3,
    /// X25519 for ECDH.
    X25519 = 4,
    /// X448 for ECDH.
    X448 = 5,
    /// Ed25519 for EdDSA.
    Ed25519 = 6,
    /// Ed448 for EdDSA.
    Ed448 = 7,
    /// SECG secp256k1.
    P256K = 8,
}

impl Curve {
    /// The registered `crv` value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self as i64
    }

    /// Look up a curve by the name a certificate reports for it.
    ///
    /// Only the four curves that certificates can carry for EC2 keys are
    /// recognized.
    ///
    /// # Errors
    ///
    /// Returns [`CoseKeyError::UnsupportedCurve`] for any other name.
    pub fn from_name(name: &str) -> Result<Self, CoseKeyError> {
        match name {
            "P-256" | "secp256r1" | "prime256v1" => Ok(Curve::P256),
            "secp256k1" => Ok(Curve::P256K),
            "P-384" | "secp384r1" => Ok(Curve::P384),
            "P-521" | "secp521r1" => Ok(Curve::P521),
            other => Err(CoseKeyError::UnsupportedCurve(format!(
                "unrecognized curve name {other:?}"
            ))),
        }
    }
}

impl TryFrom<i64> for Curve {
    type Error = CoseKeyError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Curve::P256),
            2 => Ok(Curve::P384),
            3 => Ok(Curve::P521),
            4 => Ok(Curve::X25519),
            5 => Ok(Curve::X448),
            6 => Ok(Curve::Ed25519),
            7 => Ok(Curve::Ed448),
            8 => Ok(Curve::P256K),
            other => Err(CoseKeyError::UnsupportedCurve(format!(
                "unregistered curve id {other}"
            ))),
        }
    }
}

impl From<Curve> for i64 {
    fn from(curve: Curve) -> Self {
        curve.value()
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Curve::P256 => "P-256",
            Curve::P384 => "P-384",
            Curve::P521 => "P-521",
            Curve::X25519 => "X25519",
            Curve::X448 => "X448",
            Curve::Ed25519 => "Ed25519",
            Curve::Ed448 => "Ed448",
            Curve::P256K => "P-256K",
        })
    }
}
