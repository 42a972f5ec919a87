//! COSE key types.

use crate::error::CoseKeyError;
use std::fmt;

/// The key families a credential public key may belong to.
///
/// Discriminants are the values registered for the `kty` label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    /// Octet key pair (Ed25519 and friends).
    Okp = 1,
    /// Elliptic curve key with x and y coordinates.
    Ec2 = 2,
    /// RSA key.
    Rsa = 3,
}

impl KeyType {
    /// The registered `kty` value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self as i64
    }
}

impl TryFrom<i64> for KeyType {
    type Error = CoseKeyError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(KeyType::Okp),
            2 => Ok(KeyType::Ec2),
            3 => Ok(KeyType::Rsa),
            other => Err(CoseKeyError::UnsupportedKeyType(other)),
        }
    }
}

impl From<KeyType> for i64 {
    fn from(key_type: KeyType) -> Self {
        key_type.value()
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            KeyType::Okp => "OKP",
            KeyType::Ec2 => "EC2",
            KeyType::Rsa => "RSA",
        })
    }
}
