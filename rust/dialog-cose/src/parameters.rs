//! Ordered COSE key parameters and the typed view over them.

use crate::{error::CoseKeyError, key_type::KeyType};
use indexmap::IndexMap;

/// Well-known COSE key labels.
///
/// Positive labels are common to every key type; negative labels are
/// interpreted according to the key type, so several of them share a value.
pub mod label {
    /// Key type (`kty`).
    pub const KTY: i64 = 1;
    /// Key identifier (`kid`).
    pub const KID: i64 = 2;
    /// Algorithm (`alg`).
    pub const ALG: i64 = 3;
    /// Permitted key operations (`key_ops`).
    pub const KEY_OPS: i64 = 4;
    /// Base IV (`Base IV`).
    pub const BASE_IV: i64 = 5;

    /// EC2 and OKP curve identifier.
    pub const CRV: i64 = -1;
    /// EC2 x coordinate, or the OKP public key.
    pub const X: i64 = -2;
    /// EC2 y coordinate.
    pub const Y: i64 = -3;

    /// RSA modulus.
    pub const N: i64 = -1;
    /// RSA public exponent.
    pub const E: i64 = -2;
}

/// A parameter value: COSE public keys only need integers and byte strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// A signed integer.
    Integer(i64),
    /// A byte string.
    Bytes(Vec<u8>),
}

impl Value {
    /// The integer, if this value is one.
    #[must_use]
    pub const fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(value) => Some(*value),
            Value::Bytes(_) => None,
        }
    }

    /// The byte string, if this value is one.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(bytes) => Some(bytes),
            Value::Integer(_) => None,
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Value::Bytes(bytes)
    }
}

impl From<&[u8]> for Value {
    fn from(bytes: &[u8]) -> Self {
        Value::Bytes(bytes.to_vec())
    }
}

/// Label → value map that remembers insertion order.
///
/// Order is significant: encoding emits entries in the order they were
/// inserted (or decoded), and two maps are only equal when they hold the
/// same entries in the same order.
#[derive(Debug, Clone, Default)]
pub struct Parameters(IndexMap<i64, Value>);

impl Parameters {
    /// Create an empty parameter map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    ///
    /// # Errors
    ///
    /// Returns [`CoseKeyError::MalformedParameters`] if `label` is already
    /// present. A COSE key never carries the same label twice.
    pub fn insert(&mut self, label: i64, value: impl Into<Value>) -> Result<(), CoseKeyError> {
        if self.0.contains_key(&label) {
            return Err(CoseKeyError::MalformedParameters(format!(
                "duplicate parameter {label}"
            )));
        }
        self.0.insert(label, value.into());
        Ok(())
    }

    /// Get the value stored under `label`.
    #[must_use]
    pub fn get(&self, label: i64) -> Option<&Value> {
        self.0.get(&label)
    }

    /// Get an integer parameter.
    ///
    /// # Errors
    ///
    /// Returns [`CoseKeyError::MalformedParameters`] if the label is absent
    /// or holds a byte string.
    pub fn integer(&self, label: i64) -> Result<i64, CoseKeyError> {
        match self.get(label) {
            Some(Value::Integer(value)) => Ok(*value),
            Some(Value::Bytes(_)) => Err(CoseKeyError::MalformedParameters(format!(
                "parameter {label} must be an integer"
            ))),
            None => Err(CoseKeyError::MalformedParameters(format!(
                "missing parameter {label}"
            ))),
        }
    }

    /// Get a byte string parameter.
    ///
    /// # Errors
    ///
    /// Returns [`CoseKeyError::MalformedParameters`] if the label is absent
    /// or holds an integer.
    pub fn bytes(&self, label: i64) -> Result<&[u8], CoseKeyError> {
        match self.get(label) {
            Some(Value::Bytes(bytes)) => Ok(bytes),
            Some(Value::Integer(_)) => Err(CoseKeyError::MalformedParameters(format!(
                "parameter {label} must be a byte string"
            ))),
            None => Err(CoseKeyError::MalformedParameters(format!(
                "missing parameter {label}"
            ))),
        }
    }

    /// Iterate entries in order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, &Value)> {
        self.0.iter().map(|(label, value)| (*label, value))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Collects entries in order. A repeated label keeps its first position
/// and takes the last value, so build from distinct labels.
impl FromIterator<(i64, Value)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (i64, Value)>>(entries: I) -> Self {
        Self(entries.into_iter().collect())
    }
}

impl PartialEq for Parameters {
    fn eq(&self, other: &Self) -> bool {
        self.0.iter().eq(other.0.iter())
    }
}

impl Eq for Parameters {}

/// The public key material of a record, viewed by key family.
///
/// Borrowed out of [`Parameters`]; constructing one checks that the
/// family-specific (negative) labels are exactly the ones the key type
/// requires, with the required value types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMaterial<'a> {
    /// Elliptic curve point given by affine coordinates.
    Ec2 {
        /// Declared `crv` value.
        curve: i64,
        /// Big-endian x coordinate.
        x: &'a [u8],
        /// Big-endian y coordinate.
        y: &'a [u8],
    },
    /// RSA modulus and exponent.
    Rsa {
        /// Big-endian modulus.
        n: &'a [u8],
        /// Big-endian public exponent.
        e: &'a [u8],
    },
    /// Octet key pair public key.
    Okp {
        /// Declared `crv` value.
        curve: i64,
        /// Encoded public key.
        x: &'a [u8],
    },
}

impl<'a> KeyMaterial<'a> {
    /// Read the material for `key_type` out of `parameters`.
    ///
    /// # Errors
    ///
    /// Returns [`CoseKeyError::MalformedParameters`] when a required label
    /// is missing or mistyped, or when a family-specific label that a public
    /// key must not carry (such as the private scalar `d`) is present.
    pub fn from_parameters(
        key_type: KeyType,
        parameters: &'a Parameters,
    ) -> Result<Self, CoseKeyError> {
        let expected: &[i64] = match key_type {
            KeyType::Ec2 => &[label::CRV, label::X, label::Y],
            KeyType::Rsa => &[label::N, label::E],
            KeyType::Okp => &[label::CRV, label::X],
        };

        if let Some(unexpected) = parameters
            .iter()
            .map(|(label, _)| label)
            .find(|label| *label < 0 && !expected.contains(label))
        {
            return Err(CoseKeyError::MalformedParameters(format!(
                "unexpected parameter {unexpected} for {key_type} key"
            )));
        }

        Ok(match key_type {
            KeyType::Ec2 => KeyMaterial::Ec2 {
                curve: parameters.integer(label::CRV)?,
                x: parameters.bytes(label::X)?,
                y: parameters.bytes(label::Y)?,
            },
            KeyType::Rsa => KeyMaterial::Rsa {
                n: parameters.bytes(label::N)?,
                e: parameters.bytes(label::E)?,
            },
            KeyType::Okp => KeyMaterial::Okp {
                curve: parameters.integer(label::CRV)?,
                x: parameters.bytes(label::X)?,
            },
        })
    }

    /// The declared curve, for the families that have one.
    #[must_use]
    pub const fn curve(&self) -> Option<i64> {
        match self {
            KeyMaterial::Ec2 { curve, .. } | KeyMaterial::Okp { curve, .. } => Some(*curve),
            KeyMaterial::Rsa { .. } => None,
        }
    }
}
