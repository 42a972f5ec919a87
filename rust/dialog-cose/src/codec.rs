//! Codec trait for encoding and decoding key parameter maps.

use crate::{
    error::CoseKeyError,
    parameters::{Parameters, Value},
};
use std::{
    error::Error,
    io::{BufRead, Write},
};

/// Codec trait for encoding and decoding the ordered parameter map of a
/// credential public key.
///
/// Implementations must preserve entry order and the distinction between
/// integers and byte strings, so that decoding an encoded map yields an
/// equal map.
pub trait Codec {
    /// Encoding error type.
    type EncodingError: Error;

    /// Decoding error type.
    type DecodingError: Error;

    /// Encode `parameters` to the given buffer.
    ///
    /// ## Errors
    ///
    /// If the encoding fails, it returns an error of type `Self::EncodingError`.
    fn encode_record<W: Write>(
        &self,
        parameters: &Parameters,
        buffer: &mut W,
    ) -> Result<(), Self::EncodingError>;

    /// Decode a parameter map from the given reader.
    ///
    /// Reads exactly one record and leaves anything after it unread.
    ///
    /// ## Errors
    ///
    /// If the decoding fails, it returns an error of type `Self::DecodingError`.
    fn decode_record<R: BufRead>(&self, reader: &mut R) -> Result<Parameters, Self::DecodingError>;
}

/// COSE_Key encoding: a definite-length CBOR map with integer labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cbor;

impl Codec for Cbor {
    type EncodingError = CoseKeyError;
    type DecodingError = CoseKeyError;

    fn encode_record<W: Write>(
        &self,
        parameters: &Parameters,
        buffer: &mut W,
    ) -> Result<(), Self::EncodingError> {
        let entries = parameters
            .iter()
            .map(|(label, value)| {
                let value = match value {
                    Value::Integer(integer) => ciborium::Value::Integer((*integer).into()),
                    Value::Bytes(bytes) => ciborium::Value::Bytes(bytes.clone()),
                };
                (ciborium::Value::Integer(label.into()), value)
            })
            .collect();

        ciborium::ser::into_writer(&ciborium::Value::Map(entries), buffer)
            .map_err(|error| CoseKeyError::Encode(format!("{error:?}")))
    }

    fn decode_record<R: BufRead>(&self, reader: &mut R) -> Result<Parameters, Self::DecodingError> {
        let value: ciborium::Value = ciborium::de::from_reader(reader)
            .map_err(|error| CoseKeyError::Decode(format!("{error:?}")))?;

        let ciborium::Value::Map(entries) = value else {
            return Err(CoseKeyError::Decode(
                "key record must be a CBOR map".to_string(),
            ));
        };

        let mut parameters = Parameters::new();
        for (label, value) in entries {
            let Some(label) = integer(label) else {
                return Err(malformed("parameter labels must be integers"));
            };
            let value = match value {
                ciborium::Value::Bytes(bytes) => Value::Bytes(bytes),
                value => match integer(value) {
                    Some(integer) => Value::Integer(integer),
                    None => {
                        return Err(malformed(&format!(
                            "parameter {label} must be an integer or a byte string"
                        )));
                    }
                },
            };
            parameters.insert(label, value)?;
        }

        Ok(parameters)
    }
}

fn integer(value: ciborium::Value) -> Option<i64> {
    match value {
        ciborium::Value::Integer(integer) => i64::try_from(integer).ok(),
        _ => None,
    }
}

fn malformed(reason: &str) -> CoseKeyError {
    CoseKeyError::MalformedParameters(reason.to_string())
}
