//! The credential public key record.

use crate::{
    algorithm::Algorithm,
    codec::{Cbor, Codec},
    curve::Curve,
    error::CoseKeyError,
    key_type::KeyType,
    parameters::{KeyMaterial, Parameters, Value, label},
    resolver::Primitive,
    verifier::{PrimitiveVerifier, Verifier},
};
use std::io::{BufRead, Cursor};

/// A COSE public key bound to a single signature algorithm.
///
/// The record keeps the complete parameter map it was built from, in
/// order, so that encoding it reproduces the original bytes. The key type
/// and algorithm are read out of that map once, at construction; the
/// primitive configuration is derived again on every use.
///
/// ```
/// use dialog_cose::{Algorithm, CredentialPublicKey, Curve, KeyType};
///
/// let key = CredentialPublicKey::ec2(Algorithm::Es256, Curve::P256, [1u8; 32], [2u8; 32]);
/// let bytes = key.to_bytes()?;
/// let decoded = CredentialPublicKey::from_bytes(&bytes)?;
///
/// assert_eq!(decoded, key);
/// assert_eq!(decoded.key_type(), KeyType::Ec2);
/// # Ok::<_, dialog_cose::CoseKeyError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialPublicKey {
    key_type: KeyType,
    algorithm: Algorithm,
    parameters: Parameters,
}

impl CredentialPublicKey {
    /// Build a record from a complete parameter map.
    ///
    /// # Errors
    ///
    /// - [`CoseKeyError::MalformedParameters`] if `kty` or `alg` is missing
    ///   or not an integer, or the family-specific labels are not exactly
    ///   the ones the key type requires.
    /// - [`CoseKeyError::UnsupportedKeyType`] / [`CoseKeyError::UnsupportedAlgorithm`]
    ///   for unregistered `kty` / `alg` values.
    pub fn from_parameters(parameters: Parameters) -> Result<Self, CoseKeyError> {
        let key_type = KeyType::try_from(parameters.integer(label::KTY)?)?;
        let algorithm = Algorithm::try_from(parameters.integer(label::ALG)?)?;
        KeyMaterial::from_parameters(key_type, &parameters)?;

        Ok(Self {
            key_type,
            algorithm,
            parameters,
        })
    }

    /// An EC2 key for the point `(x, y)` on `curve`.
    pub fn ec2(
        algorithm: Algorithm,
        curve: Curve,
        x: impl Into<Vec<u8>>,
        y: impl Into<Vec<u8>>,
    ) -> Self {
        Self::from_entries(
            KeyType::Ec2,
            algorithm,
            [
                (label::CRV, Value::Integer(curve.value())),
                (label::X, Value::Bytes(x.into())),
                (label::Y, Value::Bytes(y.into())),
            ],
        )
    }

    /// An RSA key with big-endian modulus `n` and exponent `e`.
    pub fn rsa(algorithm: Algorithm, n: impl Into<Vec<u8>>, e: impl Into<Vec<u8>>) -> Self {
        Self::from_entries(
            KeyType::Rsa,
            algorithm,
            [
                (label::N, Value::Bytes(n.into())),
                (label::E, Value::Bytes(e.into())),
            ],
        )
    }

    /// An OKP key with public key bytes `x` on `curve`.
    pub fn okp(algorithm: Algorithm, curve: Curve, x: impl Into<Vec<u8>>) -> Self {
        Self::from_entries(
            KeyType::Okp,
            algorithm,
            [
                (label::CRV, Value::Integer(curve.value())),
                (label::X, Value::Bytes(x.into())),
            ],
        )
    }

    // The labels passed here are distinct and complete for the key type,
    // so the map is valid by construction.
    fn from_entries<const N: usize>(
        key_type: KeyType,
        algorithm: Algorithm,
        material: [(i64, Value); N],
    ) -> Self {
        let parameters = [
            (label::KTY, Value::Integer(key_type.value())),
            (label::ALG, Value::Integer(algorithm.value())),
        ]
        .into_iter()
        .chain(material)
        .collect();

        Self {
            key_type,
            algorithm,
            parameters,
        }
    }

    /// Decode a record from CBOR bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CoseKeyError::Decode`] if the bytes are not a single CBOR
    /// map (trailing bytes included), and any error
    /// [`CredentialPublicKey::from_parameters`] reports for the decoded map.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CoseKeyError> {
        let mut cursor = Cursor::new(bytes);
        let key = Self::from_reader(&mut cursor)?;

        let consumed = cursor.position();
        if consumed != bytes.len() as u64 {
            return Err(CoseKeyError::Decode(format!(
                "{} trailing bytes after key record",
                bytes.len() as u64 - consumed
            )));
        }

        Ok(key)
    }

    /// Decode one record from a CBOR stream, leaving the rest of the stream
    /// unread.
    ///
    /// # Errors
    ///
    /// Same as [`CredentialPublicKey::from_bytes`], minus the trailing
    /// bytes check.
    pub fn from_reader<R: BufRead>(reader: &mut R) -> Result<Self, CoseKeyError> {
        Self::decode_with(&Cbor, reader)
    }

    /// Decode one record with a custom codec.
    ///
    /// # Errors
    ///
    /// Returns the codec's error, or any error
    /// [`CredentialPublicKey::from_parameters`] reports.
    pub fn decode_with<C, R>(codec: &C, reader: &mut R) -> Result<Self, CoseKeyError>
    where
        C: Codec,
        R: BufRead,
        CoseKeyError: From<C::DecodingError>,
    {
        Self::from_parameters(codec.decode_record(reader)?)
    }

    /// Encode the record to CBOR bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CoseKeyError::Encode`] if serialization fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CoseKeyError> {
        let mut buffer = Vec::new();
        self.encode_with(&Cbor, &mut buffer)?;
        Ok(buffer)
    }

    /// Encode the record with a custom codec.
    ///
    /// # Errors
    ///
    /// Returns the codec's encoding error.
    pub fn encode_with<C: Codec, W: std::io::Write>(
        &self,
        codec: &C,
        buffer: &mut W,
    ) -> Result<(), C::EncodingError> {
        codec.encode_record(&self.parameters, buffer)
    }

    /// The key family.
    #[must_use]
    pub const fn key_type(&self) -> KeyType {
        self.key_type
    }

    /// The algorithm this key is bound to.
    #[must_use]
    pub const fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Whether this key is bound to `algorithm`.
    #[must_use]
    pub fn algorithm_eq(&self, algorithm: Algorithm) -> bool {
        self.algorithm == algorithm
    }

    /// The full parameter map, in order.
    #[must_use]
    pub const fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// The public key material.
    ///
    /// # Errors
    ///
    /// Never fails for a constructed record; the material was checked when
    /// the record was built.
    pub fn material(&self) -> Result<KeyMaterial<'_>, CoseKeyError> {
        KeyMaterial::from_parameters(self.key_type, &self.parameters)
    }

    /// Resolve the primitive configuration for this key.
    ///
    /// # Errors
    ///
    /// See [`Primitive::resolve`].
    pub fn primitive(&self) -> Result<Primitive, CoseKeyError> {
        Primitive::resolve(self.key_type, self.algorithm, self.material()?.curve())
    }

    /// Instantiate the verifier for this key.
    ///
    /// # Errors
    ///
    /// Returns resolution errors, and [`CoseKeyError::InvalidKeyMaterial`]
    /// or [`CoseKeyError::PrimitiveUnavailable`] from the primitive.
    pub fn verifier(&self) -> Result<PrimitiveVerifier, CoseKeyError> {
        PrimitiveVerifier::new(self.primitive()?, self.material()?)
    }
}

impl Verifier for CredentialPublicKey {
    fn verify(&self, message: &[u8], signature: &[u8]) -> Result<bool, CoseKeyError> {
        let verified = self.verifier()?.verify(message, signature)?;
        tracing::trace!(
            key_type = %self.key_type,
            algorithm = %self.algorithm,
            verified,
            "verified signature"
        );
        Ok(verified)
    }
}

impl TryFrom<&[u8]> for CredentialPublicKey {
    type Error = CoseKeyError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(bytes)
    }
}

impl serde::Serialize for CredentialPublicKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let bytes = self.to_bytes().map_err(serde::ser::Error::custom)?;
        serde_bytes::serialize(&bytes, serializer)
    }
}

impl<'de> serde::Deserialize<'de> for CredentialPublicKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bytes: serde_bytes::ByteBuf = serde::Deserialize::deserialize(deserializer)?;
        Self::from_bytes(&bytes).map_err(serde::de::Error::custom)
    }
}
