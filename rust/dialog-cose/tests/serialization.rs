//! Byte-level round trips of key records through the CBOR codec.

use dialog_cose::{
    Algorithm, Cbor, CoseKeyError, CredentialPublicKey, Curve, KeyType, Parameters, Value,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::io::Cursor;
use testresult::TestResult;

fn round_trip(key: &CredentialPublicKey) -> Result<CredentialPublicKey, CoseKeyError> {
    CredentialPublicKey::from_bytes(&key.to_bytes()?)
}

#[test]
fn it_round_trips_each_key_family() -> TestResult {
    let keys = [
        CredentialPublicKey::ec2(Algorithm::Es256, Curve::P256, [0x11u8; 32], [0x22u8; 32]),
        CredentialPublicKey::rsa(Algorithm::Ps256, vec![0xc7u8; 256], vec![1u8, 0, 1]),
        CredentialPublicKey::okp(Algorithm::EdDsa, Curve::Ed25519, [0x33u8; 32]),
    ];

    for key in keys {
        let bytes = key.to_bytes()?;
        let decoded = CredentialPublicKey::from_bytes(&bytes)?;

        assert_eq!(decoded.key_type(), key.key_type());
        assert_eq!(decoded.algorithm(), key.algorithm());
        assert_eq!(decoded.parameters(), key.parameters());
        assert_eq!(decoded.to_bytes()?, bytes);
    }
    Ok(())
}

#[test]
fn it_decodes_a_cose_key_from_an_authenticator() -> TestResult {
    // {1: 2, 3: -7, -1: 1, -2: h'01..', -3: h'02..'}
    let mut bytes = vec![0xa5, 0x01, 0x02, 0x03, 0x26, 0x20, 0x01, 0x21, 0x58, 0x20];
    bytes.extend([0x01u8; 32]);
    bytes.extend([0x22, 0x58, 0x20]);
    bytes.extend([0x02u8; 32]);

    let key = CredentialPublicKey::from_bytes(&bytes)?;

    assert_eq!(key.key_type(), KeyType::Ec2);
    assert_eq!(key.algorithm(), Algorithm::Es256);
    assert_eq!(
        key,
        CredentialPublicKey::ec2(Algorithm::Es256, Curve::P256, [0x01u8; 32], [0x02u8; 32])
    );
    assert_eq!(key.to_bytes()?, bytes);
    Ok(())
}

#[test]
fn it_preserves_label_order_from_the_wire() -> TestResult {
    let mut parameters = Parameters::new();
    parameters.insert(3, -8i64)?;
    parameters.insert(-2, vec![0x44u8; 32])?;
    parameters.insert(1, 1i64)?;
    parameters.insert(-1, 6i64)?;

    let key = CredentialPublicKey::from_parameters(parameters.clone())?;
    let decoded = round_trip(&key)?;

    let labels: Vec<i64> = decoded
        .parameters()
        .iter()
        .map(|(label, _)| label)
        .collect();
    assert_eq!(labels, vec![3, -2, 1, -1]);
    assert_eq!(decoded.parameters(), &parameters);

    // Same entries in canonical order are a different record.
    assert_ne!(
        decoded,
        CredentialPublicKey::okp(Algorithm::EdDsa, Curve::Ed25519, [0x44u8; 32])
    );
    Ok(())
}

#[test]
fn it_decodes_through_an_explicit_codec() -> TestResult {
    let key = CredentialPublicKey::rsa(Algorithm::Rs1, vec![0xe3u8; 128], vec![3u8]);

    let mut buffer = Vec::new();
    key.encode_with(&Cbor, &mut buffer)?;
    let decoded = CredentialPublicKey::decode_with(&Cbor, &mut Cursor::new(buffer))?;

    assert_eq!(decoded, key);
    Ok(())
}

#[test]
fn it_rejects_records_with_a_private_scalar() -> TestResult {
    let mut parameters = Parameters::new();
    parameters.insert(1, 1i64)?;
    parameters.insert(3, -8i64)?;
    parameters.insert(-1, 6i64)?;
    parameters.insert(-2, vec![0x44u8; 32])?;
    parameters.insert(-4, vec![0x55u8; 32])?;

    let mut bytes = Vec::new();
    dialog_cose::Codec::encode_record(&Cbor, &parameters, &mut bytes)?;

    assert!(matches!(
        CredentialPublicKey::from_bytes(&bytes),
        Err(CoseKeyError::MalformedParameters(_))
    ));
    Ok(())
}

#[test]
fn it_rejects_input_that_is_not_cbor() {
    assert!(matches!(
        CredentialPublicKey::from_bytes(&[0xff, 0x00]),
        Err(CoseKeyError::Decode(_))
    ));
    assert!(matches!(
        CredentialPublicKey::from_bytes(&[]),
        Err(CoseKeyError::Decode(_))
    ));
}

#[test]
fn it_rejects_mistyped_family_parameters() -> TestResult {
    let mut parameters = Parameters::new();
    parameters.insert(1, 3i64)?;
    parameters.insert(3, -257i64)?;
    parameters.insert(-1, Value::Integer(65537))?;
    parameters.insert(-2, vec![1u8, 0, 1])?;

    assert!(matches!(
        CredentialPublicKey::from_parameters(parameters),
        Err(CoseKeyError::MalformedParameters(_))
    ));
    Ok(())
}

fn any_algorithm() -> impl Strategy<Value = Algorithm> {
    prop_oneof![
        Just(Algorithm::Es256),
        Just(Algorithm::EdDsa),
        Just(Algorithm::Es384),
        Just(Algorithm::Es512),
        Just(Algorithm::Ps256),
        Just(Algorithm::Ps384),
        Just(Algorithm::Ps512),
        Just(Algorithm::Es256K),
        Just(Algorithm::Rs256),
        Just(Algorithm::Rs384),
        Just(Algorithm::Rs512),
        Just(Algorithm::Rs1),
    ]
}

fn any_curve() -> impl Strategy<Value = Curve> {
    prop_oneof![
        Just(Curve::P256),
        Just(Curve::P384),
        Just(Curve::P521),
        Just(Curve::X25519),
        Just(Curve::X448),
        Just(Curve::Ed25519),
        Just(Curve::Ed448),
        Just(Curve::P256K),
    ]
}

fn bytes() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..300)
}

fn any_key() -> impl Strategy<Value = CredentialPublicKey> {
    prop_oneof![
        (any_algorithm(), any_curve(), bytes(), bytes())
            .prop_map(|(algorithm, curve, x, y)| CredentialPublicKey::ec2(algorithm, curve, x, y)),
        (any_algorithm(), bytes(), bytes())
            .prop_map(|(algorithm, n, e)| CredentialPublicKey::rsa(algorithm, n, e)),
        (any_algorithm(), any_curve(), bytes())
            .prop_map(|(algorithm, curve, x)| CredentialPublicKey::okp(algorithm, curve, x)),
    ]
}

proptest! {
    #[test]
    fn it_round_trips_any_record(key in any_key()) {
        let bytes = key.to_bytes().map_err(|error| TestCaseError::fail(error.to_string()))?;
        let decoded = CredentialPublicKey::from_bytes(&bytes)
            .map_err(|error| TestCaseError::fail(error.to_string()))?;

        prop_assert_eq!(&decoded, &key);
        prop_assert_eq!(decoded.to_bytes().ok(), Some(bytes));
    }
}
