// SPDX-FileCopyrightText: 2022 Profian Inc. <opensource@profian.com>
// SPDX-License-Identifier: Apache-2.0

use hex_literal::hex;
use p256::ecdsa::signature::Verifier as _;
use p256::pkcs8::EncodePrivateKey;
use rstest::rstest;
use sigbridge_flow::sigcodec::{Curve, Error};
use sigbridge_flow::{Accept, Config, CryptoProvider, Ecdsa, Signer, Verifier};

// RFC 6979 A.2.5, message "sample".
const PRIVATE: [u8; 32] = hex!("c9afa9d845ba75166b5c215767b1d6934e50c3db36e89b127b8a622b120f6721");
const SAMPLE: [u8; 72] = hex!(
    "3046
     022100efd48b2aacb6a8fd1140dd9cd45e81d69d2c877b56aaf991c34d0ea84eaf3716
     022100f7cb1c942d657c41d436c7a1b6e29f65f3e900dbb9aff4064dc4ab2f843acda8"
);

fn pkcs8() -> Vec<u8> {
    let key = p256::SecretKey::from_be_bytes(&PRIVATE).unwrap();
    key.to_pkcs8_der().unwrap().as_bytes().to_vec()
}

#[test]
fn deterministic_signature() {
    let der = Signer::new(Ecdsa, Config::default())
        .sign(&pkcs8(), b"sample")
        .unwrap();
    assert_eq!(der, SAMPLE);
}

#[test]
fn interoperates_with_p256() {
    let key = p256::SecretKey::from_be_bytes(&PRIVATE).unwrap();
    let vkey = p256::ecdsa::VerifyingKey::from(key.public_key());

    let der = Signer::new(Ecdsa, Config::default())
        .sign(&pkcs8(), b"interop")
        .unwrap();
    let sig = p256::ecdsa::Signature::from_der(&der).unwrap();
    vkey.verify(b"interop", &sig).unwrap();
}

#[rstest]
#[case(Curve::P256)]
#[case(Curve::P384)]
fn policy_file(#[case] curve: Curve) {
    let config: Config = toml::from_str(include_str!("../testdata/sigbridge.toml")).unwrap();
    assert_eq!(config.accept, Accept::Der);

    let key = Ecdsa.generate(curve).unwrap();
    let signed = Signer::new(Ecdsa, config.clone()).sign(&key.private_key, b"message");

    if curve == Curve::P384 {
        let der = signed.unwrap();
        let verifier = Verifier::new(Ecdsa, config);
        assert!(verifier.verify(&key.public_key, b"message", &der).unwrap());

        let raw = curve.to_p1363(&der).unwrap();
        let err = verifier
            .verify(&key.public_key, b"message", &raw)
            .unwrap_err();
        assert!(err.downcast_ref::<Error>().is_some());
    } else {
        assert!(signed.is_err());
    }
}

#[test]
fn p1363_round_trip() {
    let key = Ecdsa.generate(Curve::P256).unwrap();
    let raw = Ecdsa.sign(Curve::P256, &key.private_key, b"message").unwrap();

    let der = Curve::P256.to_der(&raw).unwrap();
    assert_eq!(Curve::P256.to_p1363(&der).unwrap(), raw);

    let verifier = Verifier::new(Ecdsa, Config::default());
    assert!(verifier.verify(&key.public_key, b"message", &der).unwrap());
    assert!(verifier.verify(&key.public_key, b"message", &raw).unwrap());
}
