// SPDX-FileCopyrightText: 2022 Profian Inc. <opensource@profian.com>
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use anyhow::{anyhow, bail, Result};
use der::Decode;
use p256::pkcs8::{DecodePrivateKey, EncodePrivateKey, EncodePublicKey};
use signature::{Signer, Verifier};
use sigcodec::Curve;
use spki::SubjectPublicKeyInfo;
use tracing::debug;
use zeroize::Zeroizing;

/// A freshly generated key pair.
#[derive(Clone)]
pub struct KeyPair {
    /// The DER encoding of the `PrivateKeyInfo` (PKCS#8).
    pub private_key: Zeroizing<Vec<u8>>,

    /// The DER encoding of the `SubjectPublicKeyInfo`.
    pub public_key: Vec<u8>,
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("private_key", &"<redacted>")
            .field("public_key", &self.public_key)
            .finish()
    }
}

/// The cryptographic primitives the signing and verification flows rely on.
///
/// Signatures cross this interface in P1363 form (`r‖s`), which is what
/// platform crypto APIs produce and consume. Converting to and from DER is
/// left to the flows.
pub trait CryptoProvider {
    /// Generates a key pair on the given curve.
    fn generate(&self, curve: Curve) -> Result<KeyPair>;

    /// Signs the message with a PKCS#8 private key
    ///
    /// The digest is implied by the curve: SHA-256 for P-256 and SHA-384
    /// for P-384.
    fn sign(&self, curve: Curve, private_key: &[u8], message: &[u8]) -> Result<Vec<u8>>;

    /// Verifies a P1363 signature with an SPKI public key
    ///
    /// Returns `Ok(false)` when the signature does not match. Keys or
    /// signatures that cannot be decoded are errors.
    fn verify(&self, curve: Curve, public_key: &[u8], message: &[u8], signature: &[u8])
        -> Result<bool>;
}

impl<P: CryptoProvider + ?Sized> CryptoProvider for &P {
    fn generate(&self, curve: Curve) -> Result<KeyPair> {
        (**self).generate(curve)
    }

    fn sign(&self, curve: Curve, private_key: &[u8], message: &[u8]) -> Result<Vec<u8>> {
        (**self).sign(curve, private_key, message)
    }

    fn verify(
        &self,
        curve: Curve,
        public_key: &[u8],
        message: &[u8],
        signature: &[u8],
    ) -> Result<bool> {
        (**self).verify(curve, public_key, message, signature)
    }
}

/// ECDSA backed by the RustCrypto `p256` and `p384` crates.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ecdsa;

impl CryptoProvider for Ecdsa {
    fn generate(&self, curve: Curve) -> Result<KeyPair> {
        let mut rand = rand::thread_rng();

        let (private_key, public_key) = match curve {
            Curve::P256 => {
                let key = p256::SecretKey::random(&mut rand);
                (
                    key.to_pkcs8_der().map_err(|e| anyhow!("{:?}", e))?,
                    key.public_key()
                        .to_public_key_der()
                        .map_err(|e| anyhow!("{:?}", e))?,
                )
            }

            Curve::P384 => {
                let key = p384::SecretKey::random(&mut rand);
                (
                    key.to_pkcs8_der().map_err(|e| anyhow!("{:?}", e))?,
                    key.public_key()
                        .to_public_key_der()
                        .map_err(|e| anyhow!("{:?}", e))?,
                )
            }

            _ => bail!("unsupported curve {curve}"),
        };

        Ok(KeyPair {
            private_key: private_key.to_bytes(),
            public_key: public_key.as_bytes().to_vec(),
        })
    }

    fn sign(&self, curve: Curve, private_key: &[u8], message: &[u8]) -> Result<Vec<u8>> {
        match curve {
            Curve::P256 => {
                let key = p256::SecretKey::from_pkcs8_der(private_key)
                    .map_err(|e| anyhow!("{:?}", e))?;
                let sign_key = p256::ecdsa::SigningKey::from(key);
                let signed: p256::ecdsa::Signature = sign_key.sign(message);
                Ok(signed.to_bytes().to_vec())
            }

            Curve::P384 => {
                let key = p384::SecretKey::from_pkcs8_der(private_key)
                    .map_err(|e| anyhow!("{:?}", e))?;
                let sign_key = p384::ecdsa::SigningKey::from(key);
                let signed: p384::ecdsa::Signature = sign_key.sign(message);
                Ok(signed.to_bytes().to_vec())
            }

            _ => bail!("unsupported curve {curve}"),
        }
    }

    fn verify(
        &self,
        curve: Curve,
        public_key: &[u8],
        message: &[u8],
        signature: &[u8],
    ) -> Result<bool> {
        let spki = SubjectPublicKeyInfo::from_der(public_key)?;

        if signature.len() != curve.signature_len() {
            bail!(
                "invalid {curve} signature length {}, expected {}",
                signature.len(),
                curve.signature_len()
            );
        }

        match curve {
            Curve::P256 => {
                let vkey = p256::ecdsa::VerifyingKey::from_sec1_bytes(spki.subject_public_key)?;
                let sig = match p256::ecdsa::Signature::try_from(signature) {
                    Ok(sig) => sig,
                    Err(e) => {
                        debug!("signature scalars out of range: {e}");
                        return Ok(false);
                    }
                };
                Ok(vkey.verify(message, &sig).is_ok())
            }

            Curve::P384 => {
                let vkey = p384::ecdsa::VerifyingKey::from_sec1_bytes(spki.subject_public_key)?;
                let sig = match p384::ecdsa::Signature::try_from(signature) {
                    Ok(sig) => sig,
                    Err(e) => {
                        debug!("signature scalars out of range: {e}");
                        return Ok(false);
                    }
                };
                Ok(vkey.verify(message, &sig).is_ok())
            }

            _ => bail!("unsupported curve {curve}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;
    use rstest::rstest;

    // RFC 6979, A.2.5 and A.2.6.
    const P256_KEY: [u8; 32] =
        hex!("c9afa9d845ba75166b5c215767b1d6934e50c3db36e89b127b8a622b120f6721");
    const P384_KEY: [u8; 48] = hex!(
        "6b9d3dad2e1b8c1c05b19875b6659f4de23c3b667bf297ba9aa47740787137d896d5724e4c70a825f872c9ea60d2edf5"
    );

    fn p256_pkcs8() -> Zeroizing<Vec<u8>> {
        p256::SecretKey::from_be_bytes(&P256_KEY)
            .unwrap()
            .to_pkcs8_der()
            .unwrap()
            .to_bytes()
    }

    fn p384_pkcs8() -> Zeroizing<Vec<u8>> {
        p384::SecretKey::from_be_bytes(&P384_KEY)
            .unwrap()
            .to_pkcs8_der()
            .unwrap()
            .to_bytes()
    }

    #[test]
    fn rfc6979_p256() {
        let raw = Ecdsa.sign(Curve::P256, &p256_pkcs8(), b"sample").unwrap();
        assert_eq!(
            raw,
            hex!(
                "efd48b2aacb6a8fd1140dd9cd45e81d69d2c877b56aaf991c34d0ea84eaf3716
                 f7cb1c942d657c41d436c7a1b6e29f65f3e900dbb9aff4064dc4ab2f843acda8"
            )
        );

        let raw = Ecdsa.sign(Curve::P256, &p256_pkcs8(), b"test").unwrap();
        assert_eq!(
            raw,
            hex!(
                "f1abb023518351cd71d881567b1ea663ed3efcf6c5132b354f28d3b0b7d38367
                 019f4113742a2b14bd25926b49c649155f267e60d3814b4c0cc84250e46f0083"
            )
        );
    }

    #[test]
    fn rfc6979_p384() {
        let raw = Ecdsa.sign(Curve::P384, &p384_pkcs8(), b"sample").unwrap();
        assert_eq!(
            raw,
            hex!(
                "94edbb92a5ecb8aad4736e56c691916b3f88140666ce9fa73d64c4ea95ad133c81a648152e44acf96e36dd1e80fabe46
                 99ef4aeb15f178cea1fe40db2603138f130e740a19624526203b6351d0a3a94fa329c145786e679e7b82c71a38628ac8"
            )
        );
    }

    #[rstest]
    #[case(Curve::P256)]
    #[case(Curve::P384)]
    fn sign_verify(#[case] curve: Curve) {
        let pair = Ecdsa.generate(curve).unwrap();
        let raw = Ecdsa.sign(curve, &pair.private_key, b"message").unwrap();
        assert_eq!(raw.len(), curve.signature_len());

        assert!(Ecdsa.verify(curve, &pair.public_key, b"message", &raw).unwrap());
        assert!(!Ecdsa.verify(curve, &pair.public_key, b"massage", &raw).unwrap());

        let other = Ecdsa.generate(curve).unwrap();
        assert!(!Ecdsa.verify(curve, &other.public_key, b"message", &raw).unwrap());
    }

    #[test]
    fn zero_scalars_do_not_verify() {
        let pair = Ecdsa.generate(Curve::P256).unwrap();
        assert!(!Ecdsa
            .verify(Curve::P256, &pair.public_key, b"message", &[0u8; 64])
            .unwrap());
    }

    #[test]
    fn errors() {
        let pair = Ecdsa.generate(Curve::P256).unwrap();
        assert!(Ecdsa.sign(Curve::P384, &pair.private_key, b"message").is_err());
        assert!(Ecdsa.sign(Curve::P256, &pair.public_key, b"message").is_err());
        assert!(Ecdsa
            .verify(Curve::P256, &pair.private_key, b"message", &[1u8; 64])
            .is_err());
        assert!(Ecdsa
            .verify(Curve::P384, &pair.public_key, b"message", &[1u8; 96])
            .is_err());

        let err = Ecdsa
            .verify(Curve::P256, &pair.public_key, b"message", &[1u8; 63])
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid P-256 signature length 63, expected 64"
        );
    }

    #[test]
    fn debug_hides_private_key() {
        let pair = Ecdsa.generate(Curve::P256).unwrap();
        let debug = format!("{pair:?}");
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("private_key: ["));
    }
}
