// SPDX-FileCopyrightText: 2022 Profian Inc. <opensource@profian.com>
// SPDX-License-Identifier: Apache-2.0

use crate::config::{Accept, Config};
use crate::keys::public_key_curve;
use crate::provider::CryptoProvider;

use anyhow::{bail, Result};
use sigcodec::{Curve, Error};
use tracing::debug;

/// Normalizes an incoming signature to P1363.
pub fn to_p1363(curve: Curve, accept: Accept, signature: &[u8]) -> Result<Vec<u8>, Error> {
    let expected = curve.signature_len();

    match accept {
        Accept::Der => curve.to_p1363(signature),

        Accept::P1363 if signature.len() == expected => Ok(signature.to_vec()),
        Accept::P1363 => Err(Error::InvalidLength {
            expected,
            actual: signature.len(),
        }),

        Accept::Any => match curve.to_p1363(signature) {
            Err(e) if signature.len() == expected => {
                debug!("not DER ({e}), using the signature as P1363");
                Ok(signature.to_vec())
            }
            other => other,
        },
    }
}

/// Verifies DER or P1363 signatures with a provider that verifies P1363.
#[derive(Clone, Debug)]
pub struct Verifier<P> {
    provider: P,
    config: Config,
}

impl<P: CryptoProvider> Verifier<P> {
    pub fn new(provider: P, config: Config) -> Self {
        Self { provider, config }
    }

    /// Verifies a signature with an SPKI DER public key
    ///
    /// Returns `Ok(false)` if the signature does not match the message.
    /// Malformed keys and signatures are errors and never verify.
    pub fn verify(&self, public_key: &[u8], message: &[u8], signature: &[u8]) -> Result<bool> {
        if public_key.is_empty() || message.is_empty() || signature.is_empty() {
            bail!("public key, message and signature are required");
        }

        let curve = public_key_curve(public_key)?;
        self.config.check(curve)?;

        let raw = to_p1363(curve, self.config.accept, signature).map_err(|e| {
            debug!("rejected {curve} signature: {e}");
            e
        })?;

        let valid = self.provider.verify(curve, public_key, message, &raw)?;
        debug!(%curve, valid, "verified message");
        Ok(valid)
    }
}
