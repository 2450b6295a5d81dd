// SPDX-FileCopyrightText: 2022 Profian Inc. <opensource@profian.com>
// SPDX-License-Identifier: Apache-2.0

use crate::config::Config;
use crate::keys::private_key_curve;
use crate::provider::CryptoProvider;

use anyhow::{bail, Context, Result};
use tracing::debug;

/// Produces DER signatures from a provider that signs in P1363 form.
#[derive(Clone, Debug)]
pub struct Signer<P> {
    provider: P,
    config: Config,
}

impl<P: CryptoProvider> Signer<P> {
    pub fn new(provider: P, config: Config) -> Self {
        Self { provider, config }
    }

    /// Signs the message with a PKCS#8 DER private key
    ///
    /// Returns the DER encoding of the signature as it would appear in an
    /// X.509 certificate or a PKCS#10 certification request.
    pub fn sign(&self, private_key: &[u8], message: &[u8]) -> Result<Vec<u8>> {
        if message.is_empty() {
            bail!("message is required");
        }

        let curve = private_key_curve(private_key)?;
        self.config.check(curve)?;

        let raw = self.provider.sign(curve, private_key, message)?;
        let der = curve
            .to_der(&raw)
            .context("provider returned a malformed signature")?;

        debug!(%curve, len = der.len(), "signed message");
        Ok(der)
    }
}
