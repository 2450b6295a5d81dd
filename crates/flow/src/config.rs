// SPDX-FileCopyrightText: 2022 Profian Inc. <opensource@profian.com>
// SPDX-License-Identifier: Apache-2.0

use std::path::Path;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;
use sigcodec::Curve;

/// Signature encodings accepted by the verification flow.
#[derive(Clone, Copy, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Accept {
    /// ASN.1 DER `ECDSA-Sig-Value` only.
    Der,

    /// Fixed-width `r‖s` only.
    P1363,

    /// DER, falling back to P1363 for inputs of exactly the raw length.
    ///
    /// DER takes precedence: a P1363 signature whose bytes also happen to
    /// parse as DER is read as DER.
    #[default]
    Any,
}

impl FromStr for Accept {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "der" => Ok(Accept::Der),
            "p1363" | "raw" => Ok(Accept::P1363),
            "any" => Ok(Accept::Any),
            _ => Err(anyhow!("unknown signature encoding `{s}`")),
        }
    }
}

#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Restricts keys to a single curve.
    ///
    /// Keys on any supported curve are used when unset.
    pub curve: Option<Curve>,

    /// Encodings accepted for incoming signatures.
    #[serde(default)]
    pub accept: Accept,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let config = std::fs::read_to_string(path).context("failed to read config file")?;
        toml::from_str(&config).context("failed to parse config")
    }

    /// Checks a key's curve against the configured one.
    pub fn check(&self, curve: Curve) -> Result<()> {
        match self.curve {
            Some(pinned) if pinned != curve => {
                bail!("key is on {curve}, but only {pinned} is accepted")
            }
            _ => Ok(()),
        }
    }
}
