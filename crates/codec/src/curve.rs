// SPDX-FileCopyrightText: 2022 Profian Inc. <opensource@profian.com>
// SPDX-License-Identifier: Apache-2.0

use core::fmt;
use core::str::FromStr;

use displaydoc::Display;
use thiserror::Error;

use crate::{decode_der_to_p1363, encode_p1363_as_der, Result};

/// Named curves with a fixed scalar size.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String"))]
#[non_exhaustive]
pub enum Curve {
    /// NIST P-256 (secp256r1), used with SHA-256.
    #[default]
    P256,

    /// NIST P-384 (secp384r1), used with SHA-384.
    P384,
}

impl Curve {
    pub const ALL: [Curve; 2] = [Curve::P256, Curve::P384];

    /// Byte length of each of `r` and `s`.
    pub const fn scalar_size(self) -> usize {
        match self {
            Curve::P256 => 32,
            Curve::P384 => 48,
        }
    }

    /// Byte length of a P1363 signature on this curve.
    pub const fn signature_len(self) -> usize {
        2 * self.scalar_size()
    }

    pub const fn name(self) -> &'static str {
        match self {
            Curve::P256 => "P-256",
            Curve::P384 => "P-384",
        }
    }

    pub fn to_der(self, raw: &[u8]) -> Result<Vec<u8>> {
        encode_p1363_as_der(raw, self.scalar_size())
    }

    pub fn to_p1363(self, der: &[u8]) -> Result<Vec<u8>> {
        decode_der_to_p1363(der, self.scalar_size())
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// unknown curve `{0}`
#[derive(Clone, Debug, Display, Error, Eq, PartialEq)]
pub struct UnknownCurve(pub String);

impl FromStr for Curve {
    type Err = UnknownCurve;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "p256" | "p-256" | "secp256r1" | "prime256v1" | "es256" => Ok(Curve::P256),
            "p384" | "p-384" | "secp384r1" | "es384" => Ok(Curve::P384),
            _ => Err(UnknownCurve(s.into())),
        }
    }
}

impl TryFrom<String> for Curve {
    type Error = UnknownCurve;

    fn try_from(value: String) -> core::result::Result<Self, Self::Error> {
        value.parse()
    }
}
