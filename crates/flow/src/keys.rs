// SPDX-FileCopyrightText: 2022 Profian Inc. <opensource@profian.com>
// SPDX-License-Identifier: Apache-2.0

use anyhow::{bail, Context, Result};
use const_oid::db::rfc5912::{
    ID_EC_PUBLIC_KEY as ECPK, SECP_256_R_1 as P256, SECP_384_R_1 as P384,
};
use const_oid::ObjectIdentifier;
use der::Decode;
use sec1::pkcs8::PrivateKeyInfo;
use sigcodec::Curve;
use spki::SubjectPublicKeyInfo;

fn curve(oids: (ObjectIdentifier, Option<ObjectIdentifier>)) -> Result<Curve> {
    match oids {
        (ECPK, Some(P256)) => Ok(Curve::P256),
        (ECPK, Some(P384)) => Ok(Curve::P384),
        (ECPK, Some(oid)) => bail!("unsupported curve {oid}"),
        (ECPK, None) => bail!("missing curve parameters"),
        (oid, ..) => bail!("unexpected public key type {oid}"),
    }
}

pub trait PrivateKeyInfoExt {
    /// Get the named curve of an EC private key
    fn curve(&self) -> Result<Curve>;
}

impl PrivateKeyInfoExt for PrivateKeyInfo<'_> {
    fn curve(&self) -> Result<Curve> {
        curve(self.algorithm.oids()?)
    }
}

pub trait SubjectPublicKeyInfoExt {
    /// Get the named curve of an EC public key
    fn curve(&self) -> Result<Curve>;
}

impl SubjectPublicKeyInfoExt for SubjectPublicKeyInfo<'_> {
    fn curve(&self) -> Result<Curve> {
        curve(self.algorithm.oids()?)
    }
}

/// Reads the curve of a PKCS#8 DER private key.
pub fn private_key_curve(pkcs8: &[u8]) -> Result<Curve> {
    PrivateKeyInfo::from_der(pkcs8)
        .context("invalid PKCS#8 private key")?
        .curve()
}

/// Reads the curve of an SPKI DER public key.
pub fn public_key_curve(spki: &[u8]) -> Result<Curve> {
    SubjectPublicKeyInfo::from_der(spki)
        .context("invalid SPKI public key")?
        .curve()
}
