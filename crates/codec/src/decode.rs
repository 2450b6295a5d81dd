// SPDX-FileCopyrightText: 2022 Profian Inc. <opensource@profian.com>
// SPDX-License-Identifier: Apache-2.0

use crate::integer::{unpad, INTEGER, MAX_SHORT_LEN, SEQUENCE};
use crate::{raw_len, Error, Result};

trait Tlv {
    /// Splits off one short-form TLV with the given tag.
    ///
    /// Returns the value and the bytes following it.
    fn tlv(&self, tag: u8) -> Result<(&[u8], &[u8])>;
}

impl Tlv for [u8] {
    fn tlv(&self, tag: u8) -> Result<(&[u8], &[u8])> {
        let (len, rest) = match self {
            [t, len, rest @ ..] if *t == tag => (usize::from(*len), rest),
            [t, ..] if *t != tag => {
                return Err(Error::MalformedDer(match tag {
                    SEQUENCE => "expected SEQUENCE",
                    _ => "expected INTEGER",
                }))
            }
            _ => return Err(Error::MalformedDer("truncated header")),
        };

        if len > MAX_SHORT_LEN {
            return Err(Error::UnsupportedEncoding);
        }

        if len > rest.len() {
            return Err(Error::MalformedDer("length exceeds input"));
        }

        Ok(rest.split_at(len))
    }
}

/// Converts an ASN.1 DER signature to P1363 (`r‖s`).
///
/// Each integer is left padded with zeros to `scalar_size` bytes. Inputs
/// with long-form lengths, trailing bytes or integers outside of the
/// scalar range are rejected.
pub fn decode_der_to_p1363(der: &[u8], scalar_size: usize) -> Result<Vec<u8>> {
    let len = raw_len(scalar_size)?;

    let (body, rest) = der.tlv(SEQUENCE)?;
    if !rest.is_empty() {
        return Err(Error::MalformedDer("sequence length mismatch"));
    }

    let (r, body) = body.tlv(INTEGER)?;
    let (s, body) = body.tlv(INTEGER)?;
    if !body.is_empty() {
        return Err(Error::MalformedDer("trailing bytes"));
    }

    let mut raw = vec![0u8; len];
    let (lhs, rhs) = raw.split_at_mut(scalar_size);
    unpad(r, lhs)?;
    unpad(s, rhs)?;
    Ok(raw)
}
