// SPDX-FileCopyrightText: 2022 Profian Inc. <opensource@profian.com>
// SPDX-License-Identifier: Apache-2.0

use crate::integer::{short_len, Integer, SEQUENCE};
use crate::{raw_len, Error, Result};

/// Converts a P1363 signature (`r‖s`) to its ASN.1 DER encoding.
///
/// ```text
/// ECDSA-Sig-Value ::= SEQUENCE {
///    r INTEGER,
///    s INTEGER
/// }
/// ```
///
/// `raw` must be exactly `2 * scalar_size` bytes long. Both integers are
/// written in minimal form, so the output is canonical DER.
pub fn encode_p1363_as_der(raw: &[u8], scalar_size: usize) -> Result<Vec<u8>> {
    let expected = raw_len(scalar_size)?;
    if raw.len() != expected {
        return Err(Error::InvalidLength {
            expected,
            actual: raw.len(),
        });
    }

    let (r, s) = raw.split_at(scalar_size);
    let r = Integer::unsigned(r);
    let s = Integer::unsigned(s);

    let payload = r.encoded_len()? + s.encoded_len()?;
    let header = [SEQUENCE, short_len(payload)?];

    let mut der = Vec::with_capacity(header.len() + payload);
    der.extend_from_slice(&header);
    r.encode(&mut der)?;
    s.encode(&mut der)?;
    Ok(der)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn all_zero() {
        let der = encode_p1363_as_der(&[0u8; 64], 32).unwrap();
        assert_eq!(der, hex!("3006 020100 020100"));
    }

    #[test]
    fn all_ones() {
        let der = encode_p1363_as_der(&[0xffu8; 64], 32).unwrap();
        assert_eq!(der.len(), 72);
        assert_eq!(der[..5], hex!("3046 022100"));
        assert_eq!(der[5..37], [0xffu8; 32]);
        assert_eq!(der[37..40], hex!("022100"));
        assert_eq!(der[40..], [0xffu8; 32]);
    }

    #[test]
    fn smallest() {
        let mut raw = [0u8; 64];
        raw[31] = 1;
        raw[63] = 1;
        let der = encode_p1363_as_der(&raw, 32).unwrap();
        assert_eq!(der, hex!("3006 020101 020101"));
    }

    #[test]
    fn wrong_length() {
        assert_eq!(
            encode_p1363_as_der(&[0u8; 63], 32),
            Err(Error::InvalidLength {
                expected: 64,
                actual: 63
            })
        );
        assert_eq!(
            encode_p1363_as_der(&[0u8; 64], 48),
            Err(Error::InvalidLength {
                expected: 96,
                actual: 64
            })
        );
        assert_eq!(
            encode_p1363_as_der(&[], 0),
            Err(Error::InvalidScalarSize)
        );
        assert_eq!(
            encode_p1363_as_der(&[0u8; 256], 128),
            Err(Error::InvalidScalarSize)
        );
    }

    #[test]
    fn p521_needs_long_form() {
        // 2 * (2 + 67) bytes of payload cannot be described by one length byte.
        assert_eq!(
            encode_p1363_as_der(&[0xffu8; 132], 66),
            Err(Error::LengthOverflow(138))
        );

        // Small enough values of the same width still fit.
        let mut raw = [0u8; 132];
        raw[65] = 0x42;
        raw[131] = 0x43;
        assert_eq!(
            encode_p1363_as_der(&raw, 66).unwrap(),
            hex!("3006 020142 020143")
        );
    }

    #[test]
    fn oversized_integer() {
        assert_eq!(
            encode_p1363_as_der(&[0x80u8; 254], 127),
            Err(Error::LengthOverflow(128))
        );
    }
}
