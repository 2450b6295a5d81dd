// SPDX-FileCopyrightText: 2022 Profian Inc. <opensource@profian.com>
// SPDX-License-Identifier: Apache-2.0

use crate::{Error, Result};

pub(crate) const INTEGER: u8 = 0x02;
pub(crate) const SEQUENCE: u8 = 0x30;

/// The largest length a single DER length byte can carry.
pub(crate) const MAX_SHORT_LEN: usize = 0x7f;

/// Returns `len` as a short-form DER length byte.
pub(crate) fn short_len(len: usize) -> Result<u8> {
    match u8::try_from(len) {
        Ok(byte) if len <= MAX_SHORT_LEN => Ok(byte),
        _ => Err(Error::LengthOverflow(len)),
    }
}

/// An unsigned big-endian scalar in minimal DER `INTEGER` form.
///
/// Leading zero bytes are dropped (keeping at least one byte) and a single
/// zero sign guard is emitted when the first remaining byte has its high bit
/// set, since DER integers are two's complement.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Integer<'a> {
    guard: bool,
    value: &'a [u8],
}

impl<'a> Integer<'a> {
    pub fn unsigned(bytes: &'a [u8]) -> Self {
        let zeros = bytes.iter().take_while(|b| **b == 0).count();
        let value = &bytes[zeros.min(bytes.len().saturating_sub(1))..];
        let guard = value.first().map_or(false, |b| b & 0x80 != 0);
        Self { guard, value }
    }

    /// Length of the `INTEGER` contents, sign guard included.
    pub fn value_len(&self) -> usize {
        self.value.len() + usize::from(self.guard)
    }

    /// Length of the complete `INTEGER` TLV.
    pub fn encoded_len(&self) -> Result<usize> {
        short_len(self.value_len())?;
        Ok(2 + self.value_len())
    }

    pub fn encode(&self, out: &mut Vec<u8>) -> Result<()> {
        out.push(INTEGER);
        out.push(short_len(self.value_len())?);
        if self.guard {
            out.push(0);
        }
        out.extend_from_slice(self.value);
        Ok(())
    }
}

/// Copies the contents of a decoded `INTEGER` into `out`, left padded.
///
/// `out` is the fixed-width slot of one scalar in the P1363 output.
pub(crate) fn unpad(value: &[u8], out: &mut [u8]) -> Result<()> {
    let first = *value
        .first()
        .ok_or(Error::MalformedDer("empty integer"))?;
    if first & 0x80 != 0 {
        return Err(Error::MalformedDer("negative integer"));
    }

    let value = match value {
        [0, rest @ ..] if value.len() > out.len() => rest,
        _ => value,
    };

    if value.len() > out.len() {
        return Err(Error::ValueTooLarge {
            len: value.len(),
            max: out.len(),
        });
    }

    let start = out.len() - value.len();
    out[..start].fill(0);
    out[start..].copy_from_slice(value);
    Ok(())
}
