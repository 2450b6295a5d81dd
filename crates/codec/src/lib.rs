// SPDX-FileCopyrightText: 2022 Profian Inc. <opensource@profian.com>
// SPDX-License-Identifier: Apache-2.0

//! ECDSA signature transcoding.
//!
//! Platform signing APIs usually hand out signatures in the fixed-width IEEE
//! P1363 form, the big-endian scalars `r` and `s` concatenated and each left
//! padded to the curve's scalar size. X.509, PKCS#10 and most conventional
//! verifiers expect the ASN.1 DER form instead:
//!
//! ```text
//! ECDSA-Sig-Value ::= SEQUENCE {
//!    r INTEGER,
//!    s INTEGER
//! }
//! ```
//!
//! [`encode_p1363_as_der`] and [`decode_der_to_p1363`] convert between the
//! two for any scalar size whose DER encoding fits short-form lengths.

#![warn(rust_2018_idioms, unused_lifetimes, unused_qualifications, clippy::all)]

mod curve;
mod decode;
mod encode;
mod error;
mod integer;

pub use curve::{Curve, UnknownCurve};
pub use decode::decode_der_to_p1363;
pub use encode::encode_p1363_as_der;
pub use error::{Error, Result};

/// Length of a P1363 signature with the given scalar size.
///
/// A scalar wider than one short-form `INTEGER` can never be transcoded.
fn raw_len(scalar_size: usize) -> Result<usize> {
    match scalar_size {
        1..=integer::MAX_SHORT_LEN => Ok(2 * scalar_size),
        _ => Err(Error::InvalidScalarSize),
    }
}
