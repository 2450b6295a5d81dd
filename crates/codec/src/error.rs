// SPDX-FileCopyrightText: 2022 Profian Inc. <opensource@profian.com>
// SPDX-License-Identifier: Apache-2.0

use displaydoc::Display;
use thiserror::Error;

/// Errors produced while transcoding a signature.
///
/// Every error is permanent: the input is rejected as a whole and no partial
/// output is ever returned.
#[derive(Clone, Copy, Debug, Display, Error, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// invalid raw signature length {actual}, expected {expected}
    InvalidLength { expected: usize, actual: usize },

    /// scalar size must be between 1 and 127 bytes
    InvalidScalarSize,

    /// encoded length {0} does not fit a short-form DER length
    LengthOverflow(usize),

    /// malformed DER signature: {0}
    MalformedDer(&'static str),

    /// long-form DER lengths are not supported
    UnsupportedEncoding,

    /// integer of {len} bytes exceeds the scalar size of {max} bytes
    ValueTooLarge { len: usize, max: usize },
}

pub type Result<T> = core::result::Result<T, Error>;
