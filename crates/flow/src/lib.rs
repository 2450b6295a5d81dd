// SPDX-FileCopyrightText: 2022 Profian Inc. <opensource@profian.com>
// SPDX-License-Identifier: Apache-2.0

//! Signing and verification flows.
//!
//! The flows sit between callers exchanging DER signatures and a
//! [`CryptoProvider`] that signs and verifies in P1363 form, using
//! [`sigcodec`] to translate between the two.

#![warn(rust_2018_idioms, unused_lifetimes, unused_qualifications, clippy::all)]

pub mod config;
pub mod keys;
pub mod provider;
pub mod sign;
pub mod verify;

pub use config::{Accept, Config};
pub use provider::{CryptoProvider, Ecdsa, KeyPair};
pub use sign::Signer;
pub use verify::Verifier;

pub use sigcodec;
