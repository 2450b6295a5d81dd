// SPDX-FileCopyrightText: 2022 Profian Inc. <opensource@profian.com>
// SPDX-License-Identifier: Apache-2.0

#![warn(rust_2018_idioms, unused_lifetimes, unused_qualifications, clippy::all)]

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use confargs::{args, prefix_char_filter, Toml};
use sigbridge_flow::{Accept, Config, CryptoProvider, Ecdsa, Signer, Verifier};
use sigcodec::Curve;
use tracing::debug;

/// Hex encoded bytes on the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Hex(Vec<u8>);

impl FromStr for Hex {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        hex::decode(s.trim()).map(Hex)
    }
}

/// Converts ECDSA signatures between IEEE P1363 (`r‖s`) and ASN.1 DER,
/// and signs or verifies messages with DER signatures.
///
/// All bytes are read and written as hexadecimal.
///
/// Any command-line options listed here may be specified by one or
/// more configuration files, which can be used by passing the
/// name of the file on the command-line with the syntax `@config.toml`.
/// The configuration file must contain valid TOML table mapping argument
/// names to their values.
#[derive(Clone, Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Path to the verification policy file.
    #[clap(long, env = "SIGBRIDGE_CONFIG")]
    config: Option<PathBuf>,

    /// Curve to use, overriding the policy file.
    ///
    /// `keygen`, `encode` and `decode` default to P-256. `sign` and
    /// `verify` refuse keys on any other curve.
    #[clap(long, env = "SIGBRIDGE_CURVE")]
    curve: Option<Curve>,

    /// Signature encodings accepted by `verify`: der, p1363 or any.
    #[clap(long, env = "SIGBRIDGE_ACCEPT")]
    accept: Option<Accept>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Generate a key pair (PKCS#8 private key, SPKI public key).
    Keygen,

    /// Sign a message and print the DER signature.
    Sign {
        /// PKCS#8 DER private key.
        #[clap(long, env = "SIGBRIDGE_KEY", hide_env_values = true)]
        key: Hex,

        message: String,
    },

    /// Verify a DER or P1363 signature over a message.
    Verify {
        /// SPKI DER public key.
        #[clap(long)]
        public_key: Hex,

        #[clap(long)]
        signature: Hex,

        message: String,
    },

    /// Convert a P1363 signature to DER.
    Encode { signature: Hex },

    /// Convert a DER signature to P1363.
    Decode { signature: Hex },
}

impl Args {
    fn config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(curve) = self.curve {
            config.curve = Some(curve);
        }

        if let Some(accept) = self.accept {
            config.accept = accept;
        }

        Ok(config)
    }
}

fn run(command: Command, config: Config, provider: impl CryptoProvider) -> Result<String> {
    let curve = config.curve.unwrap_or_default();

    match command {
        Command::Keygen => {
            let pair = provider.generate(curve)?;
            debug!(%curve, "generated key pair");
            Ok(format!(
                "private_key={}\npublic_key={}",
                hex::encode(&*pair.private_key),
                hex::encode(&pair.public_key)
            ))
        }

        Command::Sign { key, message } => {
            let der = Signer::new(provider, config).sign(&key.0, message.as_bytes())?;
            Ok(hex::encode(der))
        }

        Command::Verify {
            public_key,
            signature,
            message,
        } => {
            let valid = Verifier::new(provider, config).verify(
                &public_key.0,
                message.as_bytes(),
                &signature.0,
            )?;
            Ok(valid.to_string())
        }

        Command::Encode { signature } => {
            let der = curve
                .to_der(&signature.0)
                .with_context(|| format!("invalid {curve} P1363 signature"))?;
            Ok(hex::encode(der))
        }

        Command::Decode { signature } => {
            let raw = curve
                .to_p1363(&signature.0)
                .with_context(|| format!("invalid {curve} DER signature"))?;
            Ok(hex::encode(raw))
        }
    }
}

fn init_tracing() {
    if std::env::var("RUST_LOG_JSON").is_ok() {
        tracing_subscriber::fmt::fmt()
            .json()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> Result<()> {
    init_tracing();

    let args = args::<Toml>(prefix_char_filter::<'@'>)
        .context("Failed to parse config")
        .map(Args::parse_from)?;

    let config = args.config()?;
    debug!(?config, "loaded configuration");

    let output = run(args.command, config, Ecdsa)?;
    println!("{output}");
    Ok(())
}
