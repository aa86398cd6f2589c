// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Tally CLI
//!
//! Entry point for the `tally-cli` binary. Parses CLI arguments, initializes
//! logging, and runs one command against the protocol library.
//!
//! - `hash`     BLAKE2b-512 of text or hex bytes
//! - `multi`    hash of two hashes' bytes
//! - `utxo-key` UTXO key of a transaction output
//! - `tx-hash`  structural hash of a JSON transaction
//! - `keygen`   seed and public key
//! - `sign`     sign a JSON transaction
//! - `verify`   verify a JSON transaction's signatures
//! - `version`  print build version information

mod cli;
mod logging;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::io::Read;
use std::path::Path;

use tally_protocol::crypto::{hash, hash_multi, make_utxo_key, KeyPair, PublicKey, Seed};
use tally_protocol::transaction::{verify_transaction, Transaction};

use cli::{Commands, HashArgs, SignArgs, TallyCli, VerifyArgs};

fn main() -> Result<()> {
    let cli = TallyCli::parse();
    logging::init_logging(&cli.log, cli.log_format);

    let output = match cli.command {
        Commands::Hash(args) => hash_command(&args)?,
        Commands::Multi { a, b } => hash_multi(a.as_bytes(), b.as_bytes()).to_hex(),
        Commands::UtxoKey { tx_hash, index } => make_utxo_key(&tx_hash, index).to_hex(),
        Commands::TxHash { file } => tx_hash_command(&read_input(&file)?)?,
        Commands::Keygen { seed } => keygen_command(seed),
        Commands::Sign(args) => sign_command(&read_input(&args.file)?, &args)?,
        Commands::Verify(args) => verify_command(&read_input(&args.file)?, &args)?,
        Commands::Version => version_string(),
    };

    println!("{}", output);
    Ok(())
}

/// Reads a file, or stdin when `path` is `-`.
fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read transaction from stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read transaction from {}", path.display()))
}

fn hash_command(args: &HashArgs) -> Result<String> {
    let bytes = match (&args.text, &args.hex) {
        (Some(text), None) => text.as_bytes().to_vec(),
        (None, Some(digits)) => {
            let digits = digits
                .strip_prefix("0x")
                .context("hex input must start with 0x")?;
            hex::decode(digits).context("invalid hex input")?
        }
        _ => bail!("pass either TEXT or --hex"),
    };
    tracing::debug!(bytes = bytes.len(), "hashing input");
    Ok(hash(&bytes).to_hex())
}

fn tx_hash_command(text: &str) -> Result<String> {
    let tx = Transaction::from_json(text).context("invalid transaction")?;
    Ok(tx.hash().to_hex())
}

fn keygen_command(seed: Option<Seed>) -> String {
    let seed = seed.unwrap_or_else(Seed::generate);
    let public_key = KeyPair::from_seed(&seed).public_key();
    format!("seed:       {}\npublic key: {}", seed.to_hex(), public_key)
}

fn sign_command(text: &str, args: &SignArgs) -> Result<String> {
    let mut tx = Transaction::from_json(text).context("invalid transaction")?;
    let tx_hash = tx.sign(&args.seeds).context("failed to sign transaction")?;
    tracing::info!(hash = %tx_hash, inputs = tx.inputs.len(), "transaction signed");
    serde_json::to_string_pretty(&tx).context("failed to encode signed transaction")
}

fn verify_command(text: &str, args: &VerifyArgs) -> Result<String> {
    let tx = Transaction::from_json(text).context("invalid transaction")?;
    let owners: &[PublicKey] = &args.keys;
    verify_transaction(&tx, owners).context("verification failed")?;
    Ok(format!("valid {}", tx.hash()))
}

/// Version information for stdout.
fn version_string() -> String {
    format!(
        "tally-cli {}\nprotocol  {}\ndigest    {}\nsigning   {}",
        env!("CARGO_PKG_VERSION"),
        tally_protocol::config::PROTOCOL_VERSION,
        tally_protocol::config::PRIMARY_HASH_FUNCTION,
        tally_protocol::config::SIGNING_ALGORITHM,
    )
}
