//! # CLI Interface
//!
//! Defines the command-line argument structure for `tally-cli` using
//! `clap` derive. Hashes, public keys and seeds are parsed straight into
//! their protocol types, so malformed hex is rejected before a command runs.
//! Keys passed to `verify` must also be valid curve points.

use clap::{ArgGroup, Args, Parser, Subcommand};
use std::path::PathBuf;

use tally_protocol::crypto::{Hash, KeyError, PublicKey, Seed};

use crate::logging::LogFormat;

/// Tally ledger hashing tool.
///
/// Computes BLAKE2b-512 ledger hashes, derives UTXO keys, and hashes, signs
/// and verifies JSON transactions. Results go to stdout, logs to stderr.
#[derive(Parser, Debug)]
#[command(
    name = "tally-cli",
    about = "Tally ledger hashing tool",
    version,
    propagate_version = true
)]
pub struct TallyCli {
    /// Default log filter when `RUST_LOG` is not set.
    #[arg(long, global = true, env = "TALLY_LOG", default_value = "warn")]
    pub log: String,

    /// Log output format.
    #[arg(
        long,
        global = true,
        env = "TALLY_LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Pretty
    )]
    pub log_format: LogFormat,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Hash a string (UTF-8 bytes) or raw hex bytes.
    Hash(HashArgs),
    /// Hash the stored bytes of two hashes, in order.
    Multi {
        /// First hash.
        a: Hash,
        /// Second hash.
        b: Hash,
    },
    /// Derive the UTXO key of one output of a transaction.
    UtxoKey {
        /// Hash of the transaction that created the output.
        tx_hash: Hash,
        /// Position of the output in that transaction.
        index: u64,
    },
    /// Validate a JSON transaction and print its hash.
    TxHash {
        /// Path to the transaction, or `-` for stdin.
        file: PathBuf,
    },
    /// Print a seed and its public key.
    Keygen {
        /// Derive from this seed instead of generating a new one.
        #[arg(long)]
        seed: Option<Seed>,
    },
    /// Sign every input of a JSON transaction and print the signed JSON.
    Sign(SignArgs),
    /// Check every input signature of a JSON transaction.
    Verify(VerifyArgs),
    /// Print version information and exit.
    Version,
}

/// Arguments for the `hash` subcommand.
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("input").required(true).args(["text", "hex"])))]
pub struct HashArgs {
    /// Text to hash.
    pub text: Option<String>,

    /// `0x`-prefixed hex bytes to hash.
    #[arg(long)]
    pub hex: Option<String>,
}

/// Arguments for the `sign` subcommand.
#[derive(Args, Debug)]
pub struct SignArgs {
    /// Path to the unsigned transaction, or `-` for stdin.
    pub file: PathBuf,

    /// Seed of the key for each input, in input order. Repeat per input.
    ///
    /// **Never pass real seeds on the command line**: they end up in shell
    /// history.
    #[arg(long = "seed", required = true)]
    pub seeds: Vec<Seed>,
}

/// Arguments for the `verify` subcommand.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Path to the signed transaction, or `-` for stdin.
    pub file: PathBuf,

    /// Public key owning each input, in input order. Repeat per input.
    #[arg(long = "key", required = true, value_parser = parse_verifying_key)]
    pub keys: Vec<PublicKey>,
}

/// Parses a hex public key that can verify signatures.
fn parse_verifying_key(s: &str) -> Result<PublicKey, KeyError> {
    let key = PublicKey::from_hex(s)?;
    PublicKey::try_from_slice(key.as_bytes())
}
