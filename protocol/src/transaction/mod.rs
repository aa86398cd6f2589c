//! # Transaction Module
//!
//! The ledger's transaction record: construction, signing, verification and
//! the JSON wire form. Every transfer is a [`Transaction`] spending earlier
//! outputs (by UTXO key) and creating new ones.
//!
//! ## Architecture
//!
//! ```text
//! types.rs        TxType discriminant and the Amount alias
//! input.rs        TxInput: UTXO key plus its signature slot
//! output.rs       TxOutput: value and owning public key
//! payload.rs      DataPayload: opaque application bytes
//! builder.rs      Transaction, Transaction::create and TransactionBuilder
//! signing.rs      the hash-then-sign-then-store signing protocol
//! verification.rs structural and signature checks on signed transactions
//! wire.rs         JSON decoding with field-path errors
//! ```
//!
//! ## Transaction Lifecycle
//!
//! 1. **Build**: assemble inputs, outputs and payload with
//!    [`TransactionBuilder`] or [`Transaction::new`].
//! 2. **Sign**: [`Transaction::create`] (or [`TransactionBuilder::sign`])
//!    hashes the transaction and writes one signature per input.
//! 3. **Exchange**: [`Transaction::to_json`] and [`Transaction::from_json`].
//! 4. **Verify**: [`verify_transaction`] against the owners of the inputs.
//!
//! ## Hashing
//!
//! A transaction's identity is [`Transaction::hash`], the structural hash
//! of its type, input UTXO keys, outputs and payload. Signatures are not
//! part of it, so the hash can be signed and the signatures then stored in
//! the same record.

pub mod builder;
pub mod input;
pub mod output;
pub mod payload;
pub mod signing;
pub mod types;
pub mod verification;
pub mod wire;

pub use builder::{ConstructionError, Transaction, TransactionBuilder};
pub use input::TxInput;
pub use output::TxOutput;
pub use payload::DataPayload;
pub use signing::sign_inputs;
pub use types::{Amount, TxType};
pub use verification::{verify_transaction, TransactionError};
pub use wire::ValidationError;
