// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Tally Protocol: Core Library
//!
//! Deterministic, structural hashing for ledger records. Two parties that
//! hold the same transaction compute the same 64-byte identifier for it,
//! byte for byte, and sign that identifier instead of any serialized form.
//!
//! ## Architecture
//!
//! - **crypto**: The [`Hash`](crypto::Hash) value type, BLAKE2b-512
//!   primitives (`hash`, `hash_multi`, `make_utxo_key`) and Ed25519 keys.
//! - **hashing**: The [`Hashable`](hashing::Hashable) contract and the
//!   structural hasher that walks a record in canonical field order.
//! - **transaction**: Transactions, their inputs, outputs and payload,
//!   two-phase signing, verification and the JSON wire form.
//! - **config**: Protocol constants: widths, prefixes, discriminants.
//!
//! ## Example
//!
//! ```
//! use tally_protocol::crypto::{Hash, KeyPair, Seed};
//! use tally_protocol::transaction::{verify_transaction, TransactionBuilder};
//!
//! let seed = Seed::generate();
//! let owner = KeyPair::from_seed(&seed).public_key();
//!
//! let tx = TransactionBuilder::payment()
//!     .spend(&Hash::zero(), 0)
//!     .pay(250, owner)
//!     .sign(&[seed])
//!     .unwrap();
//!
//! assert!(verify_transaction(&tx, &[owner]).is_ok());
//! println!("{}", tx.hash());
//! ```

pub mod config;
pub mod crypto;
pub mod hashing;
pub mod transaction;
