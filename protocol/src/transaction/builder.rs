//! The [`Transaction`] record and its construction paths.
//!
//! There are three ways to get a transaction:
//!
//! 1. [`Transaction::new`]: assemble one from parts, no checks. Used for
//!    fixtures and for records already validated elsewhere.
//! 2. [`Transaction::create`]: the two-phase signing flow: assemble an
//!    unsigned payment, hash it, sign the hash with one key per input, then
//!    write each signature into its input in place.
//! 3. [`TransactionBuilder`]: a fluent front end to the same two paths.
//!
//! Decoding from JSON lives in [`super::wire`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use super::input::TxInput;
use super::output::TxOutput;
use super::payload::DataPayload;
use super::signing::sign_inputs;
use super::types::{Amount, TxType};
use crate::crypto::digest::make_utxo_key;
use crate::crypto::hash::Hash;
use crate::crypto::keys::{KeyPair, PublicKey, Seed};
use crate::hashing::{hash_full, BytesMut, Hashable};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Precondition violations when building a signed transaction.
///
/// All of these are raised before any hashing or signing happens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    #[error("the number of inputs is 0")]
    NoInputs,

    #[error("the number of outputs is 0")]
    NoOutputs,

    #[error("the number of inputs ({inputs}) and keys ({keys}) are different")]
    KeyCountMismatch { inputs: usize, keys: usize },
}

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// A ledger transaction.
///
/// Owns its inputs, outputs and payload by value.
///
/// # Canonical hash
///
/// The hash is [`hash_full`] over, in this order:
///
/// 1. `tx_type` as one unsigned byte;
/// 2. every input's UTXO key (64 bytes each), in order;
/// 3. every output's value (8 bytes LE) and address (32 bytes), in order;
/// 4. the payload bytes.
///
/// Input signatures are excluded, which is what makes it possible to sign
/// the hash and then store the signatures in the transaction itself.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Transaction {
    /// The kind of transaction.
    #[serde(rename = "type")]
    pub tx_type: TxType,

    /// Outputs of earlier transactions being spent.
    pub inputs: Vec<TxInput>,

    /// Newly created outputs.
    pub outputs: Vec<TxOutput>,

    /// Attached application data.
    #[serde(default)]
    pub payload: DataPayload,
}

impl Transaction {
    pub fn new(
        tx_type: TxType,
        inputs: Vec<TxInput>,
        outputs: Vec<TxOutput>,
        payload: DataPayload,
    ) -> Self {
        Self {
            tx_type,
            inputs,
            outputs,
            payload,
        }
    }

    /// Creates a signed payment transaction.
    ///
    /// `keys[i]` is the seed of the key controlling `inputs[i]`. The
    /// transaction is hashed once, with every signature slot zeroed, and
    /// each input then receives its key's signature over that hash. Because
    /// signatures are not part of the hash, the order in which they are
    /// written does not matter and `tx.hash()` is the signed message.
    ///
    /// # Errors
    ///
    /// [`ConstructionError`] if there are no inputs, no outputs, or the
    /// number of keys does not match the number of inputs.
    pub fn create(
        inputs: Vec<TxInput>,
        outputs: Vec<TxOutput>,
        keys: &[Seed],
        payload: DataPayload,
    ) -> Result<Self, ConstructionError> {
        check_shape(&inputs, &outputs, keys.len())?;

        let key_pairs: Vec<KeyPair> = keys.iter().map(KeyPair::from_seed).collect();

        let mut tx = Transaction::new(TxType::Payment, inputs, outputs, payload);
        let tx_hash = sign_inputs(&mut tx, &key_pairs)?;
        debug!(
            inputs = tx.inputs.len(),
            outputs = tx.outputs.len(),
            hash = %tx_hash,
            "created signed transaction"
        );
        Ok(tx)
    }

    /// Signs this transaction in place, one seed per input, keeping its
    /// type. Returns the signed hash.
    ///
    /// Any signatures already present are overwritten.
    ///
    /// # Errors
    ///
    /// The same shape checks as [`Transaction::create`].
    pub fn sign(&mut self, keys: &[Seed]) -> Result<Hash, ConstructionError> {
        check_shape(&self.inputs, &self.outputs, keys.len())?;
        let key_pairs: Vec<KeyPair> = keys.iter().map(KeyPair::from_seed).collect();
        sign_inputs(self, &key_pairs)
    }

    /// The structural hash of this transaction.
    pub fn hash(&self) -> Hash {
        hash_full(self)
    }

    /// The UTXO key of output `index` of this transaction.
    ///
    /// Does not check that `index` is in range: the key of a nonexistent
    /// output is well defined, it just never matches anything.
    pub fn utxo_key(&self, index: u64) -> Hash {
        make_utxo_key(&self.hash(), index)
    }

    /// UTXO keys of all outputs, in order.
    pub fn output_keys(&self) -> Vec<Hash> {
        let tx_hash = self.hash();
        (0..self.outputs.len() as u64)
            .map(|index| make_utxo_key(&tx_hash, index))
            .collect()
    }

    /// Returns `true` if every input carries a non-zero signature.
    pub fn is_signed(&self) -> bool {
        !self.inputs.is_empty() && self.inputs.iter().all(TxInput::is_signed)
    }

    /// Sum of all output values, or `None` on overflow.
    pub fn total_output(&self) -> Option<Amount> {
        self.outputs
            .iter()
            .try_fold(0u64, |acc, output| acc.checked_add(output.value))
    }

    /// JSON projection: `{"type", "inputs", "outputs", "payload"}`.
    ///
    /// For interchange only; hashing never goes through JSON.
    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

impl Hashable for Transaction {
    fn compute_hash(&self, buffer: &mut BytesMut) {
        self.tx_type.compute_hash(buffer);
        self.inputs.compute_hash(buffer);
        self.outputs.compute_hash(buffer);
        self.payload.compute_hash(buffer);
    }
}

pub(crate) fn check_shape(
    inputs: &[TxInput],
    outputs: &[TxOutput],
    keys: usize,
) -> Result<(), ConstructionError> {
    if inputs.is_empty() {
        return Err(ConstructionError::NoInputs);
    }
    if outputs.is_empty() {
        return Err(ConstructionError::NoOutputs);
    }
    if inputs.len() != keys {
        return Err(ConstructionError::KeyCountMismatch {
            inputs: inputs.len(),
            keys,
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// TransactionBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Transaction`]s.
///
/// # Usage
///
/// ```
/// use tally_protocol::crypto::{Hash, KeyPair, Seed};
/// use tally_protocol::transaction::TransactionBuilder;
///
/// let seed = Seed::generate();
/// let owner = KeyPair::from_seed(&seed).public_key();
///
/// let tx = TransactionBuilder::payment()
///     .spend(&Hash::zero(), 0)
///     .pay(1_000, owner)
///     .payload(b"memo".to_vec())
///     .sign(&[seed])
///     .unwrap();
///
/// assert!(tx.is_signed());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TransactionBuilder {
    tx_type: TxType,
    inputs: Vec<TxInput>,
    outputs: Vec<TxOutput>,
    payload: DataPayload,
}

impl TransactionBuilder {
    pub fn new(tx_type: TxType) -> Self {
        Self {
            tx_type,
            ..Self::default()
        }
    }

    pub fn payment() -> Self {
        Self::new(TxType::Payment)
    }

    pub fn freeze() -> Self {
        Self::new(TxType::Freeze)
    }

    /// Adds an input spending output `index` of transaction `previous`.
    pub fn spend(mut self, previous: &Hash, index: u64) -> Self {
        self.inputs.push(TxInput::from_output(previous, index));
        self
    }

    /// Adds an input spending the output with the given UTXO key.
    pub fn input(mut self, input: TxInput) -> Self {
        self.inputs.push(input);
        self
    }

    /// Adds an output of `value` to `address`.
    pub fn pay(mut self, value: Amount, address: PublicKey) -> Self {
        self.outputs.push(TxOutput::new(value, address));
        self
    }

    pub fn output(mut self, output: TxOutput) -> Self {
        self.outputs.push(output);
        self
    }

    pub fn payload(mut self, data: Vec<u8>) -> Self {
        self.payload = DataPayload::new(data);
        self
    }

    /// Produces the unsigned transaction as-is.
    pub fn build(self) -> Transaction {
        Transaction::new(self.tx_type, self.inputs, self.outputs, self.payload)
    }

    /// Builds and signs the transaction, one seed per input.
    ///
    /// Unlike [`Transaction::create`], the builder's transaction type is
    /// kept, so freeze transactions can be signed the same way.
    pub fn sign(self, keys: &[Seed]) -> Result<Transaction, ConstructionError> {
        let mut tx = self.build();
        tx.sign(keys)?;
        Ok(tx)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
