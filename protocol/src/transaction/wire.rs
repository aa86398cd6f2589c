//! Decoding transactions from their JSON wire form.
//!
//! The record types derive their serde impls, so
//! `serde_json::from_str::<Transaction>` accepts the wire form directly.
//! [`Transaction::from_json`] is the validating entry point: it parses the
//! text into a [`Value`], then [`Transaction::from_value`] walks the tree
//! and decodes every field through those same impls, failing on the first
//! missing or malformed one with the path of the offending field, e.g.
//! `inputs[0].utxo`.
//!
//! The accepted shape is the one produced by [`Transaction::to_json`]:
//!
//! ```text
//! {
//!   "type":    0 | 1,
//!   "inputs":  [ { "utxo": "0x…", "signature": "0x…" (optional) } ],
//!   "outputs": [ { "value": "1000" | 1000, "address": "0x…" } ],
//!   "payload": "0x…" (optional)
//! }
//! ```

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

use super::builder::Transaction;
use super::input::TxInput;
use super::output::TxOutput;
use super::payload::DataPayload;
use super::types::{decimal_amount, TxType};
use crate::crypto::hash::Hash;
use crate::crypto::keys::{PublicKey, Signature};

/// Errors raised while decoding a wire transaction.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing field `{field}`")]
    MissingField { field: String },

    #[error("invalid field `{field}`: {reason}")]
    InvalidField { field: String, reason: String },
}

impl ValidationError {
    /// Path of the offending field, if the error is about one.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Json(_) => None,
            Self::MissingField { field } | Self::InvalidField { field, .. } => Some(field),
        }
    }

    fn invalid(field: &str, reason: impl ToString) -> Self {
        Self::InvalidField {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl Transaction {
    /// Parses and validates a wire transaction.
    pub fn from_json(text: &str) -> Result<Self, ValidationError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(&value)
    }

    /// Validates an already-parsed wire transaction.
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let root = as_object(value, "transaction")?;

        let tx_type: TxType = required(root, "type", "type")?;

        let inputs = required_array(root, "inputs")?
            .iter()
            .enumerate()
            .map(|(i, item)| read_input(item, &format!("inputs[{i}]")))
            .collect::<Result<Vec<_>, _>>()?;

        let outputs = required_array(root, "outputs")?
            .iter()
            .enumerate()
            .map(|(i, item)| read_output(item, &format!("outputs[{i}]")))
            .collect::<Result<Vec<_>, _>>()?;

        let payload: DataPayload = optional(root, "payload", "payload")?;

        Ok(Transaction::new(tx_type, inputs, outputs, payload))
    }
}

// ---------------------------------------------------------------------------
// Element readers
// ---------------------------------------------------------------------------

fn read_input(value: &Value, path: &str) -> Result<TxInput, ValidationError> {
    let fields = as_object(value, path)?;
    let utxo: Hash = required(fields, "utxo", &format!("{path}.utxo"))?;
    let signature: Signature = optional(fields, "signature", &format!("{path}.signature"))?;
    Ok(TxInput::with_signature(utxo, signature))
}

fn read_output(value: &Value, path: &str) -> Result<TxOutput, ValidationError> {
    let fields = as_object(value, path)?;

    let value_path = format!("{path}.value");
    let amount = decimal_amount::deserialize(lookup(fields, "value", &value_path)?)
        .map_err(|e| ValidationError::invalid(&value_path, e))?;

    let address: PublicKey = required(fields, "address", &format!("{path}.address"))?;

    Ok(TxOutput::new(amount, address))
}

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

fn lookup<'a>(
    fields: &'a Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<&'a Value, ValidationError> {
    fields.get(key).ok_or_else(|| ValidationError::MissingField {
        field: path.to_string(),
    })
}

/// Decodes a present field through its serde impl.
fn required<T: DeserializeOwned>(
    fields: &Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<T, ValidationError> {
    T::deserialize(lookup(fields, key, path)?).map_err(|e| ValidationError::invalid(path, e))
}

/// Like [`required`], but an absent field reads as `T::default()`.
fn optional<T: DeserializeOwned + Default>(
    fields: &Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<T, ValidationError> {
    match fields.get(key) {
        None => Ok(T::default()),
        Some(_) => required(fields, key, path),
    }
}

fn required_array<'a>(
    fields: &'a Map<String, Value>,
    key: &str,
) -> Result<&'a Vec<Value>, ValidationError> {
    lookup(fields, key, key)?
        .as_array()
        .ok_or_else(|| ValidationError::invalid(key, "expected an array"))
}

fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, ValidationError> {
    value
        .as_object()
        .ok_or_else(|| ValidationError::invalid(path, "expected an object"))
}
