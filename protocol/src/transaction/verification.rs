//! Transaction verification: structural checks and signature validation.
//!
//! [`verify_transaction`] is the inverse of the signing protocol. The checks
//! are ordered from cheapest to most expensive, so a malformed transaction
//! is rejected before any signature is checked.

use thiserror::Error;
use tracing::debug;

use super::builder::Transaction;
use crate::crypto::keys::PublicKey;
use crate::crypto::signatures::{verify_checked, SignatureError};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during transaction verification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    #[error("transaction has no inputs")]
    NoInputs,

    #[error("transaction has no outputs")]
    NoOutputs,

    /// One owner key is required per input.
    #[error("the number of inputs ({inputs}) and owner keys ({keys}) are different")]
    KeyCountMismatch { inputs: usize, keys: usize },

    /// The sum of output values does not fit in a `u64`.
    #[error("total output value overflows")]
    OutputOverflow,

    /// The input's signature slot is still zeroed.
    #[error("input {index} is unsigned")]
    Unsigned { index: usize },

    /// The input's signature does not verify against its owner key.
    #[error("input {index}: {source}")]
    InvalidSignature {
        index: usize,
        #[source]
        source: SignatureError,
    },
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

/// Verifies a signed transaction against the keys owning its inputs.
///
/// `owners[i]` is the public key controlling `tx.inputs[i]`. The checks, in
/// order:
///
/// 1. **Shape**: at least one input and one output.
/// 2. **Owners**: exactly one key per input.
/// 3. **Outputs**: the total output value fits in a `u64`.
/// 4. **Signatures present**: no input has a zeroed signature.
/// 5. **Signatures valid**: each input's signature verifies over the
///    transaction hash.
///
/// # Errors
///
/// Returns the first failing check as a [`TransactionError`].
pub fn verify_transaction(tx: &Transaction, owners: &[PublicKey]) -> Result<(), TransactionError> {
    if tx.inputs.is_empty() {
        return Err(TransactionError::NoInputs);
    }
    if tx.outputs.is_empty() {
        return Err(TransactionError::NoOutputs);
    }
    if tx.inputs.len() != owners.len() {
        return Err(TransactionError::KeyCountMismatch {
            inputs: tx.inputs.len(),
            keys: owners.len(),
        });
    }
    if tx.total_output().is_none() {
        return Err(TransactionError::OutputOverflow);
    }

    if let Some(index) = tx.inputs.iter().position(|input| !input.is_signed()) {
        return Err(TransactionError::Unsigned { index });
    }

    let tx_hash = tx.hash();
    for (index, (input, owner)) in tx.inputs.iter().zip(owners).enumerate() {
        verify_checked(owner, tx_hash.as_bytes(), &input.signature)
            .map_err(|source| TransactionError::InvalidSignature { index, source })?;
    }

    debug!(hash = %tx_hash, inputs = tx.inputs.len(), "transaction verified");
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
