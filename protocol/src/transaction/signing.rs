//! Transaction signing.
//!
//! Signing is a fixed three-phase protocol and the phases must not be
//! reordered:
//!
//! 1. hash the transaction while every input's signature slot is zeroed
//!    (signatures are not hashed, so "zeroed" only matters for what ends up
//!    stored);
//! 2. sign that hash with the key controlling each input;
//! 3. write each signature into its input, in place.
//!
//! Computing the hash after any signature has been written would still give
//! the same value today, but only because signatures are excluded from the
//! hash. The ordering keeps the signed message well defined regardless.

use tracing::debug;

use super::builder::{ConstructionError, Transaction};
use crate::crypto::hash::Hash;
use crate::crypto::keys::{KeyPair, Signature};
use crate::crypto::signatures::sign;
use crate::hashing::hash_full;

/// Signs every input of `tx`, `keys[i]` signing `tx.inputs[i]`.
///
/// Returns the transaction hash that was signed.
///
/// # Errors
///
/// [`ConstructionError::KeyCountMismatch`] if `keys` and `tx.inputs` differ
/// in length. Nothing is written in that case.
pub fn sign_inputs(tx: &mut Transaction, keys: &[KeyPair]) -> Result<Hash, ConstructionError> {
    if tx.inputs.len() != keys.len() {
        return Err(ConstructionError::KeyCountMismatch {
            inputs: tx.inputs.len(),
            keys: keys.len(),
        });
    }

    let tx_hash = hash_full(&*tx);

    let signatures: Vec<Signature> = keys
        .iter()
        .map(|key| sign(key, tx_hash.as_bytes()))
        .collect();

    for (index, (input, signature)) in tx.inputs.iter_mut().zip(&signatures).enumerate() {
        input.signature.set(signature);
        debug!(index, utxo = %input.utxo, "input signed");
    }

    Ok(tx_hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::digest::hash;
    use crate::transaction::builder::TransactionBuilder;
    use crate::transaction::input::TxInput;
    use crate::transaction::types::TxType;
    use crate::crypto::keys::PublicKey;

    fn two_input_tx() -> Transaction {
        TransactionBuilder::new(TxType::Payment)
            .spend(&hash(b"a"), 0)
            .spend(&hash(b"b"), 1)
            .pay(10, PublicKey::default())
            .build()
    }

    #[test]
    fn returns_the_signed_hash() {
        let mut tx = two_input_tx();
        let before = tx.hash();
        let keys = [KeyPair::generate(), KeyPair::generate()];
        let signed_hash = sign_inputs(&mut tx, &keys).unwrap();
        assert_eq!(signed_hash, before);
        assert_eq!(tx.hash(), before);
    }

    #[test]
    fn each_input_gets_its_own_key() {
        let mut tx = two_input_tx();
        let keys = [KeyPair::generate(), KeyPair::generate()];
        let message = sign_inputs(&mut tx, &keys).unwrap();

        assert!(keys[0].verify(message.as_bytes(), &tx.inputs[0].signature));
        assert!(keys[1].verify(message.as_bytes(), &tx.inputs[1].signature));
        assert!(!keys[0].verify(message.as_bytes(), &tx.inputs[1].signature));
    }

    #[test]
    fn mismatch_leaves_transaction_untouched() {
        let mut tx = two_input_tx();
        let original = tx.clone();
        let err = sign_inputs(&mut tx, &[KeyPair::generate()]).unwrap_err();
        assert_eq!(err, ConstructionError::KeyCountMismatch { inputs: 2, keys: 1 });
        assert_eq!(tx, original);
    }

    #[test]
    fn re_signing_overwrites_previous_signatures() {
        let mut tx = two_input_tx();
        sign_inputs(&mut tx, &[KeyPair::generate(), KeyPair::generate()]).unwrap();
        let first: Vec<TxInput> = tx.inputs.clone();

        let keys = [KeyPair::generate(), KeyPair::generate()];
        let message = sign_inputs(&mut tx, &keys).unwrap();
        assert_ne!(tx.inputs, first);
        assert!(keys[0].verify(message.as_bytes(), &tx.inputs[0].signature));
    }
}
