//! End-to-end integration tests for the Tally protocol.
//!
//! These tests walk the full transaction lifecycle: key derivation,
//! construction, two-phase signing, JSON exchange, re-validation and
//! verification. Each step goes through the public API only.

use tally_protocol::crypto::{make_utxo_key, Hash, KeyPair, PublicKey, Seed};
use tally_protocol::transaction::{
    verify_transaction, ConstructionError, DataPayload, Transaction, TransactionBuilder,
    TransactionError, TxInput, TxOutput, TxType, ValidationError,
};

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

struct Wallet {
    seed: Seed,
    public_key: PublicKey,
}

impl Wallet {
    fn new(byte: u8) -> Self {
        let seed = Seed::from_bytes([byte; 32]);
        let public_key = KeyPair::from_seed(&seed).public_key();
        Self { seed, public_key }
    }
}

/// A funding transaction paying `amounts` to `owner`, signed by a throwaway
/// key. Its outputs are what later transactions spend.
fn fund(owner: &Wallet, amounts: &[u64]) -> Transaction {
    let faucet = Wallet::new(0xfa);
    amounts
        .iter()
        .fold(TransactionBuilder::payment().spend(&Hash::zero(), 0), |b, &v| {
            b.pay(v, owner.public_key)
        })
        .sign(&[faucet.seed])
        .expect("funding transaction")
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

#[test]
fn spend_chain_signs_exchanges_and_verifies() {
    let alice = Wallet::new(1);
    let bob = Wallet::new(2);

    let funding = fund(&alice, &[600, 400]);
    let funding_hash = funding.hash();

    // Alice spends both of her outputs to Bob, with change back to herself.
    let payment = Transaction::create(
        vec![
            TxInput::from_output(&funding_hash, 0),
            TxInput::from_output(&funding_hash, 1),
        ],
        vec![
            TxOutput::new(900, bob.public_key),
            TxOutput::new(100, alice.public_key),
        ],
        &[alice.seed.clone(), alice.seed.clone()],
        DataPayload::new(b"invoice 17".to_vec()),
    )
    .expect("payment");

    assert_eq!(payment.inputs[0].utxo, funding.utxo_key(0));
    assert_eq!(payment.inputs[1].utxo, funding.utxo_key(1));
    assert_eq!(payment.total_output(), Some(1_000));

    // Over the wire and back.
    let text = serde_json::to_string_pretty(&payment).expect("serialize");
    let received = Transaction::from_json(&text).expect("valid wire transaction");
    assert_eq!(received, payment);
    assert_eq!(received.hash(), payment.hash());

    verify_transaction(&received, &[alice.public_key, alice.public_key])
        .expect("alice's signatures");

    // Bob spends the output he received.
    let onward = TransactionBuilder::payment()
        .spend(&received.hash(), 0)
        .pay(900, alice.public_key)
        .sign(&[bob.seed.clone()])
        .expect("onward payment");
    assert_eq!(onward.inputs[0].utxo, make_utxo_key(&payment.hash(), 0));
    verify_transaction(&onward, &[bob.public_key]).expect("bob's signature");
}

#[test]
fn unsigned_wire_transaction_can_be_signed_later() {
    let alice = Wallet::new(3);
    let funding = fund(&alice, &[50]);

    let unsigned = TransactionBuilder::freeze()
        .spend(&funding.hash(), 0)
        .pay(50, alice.public_key)
        .build();
    let mut wire = unsigned.to_json().expect("wire form");
    wire["inputs"][0]
        .as_object_mut()
        .expect("input object")
        .remove("signature");

    let decoded = Transaction::from_value(&wire).expect("signature is optional");
    assert_eq!(decoded, unsigned);
    assert!(!decoded.is_signed());
    assert_eq!(
        verify_transaction(&decoded, &[alice.public_key]),
        Err(TransactionError::Unsigned { index: 0 })
    );

    let signed = Transaction::create(
        decoded.inputs.clone(),
        decoded.outputs.clone(),
        &[alice.seed],
        decoded.payload.clone(),
    )
    .expect("signed");
    assert_eq!(signed.tx_type, TxType::Payment);
    verify_transaction(&signed, &[alice.public_key]).expect("valid");
}

#[test]
fn creation_is_deterministic_and_hash_is_signature_independent() {
    let alice = Wallet::new(4);
    let build = || {
        Transaction::create(
            vec![TxInput::from_output(&Hash::zero(), 0)],
            vec![TxOutput::new(1, alice.public_key)],
            &[alice.seed.clone()],
            DataPayload::default(),
        )
        .expect("create")
    };

    let first = build();
    let second = build();
    assert_eq!(first, second);

    let mut stripped = first.clone();
    for input in &mut stripped.inputs {
        input.signature = Default::default();
    }
    assert_eq!(stripped.hash(), first.hash());
}

#[test]
fn construction_errors_surface_before_signing() {
    let alice = Wallet::new(5);
    let err = Transaction::create(
        vec![TxInput::from_output(&Hash::zero(), 0)],
        vec![TxOutput::new(1, alice.public_key)],
        &[],
        DataPayload::default(),
    )
    .unwrap_err();
    assert_eq!(err, ConstructionError::KeyCountMismatch { inputs: 1, keys: 0 });
}

#[test]
fn tampered_wire_transaction_fails_verification() {
    let alice = Wallet::new(6);
    let tx = fund(&alice, &[10]);
    let faucet = Wallet::new(0xfa);

    let mut wire = tx.to_json().expect("wire form");
    wire["outputs"][0]["value"] = serde_json::json!("11");
    let tampered = Transaction::from_value(&wire).expect("still well formed");

    assert_ne!(tampered.hash(), tx.hash());
    assert!(matches!(
        verify_transaction(&tampered, &[faucet.public_key]),
        Err(TransactionError::InvalidSignature { index: 0, .. })
    ));
}

#[test]
fn malformed_wire_transaction_names_the_field() {
    let alice = Wallet::new(7);
    let mut wire = fund(&alice, &[10]).to_json().expect("wire form");
    wire["inputs"][0]["signature"] = serde_json::json!("0x00");

    match Transaction::from_value(&wire) {
        Err(ValidationError::InvalidField { field, .. }) => {
            assert_eq!(field, "inputs[0].signature");
        }
        other => panic!("expected InvalidField, got {:?}", other),
    }
}
