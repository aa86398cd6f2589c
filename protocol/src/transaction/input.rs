//! Transaction inputs: references to the outputs being spent.

use serde::{Deserialize, Serialize};

use crate::crypto::digest::make_utxo_key;
use crate::crypto::hash::Hash;
use crate::crypto::keys::Signature;
use crate::hashing::{BytesMut, Hashable};

/// A reference to an unspent output, plus the signature that unlocks it.
///
/// The output is identified by its UTXO key: the hash of the transaction
/// that created it combined with its index (see
/// [`make_utxo_key`](crate::crypto::make_utxo_key)).
///
/// Only `utxo` is hashed. The signature is a fixed-width buffer that starts
/// out zeroed and is filled in after the transaction hash is computed, so
/// it must stay out of the hash it signs.
///
/// On the wire `signature` may be omitted; it then reads as the zero
/// placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxInput {
    /// Key of the output being spent.
    pub utxo: Hash,

    /// Signature over the transaction hash. Zero until signed.
    #[serde(default)]
    pub signature: Signature,
}

impl TxInput {
    /// Spends the output with key `utxo`. The signature starts zeroed.
    pub fn new(utxo: Hash) -> Self {
        Self {
            utxo,
            signature: Signature::zero(),
        }
    }

    /// Spends output `index` of the transaction hashed to `previous`.
    pub fn from_output(previous: &Hash, index: u64) -> Self {
        Self::new(make_utxo_key(previous, index))
    }

    pub fn with_signature(utxo: Hash, signature: Signature) -> Self {
        Self { utxo, signature }
    }

    pub fn is_signed(&self) -> bool {
        !self.signature.is_zero()
    }
}

impl Hashable for TxInput {
    fn compute_hash(&self, buffer: &mut BytesMut) {
        self.utxo.compute_hash(buffer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::digest::hash;
    use crate::crypto::keys::KeyPair;
    use crate::hashing::hash_full;

    #[test]
    fn from_output_derives_utxo_key() {
        let prev = hash(b"previous tx");
        let input = TxInput::from_output(&prev, 3);
        assert_eq!(input.utxo, make_utxo_key(&prev, 3));
        assert!(!input.is_signed());
    }

    #[test]
    fn contributes_only_the_utxo_key() {
        let input = TxInput::from_output(&Hash::zero(), 0);
        let mut buffer = BytesMut::new();
        input.compute_hash(&mut buffer);
        assert_eq!(&buffer[..], input.utxo.as_bytes());
    }

    #[test]
    fn signature_does_not_change_hash() {
        let unsigned = TxInput::new(hash(b"utxo"));
        let mut signed = unsigned.clone();
        signed.signature.set(&KeyPair::generate().sign(b"anything"));
        assert!(signed.is_signed());
        assert_ne!(signed, unsigned);
        assert_eq!(hash_full(&signed), hash_full(&unsigned));
    }

    #[test]
    fn json_projection_fields() {
        let input = TxInput::new(hash(b"utxo"));
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["utxo"], input.utxo.to_hex());
        assert_eq!(json["signature"], Signature::zero().to_hex());
    }

    #[test]
    fn input_serde_roundtrip() {
        let mut input = TxInput::from_output(&hash(b"previous tx"), 1);
        input.signature.set(&KeyPair::generate().sign(b"tx hash"));
        let json = serde_json::to_string(&input).unwrap();
        let recovered: TxInput = serde_json::from_str(&json).unwrap();
        assert_eq!(recovered, input);
    }

    #[test]
    fn missing_signature_reads_as_zero() {
        let utxo = hash(b"utxo");
        let json = format!("{{\"utxo\": \"{}\"}}", utxo.to_hex());
        let input: TxInput = serde_json::from_str(&json).unwrap();
        assert_eq!(input, TxInput::new(utxo));
    }
}
