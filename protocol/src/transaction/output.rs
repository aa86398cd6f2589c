//! Transaction outputs: value assigned to a public key.

use serde::{Deserialize, Serialize};

use super::types::Amount;
use crate::crypto::keys::PublicKey;
use crate::impl_hashable;

/// A newly created output.
///
/// Hashed as `value` (8 bytes, little-endian) followed by the 32 bytes of
/// `address`. The default output (zero value, all-zero address) is a
/// placeholder used in fixtures and tests.
///
/// On the wire `value` is a decimal string so that amounts above 2^53
/// survive JavaScript-based tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TxOutput {
    /// Value in the smallest unit.
    #[serde(with = "super::types::decimal_amount")]
    pub value: Amount,

    /// Key allowed to spend this output.
    pub address: PublicKey,
}

impl_hashable!(TxOutput { value, address });

impl TxOutput {
    pub fn new(value: Amount, address: PublicKey) -> Self {
        Self { value, address }
    }
}
