//! Core value types for Tally transactions.
//!
//! Small and `Copy`, kept apart from the record types so the hashing and
//! wire layers can share them without pulling in the whole transaction.

use std::fmt;

use bytes::{BufMut, BytesMut};
use serde::{Deserialize, Serialize};

use crate::config::{TX_TYPE_FREEZE, TX_TYPE_PAYMENT};
use crate::hashing::Hashable;

/// Amount of value carried by an output, in the smallest unit.
pub type Amount = u64;

// ---------------------------------------------------------------------------
// TxType
// ---------------------------------------------------------------------------

/// Discriminant for the kind of transaction.
///
/// Hashed as a single unsigned byte at the very start of a transaction's
/// contribution, so two transactions that differ only in type always hash
/// differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum TxType {
    /// Moves value from spent outputs to new outputs.
    #[default]
    Payment = TX_TYPE_PAYMENT,
    /// Locks value in place.
    Freeze = TX_TYPE_FREEZE,
}

impl TxType {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Maps a wire discriminant back to a type. `None` for unknown values.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            TX_TYPE_PAYMENT => Some(TxType::Payment),
            TX_TYPE_FREEZE => Some(TxType::Freeze),
            _ => None,
        }
    }
}

impl Hashable for TxType {
    fn compute_hash(&self, buffer: &mut BytesMut) {
        buffer.put_u8(self.as_u8());
    }
}

impl From<TxType> for u8 {
    fn from(tx_type: TxType) -> Self {
        tx_type.as_u8()
    }
}

impl TryFrom<u8> for TxType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        TxType::from_u8(value).ok_or_else(|| format!("unknown transaction type {value}"))
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Payment => write!(f, "Payment"),
            Self::Freeze => write!(f, "Freeze"),
        }
    }
}

// ---------------------------------------------------------------------------
// Amount wire form
// ---------------------------------------------------------------------------

/// Serde adapter for [`Amount`] fields: written as a decimal string.
///
/// Reading accepts the canonical decimal string (digits only, no sign, no
/// leading zeros except `"0"`) or a non-negative JSON integer.
pub(crate) mod decimal_amount {
    use std::fmt;

    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};

    use super::Amount;

    pub fn serialize<S: Serializer>(value: &Amount, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Amount, D::Error> {
        deserializer.deserialize_any(AmountVisitor)
    }

    /// Parses a canonical decimal amount.
    pub fn parse(text: &str) -> Result<Amount, String> {
        if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!("`{text}` is not a decimal amount"));
        }
        if text.len() > 1 && text.starts_with('0') {
            return Err(format!("`{text}` has leading zeros"));
        }
        text.parse::<Amount>().map_err(|e| format!("`{text}`: {e}"))
    }

    struct AmountVisitor;

    impl<'de> Visitor<'de> for AmountVisitor {
        type Value = Amount;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a decimal string or an unsigned 64-bit integer")
        }

        fn visit_str<E: de::Error>(self, text: &str) -> Result<Amount, E> {
            parse(text).map_err(E::custom)
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Amount, E> {
            Ok(value)
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Amount, E> {
            Amount::try_from(value)
                .map_err(|_| E::invalid_value(de::Unexpected::Signed(value), &self))
        }
    }
}
