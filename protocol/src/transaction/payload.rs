//! Opaque data attached to a transaction.

use bytes::BufMut;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::crypto::hash::{read_hex_vec, write_hex, Endian};
use crate::hashing::{BytesMut, Hashable};

/// Arbitrary application bytes stored with a transaction.
///
/// Contributes its raw bytes to the transaction hash, without a length
/// prefix. An empty payload contributes nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DataPayload {
    pub data: Vec<u8>,
}

impl DataPayload {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// `0x`-prefixed hex of the payload bytes, natural order.
    pub fn to_hex(&self) -> String {
        write_hex(&self.data, Endian::Big)
    }
}

impl From<Vec<u8>> for DataPayload {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

impl From<&[u8]> for DataPayload {
    fn from(data: &[u8]) -> Self {
        Self::new(data.to_vec())
    }
}

impl Hashable for DataPayload {
    fn compute_hash(&self, buffer: &mut BytesMut) {
        buffer.put_slice(&self.data);
    }
}

impl Serialize for DataPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for DataPayload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        read_hex_vec(&s).map(Self::new).map_err(de::Error::custom)
    }
}
