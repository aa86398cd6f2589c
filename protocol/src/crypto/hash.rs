//! # The `Hash` Value Type
//!
//! A 64-byte identifier. Every transaction, every spent output, every record
//! in the ledger is ultimately keyed by one of these.
//!
//! ## Byte order
//!
//! Internal storage is the digest output exactly as the hash function
//! produced it. The textual form (`0x` + 128 lowercase hex digits) prints
//! those bytes **reversed**. This is a wire convention shared with the other
//! implementations of the protocol: the same 64 bytes must always print as
//! the same string, so the reversal is not optional.
//!
//! Binary import/export takes an explicit [`Endian`] flag. `Endian::Big` is
//! storage order, `Endian::Little` is reversed. When in doubt, it's `Big`.

use std::fmt;
use std::str::FromStr;

use bytes::{BufMut, BytesMut};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::config::{HASH_WIDTH, HEX_PREFIX};
use crate::hashing::Hashable;

/// Errors produced when constructing a [`Hash`] (or another fixed-width
/// value) from external data.
///
/// The first four variants are format errors on hex input; the last one is
/// a length error on binary input. Neither is ever "fixed up" by truncating
/// or padding: malformed input is a caller bug and is reported as such.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HashError {
    #[error("hex string must start with \"0x\"")]
    MissingPrefix,

    #[error("hex string has an odd number of digits ({digits})")]
    OddLength { digits: usize },

    #[error("invalid hex character {character:?} at position {position}")]
    InvalidHexCharacter { character: char, position: usize },

    #[error("hex string decodes to {actual} bytes, expected {expected}")]
    WrongLength { expected: usize, actual: usize },

    #[error("binary buffer is {actual} bytes, expected {expected}")]
    InvalidBufferLength { expected: usize, actual: usize },
}

/// Byte order used when importing or exporting the raw bytes of a hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endian {
    /// Storage order, no reversal.
    #[default]
    Big,
    /// Reversed order.
    Little,
}

/// A fixed-width (64-byte) hash.
///
/// `Copy`, immutable, compared byte-wise. Ordering and `std::hash::Hash`
/// are derived so hashes can key `BTreeMap`s and `HashMap`s directly.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Hash([u8; HASH_WIDTH]);

impl Hash {
    /// Number of bytes in a hash.
    pub const WIDTH: usize = HASH_WIDTH;

    /// The hash consisting of zero values for all bytes.
    ///
    /// Used as a placeholder (a transaction that spends nothing in
    /// particular, a missing record) and as the result of hashing an absent
    /// record.
    pub const fn zero() -> Self {
        Hash([0u8; HASH_WIDTH])
    }

    /// Wraps bytes that are already in storage order.
    pub const fn new(bytes: [u8; HASH_WIDTH]) -> Self {
        Hash(bytes)
    }

    /// Parses the canonical `0x`-prefixed, byte-reversed hex form.
    pub fn from_hex(s: &str) -> Result<Self, HashError> {
        read_hex::<HASH_WIDTH>(s, Endian::Little).map(Hash)
    }

    /// Writes the canonical `0x`-prefixed, byte-reversed hex form.
    pub fn to_hex(&self) -> String {
        write_hex(&self.0, Endian::Little)
    }

    /// Builds a hash from exactly [`Hash::WIDTH`] bytes.
    ///
    /// With `Endian::Little` the buffer is reversed on the way in.
    pub fn from_bytes(buf: &[u8], endian: Endian) -> Result<Self, HashError> {
        if buf.len() != HASH_WIDTH {
            return Err(HashError::InvalidBufferLength {
                expected: HASH_WIDTH,
                actual: buf.len(),
            });
        }
        let mut bytes = [0u8; HASH_WIDTH];
        bytes.copy_from_slice(buf);
        if endian == Endian::Little {
            bytes.reverse();
        }
        Ok(Hash(bytes))
    }

    /// Returns a copy of the bytes, reversed when `endian` is `Little`.
    pub fn to_bytes(&self, endian: Endian) -> [u8; HASH_WIDTH] {
        let mut bytes = self.0;
        if endian == Endian::Little {
            bytes.reverse();
        }
        bytes
    }

    /// Read-only view of the bytes in storage order.
    pub fn as_bytes(&self) -> &[u8; HASH_WIDTH] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }
}

impl Default for Hash {
    fn default() -> Self {
        Hash::zero()
    }
}

impl AsRef<[u8]> for Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Hashable for Hash {
    fn compute_hash(&self, buffer: &mut BytesMut) {
        buffer.put_slice(&self.0);
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", self.to_hex())
    }
}

impl FromStr for Hash {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Hash::from_hex(s)
    }
}

impl Serialize for Hash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Hash::from_hex(&s).map_err(de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Hex helpers shared by the fixed-width types
// ---------------------------------------------------------------------------

/// Decodes a `0x`-prefixed hex string into exactly `N` bytes.
///
/// `Endian::Little` means the string is in reversed order relative to
/// storage (the [`Hash`] convention); `Endian::Big` means natural order
/// (keys, signatures, payloads).
pub(crate) fn read_hex<const N: usize>(s: &str, endian: Endian) -> Result<[u8; N], HashError> {
    let decoded = read_hex_vec(s)?;
    if decoded.len() != N {
        return Err(HashError::WrongLength {
            expected: N,
            actual: decoded.len(),
        });
    }
    let mut bytes = [0u8; N];
    bytes.copy_from_slice(&decoded);
    if endian == Endian::Little {
        bytes.reverse();
    }
    Ok(bytes)
}

/// Decodes a `0x`-prefixed hex string of any even length, natural order.
///
/// Positions in errors count characters from the start of `s`, prefix
/// included.
pub(crate) fn read_hex_vec(s: &str) -> Result<Vec<u8>, HashError> {
    let digits = s.strip_prefix(HEX_PREFIX).ok_or(HashError::MissingPrefix)?;
    if let Some((index, character)) = digits
        .chars()
        .enumerate()
        .find(|(_, c)| !c.is_ascii_hexdigit())
    {
        return Err(HashError::InvalidHexCharacter {
            character,
            position: index + HEX_PREFIX.len(),
        });
    }
    // All ASCII from here on, so byte length is digit count.
    if digits.len() % 2 != 0 {
        return Err(HashError::OddLength {
            digits: digits.len(),
        });
    }
    hex::decode(digits).map_err(|_| HashError::OddLength {
        digits: digits.len(),
    })
}

/// Encodes bytes as `0x` + lowercase hex, reversing first for `Little`.
pub(crate) fn write_hex(bytes: &[u8], endian: Endian) -> String {
    let encoded = match endian {
        Endian::Big => hex::encode(bytes),
        Endian::Little => {
            let reversed: Vec<u8> = bytes.iter().rev().copied().collect();
            hex::encode(reversed)
        }
    };
    format!("{HEX_PREFIX}{encoded}")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "0x5d7f6a7a30f7ff591c8649f61eb8a35d034824ed5cd252c2c6f10cdbd2236713\
                          dc369ef2a44b62ba113814a9d819a276ff61582874c9aee9c98efa2aa1f10d73";

    fn counting_bytes() -> [u8; HASH_WIDTH] {
        let mut bytes = [0u8; HASH_WIDTH];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = i as u8;
        }
        bytes
    }

    #[test]
    fn hex_roundtrip_keeps_display_order() {
        let h = Hash::from_hex(SAMPLE).unwrap();
        assert_eq!(h.to_hex(), SAMPLE);
        assert_eq!(h.to_string(), SAMPLE);
    }

    #[test]
    fn hex_is_reversed_relative_to_storage() {
        let h = Hash::from_hex(SAMPLE).unwrap();
        // Last printed byte is the first stored byte.
        assert_eq!(h.as_bytes()[0], 0x73);
        assert_eq!(h.as_bytes()[HASH_WIDTH - 1], 0x5d);
    }

    #[test]
    fn uppercase_hex_is_accepted_but_printed_lowercase() {
        let upper = format!("0x{}", SAMPLE[2..].to_uppercase());
        let h = Hash::from_hex(&upper).unwrap();
        assert_eq!(h.to_hex(), SAMPLE);
    }

    #[test]
    fn from_hex_requires_prefix() {
        assert_eq!(
            Hash::from_hex(&SAMPLE[2..]),
            Err(HashError::MissingPrefix)
        );
    }

    #[test]
    fn from_hex_rejects_odd_length() {
        let odd = &SAMPLE[..SAMPLE.len() - 1];
        assert_eq!(
            Hash::from_hex(odd),
            Err(HashError::OddLength { digits: 127 })
        );
    }

    #[test]
    fn from_hex_rejects_non_hex() {
        let bad = format!("0xzz{}", &SAMPLE[4..]);
        assert!(matches!(
            Hash::from_hex(&bad),
            Err(HashError::InvalidHexCharacter { character: 'z', .. })
        ));
    }

    #[test]
    fn from_hex_reports_non_ascii_character() {
        let bad = format!("0x{}é", "0".repeat(126));
        assert_eq!(
            Hash::from_hex(&bad),
            Err(HashError::InvalidHexCharacter {
                character: 'é',
                position: 128
            })
        );

        let bad = format!("0x{}é{}", "0".repeat(10), "0".repeat(115));
        assert_eq!(
            Hash::from_hex(&bad),
            Err(HashError::InvalidHexCharacter {
                character: 'é',
                position: 12
            })
        );
    }

    #[test]
    fn from_hex_rejects_wrong_decoded_length() {
        // Never padded, never truncated.
        assert_eq!(
            Hash::from_hex("0xabcd"),
            Err(HashError::WrongLength {
                expected: HASH_WIDTH,
                actual: 2
            })
        );
        let long = format!("{SAMPLE}00");
        assert_eq!(
            Hash::from_hex(&long),
            Err(HashError::WrongLength {
                expected: HASH_WIDTH,
                actual: 65
            })
        );
    }

    #[test]
    fn binary_roundtrip_both_orders() {
        let bytes = counting_bytes();
        for endian in [Endian::Big, Endian::Little] {
            let h = Hash::from_bytes(&bytes, endian).unwrap();
            assert_eq!(h.to_bytes(endian), bytes);
        }
    }

    #[test]
    fn little_endian_reverses_on_import() {
        let bytes = counting_bytes();
        let big = Hash::from_bytes(&bytes, Endian::Big).unwrap();
        let little = Hash::from_bytes(&bytes, Endian::Little).unwrap();
        assert_ne!(big, little);
        assert_eq!(little.to_bytes(Endian::Big), big.to_bytes(Endian::Little));
    }

    #[test]
    fn from_bytes_rejects_wrong_length() {
        assert_eq!(
            Hash::from_bytes(&[0u8; 32], Endian::Big),
            Err(HashError::InvalidBufferLength {
                expected: HASH_WIDTH,
                actual: 32
            })
        );
    }

    #[test]
    fn to_bytes_returns_a_copy() {
        let h = Hash::new(counting_bytes());
        let mut copy = h.to_bytes(Endian::Big);
        copy[0] = 0xff;
        assert_eq!(h.as_bytes()[0], 0);
    }

    #[test]
    fn zero_is_all_zero_and_default() {
        assert!(Hash::zero().is_zero());
        assert_eq!(Hash::default(), Hash::zero());
        assert_eq!(Hash::zero().to_hex(), format!("0x{}", "0".repeat(128)));
        assert!(!Hash::new(counting_bytes()).is_zero());
    }

    #[test]
    fn equality_is_bytewise() {
        let a = Hash::new(counting_bytes());
        let mut other = counting_bytes();
        assert_eq!(a, Hash::new(other));
        other[63] ^= 1;
        assert_ne!(a, Hash::new(other));
    }

    #[test]
    fn json_is_the_hex_string() {
        let h = Hash::from_hex(SAMPLE).unwrap();
        let json = serde_json::to_string(&h).unwrap();
        assert_eq!(json, format!("\"{SAMPLE}\""));
        let back: Hash = serde_json::from_str(&json).unwrap();
        assert_eq!(back, h);
    }

    #[test]
    fn json_rejects_malformed_hex() {
        assert!(serde_json::from_str::<Hash>("\"0x1234\"").is_err());
    }

    #[test]
    fn contributes_storage_bytes() {
        let h = Hash::from_hex(SAMPLE).unwrap();
        let mut buffer = BytesMut::new();
        h.compute_hash(&mut buffer);
        assert_eq!(&buffer[..], h.as_bytes());
    }
}
