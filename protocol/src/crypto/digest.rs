//! # Hash Primitives
//!
//! The three stateless functions every other hash in Tally is built from:
//!
//! - [`hash`]: BLAKE2b-512 of a byte string.
//! - [`hash_multi`]: the hash of two byte strings concatenated, first one
//!   first. The order is part of the protocol; swapping the arguments gives
//!   a different (and incompatible) hash.
//! - [`make_utxo_key`]: the key of a transaction output, derived from the
//!   transaction hash and the output's position.
//!
//! The digest itself is the `blake2` crate's `Blake2b512`, which is
//! byte-for-byte what libsodium's `crypto_generichash` produces with a
//! 64-byte output and no key. It's pure Rust with no global state, so there
//! is nothing to initialize before the first call.

use blake2::{Blake2b512, Digest};

use super::hash::Hash;
use crate::config::{HASH_WIDTH, UTXO_INDEX_WIDTH};

/// Hash a byte string.
///
/// # Example
///
/// ```
/// use tally_protocol::crypto::hash;
///
/// let h = hash(b"abc");
/// assert!(h.to_hex().starts_with("0x239900d4"));
/// ```
pub fn hash(source: &[u8]) -> Hash {
    let mut hasher = Blake2b512::new();
    hasher.update(source);
    finish(hasher)
}

/// Hash two byte strings as if they were concatenated (`source1 || source2`).
///
/// The two parts are fed to the hasher one after the other instead of being
/// copied into a temporary buffer. Same digest, no allocation.
pub fn hash_multi(source1: &[u8], source2: &[u8]) -> Hash {
    let mut hasher = Blake2b512::new();
    hasher.update(source1);
    hasher.update(source2);
    finish(hasher)
}

/// Derive the UTXO key for output `index` of the transaction hashed to `h`.
///
/// `hash_multi(h, index as u64 little-endian)`. The index is always encoded
/// on 8 bytes: a 4-byte or big-endian encoding would silently produce keys
/// nobody else can find.
pub fn make_utxo_key(h: &Hash, index: u64) -> Hash {
    let index_bytes: [u8; UTXO_INDEX_WIDTH] = index.to_le_bytes();
    hash_multi(h.as_bytes(), &index_bytes)
}

fn finish(hasher: Blake2b512) -> Hash {
    let result = hasher.finalize();
    let mut output = [0u8; HASH_WIDTH];
    output.copy_from_slice(&result);
    Hash::new(output)
}
