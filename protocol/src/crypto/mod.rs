//! # Cryptographic Primitives for Tally
//!
//! The foundation every ledger record is keyed and authenticated by:
//!
//! - **hash**: the 64-byte [`Hash`] value type and its byte-order rules.
//! - **digest**: BLAKE2b-512 single, two-part and UTXO-key hashing.
//! - **keys**: Ed25519 seeds, keypairs, public keys and signatures.
//! - **signatures**: the signing/verification entry points.
//!
//! Everything here is a thin, type-safe wrapper around audited
//! implementations (`blake2`, `ed25519-dalek`). Nothing is reimplemented.

pub mod digest;
pub mod hash;
pub mod keys;
pub mod signatures;

pub use digest::{hash, hash_multi, make_utxo_key};
pub use hash::{Endian, Hash, HashError};
pub use keys::{KeyError, KeyPair, PublicKey, Seed, Signature};
pub use signatures::{sign, verify, SignatureError};
