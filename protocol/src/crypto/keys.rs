//! # Key Management
//!
//! Ed25519 seeds, keypairs, public keys and signatures.
//!
//! Every spent output in Tally is unlocked by an Ed25519 signature over the
//! structural hash of the spending transaction. This module wraps
//! `ed25519-dalek` in fixed-width value types that know how to print
//! themselves, parse themselves and (for public keys) take part in
//! structural hashing.
//!
//! ## Security considerations
//!
//! - Secret keys are zeroized on drop by ed25519-dalek.
//! - Fresh seeds come from `OsRng`.
//! - Neither `Seed` nor `KeyPair` prints secret bytes in `Debug` output.
//!   Exporting a seed is always an explicit call to [`Seed::to_hex`].
//!
//! ## Hex conventions
//!
//! Keys and signatures print in natural byte order (`0x` + lowercase hex).
//! Only [`Hash`](super::Hash) uses the reversed display order.

use std::fmt;
use std::str::FromStr;

use bytes::{BufMut, BytesMut};
use ed25519_dalek::{Signer, SigningKey, VerifyingKey};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use super::hash::{read_hex, write_hex, Endian, HashError};
use super::signatures::verify_checked;
use crate::config::{PUBLIC_KEY_LENGTH, SEED_LENGTH, SIGNATURE_LENGTH};
use crate::hashing::Hashable;

/// Errors that can occur while parsing key material.
///
/// Seed errors carry no detail about the rejected input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("malformed seed")]
    InvalidSeed,

    #[error("malformed public key: {0}")]
    MalformedPublicKey(#[source] HashError),

    #[error("public key bytes are not a valid Ed25519 point")]
    InvalidPublicKey,

    #[error("malformed signature: {0}")]
    MalformedSignature(#[source] HashError),
}

// ---------------------------------------------------------------------------
// Seed
// ---------------------------------------------------------------------------

/// The 32 secret bytes an Ed25519 keypair is derived from.
#[derive(Clone, PartialEq, Eq)]
pub struct Seed([u8; SEED_LENGTH]);

impl Seed {
    /// Draws a fresh seed from the OS RNG.
    pub fn generate() -> Self {
        let mut bytes = [0u8; SEED_LENGTH];
        OsRng.fill_bytes(&mut bytes);
        Seed(bytes)
    }

    pub fn from_bytes(bytes: [u8; SEED_LENGTH]) -> Self {
        Seed(bytes)
    }

    /// Parses a `0x`-prefixed, 64-digit hex seed.
    pub fn from_hex(s: &str) -> Result<Self, KeyError> {
        read_hex::<SEED_LENGTH>(s, Endian::Big)
            .map(Seed)
            .map_err(|_| KeyError::InvalidSeed)
    }

    /// Exports the seed as hex. **Handle with care.**
    pub fn to_hex(&self) -> String {
        write_hex(&self.0, Endian::Big)
    }

    pub fn as_bytes(&self) -> &[u8; SEED_LENGTH] {
        &self.0
    }
}

impl FromStr for Seed {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Seed::from_hex(s)
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Seed(<redacted>)")
    }
}

// ---------------------------------------------------------------------------
// KeyPair
// ---------------------------------------------------------------------------

/// An Ed25519 signing keypair.
///
/// Not `Serialize`. Export the secret with `keypair.seed().to_hex()`.
pub struct KeyPair {
    signing_key: SigningKey,
}

impl KeyPair {
    /// Generates a keypair from a fresh random seed.
    pub fn generate() -> Self {
        let signing_key = SigningKey::generate(&mut OsRng);
        Self { signing_key }
    }

    /// Derives the keypair for `seed`. Deterministic.
    pub fn from_seed(seed: &Seed) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(&seed.0),
        }
    }

    pub fn seed(&self) -> Seed {
        Seed(self.signing_key.to_bytes())
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.signing_key.verifying_key().to_bytes())
    }

    /// Signs `message`. Ed25519 is deterministic: same key, same message,
    /// same signature.
    pub fn sign(&self, message: &[u8]) -> Signature {
        Signature(self.signing_key.sign(message).to_bytes())
    }

    /// Verifies `signature` against this keypair's public key.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        self.public_key().verify(message, signature)
    }
}

impl Clone for KeyPair {
    fn clone(&self) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(&self.signing_key.to_bytes()),
        }
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyPair(pub={})", self.public_key().to_hex())
    }
}

impl PartialEq for KeyPair {
    /// Keypairs compare by public key.
    fn eq(&self, other: &Self) -> bool {
        self.public_key() == other.public_key()
    }
}

impl Eq for KeyPair {}

// ---------------------------------------------------------------------------
// PublicKey
// ---------------------------------------------------------------------------

/// A 32-byte Ed25519 public key, used as the address of an output.
///
/// Construction from raw bytes or hex does **not** check that the bytes are
/// a valid curve point: outputs may legitimately carry placeholder
/// addresses (the all-zero key is the default). Use
/// [`PublicKey::try_from_slice`] when the key must be usable for
/// verification.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PublicKey([u8; PUBLIC_KEY_LENGTH]);

impl PublicKey {
    pub const fn from_bytes(bytes: [u8; PUBLIC_KEY_LENGTH]) -> Self {
        PublicKey(bytes)
    }

    /// Builds a public key from a slice, checking length and that the bytes
    /// decode to a valid Ed25519 point.
    pub fn try_from_slice(slice: &[u8]) -> Result<Self, KeyError> {
        let bytes: [u8; PUBLIC_KEY_LENGTH] =
            slice.try_into().map_err(|_| KeyError::InvalidPublicKey)?;
        VerifyingKey::from_bytes(&bytes).map_err(|_| KeyError::InvalidPublicKey)?;
        Ok(PublicKey(bytes))
    }

    pub fn from_hex(s: &str) -> Result<Self, KeyError> {
        read_hex::<PUBLIC_KEY_LENGTH>(s, Endian::Big)
            .map(PublicKey)
            .map_err(KeyError::MalformedPublicKey)
    }

    pub fn to_hex(&self) -> String {
        write_hex(&self.0, Endian::Big)
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.0
    }

    pub fn to_verifying_key(&self) -> Result<VerifyingKey, KeyError> {
        VerifyingKey::from_bytes(&self.0).map_err(|_| KeyError::InvalidPublicKey)
    }

    /// Returns `true` if `signature` is a valid signature of `message` by
    /// this key. An invalid point simply fails verification.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        verify_checked(self, message, signature).is_ok()
    }
}

impl Hashable for PublicKey {
    fn compute_hash(&self, buffer: &mut BytesMut) {
        buffer.put_slice(&self.0);
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", &self.to_hex()[..18])
    }
}

impl FromStr for PublicKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PublicKey::from_hex(s)
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        PublicKey::from_hex(&s).map_err(de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Signature
// ---------------------------------------------------------------------------

/// A 64-byte Ed25519 signature.
///
/// Same width as a [`Hash`](super::Hash), which is what lets a transaction
/// input carry an all-zero placeholder signature from the moment it is
/// built and have it overwritten in place once the transaction hash is
/// known.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature([u8; SIGNATURE_LENGTH]);

impl Signature {
    /// The all-zero placeholder signature.
    pub const fn zero() -> Self {
        Signature([0u8; SIGNATURE_LENGTH])
    }

    pub const fn from_bytes(bytes: [u8; SIGNATURE_LENGTH]) -> Self {
        Signature(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LENGTH] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }

    /// Overwrites the contents of this buffer with `other`.
    ///
    /// The only mutation a signature ever sees: the second phase of
    /// transaction creation, after the hash has been computed.
    pub fn set(&mut self, other: &Signature) {
        self.0.copy_from_slice(&other.0);
    }

    pub fn from_hex(s: &str) -> Result<Self, KeyError> {
        read_hex::<SIGNATURE_LENGTH>(s, Endian::Big)
            .map(Signature)
            .map_err(KeyError::MalformedSignature)
    }

    pub fn to_hex(&self) -> String {
        write_hex(&self.0, Endian::Big)
    }
}

impl Default for Signature {
    fn default() -> Self {
        Signature::zero()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex_str = self.to_hex();
        write!(f, "Signature({}...{})", &hex_str[..10], &hex_str[122..])
    }
}

impl FromStr for Signature {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Signature::from_hex(s)
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Signature::from_hex(&s).map_err(de::Error::custom)
    }
}
