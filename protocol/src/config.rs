//! # Protocol Configuration & Constants
//!
//! Every fixed width and discriminant in Tally lives here. These values are
//! part of the wire and hashing contract: two implementations that disagree
//! on any of them will compute different hashes for the same record, so
//! changing one is a protocol break, not a refactor.

// ---------------------------------------------------------------------------
// Protocol Version
// ---------------------------------------------------------------------------

/// The full version string of the hashing protocol.
pub const PROTOCOL_VERSION: &str = "0.1.0";

// ---------------------------------------------------------------------------
// Hashing Parameters
// ---------------------------------------------------------------------------

/// The digest used for every hash in the protocol: BLAKE2b with the full
/// 512-bit output (libsodium's `crypto_generichash` with `outlen = 64`).
pub const PRIMARY_HASH_FUNCTION: &str = "BLAKE2b-512";

/// Width of a [`Hash`](crate::crypto::Hash) in bytes.
pub const HASH_WIDTH: usize = 64;

/// Width of the output index when deriving a UTXO key. Always 8 bytes,
/// always little-endian. Anything else produces incompatible keys.
pub const UTXO_INDEX_WIDTH: usize = 8;

/// Prefix carried by every hex string the protocol emits or accepts.
pub const HEX_PREFIX: &str = "0x";

// ---------------------------------------------------------------------------
// Signing Parameters
// ---------------------------------------------------------------------------

/// Ed25519 for every signature in the protocol.
pub const SIGNING_ALGORITHM: &str = "Ed25519";

/// Secret seed length in bytes. An Ed25519 secret key *is* its 32-byte seed.
pub const SEED_LENGTH: usize = 32;

/// Public key length in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Signature length. Matches [`HASH_WIDTH`], which is what lets an input
/// pre-allocate its signature buffer before the transaction is hashed.
pub const SIGNATURE_LENGTH: usize = 64;

// ---------------------------------------------------------------------------
// Transaction Parameters
// ---------------------------------------------------------------------------

/// Discriminant byte hashed for a payment transaction.
pub const TX_TYPE_PAYMENT: u8 = 0;

/// Discriminant byte hashed for a freeze transaction.
pub const TX_TYPE_FREEZE: u8 = 1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_fits_hash_shaped_buffer() {
        assert_eq!(SIGNATURE_LENGTH, HASH_WIDTH);
    }

    #[test]
    fn utxo_index_is_u64() {
        assert_eq!(UTXO_INDEX_WIDTH, std::mem::size_of::<u64>());
    }

    #[test]
    fn tx_type_discriminants_are_distinct() {
        assert_ne!(TX_TYPE_PAYMENT, TX_TYPE_FREEZE);
    }
}
