//! # Digital Signatures
//!
//! Free-function entry points for Ed25519 signing and verification. This is
//! the signing service the transaction layer consumes: it only ever asks
//! for `sign(secret, message) -> 64 bytes` and its inverse, so everything
//! that touches a signing key goes through this one place.

use ed25519_dalek::{Signature as DalekSignature, Verifier};
use thiserror::Error;

use super::keys::{KeyPair, PublicKey, Signature};

/// Errors during signature verification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("signature verification failed")]
    VerificationFailed,

    #[error("invalid public key")]
    InvalidPublicKey,
}

/// Signs `message` with `keypair`.
///
/// # Example
///
/// ```
/// use tally_protocol::crypto::{sign, verify, KeyPair};
///
/// let keypair = KeyPair::generate();
/// let signature = sign(&keypair, b"spend");
/// assert!(verify(&keypair.public_key(), b"spend", &signature));
/// ```
pub fn sign(keypair: &KeyPair, message: &[u8]) -> Signature {
    keypair.sign(message)
}

/// Returns `true` if `signature` is valid for `message` under `public_key`.
pub fn verify(public_key: &PublicKey, message: &[u8], signature: &Signature) -> bool {
    public_key.verify(message, signature)
}

/// Like [`verify`], but tells an unusable key apart from a bad signature.
pub fn verify_checked(
    public_key: &PublicKey,
    message: &[u8],
    signature: &Signature,
) -> Result<(), SignatureError> {
    let verifying_key = public_key
        .to_verifying_key()
        .map_err(|_| SignatureError::InvalidPublicKey)?;
    let dalek_sig = DalekSignature::from_bytes(signature.as_bytes());
    verifying_key
        .verify(message, &dalek_sig)
        .map_err(|_| SignatureError::VerificationFailed)
}
