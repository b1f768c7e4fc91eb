//! Envelope signing and verification with Ed25519.
//!
//! Signing is deterministic (`ed25519-dalek`'s default `sign`, RFC 8032) —
//! the source this core was distilled from used randomized nonces, but the
//! spec permits a deterministic implementation, and determinism is more
//! convenient for reproducible tests here.

use chanseal_proto::Envelope;
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};

use crate::error::{CryptoError, Result};

/// Sign `envelope`'s signing domain (everything but the signature field)
/// and write the resulting signature into the envelope.
pub fn sign_envelope(envelope: &mut Envelope, signing_key: &SigningKey) {
    let signature = signing_key.sign(&envelope.signing_data());
    envelope.set_signature(signature.to_bytes());
}

/// Verify that `envelope`'s signature field authenticates its signing
/// domain under `verifying_key`.
///
/// # Errors
///
/// [`CryptoError::SignatureVerification`] if the signature does not match.
pub fn verify_envelope(envelope: &Envelope, verifying_key: &VerifyingKey) -> Result<()> {
    let signature = Signature::from_bytes(&envelope.signature());
    verifying_key
        .verify(&envelope.signing_data(), &signature)
        .map_err(|_| CryptoError::SignatureVerification)
}
