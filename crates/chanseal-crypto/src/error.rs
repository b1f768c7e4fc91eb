//! Cryptographic failure modes for the Chanseal envelope protocol.

use thiserror::Error;

/// Errors raised by signing, verification, and AEAD sealing/opening.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CryptoError {
    /// An Ed25519 signature did not authenticate the envelope bytes it
    /// claims to cover.
    #[error("signature verification failed")]
    SignatureVerification,

    /// An AEAD tag did not authenticate, or the wrong `(channel_id,
    /// message_id)` pair was used to open a sealed message.
    #[error("AEAD authentication failed")]
    AuthenticationFailed,
}

/// Convenience result alias for this crate.
pub type Result<T> = std::result::Result<T, CryptoError>;
