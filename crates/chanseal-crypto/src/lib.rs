//! Chanseal Cryptographic Primitives
//!
//! Cryptography for the Chanseal envelope and framing core: domain-separated
//! hashing, Ed25519 envelope signing, and channel-scoped AEAD sealing of
//! envelopes into wire messages.
//!
//! ```text
//! Envelope bytes
//!        │
//!        ├─ sign_envelope  (Ed25519, deterministic)
//!        │
//!        ▼
//! Signed envelope
//!        │
//!        ├─ seal_envelope  (XChaCha20-Poly1305, key = ChannelId, nonce = MessageId)
//!        │
//!        ▼
//! Sealed Message
//! ```
//!
//! # Security
//!
//! - Signing is deterministic Ed25519 (RFC 8032): same key and envelope
//!   bytes always produce the same signature. This core has no forward
//!   secrecy and no key rotation; those are out of scope (see `SPEC_FULL.md`).
//! - Sealing keys every message directly under its channel's id with no
//!   ratchet or per-message key derivation — a channel's messages share one
//!   AEAD key, distinguished only by the per-message nonce derived from the
//!   message id. Replay defense is limited to what a unique, hashed message
//!   identifier implicitly provides.
//! - Authentication tag rejection (`AuthenticationFailed`) covers both
//!   tampered ciphertext and a mismatched `(channel_id, message_id)` pair.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod error;
pub mod hash;
pub mod seal;
pub mod sign;

pub use chanseal_proto::MessageIdHash;
pub use error::{CryptoError, Result};
pub use hash::{calculate_message_hash, calculate_message_id_hash};
pub use seal::{open_message, seal_envelope};
pub use sign::{sign_envelope, verify_envelope};
