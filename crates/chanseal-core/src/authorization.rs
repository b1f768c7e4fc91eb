//! Capability parsing and authorization evaluation.
//!
//! A capability is the payload region of an envelope whose role is to
//! grant a key the right to sign further envelopes, subject to a list of
//! conditions: `pubkey[32] || json_conditions || zero_padding`.

use chanseal_crypto::verify_envelope;
use chanseal_proto::{Envelope, MessageId};
use ed25519_dalek::VerifyingKey;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{AuthorizationError, Result};

/// A single recognized predicate attached to a capability.
///
/// Closed set: unknown tags fail to parse rather than being silently
/// ignored. Represented as a newtype-variant enum so the JSON surface is
/// exactly `{"<tag>": <value>}`, matching serde's externally-tagged
/// newtype-variant encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Condition {
    /// Authorizes messages with ids up to `authorization.message_id + ttl`
    /// (inclusive).
    #[serde(rename = "ttl")]
    Ttl(u64),
}

impl Condition {
    fn check(self, authorization_message_id: MessageId, candidate_message_id: MessageId) -> bool {
        match self {
            // `ttl` is attacker/peer-controlled JSON input; a bound near
            // u64::MAX must saturate rather than overflow the addition.
            Self::Ttl(ttl) => candidate_message_id.value() <= authorization_message_id.value().saturating_add(ttl),
        }
    }
}

/// An in-memory view of a capability: its raw bytes plus the id of the
/// message that minted it.
///
/// `bytes` is borrowed directly from a capability envelope's payload
/// slice (no copy); JSON parsing below operates on that same borrowed
/// slice, so memory use stays proportional to the envelope's fixed
/// payload size rather than growing with arbitrary input.
#[derive(Debug, Clone, Copy)]
pub struct Authorization<'a> {
    bytes: &'a [u8],
    message_id: MessageId,
}

const PUBKEY_LEN: usize = 32;

impl<'a> Authorization<'a> {
    /// Construct a view over a capability envelope's payload bytes.
    ///
    /// `bytes` must be at least [`PUBKEY_LEN`] long, which every envelope
    /// payload slice is (378 bytes).
    #[must_use]
    pub fn new(bytes: &'a [u8], message_id: MessageId) -> Self {
        debug_assert!(bytes.len() >= PUBKEY_LEN, "capability bytes shorter than a public key");
        Self { bytes, message_id }
    }

    /// The message id that minted this capability.
    #[must_use]
    pub fn message_id(&self) -> MessageId {
        self.message_id
    }

    /// Check whether this capability authorizes `candidate_envelope`
    /// (identified by `candidate_message_id`).
    ///
    /// Returns `Ok(false)` (not an error) when the embedded public key is
    /// malformed or the signature does not verify — only parse and
    /// padding failures, which indicate a structurally broken capability,
    /// propagate as errors.
    ///
    /// # Errors
    ///
    /// [`AuthorizationError::MalformedJson`] if the condition list is not
    /// valid JSON; [`AuthorizationError::UnknownCondition`] if a condition
    /// uses an unrecognized tag; [`AuthorizationError::InvalidPadding`] if
    /// bytes after the JSON value are not all zero.
    pub fn authorizes(&self, candidate_envelope: &Envelope, candidate_message_id: MessageId) -> Result<bool> {
        if self.bytes.len() < PUBKEY_LEN {
            return Ok(false);
        }

        let mut pubkey = [0u8; PUBKEY_LEN];
        pubkey.copy_from_slice(&self.bytes[..PUBKEY_LEN]);
        let Ok(verifying_key) = VerifyingKey::from_bytes(&pubkey) else {
            debug!("capability public key bytes are not a valid Ed25519 point");
            return Ok(false);
        };

        if verify_envelope(candidate_envelope, &verifying_key).is_err() {
            debug!(candidate_message_id = candidate_message_id.value(), "candidate envelope signature did not verify");
            return Ok(false);
        }

        let conditions = self.parse_conditions()?;
        let authorized = conditions.iter().all(|c| c.check(self.message_id, candidate_message_id));
        if authorized {
            debug!(candidate_message_id = candidate_message_id.value(), "candidate authorized");
        } else {
            debug!(candidate_message_id = candidate_message_id.value(), "candidate rejected by a condition");
        }
        Ok(authorized)
    }

    fn parse_conditions(&self) -> Result<Vec<Condition>> {
        let json_bytes = &self.bytes[PUBKEY_LEN..];
        let mut deserializer = serde_json::Deserializer::from_slice(json_bytes);
        let conditions = Vec::<Condition>::deserialize(&mut deserializer).map_err(|e| {
            warn!(error = %e, "capability condition list failed to parse");
            AuthorizationError::MalformedJson { reason: e.to_string() }
        })?;
        let consumed = deserializer.byte_offset();

        if let Some(offset) = json_bytes[consumed..].iter().position(|&b| b != 0) {
            let offset = PUBKEY_LEN + consumed + offset;
            warn!(offset, "capability has non-zero padding after its condition list");
            return Err(AuthorizationError::InvalidPadding { offset });
        }

        Ok(conditions)
    }
}
