//! The sealed, 504-byte wire packet.
//!
//! `Message` itself carries no cryptography — it is the fixed-layout shell
//! around an AEAD ciphertext. Sealing and opening (which need the channel
//! key and nonce construction) live in `chanseal-crypto`; this type only
//! defines the wire shape and raw field access.

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::{
    envelope::ENVELOPE_LEN,
    error::{ProtoError, Result},
    ids::{MessageIdHash, MSG_ID_HASH_LEN},
};

/// AEAD tag length in bytes.
pub const TAG_LEN: usize = 16;

/// Total wire size of a `Message`: sized to fit the IPv4 minimum path MTU
/// after IPv4+UDP headers.
pub const PACKET_SIZE: usize = MSG_ID_HASH_LEN + ENVELOPE_LEN + TAG_LEN;

/// Fixed 504-byte sealed packet: `id_hash || ciphertext || tag`.
#[repr(C, packed)]
#[derive(Clone, Copy, FromBytes, IntoBytes, KnownLayout, Immutable)]
pub struct Message {
    id_hash: [u8; MSG_ID_HASH_LEN],
    encrypted: [u8; ENVELOPE_LEN],
    tag: [u8; TAG_LEN],
}

const _: () = assert!(std::mem::size_of::<Message>() == PACKET_SIZE);
const _: () = assert!(PACKET_SIZE == 504);

impl Message {
    /// Assemble a sealed message from its three wire components. Called by
    /// `chanseal_crypto::seal_envelope` after AEAD-sealing the envelope
    /// bytes; this constructor does no cryptographic work itself.
    #[must_use]
    pub fn from_parts(id_hash: MessageIdHash, encrypted: [u8; ENVELOPE_LEN], tag: [u8; TAG_LEN]) -> Self {
        Self { id_hash: id_hash.0, encrypted, tag }
    }

    /// Parse a message from exactly [`PACKET_SIZE`] bytes of wire data.
    ///
    /// # Errors
    ///
    /// [`ProtoError::BufferTooShort`] if `bytes` is shorter than
    /// [`PACKET_SIZE`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::ref_from_prefix(bytes)
            .map(|(message, _)| *message)
            .map_err(|_| ProtoError::BufferTooShort { expected: PACKET_SIZE, actual: bytes.len() })
    }

    /// Serialize to a fixed-size byte array.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; PACKET_SIZE] {
        let bytes = IntoBytes::as_bytes(self);
        let mut out = [0u8; PACKET_SIZE];
        out.copy_from_slice(bytes);
        out
    }

    /// The public id hash, used by a receiver to match an inbound packet
    /// against an anticipated `(channel_id, message_id)` before attempting
    /// decryption.
    #[must_use]
    pub fn id_hash(&self) -> MessageIdHash {
        MessageIdHash(self.id_hash)
    }

    /// Raw AEAD ciphertext bytes (the sealed envelope).
    #[must_use]
    pub fn ciphertext(&self) -> [u8; ENVELOPE_LEN] {
        self.encrypted
    }

    /// Raw AEAD tag bytes.
    #[must_use]
    pub fn tag(&self) -> [u8; TAG_LEN] {
        self.tag
    }
}

impl std::fmt::Debug for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Message").field("id_hash", &self.id_hash()).finish_non_exhaustive()
    }
}

impl PartialEq for Message {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for Message {}
