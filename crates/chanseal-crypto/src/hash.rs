//! Domain-separated hashing for message identifiers and message content.
//!
//! Both hashes prepend a short magic string before the fields being hashed,
//! the way `derivation.rs` prepends a sender-key label before epoch and
//! sender index. The magic strings' leading character is U+0231 (`ȱ`,
//! LATIN SMALL LETTER O WITH STROKE AND DESCENDER); its UTF-8 encoding is
//! `0xC8 0xB1`.

use chanseal_proto::{
    ChannelId, Message, MessageHash, MessageId, MessageIdHash, MSG_HASH_LEN, MSG_ID_HASH_LEN,
};

const ID_HASH_MAGIC: &str = "ȱ id hash";
const MESSAGE_HASH_MAGIC: &str = "ȱ message hash";

/// Compute the public, non-revealing identifier hash for `(channel_id,
/// message_id)`.
#[must_use]
pub fn calculate_message_id_hash(channel_id: &ChannelId, message_id: MessageId) -> MessageIdHash {
    let mut hasher = blake3::Hasher::new();
    hasher.update(ID_HASH_MAGIC.as_bytes());
    hasher.update(channel_id.as_bytes());
    hasher.update(&message_id.to_be_bytes());

    let digest = hasher.finalize();
    let mut out = [0u8; MSG_ID_HASH_LEN];
    out.copy_from_slice(&digest.as_bytes()[..MSG_ID_HASH_LEN]);
    MessageIdHash(out)
}

/// Compute the content hash of a sealed [`Message`]'s 504-byte wire image,
/// used to reference it from a later message's reply graph.
#[must_use]
pub fn calculate_message_hash(message: &Message) -> MessageHash {
    let mut hasher = blake3::Hasher::new();
    hasher.update(MESSAGE_HASH_MAGIC.as_bytes());
    hasher.update(&message.to_bytes());

    let digest = hasher.finalize();
    let mut out = [0u8; MSG_HASH_LEN];
    out.copy_from_slice(&digest.as_bytes()[..MSG_HASH_LEN]);
    MessageHash(out)
}
