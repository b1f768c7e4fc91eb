//! Channel-scoped AEAD sealing of envelopes into wire `Message`s.
//!
//! `XChaCha20-Poly1305` plays the role the source design gives to a
//! Gimli-permutation AEAD (no Rust implementation of a Gimli AEAD exists;
//! `chacha20poly1305` is already a dependency of the crate this one is
//! modeled on). The channel id is the key directly (already 32 bytes, the
//! cipher's native key length); the message id is the nonce, zero-padded
//! from 6 to the cipher's 24-byte extended nonce.

use chacha20poly1305::{
    aead::{Aead, KeyInit, Payload},
    Key, XChaCha20Poly1305, XNonce,
};
use chanseal_proto::{ChannelId, Envelope, Message, MessageId, ENVELOPE_LEN, TAG_LEN};

use crate::{
    error::{CryptoError, Result},
    hash::calculate_message_id_hash,
};

const AAD_MAGIC: &str = "ȱ message";

fn nonce_for(message_id: MessageId) -> XNonce {
    let mut bytes = [0u8; 24];
    bytes[..6].copy_from_slice(&message_id.to_be_bytes());
    XNonce::clone_from_slice(&bytes)
}

/// Seal `envelope` into a wire-format `Message` bound to `(channel_id,
/// message_id)`.
#[must_use]
pub fn seal_envelope(channel_id: &ChannelId, message_id: MessageId, envelope: &Envelope) -> Message {
    let cipher = XChaCha20Poly1305::new(Key::from_slice(channel_id.as_bytes()));
    let nonce = nonce_for(message_id);
    let plaintext = envelope.to_bytes();

    let Ok(sealed) = cipher.encrypt(&nonce, Payload { msg: &plaintext, aad: AAD_MAGIC.as_bytes() }) else {
        unreachable!("XChaCha20-Poly1305 encryption cannot fail with valid inputs");
    };

    let (ciphertext, tag) = sealed.split_at(ENVELOPE_LEN);
    let mut ciphertext_buf = [0u8; ENVELOPE_LEN];
    ciphertext_buf.copy_from_slice(ciphertext);
    let mut tag_buf = [0u8; TAG_LEN];
    tag_buf.copy_from_slice(tag);

    let id_hash = calculate_message_id_hash(channel_id, message_id);
    Message::from_parts(id_hash, ciphertext_buf, tag_buf)
}

/// Open a sealed `Message`, returning its plaintext envelope.
///
/// The caller should first compare `message.id_hash()` against
/// `calculate_message_id_hash(channel_id, message_id)` to find a
/// candidate `(channel_id, message_id)` pair before calling this.
///
/// # Errors
///
/// [`CryptoError::AuthenticationFailed`] if the AEAD tag does not verify,
/// including when the wrong `(channel_id, message_id)` pair is supplied.
pub fn open_message(channel_id: &ChannelId, message_id: MessageId, message: &Message) -> Result<Envelope> {
    let cipher = XChaCha20Poly1305::new(Key::from_slice(channel_id.as_bytes()));
    let nonce = nonce_for(message_id);

    let mut combined = Vec::with_capacity(ENVELOPE_LEN + TAG_LEN);
    combined.extend_from_slice(&message.ciphertext());
    combined.extend_from_slice(&message.tag());

    let plaintext = cipher
        .decrypt(&nonce, Payload { msg: &combined, aad: AAD_MAGIC.as_bytes() })
        .map_err(|_| CryptoError::AuthenticationFailed)?;

    Envelope::from_bytes(&plaintext).map_err(|_| CryptoError::AuthenticationFailed)
}
