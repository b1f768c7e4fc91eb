//! Chanseal Wire Layout
//!
//! Fixed-size wire structures for the Chanseal envelope and framing core:
//! the 482-byte `Envelope` and the 504-byte sealed `Message` that wraps it,
//! plus the varint codec and reply-graph encoding used inside an envelope's
//! variable region.
//!
//! ```text
//! Envelope (482 bytes, plaintext, signed)
//!   header | authorization ref | first_in_reply_to | variable[378] | signature
//!                                                      ^
//!                                            reply-graph entries | payload
//!
//! Message (504 bytes, wire packet)
//!   id_hash | AEAD(envelope) | tag
//! ```
//!
//! This crate has no cryptographic dependencies: signing, verification,
//! hashing, and AEAD sealing live in `chanseal-crypto`, which operates on
//! the byte views this crate exposes (`Envelope::signing_data`,
//! `Envelope::to_bytes`, `Message::from_parts`).

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod envelope;
pub mod error;
pub mod ids;
pub mod message;
pub mod replygraph;
pub mod varint;

pub use envelope::{Envelope, PayloadType, ENVELOPE_LEN, SIGNING_LEN, VARIABLE_LEN};
pub use error::{ProtoError, Result};
pub use ids::{
    ChannelId, IntraChannelReference, MessageHash, MessageId, MessageIdHash, CHANNEL_ID_LEN,
    MSG_HASH_LEN, MSG_ID_HASH_LEN, MSG_ID_LEN,
};
pub use message::{Message, PACKET_SIZE, TAG_LEN};
pub use replygraph::{add_in_reply_to, iterate_reply_to, ReplyGraphIter};
