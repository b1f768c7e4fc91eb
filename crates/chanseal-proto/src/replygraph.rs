//! Reply-graph encoding: a delta-compressed, strictly-decreasing list of
//! [`IntraChannelReference`] entries packed into the front of an envelope's
//! 378-byte variable region.
//!
//! Each stored entry is `varint(delta) || MessageHash` where `delta` is the
//! difference between the previous entry's id (or, for the first entry,
//! `own_message_id.prev()`, the 48-bit-wrapping predecessor) and this
//! entry's id. Entries cluster near the message's own id, so replies to
//! recent messages encode in a single varint byte.

use crate::{
    envelope::Envelope,
    error::{ProtoError, Result},
    ids::{IntraChannelReference, MessageHash, MessageId, MSG_HASH_LEN},
    varint,
};

/// Insert `entry` into `envelope`'s reply graph.
///
/// # Errors
///
/// [`ProtoError::NoSpace`] if the insertion would push the reply-graph list
/// past the 378-byte variable region. The envelope is left byte-for-byte
/// unmodified in that case.
///
/// # Panics (debug only)
///
/// Debug-asserts `entry.id < own_message_id`, per this operation's
/// precondition; violating it in a release build produces an envelope
/// whose reply list is no longer strictly decreasing, which a later
/// [`iterate_reply_to`] will reject as corrupt.
pub fn add_in_reply_to(
    envelope: &mut Envelope,
    own_message_id: MessageId,
    entry: IntraChannelReference,
) -> Result<()> {
    debug_assert!(
        entry.id.value() < own_message_id.value(),
        "in-reply-to entry must precede the envelope's own message id"
    );

    let n = envelope.n_in_reply_to_bytes() as usize;
    let list = *envelope.variable();

    let mut prev_id = own_message_id.prev().value();
    let mut cursor = 0usize;
    let mut stop: Option<(usize, usize, u64)> = None; // (at, old_delta_len, existing_id)

    while cursor < n {
        let (delta, delta_len) = varint::decode(&list[cursor..n])?;
        let candidate_id = prev_id - delta;
        if candidate_id < entry.id.value() {
            stop = Some((cursor, delta_len, candidate_id));
            break;
        }
        prev_id = candidate_id;
        cursor += delta_len + MSG_HASH_LEN;
    }

    let (at, old_affected_len, new_affected) = match stop {
        Some((at, old_delta_len, existing_id)) => {
            let new_delta = entry.id.value() - existing_id;
            let mut buf = [0u8; varint::MAX_ENCODED_LEN];
            let len = varint::encode(new_delta, &mut buf);
            (at, old_delta_len, Some((buf, len)))
        }
        None => (n, 0, None),
    };

    let new_entry_delta = prev_id - entry.id.value();
    let mut new_entry_buf = [0u8; varint::MAX_ENCODED_LEN];
    let new_entry_delta_len = varint::encode(new_entry_delta, &mut new_entry_buf);
    let new_entry_len = new_entry_delta_len + MSG_HASH_LEN;

    let new_affected_len = new_affected.map_or(0, |(_, len)| len);
    let moved_varint_size_diff = new_affected_len as isize - old_affected_len as isize;
    let shift_amount = new_entry_len as isize + moved_varint_size_diff;

    let new_total = n as isize + shift_amount;
    if new_total > crate::envelope::VARIABLE_LEN as isize {
        return Err(ProtoError::NoSpace {
            needed: (new_total - crate::envelope::VARIABLE_LEN as isize) as usize,
            available: crate::envelope::VARIABLE_LEN - n,
        });
    }
    let new_total = new_total as usize;

    let src_start = at + old_affected_len;
    let copy_len = crate::envelope::VARIABLE_LEN as isize - src_start as isize - shift_amount;
    debug_assert!(copy_len >= 0);
    let copy_len = copy_len as usize;

    let buf = envelope.variable_mut();
    let dest_start = (src_start as isize + shift_amount) as usize;
    buf.copy_within(src_start..src_start + copy_len, dest_start);

    buf[at..at + new_entry_delta_len].copy_from_slice(&new_entry_buf[..new_entry_delta_len]);
    buf[at + new_entry_delta_len..at + new_entry_len].copy_from_slice(&entry.hash.0);

    if let Some((affected_buf, affected_len)) = new_affected {
        let affected_at = at + new_entry_len;
        buf[affected_at..affected_at + affected_len].copy_from_slice(&affected_buf[..affected_len]);
    }

    envelope.set_n_in_reply_to_bytes(new_total as u16);
    Ok(())
}

/// Lazily iterate an envelope's reply-graph entries given its own message
/// id, in stored (strictly decreasing by id) order.
#[must_use]
pub fn iterate_reply_to(envelope: &Envelope, own_message_id: MessageId) -> ReplyGraphIter<'_> {
    let n = envelope.n_in_reply_to_bytes() as usize;
    ReplyGraphIter { list: &envelope.variable()[..n], running_id: own_message_id.prev().value(), pos: 0, done: false }
}

/// Single-pass cursor over an envelope's reply-graph entries. See
/// [`iterate_reply_to`].
pub struct ReplyGraphIter<'a> {
    list: &'a [u8],
    running_id: u64,
    pos: usize,
    done: bool,
}

impl Iterator for ReplyGraphIter<'_> {
    type Item = Result<IntraChannelReference>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.pos >= self.list.len() {
            return None;
        }

        let (delta, delta_len) = match varint::decode(&self.list[self.pos..]) {
            Ok(v) => v,
            Err(e) => {
                self.done = true;
                return Some(Err(e));
            }
        };

        let Some(new_running) = self.running_id.checked_sub(delta) else {
            self.done = true;
            return Some(Err(ProtoError::ReplyGraphUnderflow { running_id: self.running_id, delta }));
        };

        let hash_start = self.pos + delta_len;
        let hash_end = hash_start + MSG_HASH_LEN;
        if hash_end > self.list.len() {
            self.done = true;
            return Some(Err(ProtoError::BufferTooShort { expected: hash_end, actual: self.list.len() }));
        }

        let mut hash = [0u8; MSG_HASH_LEN];
        hash.copy_from_slice(&self.list[hash_start..hash_end]);
        self.running_id = new_running;
        self.pos = hash_end;

        Some(Ok(IntraChannelReference { id: MessageId::new(new_running), hash: MessageHash(hash) }))
    }
}
