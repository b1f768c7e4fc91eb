//! Error types for the wire-layout crate.
//!
//! These are pure decode/capacity errors — nothing here touches
//! cryptography. Signature and AEAD failures live in `chanseal-crypto`.

use thiserror::Error;

/// Errors raised while decoding or mutating protocol data structures.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtoError {
    /// A varint's leading byte promised more continuation bytes than were
    /// available.
    #[error("truncated varint: need {needed} bytes, got {available}")]
    VarintTruncated {
        /// Bytes the leading byte's prefix requires.
        needed: usize,
        /// Bytes actually available in the buffer.
        available: usize,
    },

    /// Iterating the reply-graph's delta chain underflowed `MessageId`,
    /// meaning the cumulative deltas exceed what the envelope's own id
    /// allows.
    #[error("reply graph decode underflow at running id {running_id}, delta {delta}")]
    ReplyGraphUnderflow {
        /// Running id at the point of underflow.
        running_id: u64,
        /// Delta that would have underflowed it.
        delta: u64,
    },

    /// Inserting a reply-graph entry would exceed the 378-byte variable
    /// region. The envelope is left unmodified.
    #[error("no space for reply entry: need {needed} more bytes, {available} free")]
    NoSpace {
        /// Additional bytes the insertion would require.
        needed: usize,
        /// Bytes currently free in the variable region.
        available: usize,
    },

    /// A fixed-size structure was decoded from a buffer shorter than its
    /// wire size.
    #[error("buffer too short: expected {expected} bytes, got {actual}")]
    BufferTooShort {
        /// Expected wire size.
        expected: usize,
        /// Bytes actually available.
        actual: usize,
    },
}

/// Convenience result alias for this crate.
pub type Result<T> = std::result::Result<T, ProtoError>;
