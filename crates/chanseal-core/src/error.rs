//! Error types for authorization and capability evaluation.
//!
//! We avoid `std::io::Error` here to keep protocol failures distinguishable
//! from transport concerns, which this core has none of.

use thiserror::Error;

/// Errors raised while evaluating a capability's authorization over a
/// candidate envelope.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationError {
    /// The condition list did not parse as valid JSON.
    #[error("malformed condition JSON: {reason}")]
    MalformedJson {
        /// Description from the underlying JSON parser.
        reason: String,
    },

    /// A condition object used a tag this core does not recognize.
    #[error("unknown condition tag: {tag}")]
    UnknownCondition {
        /// The unrecognized tag.
        tag: String,
    },

    /// Bytes following the JSON condition list were not all zero.
    #[error("invalid padding: non-zero byte at offset {offset}")]
    InvalidPadding {
        /// Offset of the first non-zero padding byte.
        offset: usize,
    },

    /// A wire-layout error surfaced while decoding a candidate envelope.
    #[error("protocol error: {0}")]
    Protocol(#[from] chanseal_proto::ProtoError),

    /// A cryptographic error surfaced while verifying a candidate envelope.
    #[error("crypto error: {0}")]
    Crypto(#[from] chanseal_crypto::CryptoError),
}

/// Convenience result alias for this crate.
pub type Result<T> = std::result::Result<T, AuthorizationError>;
