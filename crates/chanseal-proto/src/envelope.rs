//! The envelope: a fixed 482-byte signed, plaintext inner record.
//!
//! Layout (big-endian, byte order exactly as listed):
//!
//! | field | size | offset |
//! |---|---|---|
//! | header | 2 | 0 |
//! | authorization (id + hash) | 22 | 2 |
//! | first_in_reply_to | 16 | 24 |
//! | variable | 378 | 40 |
//! | signature | 64 | 418 |
//!
//! `#[repr(C, packed)]` plus `zerocopy`'s derives give a struct that can be
//! cast directly from untrusted wire bytes: every 482-byte pattern is a
//! valid `Envelope` (fields are raw byte arrays, no padding, no invalid
//! bit patterns). Structural validity does not imply authenticity —
//! `verify()` (in `chanseal-crypto`) must be called separately.

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::{
    error::{ProtoError, Result},
    ids::{IntraChannelReference, MessageHash, MessageId, MSG_HASH_LEN, MSG_ID_LEN},
};

/// Size of the variable region shared between reply-graph entries and
/// payload bytes.
pub const VARIABLE_LEN: usize = 378;

/// Size of an encoded `Envelope` on the wire.
pub const ENVELOPE_LEN: usize = 482;

/// Bytes of the envelope covered by the Ed25519 signature (everything
/// except the signature field itself).
pub const SIGNING_LEN: usize = 418;

/// The role a frame's variable-region bytes play.
///
/// Carried on the wire verbatim; this core attaches no behavior to
/// `Authorization` or `EncryptedPayload` beyond preserving the bits —
/// interpreting them is left to a higher layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadType {
    /// Envelope conveys a capability (public key + conditions).
    Authorization,
    /// Envelope conveys application payload bytes directly.
    Payload,
    /// Envelope conveys application payload bytes that are themselves
    /// encrypted by a higher layer.
    EncryptedPayload,
    /// Reserved value (`0b11`); preserved verbatim, no defined meaning.
    Reserved,
}

impl PayloadType {
    fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => Self::Authorization,
            1 => Self::Payload,
            2 => Self::EncryptedPayload,
            _ => Self::Reserved,
        }
    }

    fn to_bits(self) -> u8 {
        match self {
            Self::Authorization => 0,
            Self::Payload => 1,
            Self::EncryptedPayload => 2,
            Self::Reserved => 3,
        }
    }
}

/// Fixed 482-byte envelope (Big Endian network byte order).
///
/// # Invariants
///
/// - `n_in_reply_to_bytes() <= VARIABLE_LEN` (378).
/// - The header's 4 padding bits are always zero.
/// - When `n_in_reply_to_bytes() == 0` there are no additional reply-graph
///   entries; only `first_in_reply_to` references a parent.
#[repr(C, packed)]
#[derive(Clone, Copy, FromBytes, IntoBytes, KnownLayout, Immutable)]
pub struct Envelope {
    header: [u8; 2],
    authorization_id: [u8; MSG_ID_LEN],
    authorization_hash: [u8; MSG_HASH_LEN],
    first_in_reply_to: [u8; MSG_HASH_LEN],
    variable: [u8; VARIABLE_LEN],
    signature: [u8; 64],
}

const _: () = assert!(std::mem::size_of::<Envelope>() == ENVELOPE_LEN);
const _: () = assert!(ENVELOPE_LEN == 2 + 22 + 16 + VARIABLE_LEN + 64);

impl Envelope {
    /// Construct a new envelope with no reply-graph entries, continuation
    /// unset, and `payload_type = Payload`.
    ///
    /// The variable region and signature start zeroed; callers must write
    /// payload bytes (via [`Self::payload_mut`]) and sign
    /// (`chanseal_crypto::sign_envelope`) before sealing.
    #[must_use]
    pub fn init(authorization: IntraChannelReference, first_in_reply_to: MessageHash) -> Self {
        let mut envelope = Self {
            header: [0u8; 2],
            authorization_id: authorization.id.to_be_bytes(),
            authorization_hash: authorization.hash.0,
            first_in_reply_to: first_in_reply_to.0,
            variable: [0u8; VARIABLE_LEN],
            signature: [0u8; 64],
        };
        envelope.set_header_fields(false, PayloadType::Payload, 0);
        envelope
    }

    /// Parse an envelope from exactly [`ENVELOPE_LEN`] bytes of wire data.
    ///
    /// # Errors
    ///
    /// [`ProtoError::BufferTooShort`] if `bytes` is shorter than
    /// [`ENVELOPE_LEN`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::ref_from_prefix(bytes)
            .map(|(envelope, _)| *envelope)
            .map_err(|_| ProtoError::BufferTooShort { expected: ENVELOPE_LEN, actual: bytes.len() })
    }

    /// Serialize to a fixed-size byte array.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; ENVELOPE_LEN] {
        let bytes = IntoBytes::as_bytes(self);
        let mut out = [0u8; ENVELOPE_LEN];
        out.copy_from_slice(bytes);
        out
    }

    /// Bytes covered by the Ed25519 signature: everything except the
    /// signature field itself (offsets `0..SIGNING_LEN`).
    #[must_use]
    pub fn signing_data(&self) -> [u8; SIGNING_LEN] {
        let bytes = self.to_bytes();
        let mut data = [0u8; SIGNING_LEN];
        data.copy_from_slice(&bytes[..SIGNING_LEN]);
        data
    }

    /// Current Ed25519 signature field.
    #[must_use]
    pub fn signature(&self) -> [u8; 64] {
        self.signature
    }

    /// Overwrite the signature field.
    pub fn set_signature(&mut self, signature: [u8; 64]) {
        self.signature = signature;
    }

    /// `continuation` bit. No behavioral contract in this core; preserved
    /// verbatim for a higher layer to interpret.
    #[must_use]
    pub fn continuation(&self) -> bool {
        self.header_word() & 0x8000 != 0
    }

    /// `payload_type` field (bits 1-2).
    #[must_use]
    pub fn payload_type(&self) -> PayloadType {
        PayloadType::from_bits(((self.header_word() >> 13) & 0b11) as u8)
    }

    /// Number of bytes at the front of the variable region occupied by
    /// reply-graph entries. The remainder is payload.
    #[must_use]
    pub fn n_in_reply_to_bytes(&self) -> u16 {
        self.header_word() & 0x01FF
    }

    /// Set the `continuation` bit and `payload_type`, preserving
    /// `n_in_reply_to_bytes`.
    pub fn set_flags(&mut self, continuation: bool, payload_type: PayloadType) {
        let n = self.n_in_reply_to_bytes();
        self.set_header_fields(continuation, payload_type, n);
    }

    /// Authorization reference: an [`IntraChannelReference`] to the
    /// capability envelope authorizing this one.
    #[must_use]
    pub fn authorization(&self) -> IntraChannelReference {
        IntraChannelReference {
            id: MessageId::from_be_bytes(self.authorization_id),
            hash: MessageHash(self.authorization_hash),
        }
    }

    /// First (implicit) in-reply-to reference: the immediate parent this
    /// message replies to.
    #[must_use]
    pub fn first_in_reply_to(&self) -> MessageHash {
        MessageHash(self.first_in_reply_to)
    }

    /// Mutable view of the payload bytes: `variable[n_in_reply_to_bytes..]`.
    /// Capacity shrinks as reply-graph entries are added.
    pub fn payload_mut(&mut self) -> &mut [u8] {
        let n = self.n_in_reply_to_bytes() as usize;
        &mut self.variable[n..]
    }

    /// Read-only view of the payload bytes.
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        let n = self.n_in_reply_to_bytes() as usize;
        &self.variable[n..]
    }

    /// Raw read-only view of the full 378-byte variable region (reply-graph
    /// list followed by payload). Used by [`crate::replygraph`].
    pub(crate) fn variable(&self) -> &[u8; VARIABLE_LEN] {
        &self.variable
    }

    /// Raw mutable view of the full 378-byte variable region. Used by
    /// [`crate::replygraph`] to shift bytes in place during insertion.
    pub(crate) fn variable_mut(&mut self) -> &mut [u8; VARIABLE_LEN] {
        &mut self.variable
    }

    /// Update `n_in_reply_to_bytes` after a reply-graph edit. Used by
    /// [`crate::replygraph`] only; the caller is responsible for having
    /// already written the corresponding bytes.
    pub(crate) fn set_n_in_reply_to_bytes(&mut self, n: u16) {
        debug_assert!(n as usize <= VARIABLE_LEN);
        let (continuation, payload_type) = (self.continuation(), self.payload_type());
        self.set_header_fields(continuation, payload_type, n);
    }

    fn header_word(&self) -> u16 {
        u16::from_be_bytes(self.header)
    }

    fn set_header_fields(&mut self, continuation: bool, payload_type: PayloadType, n: u16) {
        debug_assert!(n <= 0x01FF);
        let mut v: u16 = 0;
        if continuation {
            v |= 0x8000;
        }
        v |= u16::from(payload_type.to_bits()) << 13;
        v |= n & 0x01FF;
        self.header = v.to_be_bytes();
    }
}

impl std::fmt::Debug for Envelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Envelope")
            .field("continuation", &self.continuation())
            .field("payload_type", &self.payload_type())
            .field("n_in_reply_to_bytes", &self.n_in_reply_to_bytes())
            .field("authorization", &self.authorization())
            .field("first_in_reply_to", &self.first_in_reply_to())
            .finish_non_exhaustive()
    }
}

impl PartialEq for Envelope {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for Envelope {}
