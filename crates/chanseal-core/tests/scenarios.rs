//! Concrete scenarios S1-S6 from the core's testable-properties list.
//!
//! S7 (tamper detection) lives in `chanseal-crypto`'s property tests, next
//! to the AEAD sealing it exercises.

use chanseal_core::Authorization;
use chanseal_crypto::{sign_envelope, verify_envelope};
use chanseal_proto::{add_in_reply_to, iterate_reply_to, Envelope, IntraChannelReference, MessageHash, MessageId, MSG_HASH_LEN, VARIABLE_LEN};
use ed25519_dalek::SigningKey;

fn hash16(text: &str) -> MessageHash {
    let mut bytes = [0u8; MSG_HASH_LEN];
    let src = text.as_bytes();
    bytes[..src.len().min(MSG_HASH_LEN)].copy_from_slice(&src[..src.len().min(MSG_HASH_LEN)]);
    MessageHash(bytes)
}

fn undef_ref() -> IntraChannelReference {
    IntraChannelReference { id: MessageId::new(0), hash: MessageHash([0; MSG_HASH_LEN]) }
}

#[test]
fn s1_single_parent_envelope() {
    let first_hash = hash16("abcdef1234567890");
    let mut e = Envelope::init(undef_ref(), first_hash);
    e.payload_mut().fill(0);

    let key = SigningKey::from_bytes(&[0x5A; 32]);
    sign_envelope(&mut e, &key);

    assert_eq!(e.first_in_reply_to(), first_hash);
    assert!(iterate_reply_to(&e, MessageId::new(1)).next().is_none());
    assert!(verify_envelope(&e, &key.verifying_key()).is_ok());
}

#[test]
fn s2_two_parent_envelope() {
    let own_id = MessageId::new(3);
    let first_hash = hash16("abcdef1234567890");
    let second = IntraChannelReference { id: MessageId::new(1), hash: hash16("abcdef1234567891") };

    let mut e = Envelope::init(undef_ref(), first_hash);
    add_in_reply_to(&mut e, own_id, second).unwrap();
    e.payload_mut().fill(b'@');

    let key = SigningKey::from_bytes(&[0x5B; 32]);
    sign_envelope(&mut e, &key);

    let entries: Vec<_> = iterate_reply_to(&e, own_id).map(|r| r.unwrap()).collect();
    assert_eq!(entries, vec![second]);
    assert_eq!(e.payload(), vec![b'@'; 361].as_slice());
    assert_eq!(e.n_in_reply_to_bytes() as usize + e.payload().len(), VARIABLE_LEN);
    assert!(verify_envelope(&e, &key.verifying_key()).is_ok());
}

fn capability_bytes(verifying_key: &ed25519_dalek::VerifyingKey, conditions_json: &str) -> Vec<u8> {
    let mut bytes = vec![0u8; VARIABLE_LEN];
    bytes[..32].copy_from_slice(verifying_key.as_bytes());
    bytes[32..32 + conditions_json.len()].copy_from_slice(conditions_json.as_bytes());
    bytes
}

fn signed_candidate(key: &SigningKey) -> Envelope {
    let mut e = Envelope::init(undef_ref(), MessageHash([0; MSG_HASH_LEN]));
    sign_envelope(&mut e, key);
    e
}

#[test]
fn s3_authorization_padding_check_fails() {
    let key = SigningKey::from_bytes(&[0x01; 32]);
    let bytes = capability_bytes(&key.verifying_key(), "[]trailing junk");
    let authorization = Authorization::new(&bytes, MessageId::new(1));
    let candidate = signed_candidate(&key);

    let err = authorization.authorizes(&candidate, MessageId::new(1)).unwrap_err();
    assert!(matches!(err, chanseal_core::AuthorizationError::InvalidPadding { .. }));
}

#[test]
fn s4_authorization_empty_conditions_passes() {
    let key = SigningKey::from_bytes(&[0x02; 32]);
    let bytes = capability_bytes(&key.verifying_key(), "[]");
    let authorization = Authorization::new(&bytes, MessageId::new(1));
    let candidate = signed_candidate(&key);

    assert!(authorization.authorizes(&candidate, MessageId::new(1)).unwrap());
}

#[test]
fn s5_ttl_pass() {
    let key = SigningKey::from_bytes(&[0x03; 32]);
    let bytes = capability_bytes(&key.verifying_key(), r#"[{"ttl":1}]"#);
    let authorization = Authorization::new(&bytes, MessageId::new(1));
    let candidate = signed_candidate(&key);

    assert!(authorization.authorizes(&candidate, MessageId::new(2)).unwrap());
}

#[test]
fn s6_ttl_fail() {
    let key = SigningKey::from_bytes(&[0x04; 32]);
    let bytes = capability_bytes(&key.verifying_key(), r#"[{"ttl":1}]"#);
    let authorization = Authorization::new(&bytes, MessageId::new(1));
    let candidate = signed_candidate(&key);

    assert!(!authorization.authorizes(&candidate, MessageId::new(4)).unwrap());
}
