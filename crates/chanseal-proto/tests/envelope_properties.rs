//! Property and scenario tests for the envelope's fixed layout and the
//! reply-graph's interaction with payload capacity.

use chanseal_proto::{
    add_in_reply_to, iterate_reply_to, Envelope, IntraChannelReference, MessageHash, MessageId,
    MSG_HASH_LEN, VARIABLE_LEN,
};
use proptest::prelude::*;

fn reference(id: u64, tag: u8) -> IntraChannelReference {
    IntraChannelReference { id: MessageId::new(id), hash: MessageHash([tag; MSG_HASH_LEN]) }
}

#[test]
fn envelope_and_message_sizes_are_fixed_at_compile_time() {
    assert_eq!(std::mem::size_of::<Envelope>(), 482);
    assert_eq!(std::mem::size_of::<chanseal_proto::Message>(), 504);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // Invariant 5: n_in_reply_to_bytes + len(payload_slice) == 378 always.
    #[test]
    fn prop_reply_bytes_and_payload_partition_variable_region(
        own_id in 100u64..1_000_000,
        reply_ids in prop::collection::vec(1u64..99, 0..8),
    ) {
        let own_id = MessageId::new(own_id);
        let mut e = Envelope::init(reference(0, 0), MessageHash([0; MSG_HASH_LEN]));

        let mut inserted = 0usize;
        for (i, id) in reply_ids.iter().enumerate() {
            if add_in_reply_to(&mut e, own_id, reference(*id, i as u8)).is_ok() {
                inserted += 1;
            }
        }
        let _ = inserted;

        prop_assert_eq!(e.n_in_reply_to_bytes() as usize + e.payload().len(), VARIABLE_LEN);
    }

    // Invariant 4 + 6: every successfully inserted entry is recoverable by
    // id, in strictly decreasing order, with the right hash.
    #[test]
    fn prop_inserted_entries_are_recoverable_in_order(
        own_id in 10_000u64..20_000,
        mut reply_ids in prop::collection::hash_set(1u64..9_999, 0..10),
    ) {
        let own_id = MessageId::new(own_id);
        let mut e = Envelope::init(reference(0, 0), MessageHash([0; MSG_HASH_LEN]));

        let mut sorted: Vec<u64> = reply_ids.drain().collect();
        sorted.sort_unstable_by(|a, b| b.cmp(a));

        let mut actually_inserted = Vec::new();
        for id in &sorted {
            let entry = reference(*id, (*id % 251) as u8);
            if add_in_reply_to(&mut e, own_id, entry).is_ok() {
                actually_inserted.push(entry);
            }
        }

        let found: Vec<_> = iterate_reply_to(&e, own_id).map(|r| r.unwrap()).collect();
        prop_assert_eq!(&found, &actually_inserted);

        for i in 1..found.len() {
            prop_assert!(found[i - 1].id.value() > found[i].id.value());
        }
    }

    #[test]
    fn prop_payload_bytes_survive_to_bytes_roundtrip(
        payload in prop::collection::vec(any::<u8>(), 1..VARIABLE_LEN),
    ) {
        let mut e = Envelope::init(reference(0, 0), MessageHash([0; MSG_HASH_LEN]));
        let len = payload.len();
        e.payload_mut()[..len].copy_from_slice(&payload);

        let bytes = e.to_bytes();
        let parsed = Envelope::from_bytes(&bytes).unwrap();
        prop_assert_eq!(&parsed.payload()[..len], payload.as_slice());
    }
}
