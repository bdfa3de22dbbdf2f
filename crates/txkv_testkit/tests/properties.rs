//! Property tests comparing the store against the reference model.

use txkv_core::{Operation, SequenceNumber};
use txkv_testkit::prelude::*;

proptest! {
    #![proptest_config(PropTestConfig::thorough().to_proptest_config())]

    #[test]
    fn store_matches_model(ops in op_sequence_strategy(64)) {
        let mut store = TransactionalStore::new();
        let mut model = ReferenceModel::new();

        for op in &ops {
            let expected = model.apply(op);
            let actual = apply_op(&mut store, op);
            prop_assert_eq!(actual, expected, "diverged on {}", op);
        }

        prop_assert_eq!(&store.snapshot(), model.committed());
        prop_assert_eq!(store.is_active(), model.is_active());
        prop_assert_eq!(store.pending_len(), model.pending_len());
        prop_assert_eq!(store.committed_seq(), SequenceNumber::new(model.commits()));
    }
}

proptest! {
    #![proptest_config(PropTestConfig::default().to_proptest_config())]

    #[test]
    fn shared_store_matches_model(ops in op_sequence_strategy(32)) {
        let mut store = SharedStore::new();
        let mut model = ReferenceModel::new();

        for op in &ops {
            prop_assert_eq!(apply_op(&mut store, op), model.apply(op));
        }
    }

    #[test]
    fn never_written_keys_are_absent(key in key_strategy()) {
        let store = TransactionalStore::new();
        prop_assert_eq!(store.get(&key), None);
    }

    #[test]
    fn pending_write_is_invisible(
        seed in seed_strategy(),
        key in key_strategy(),
        value in value_strategy(),
    ) {
        let mut store = seeded_store(seed);
        let before = store.get(&key);

        store.begin_transaction().unwrap();
        store.put(key.clone(), value).unwrap();
        prop_assert_eq!(store.get(&key), before);
    }

    #[test]
    fn last_write_wins(
        seed in seed_strategy(),
        key in key_strategy(),
        first in value_strategy(),
        second in value_strategy(),
    ) {
        let mut store = seeded_store(seed);
        store.begin_transaction().unwrap();
        store.put(key.clone(), first).unwrap();
        store.put(key.clone(), second).unwrap();
        store.commit().unwrap();
        prop_assert_eq!(store.get(&key), Some(second));
    }

    #[test]
    fn rollback_restores_committed_state(
        seed in seed_strategy(),
        writes in prop::collection::vec((key_strategy(), value_strategy()), 0..16),
    ) {
        let mut store = seeded_store(seed);
        let before = store.snapshot();
        let seq = store.committed_seq();

        store.begin_transaction().unwrap();
        for (key, value) in writes {
            store.put(key, value).unwrap();
        }
        store.rollback().unwrap();

        prop_assert_eq!(store.snapshot(), before);
        prop_assert_eq!(store.committed_seq(), seq);
    }

    #[test]
    fn illegal_calls_fail_without_side_effects(
        seed in seed_strategy(),
        attempts in prop::collection::vec(
            prop_oneof![
                Just(Op::Commit),
                Just(Op::Rollback),
                (key_strategy(), value_strategy()).prop_map(|(k, v)| Op::Put(k, v)),
            ],
            1..8,
        ),
    ) {
        let mut store = seeded_store(seed);
        let before = store.snapshot();

        for op in &attempts {
            let outcome = apply_op(&mut store, op);
            prop_assert!(matches!(outcome, Outcome::Rejected(_)));
        }

        prop_assert_eq!(store.snapshot(), before);
        prop_assert!(!store.is_active());
        prop_assert_eq!(store.stats().rejected(), attempts.len() as u64);
    }

    #[test]
    fn nested_begin_is_always_rejected(seed in seed_strategy(), extra in 1usize..5) {
        let mut store = store_in_transaction(seed);
        let txid = store.current_transaction();

        for _ in 0..extra {
            prop_assert_eq!(
                apply_op(&mut store, &Op::Begin),
                Outcome::Rejected(Operation::Begin)
            );
        }
        prop_assert_eq!(store.current_transaction(), txid);
    }

    #[test]
    fn transaction_ids_strictly_increase(rounds in 1usize..20) {
        let mut store = TransactionalStore::new();
        let mut last = None;
        for i in 0..rounds {
            let txid = store.begin_transaction().unwrap();
            if let Some(prev) = last {
                prop_assert!(txid > prev);
            }
            last = Some(txid);
            if i % 2 == 0 {
                store.commit().unwrap();
            } else {
                store.rollback().unwrap();
            }
        }
    }
}
