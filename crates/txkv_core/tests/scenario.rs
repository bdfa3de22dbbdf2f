//! End-to-end behavior of the store through its public API.

use txkv_core::{
    KeyValueStore, Operation, SharedStore, StoreConfig, StoreError, TransactionState,
    TransactionalStore,
};

/// Runs the reference walkthrough and returns every observed read.
fn walkthrough<S: KeyValueStore>(store: &mut S) -> Vec<Option<i64>> {
    let mut reads = Vec::new();

    reads.push(store.get("A"));

    store.begin_transaction().unwrap();
    store.put("A", 5).unwrap();
    reads.push(store.get("A"));

    store.put("A", 6).unwrap();
    store.commit().unwrap();
    reads.push(store.get("A"));

    reads.push(store.get("B"));

    store.begin_transaction().unwrap();
    store.put("B", 10).unwrap();
    store.rollback().unwrap();
    reads.push(store.get("B"));

    reads
}

#[test]
fn reference_walkthrough() {
    let mut store = TransactionalStore::new();
    assert_eq!(
        walkthrough(&mut store),
        vec![None, None, Some(6), None, None]
    );
    assert_eq!(store.state(), TransactionState::Idle);
}

#[test]
fn reference_walkthrough_on_shared_handle() {
    let mut store = SharedStore::with_config(StoreConfig::new().label("shared"));
    assert_eq!(
        walkthrough(&mut store),
        vec![None, None, Some(6), None, None]
    );
}

#[test]
fn walkthrough_error_steps() {
    let mut store = TransactionalStore::new();

    // put before any transaction
    assert_eq!(
        store.put("A", 5),
        Err(StoreError::no_active_transaction(Operation::Put))
    );

    store.begin_transaction().unwrap();
    store.put("A", 5).unwrap();
    store.put("A", 6).unwrap();
    store.commit().unwrap();
    assert_eq!(store.get("A"), Some(6));

    // commit and rollback with nothing open
    assert!(matches!(
        store.commit(),
        Err(StoreError::InvalidState {
            operation: Operation::Commit,
            ..
        })
    ));
    assert!(matches!(
        store.rollback(),
        Err(StoreError::InvalidState {
            operation: Operation::Rollback,
            ..
        })
    ));

    assert_eq!(store.get("A"), Some(6));
}

#[test]
fn caller_can_retry_after_rejected_begin() {
    let mut store = TransactionalStore::new();
    store.begin_transaction().unwrap();
    store.put("A", 1).unwrap();

    let err = store.begin_transaction().unwrap_err();
    assert_eq!(err.operation(), Operation::Begin);

    // Finish the open transaction, then the retry succeeds.
    store.commit().unwrap();
    store.begin_transaction().unwrap();
    store.put("A", 2).unwrap();
    store.commit().unwrap();

    assert_eq!(store.get("A"), Some(2));
    assert_eq!(store.committed_seq().as_u64(), 2);
}

#[test]
fn stats_track_walkthrough() {
    let mut store = TransactionalStore::new();
    walkthrough(&mut store);

    let stats = store.stats().snapshot();
    assert_eq!(stats.reads, 5);
    assert_eq!(stats.writes, 3);
    assert_eq!(stats.transactions_started, 2);
    assert_eq!(stats.transactions_committed, 1);
    assert_eq!(stats.transactions_rolled_back, 1);
    assert_eq!(stats.keys_applied, 1);
    assert_eq!(stats.rejected, 0);
}
