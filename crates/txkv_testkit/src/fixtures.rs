//! Test fixtures and store helpers.
//!
//! Provides convenience functions for building stores in common
//! starting states.

use crate::model::ReferenceModel;
use crate::ops::Op;
use txkv_core::{StoreConfig, TransactionalStore, Value};

/// Configuration used by fixture stores.
pub fn test_config() -> StoreConfig {
    StoreConfig::new().label("testkit")
}

/// Creates an idle store whose committed state holds `entries`.
///
/// Entries are committed in one transaction, so later duplicates win.
pub fn seeded_store<I, K>(entries: I) -> TransactionalStore
where
    I: IntoIterator<Item = (K, Value)>,
    K: Into<String>,
{
    let mut store = TransactionalStore::with_config(test_config());
    store
        .begin_transaction()
        .expect("fresh store should accept begin");
    for (key, value) in entries {
        store.put(key, value).expect("put inside transaction");
    }
    store.commit().expect("commit of seed transaction");
    store
}

/// Creates a store with `entries` committed and a transaction left open.
pub fn store_in_transaction<I, K>(entries: I) -> TransactionalStore
where
    I: IntoIterator<Item = (K, Value)>,
    K: Into<String>,
{
    let mut store = seeded_store(entries);
    store
        .begin_transaction()
        .expect("seeded store should be idle");
    store
}

/// Builds the op script that seeds a store with `entries`.
pub fn seed_ops<'a, I>(entries: I) -> Vec<Op>
where
    I: IntoIterator<Item = &'a (String, Value)>,
{
    let mut ops = vec![Op::Begin];
    ops.extend(entries.into_iter().map(|(k, v)| Op::Put(k.clone(), *v)));
    ops.push(Op::Commit);
    ops
}

/// Creates a reference model in the same state as [`seeded_store`].
pub fn seeded_model(entries: &[(String, Value)]) -> ReferenceModel {
    let mut model = ReferenceModel::new();
    for op in seed_ops(entries) {
        model.apply(&op);
    }
    model
}
