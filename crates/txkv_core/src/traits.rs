//! The store operation trait.

use crate::error::StoreResult;
use crate::store::TransactionalStore;
use crate::types::{SequenceNumber, TransactionId, Value};

/// The five operations of a transactional key-value store.
///
/// Implemented by [`TransactionalStore`] and
/// [`SharedStore`](crate::SharedStore) so that drivers and test harnesses
/// can be written once for either handle.
///
/// Implementations must uphold:
/// - `get` observes committed state only
/// - `put`, `commit` and `rollback` fail outside a transaction
/// - `begin_transaction` fails inside a transaction
/// - a failed call leaves the store unchanged
pub trait KeyValueStore {
    /// Returns the committed value for `key`.
    fn get(&self, key: &str) -> Option<Value>;

    /// Buffers a write in the open transaction.
    fn put(&mut self, key: &str, value: Value) -> StoreResult<()>;

    /// Opens a transaction.
    fn begin_transaction(&mut self) -> StoreResult<TransactionId>;

    /// Applies the open transaction's writes.
    fn commit(&mut self) -> StoreResult<SequenceNumber>;

    /// Discards the open transaction's writes.
    fn rollback(&mut self) -> StoreResult<()>;
}

impl KeyValueStore for TransactionalStore {
    fn get(&self, key: &str) -> Option<Value> {
        TransactionalStore::get(self, key)
    }

    fn put(&mut self, key: &str, value: Value) -> StoreResult<()> {
        TransactionalStore::put(self, key, value)
    }

    fn begin_transaction(&mut self) -> StoreResult<TransactionId> {
        TransactionalStore::begin_transaction(self)
    }

    fn commit(&mut self) -> StoreResult<SequenceNumber> {
        TransactionalStore::commit(self)
    }

    fn rollback(&mut self) -> StoreResult<()> {
        TransactionalStore::rollback(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transfer<S: KeyValueStore>(
        store: &mut S,
        from: &str,
        to: &str,
        amount: Value,
    ) -> StoreResult<()> {
        let a = store.get(from).unwrap_or(0);
        let b = store.get(to).unwrap_or(0);
        store.begin_transaction()?;
        store.put(from, a - amount)?;
        store.put(to, b + amount)?;
        store.commit()?;
        Ok(())
    }

    #[test]
    fn generic_driver_runs_against_store() {
        let mut store = TransactionalStore::new();
        transfer(&mut store, "alice", "bob", 10).unwrap();
        assert_eq!(store.get("alice"), Some(-10));
        assert_eq!(store.get("bob"), Some(10));
    }

    #[test]
    fn trait_object_reports_errors() {
        let mut store = TransactionalStore::new();
        let dyn_store: &mut dyn KeyValueStore = &mut store;
        assert!(dyn_store.commit().is_err());
        assert!(dyn_store.put("A", 1).is_err());
        assert_eq!(dyn_store.get("A"), None);
    }
}
