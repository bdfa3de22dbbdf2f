//! Thread-safe store handle.

use crate::config::StoreConfig;
use crate::error::StoreResult;
use crate::stats::StatsSnapshot;
use crate::store::TransactionalStore;
use crate::traits::KeyValueStore;
use crate::transaction::TransactionState;
use crate::types::{SequenceNumber, TransactionId, Value};
use parking_lot::Mutex;
use std::sync::Arc;

/// A cloneable, lockable handle to a [`TransactionalStore`].
///
/// Each operation takes the lock once, so both maps and the transaction
/// state change together. All clones share the same store and therefore
/// the same single open transaction: a handle that did not begin the
/// transaction can still write to, commit or roll back it.
#[derive(Clone, Default)]
pub struct SharedStore {
    inner: Arc<Mutex<TransactionalStore>>,
}

impl SharedStore {
    /// Creates a shared handle to an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::from_store(TransactionalStore::new())
    }

    /// Creates a shared handle to an empty store with the given configuration.
    #[must_use]
    pub fn with_config(config: StoreConfig) -> Self {
        Self::from_store(TransactionalStore::with_config(config))
    }

    /// Wraps an existing store.
    #[must_use]
    pub fn from_store(store: TransactionalStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Returns the committed value for `key`.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.inner.lock().get(key)
    }

    /// Buffers a write in the open transaction.
    ///
    /// # Errors
    ///
    /// Fails if no transaction is open.
    pub fn put(&self, key: impl Into<String>, value: Value) -> StoreResult<()> {
        self.inner.lock().put(key, value)
    }

    /// Opens a transaction.
    ///
    /// # Errors
    ///
    /// Fails if a transaction is already open.
    pub fn begin_transaction(&self) -> StoreResult<TransactionId> {
        self.inner.lock().begin_transaction()
    }

    /// Commits the open transaction.
    ///
    /// # Errors
    ///
    /// Fails if no transaction is open.
    pub fn commit(&self) -> StoreResult<SequenceNumber> {
        self.inner.lock().commit()
    }

    /// Rolls back the open transaction.
    ///
    /// # Errors
    ///
    /// Fails if no transaction is open.
    pub fn rollback(&self) -> StoreResult<()> {
        self.inner.lock().rollback()
    }

    /// Returns the current transaction state.
    pub fn state(&self) -> TransactionState {
        self.inner.lock().state()
    }

    /// Returns a snapshot of the store statistics.
    pub fn stats(&self) -> StatsSnapshot {
        self.inner.lock().stats().snapshot()
    }

    /// Runs `f` with the lock held for its whole duration.
    ///
    /// The lock is not reentrant: calling any method of this handle or of a
    /// clone from inside `f` deadlocks. Use the `&mut TransactionalStore`
    /// passed to `f` instead. Formatting a handle with `{:?}` is the
    /// exception; it reports the store as `<locked>`.
    pub fn with_store<R>(&self, f: impl FnOnce(&mut TransactionalStore) -> R) -> R {
        f(&mut *self.inner.lock())
    }

    /// Unwraps the store if this is the only handle.
    ///
    /// Returns the handle unchanged if other clones are still alive.
    pub fn try_into_inner(self) -> Result<TransactionalStore, Self> {
        Arc::try_unwrap(self.inner)
            .map(Mutex::into_inner)
            .map_err(|inner| Self { inner })
    }
}

impl KeyValueStore for SharedStore {
    fn get(&self, key: &str) -> Option<Value> {
        SharedStore::get(self, key)
    }

    fn put(&mut self, key: &str, value: Value) -> StoreResult<()> {
        SharedStore::put(self, key, value)
    }

    fn begin_transaction(&mut self) -> StoreResult<TransactionId> {
        SharedStore::begin_transaction(self)
    }

    fn commit(&mut self) -> StoreResult<SequenceNumber> {
        SharedStore::commit(self)
    }

    fn rollback(&mut self) -> StoreResult<()> {
        SharedStore::rollback(self)
    }
}

impl std::fmt::Debug for SharedStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut d = f.debug_struct("SharedStore");
        // Never block here: the caller may already hold the lock.
        match self.inner.try_lock() {
            Some(store) => d.field("state", &store.state()),
            None => d.field("state", &format_args!("<locked>")),
        };
        d.field("handles", &Arc::strong_count(&self.inner))
            .finish_non_exhaustive()
    }
}
