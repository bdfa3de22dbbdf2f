//! The transactional key-value store.

use crate::config::StoreConfig;
use crate::error::{Operation, StoreError, StoreResult};
use crate::stats::StoreStats;
use crate::transaction::{PendingEdits, TransactionState};
use crate::types::{SequenceNumber, TransactionId, Value};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, trace};

/// In-memory key-value store with a single-writer transaction.
///
/// The store owns two maps: the committed key space, which every read
/// observes, and the pending edits of the open transaction, which no read
/// observes. Writes are only accepted while a transaction is open and
/// reach the committed key space together when it commits.
///
/// ## State machine
///
/// | State | `put` | `begin_transaction` | `commit` / `rollback` |
/// |---|---|---|---|
/// | Idle | error | opens a transaction | error |
/// | InTransaction | buffers the write | error | applies / discards, back to Idle |
///
/// A rejected call changes nothing; it can be retried or ignored.
pub struct TransactionalStore {
    config: StoreConfig,
    /// Externally visible state. Only `commit` mutates it.
    committed: HashMap<String, Value>,
    /// Writes of the open transaction. Empty whenever the store is idle.
    pending: PendingEdits,
    state: TransactionState,
    /// ID handed to the next transaction.
    next_txid: TransactionId,
    committed_seq: SequenceNumber,
    stats: StoreStats,
}

impl TransactionalStore {
    /// Creates an empty store with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Creates an empty store with the given configuration.
    #[must_use]
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            committed: HashMap::with_capacity(config.initial_capacity),
            pending: PendingEdits::new(),
            state: TransactionState::Idle,
            next_txid: TransactionId::new(1),
            committed_seq: SequenceNumber::default(),
            stats: StoreStats::new(),
            config,
        }
    }

    /// Returns the committed value for `key`.
    ///
    /// Pending edits are never consulted, even from inside the open
    /// transaction. Returns `None` if the key has never been committed.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.stats.record_read();
        let value = self.committed.get(key).copied();
        trace!(store = self.config.label, key, ?value, "get");
        value
    }

    /// Buffers a write in the open transaction.
    ///
    /// A later `put` to the same key before commit replaces this one.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidState`] if no transaction is open.
    pub fn put(&mut self, key: impl Into<String>, value: Value) -> StoreResult<()> {
        let txid = self.require_active(Operation::Put)?;
        let key = key.into();
        trace!(store = self.config.label, %txid, key = %key, value, "put");
        self.pending.put(key, value);
        self.stats.record_write();
        Ok(())
    }

    /// Opens a new transaction.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidState`] if a transaction is already open.
    pub fn begin_transaction(&mut self) -> StoreResult<TransactionId> {
        if let TransactionState::InTransaction(current) = self.state {
            debug!(
                store = self.config.label,
                %current,
                "begin_transaction rejected: transaction already in progress"
            );
            return Err(self.reject(StoreError::already_in_progress(Operation::Begin)));
        }

        self.pending.clear();

        let txid = self.next_txid;
        self.next_txid = txid.next();
        self.state = TransactionState::InTransaction(txid);
        self.stats.record_transaction_start();

        debug!(store = self.config.label, %txid, "transaction started");
        Ok(txid)
    }

    /// Commits the open transaction.
    ///
    /// Every pending edit overwrites the committed value for its key, the
    /// pending set is cleared and the store returns to idle. Returns the new
    /// committed sequence number.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidState`] if no transaction is open.
    pub fn commit(&mut self) -> StoreResult<SequenceNumber> {
        let txid = self.require_active(Operation::Commit)?;

        let applied = self.pending.len();
        self.committed.extend(self.pending.drain());
        self.committed_seq = self.committed_seq.next();
        self.state = TransactionState::Idle;
        self.stats.record_transaction_commit(applied);

        debug!(
            store = self.config.label,
            %txid,
            sequence = %self.committed_seq,
            applied,
            "transaction committed"
        );
        Ok(self.committed_seq)
    }

    /// Discards the open transaction.
    ///
    /// The committed key space is left exactly as it was before
    /// `begin_transaction`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidState`] if no transaction is open.
    pub fn rollback(&mut self) -> StoreResult<()> {
        let txid = self.require_active(Operation::Rollback)?;

        let discarded = self.pending.len();
        self.pending.clear();
        self.state = TransactionState::Idle;
        self.stats.record_transaction_rollback();

        debug!(store = self.config.label, %txid, discarded, "transaction rolled back");
        Ok(())
    }

    /// Returns the current transaction state.
    #[must_use]
    pub fn state(&self) -> TransactionState {
        self.state
    }

    /// Returns true if a transaction is open.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// Returns the ID of the open transaction, if any.
    #[must_use]
    pub fn current_transaction(&self) -> Option<TransactionId> {
        self.state.transaction_id()
    }

    /// Returns the number of distinct keys written by the open transaction.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Returns the number of committed keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.committed.len()
    }

    /// Returns true if nothing has been committed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.committed.is_empty()
    }

    /// Returns true if `key` has a committed value.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.committed.contains_key(key)
    }

    /// Returns the sequence number of the latest commit.
    #[must_use]
    pub fn committed_seq(&self) -> SequenceNumber {
        self.committed_seq
    }

    /// Iterates over committed entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Value)> + '_ {
        self.committed.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Returns a sorted copy of the committed key space.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, Value> {
        self.committed
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect()
    }

    /// Returns the store configuration.
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Returns the store statistics.
    #[must_use]
    pub fn stats(&self) -> &StoreStats {
        &self.stats
    }

    /// Ensures a transaction is open, returning its ID.
    fn require_active(&self, operation: Operation) -> StoreResult<TransactionId> {
        match self.state {
            TransactionState::InTransaction(txid) => Ok(txid),
            TransactionState::Idle => {
                debug!(
                    store = self.config.label,
                    %operation,
                    "operation rejected: no transaction active"
                );
                Err(self.reject(StoreError::no_active_transaction(operation)))
            }
        }
    }

    fn reject(&self, err: StoreError) -> StoreError {
        self.stats.record_rejected();
        err
    }
}

impl Default for TransactionalStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TransactionalStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionalStore")
            .field("label", &self.config.label)
            .field("state", &self.state)
            .field("committed_keys", &self.committed.len())
            .field("pending_keys", &self.pending.len())
            .field("committed_seq", &self.committed_seq)
            .finish_non_exhaustive()
    }
}
