//! Store statistics.
//!
//! Counters are atomic so that `get`, which takes `&self`, can record reads.
//!
//! # Usage
//!
//! ```rust
//! use txkv_core::TransactionalStore;
//!
//! let mut store = TransactionalStore::new();
//! store.begin_transaction().unwrap();
//! store.put("A", 1).unwrap();
//! store.commit().unwrap();
//!
//! let stats = store.stats().snapshot();
//! assert_eq!(stats.transactions_committed, 1);
//! assert_eq!(stats.keys_applied, 1);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

/// Store statistics.
///
/// All counters are monotonically increasing.
#[derive(Debug, Default)]
pub struct StoreStats {
    /// Total number of `get` calls.
    reads: AtomicU64,
    /// Total number of accepted `put` calls.
    writes: AtomicU64,

    /// Total number of transactions started.
    transactions_started: AtomicU64,
    /// Total number of transactions committed.
    transactions_committed: AtomicU64,
    /// Total number of transactions rolled back.
    transactions_rolled_back: AtomicU64,

    /// Total number of keys written to the committed store by commits.
    keys_applied: AtomicU64,

    /// Total number of operations rejected with an invalid-state error.
    rejected: AtomicU64,
}

impl StoreStats {
    /// Creates a new stats instance.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_read(&self) {
        self.reads.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_transaction_start(&self) {
        self.transactions_started.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_transaction_commit(&self, keys: usize) {
        self.transactions_committed.fetch_add(1, Ordering::Relaxed);
        self.keys_applied.fetch_add(keys as u64, Ordering::Relaxed);
    }

    pub(crate) fn record_transaction_rollback(&self) {
        self.transactions_rolled_back.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns the total number of reads.
    pub fn reads(&self) -> u64 {
        self.reads.load(Ordering::Relaxed)
    }

    /// Returns the total number of accepted writes.
    pub fn writes(&self) -> u64 {
        self.writes.load(Ordering::Relaxed)
    }

    /// Returns the total number of transactions started.
    pub fn transactions_started(&self) -> u64 {
        self.transactions_started.load(Ordering::Relaxed)
    }

    /// Returns the total number of transactions committed.
    pub fn transactions_committed(&self) -> u64 {
        self.transactions_committed.load(Ordering::Relaxed)
    }

    /// Returns the total number of transactions rolled back.
    pub fn transactions_rolled_back(&self) -> u64 {
        self.transactions_rolled_back.load(Ordering::Relaxed)
    }

    /// Returns the total number of keys applied by commits.
    ///
    /// A key written several times in one transaction counts once.
    pub fn keys_applied(&self) -> u64 {
        self.keys_applied.load(Ordering::Relaxed)
    }

    /// Returns the total number of rejected operations.
    pub fn rejected(&self) -> u64 {
        self.rejected.load(Ordering::Relaxed)
    }

    /// Returns a snapshot of all stats.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            reads: self.reads(),
            writes: self.writes(),
            transactions_started: self.transactions_started(),
            transactions_committed: self.transactions_committed(),
            transactions_rolled_back: self.transactions_rolled_back(),
            keys_applied: self.keys_applied(),
            rejected: self.rejected(),
        }
    }
}

/// A point-in-time copy of [`StoreStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StatsSnapshot {
    /// Total number of reads.
    pub reads: u64,
    /// Total number of accepted writes.
    pub writes: u64,
    /// Total number of transactions started.
    pub transactions_started: u64,
    /// Total number of transactions committed.
    pub transactions_committed: u64,
    /// Total number of transactions rolled back.
    pub transactions_rolled_back: u64,
    /// Total number of keys applied by commits.
    pub keys_applied: u64,
    /// Total number of rejected operations.
    pub rejected: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_stats_are_zero() {
        let stats = StoreStats::new();
        assert_eq!(stats.snapshot(), StatsSnapshot::default());
    }

    #[test]
    fn commit_counts_keys() {
        let stats = StoreStats::new();
        stats.record_transaction_start();
        stats.record_transaction_commit(3);
        stats.record_transaction_start();
        stats.record_transaction_commit(0);

        let snap = stats.snapshot();
        assert_eq!(snap.transactions_started, 2);
        assert_eq!(snap.transactions_committed, 2);
        assert_eq!(snap.keys_applied, 3);
    }

    #[test]
    fn counters_are_independent() {
        let stats = StoreStats::new();
        stats.record_read();
        stats.record_read();
        stats.record_write();
        stats.record_rejected();
        stats.record_transaction_rollback();

        assert_eq!(stats.reads(), 2);
        assert_eq!(stats.writes(), 1);
        assert_eq!(stats.rejected(), 1);
        assert_eq!(stats.transactions_rolled_back(), 1);
        assert_eq!(stats.transactions_committed(), 0);
    }
}
