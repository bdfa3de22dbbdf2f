//! Transaction state.

use crate::types::{TransactionId, Value};
use std::collections::hash_map::{self, HashMap};
use std::fmt;

/// State of the store's transaction machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionState {
    /// No transaction is open. Writes are rejected.
    Idle,
    /// A transaction is open and accumulating pending edits.
    InTransaction(TransactionId),
}

impl TransactionState {
    /// Returns true if a transaction is open.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::InTransaction(_))
    }

    /// Returns the open transaction's ID, if any.
    #[must_use]
    pub const fn transaction_id(self) -> Option<TransactionId> {
        match self {
            Self::Idle => None,
            Self::InTransaction(id) => Some(id),
        }
    }
}

impl fmt::Display for TransactionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::InTransaction(id) => write!(f, "in transaction {id}"),
        }
    }
}

/// Writes buffered by the open transaction.
///
/// Keyed by key, so a later write to the same key replaces the earlier one.
#[derive(Debug, Default)]
pub(crate) struct PendingEdits {
    writes: HashMap<String, Value>,
}

impl PendingEdits {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Records a write, returning the value it replaced in this transaction.
    pub(crate) fn put(&mut self, key: String, value: Value) -> Option<Value> {
        self.writes.insert(key, value)
    }

    #[cfg(test)]
    pub(crate) fn get(&self, key: &str) -> Option<Value> {
        self.writes.get(key).copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.writes.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.writes.clear();
    }

    /// Removes every pending write, yielding them for application.
    pub(crate) fn drain(&mut self) -> hash_map::Drain<'_, String, Value> {
        self.writes.drain()
    }
}
