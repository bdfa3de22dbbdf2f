//! Error types for txkv core.

use std::fmt;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// A state-changing store operation.
///
/// Used to report which call was rejected. `get` is absent because it
/// cannot fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `put(key, value)`.
    Put,
    /// `begin_transaction()`.
    Begin,
    /// `commit()`.
    Commit,
    /// `rollback()`.
    Rollback,
}

impl Operation {
    /// Returns the operation name as used in messages and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Put => "put",
            Self::Begin => "begin_transaction",
            Self::Commit => "commit",
            Self::Rollback => "rollback",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by the store.
///
/// There is a single failure mode: an operation was attempted in a
/// transaction state that forbids it. The store is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Operation not permitted in the current transaction state.
    #[error("invalid state for {operation}: {message}")]
    InvalidState {
        /// The rejected operation.
        operation: Operation,
        /// Why the operation was rejected.
        message: String,
    },
}

impl StoreError {
    /// Creates an error for `begin_transaction` while a transaction is open.
    pub fn already_in_progress(operation: Operation) -> Self {
        Self::InvalidState {
            operation,
            message: "transaction already in progress".to_string(),
        }
    }

    /// Creates an error for an operation that requires an open transaction.
    pub fn no_active_transaction(operation: Operation) -> Self {
        Self::InvalidState {
            operation,
            message: "no transaction active".to_string(),
        }
    }

    /// Returns true if this is an invalid-state error.
    #[must_use]
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Self::InvalidState { .. })
    }

    /// Returns the operation that was rejected.
    #[must_use]
    pub fn operation(&self) -> Operation {
        match self {
            Self::InvalidState { operation, .. } => *operation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_operation() {
        let err = StoreError::no_active_transaction(Operation::Commit);
        assert_eq!(
            err.to_string(),
            "invalid state for commit: no transaction active"
        );
    }

    #[test]
    fn already_in_progress_message() {
        let err = StoreError::already_in_progress(Operation::Begin);
        assert_eq!(
            err.to_string(),
            "invalid state for begin_transaction: transaction already in progress"
        );
        assert_eq!(err.operation(), Operation::Begin);
        assert!(err.is_invalid_state());
    }
}
