//! Replayable store operations.

use std::fmt;
use txkv_core::{KeyValueStore, Operation, StoreError, Value};

/// One call against a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    /// `get(key)`.
    Get(String),
    /// `put(key, value)`.
    Put(String, Value),
    /// `begin_transaction()`.
    Begin,
    /// `commit()`.
    Commit,
    /// `rollback()`.
    Rollback,
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get(key) => write!(f, "get {key:?}"),
            Self::Put(key, value) => write!(f, "put {key:?} {value}"),
            Self::Begin => f.write_str("begin"),
            Self::Commit => f.write_str("commit"),
            Self::Rollback => f.write_str("rollback"),
        }
    }
}

/// Observable result of an [`Op`].
///
/// Transaction IDs and sequence numbers are deliberately left out so that
/// outcomes can be compared against [`ReferenceModel`](crate::ReferenceModel).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A read returned this value.
    Read(Option<Value>),
    /// A state-changing operation succeeded.
    Ok,
    /// The operation was rejected as invalid in the current state.
    Rejected(Operation),
}

impl From<Result<(), StoreError>> for Outcome {
    fn from(result: Result<(), StoreError>) -> Self {
        match result {
            Ok(()) => Self::Ok,
            Err(err) => Self::Rejected(err.operation()),
        }
    }
}

/// Applies `op` to `store` and reports what happened.
pub fn apply_op<S: KeyValueStore + ?Sized>(store: &mut S, op: &Op) -> Outcome {
    match op {
        Op::Get(key) => Outcome::Read(store.get(key)),
        Op::Put(key, value) => store.put(key, *value).into(),
        Op::Begin => store.begin_transaction().map(|_| ()).into(),
        Op::Commit => store.commit().map(|_| ()).into(),
        Op::Rollback => store.rollback().into(),
    }
}

/// Applies every op in order, collecting the outcomes.
pub fn apply_all<S: KeyValueStore + ?Sized>(store: &mut S, ops: &[Op]) -> Vec<Outcome> {
    ops.iter().map(|op| apply_op(store, op)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use txkv_core::TransactionalStore;

    #[test]
    fn apply_reports_rejections() {
        let mut store = TransactionalStore::new();
        let outcomes = apply_all(
            &mut store,
            &[
                Op::Commit,
                Op::Put("A".into(), 1),
                Op::Begin,
                Op::Begin,
                Op::Put("A".into(), 1),
                Op::Get("A".into()),
                Op::Commit,
                Op::Get("A".into()),
            ],
        );

        assert_eq!(
            outcomes,
            vec![
                Outcome::Rejected(Operation::Commit),
                Outcome::Rejected(Operation::Put),
                Outcome::Ok,
                Outcome::Rejected(Operation::Begin),
                Outcome::Ok,
                Outcome::Read(None),
                Outcome::Ok,
                Outcome::Read(Some(1)),
            ]
        );
    }

    #[test]
    fn display_is_readable() {
        assert_eq!(Op::Put("A".into(), 5).to_string(), "put \"A\" 5");
        assert_eq!(Op::Rollback.to_string(), "rollback");
    }
}
