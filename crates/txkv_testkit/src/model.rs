//! Reference model of the store semantics.
//!
//! A deliberately naive implementation used as the oracle in property
//! tests. An open transaction is represented as `Some(edits)`.

use crate::ops::{Op, Outcome};
use std::collections::BTreeMap;
use txkv_core::{Operation, Value};

/// Oracle for [`TransactionalStore`](txkv_core::TransactionalStore).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceModel {
    committed: BTreeMap<String, Value>,
    open: Option<BTreeMap<String, Value>>,
    commits: u64,
}

impl ReferenceModel {
    /// Creates an empty, idle model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies `op` and returns the expected outcome.
    pub fn apply(&mut self, op: &Op) -> Outcome {
        match op {
            Op::Get(key) => Outcome::Read(self.committed.get(key).copied()),
            Op::Begin => {
                if self.open.is_some() {
                    return Outcome::Rejected(Operation::Begin);
                }
                self.open = Some(BTreeMap::new());
                Outcome::Ok
            }
            Op::Put(key, value) => match self.open.as_mut() {
                Some(edits) => {
                    edits.insert(key.clone(), *value);
                    Outcome::Ok
                }
                None => Outcome::Rejected(Operation::Put),
            },
            Op::Commit => match self.open.take() {
                Some(edits) => {
                    self.committed.extend(edits);
                    self.commits += 1;
                    Outcome::Ok
                }
                None => Outcome::Rejected(Operation::Commit),
            },
            Op::Rollback => match self.open.take() {
                Some(_) => Outcome::Ok,
                None => Outcome::Rejected(Operation::Rollback),
            },
        }
    }

    /// Returns the committed key space.
    pub fn committed(&self) -> &BTreeMap<String, Value> {
        &self.committed
    }

    /// Returns true if a transaction is open.
    pub fn is_active(&self) -> bool {
        self.open.is_some()
    }

    /// Returns the number of successful commits.
    pub fn commits(&self) -> u64 {
        self.commits
    }

    /// Returns the number of distinct keys written by the open transaction.
    pub fn pending_len(&self) -> usize {
        self.open.as_ref().map_or(0, BTreeMap::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_follows_walkthrough() {
        let mut model = ReferenceModel::new();
        assert_eq!(model.apply(&Op::Get("A".into())), Outcome::Read(None));
        model.apply(&Op::Begin);
        model.apply(&Op::Put("A".into(), 5));
        assert_eq!(model.apply(&Op::Get("A".into())), Outcome::Read(None));
        model.apply(&Op::Put("A".into(), 6));
        model.apply(&Op::Commit);
        assert_eq!(model.apply(&Op::Get("A".into())), Outcome::Read(Some(6)));
        assert_eq!(model.commits(), 1);
        assert!(!model.is_active());
    }
}
