//! Transaction state tracking.
//!
//! A store holds at most one open transaction. Its writes live in a
//! [`PendingEdits`] set until commit applies them or rollback drops them.

mod state;

pub(crate) use state::PendingEdits;
pub use state::TransactionState;
