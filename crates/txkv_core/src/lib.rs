//! # txkv Core
//!
//! An in-memory key-value store with a single-writer transactional envelope.
//!
//! This crate provides:
//! - [`TransactionalStore`]: committed key space plus one pending edit set
//! - [`SharedStore`]: a lockable handle for multi-threaded hosts
//! - [`KeyValueStore`]: the five-operation trait both implement
//!
//! Reads only ever observe committed state. Writes are accepted only inside
//! a transaction and become visible atomically on commit.
//!
//! ## Example
//!
//! ```rust
//! use txkv_core::TransactionalStore;
//!
//! let mut store = TransactionalStore::new();
//! assert_eq!(store.get("A"), None);
//!
//! store.begin_transaction().unwrap();
//! store.put("A", 5).unwrap();
//! assert_eq!(store.get("A"), None);
//!
//! store.put("A", 6).unwrap();
//! store.commit().unwrap();
//! assert_eq!(store.get("A"), Some(6));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod shared;
mod stats;
mod store;
mod traits;
mod transaction;
mod types;

pub use config::StoreConfig;
pub use error::{Operation, StoreError, StoreResult};
pub use shared::SharedStore;
pub use stats::{StatsSnapshot, StoreStats};
pub use store::TransactionalStore;
pub use traits::KeyValueStore;
pub use transaction::TransactionState;
pub use types::{SequenceNumber, TransactionId, Value};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
