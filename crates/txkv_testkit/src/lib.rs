//! # txkv Testkit
//!
//! Test utilities for txkv.
//!
//! This crate provides:
//! - Operation scripts that can be replayed against any [`KeyValueStore`]
//! - Property-based test generators using proptest
//! - A reference model of the transaction semantics
//! - Store fixtures for common starting states
//!
//! ## Usage
//!
//! ```rust,ignore
//! use txkv_testkit::prelude::*;
//!
//! proptest! {
//!     #[test]
//!     fn store_matches_model(ops in op_sequence_strategy(64)) {
//!         let mut store = TransactionalStore::new();
//!         let mut model = ReferenceModel::new();
//!         for op in &ops {
//!             prop_assert_eq!(apply_op(&mut store, op), model.apply(op));
//!         }
//!     }
//! }
//! ```
//!
//! [`KeyValueStore`]: txkv_core::KeyValueStore

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod model;
pub mod ops;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::model::*;
    pub use crate::ops::*;
    pub use proptest::prelude::*;
    pub use txkv_core::{KeyValueStore, SharedStore, TransactionalStore};
}

pub use fixtures::*;
pub use generators::*;
pub use model::*;
pub use ops::*;
