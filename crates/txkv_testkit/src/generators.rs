//! Property-based test generators using proptest.
//!
//! Keys are drawn from a small alphabet so that generated sequences hit
//! the same keys repeatedly.

use crate::ops::Op;
use proptest::prelude::*;
use txkv_core::Value;

/// Strategy for keys. Includes the empty string.
pub fn key_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-d]{0,2}").expect("Invalid regex")
}

/// Strategy for values, biased towards zero and small numbers.
pub fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(0i64),
        -10i64..10,
        any::<Value>(),
    ]
}

/// Strategy for a single operation.
///
/// Weighted so that transactions usually accumulate a few writes before
/// they end.
pub fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => key_strategy().prop_map(Op::Get),
        4 => (key_strategy(), value_strategy()).prop_map(|(k, v)| Op::Put(k, v)),
        2 => Just(Op::Begin),
        1 => Just(Op::Commit),
        1 => Just(Op::Rollback),
    ]
}

/// Strategy for operation sequences of up to `max_len` ops.
pub fn op_sequence_strategy(max_len: usize) -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(op_strategy(), 0..=max_len)
}

/// Strategy for a set of committed entries to seed a store with.
pub fn seed_strategy() -> impl Strategy<Value = Vec<(String, Value)>> {
    prop::collection::vec((key_strategy(), value_strategy()), 0..8)
}

/// Configuration for property tests.
#[derive(Debug, Clone, Copy)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Quick configuration for fast tests.
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Thorough configuration for comprehensive testing.
    pub fn thorough() -> Self {
        Self {
            cases: 1024,
            max_shrink_iters: 10000,
        }
    }

    /// Converts to a proptest config.
    pub fn to_proptest_config(self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #![proptest_config(PropTestConfig::quick().to_proptest_config())]

        #[test]
        fn keys_use_small_alphabet(key in key_strategy()) {
            prop_assert!(key.len() <= 2);
            prop_assert!(key.chars().all(|c| ('a'..='d').contains(&c)));
        }

        #[test]
        fn sequences_respect_length(ops in op_sequence_strategy(16)) {
            prop_assert!(ops.len() <= 16);
        }
    }
}
