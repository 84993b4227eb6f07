//! Property-based test generators using proptest.
//!
//! Provides strategies for generating queries and argument trees that
//! survive a JSON round trip unchanged.

use metasync_protocol::Query;
use proptest::prelude::*;
use serde_json::{Map, Number, Value};

/// Strategy for generating JSON leaves.
///
/// Numbers are integers so that decoded values compare equal.
pub fn json_leaf_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(Number::from(n))),
        "[a-zA-Z0-9 _.\\[\\]'\"-]{0,12}".prop_map(Value::String),
    ]
}

/// Strategy for generating nested JSON values.
pub fn json_value_strategy() -> impl Strategy<Value = Value> {
    json_leaf_strategy().prop_recursive(4, 64, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map("[a-z_]{1,8}", inner, 0..6)
                .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

/// Strategy for generating valid query type names.
pub fn query_type_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z_]{0,23}").expect("Invalid regex")
}

/// Strategy for generating queries.
pub fn query_strategy() -> impl Strategy<Value = Query> {
    (query_type_strategy(), json_value_strategy())
        .prop_map(|(query_type, args)| Query { query_type, args })
}

/// Strategy for generating the entries of a bulk query.
pub fn bulk_strategy(min: usize, max: usize) -> impl Strategy<Value = Vec<Query>> {
    prop::collection::vec(query_strategy(), min..max)
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
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
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}
