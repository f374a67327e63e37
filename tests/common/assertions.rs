//! Custom assertion macros and utilities
//!
//! Provides enhanced assertion macros for better test output and
//! more descriptive error messages.

use std::collections::BTreeMap;

use serde_json::Value;

use eventure::shared::Event;

/// Assert that a result is ok and return the value
///
/// This macro unwraps a Result, providing a better error message
/// if the result is an error.
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
    ($result:expr, $message:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("{}: {:?}", $message, e),
        }
    };
}

/// Assert that a result is an error
#[macro_export]
macro_rules! assert_err {
    ($result:expr) => {
        assert!($result.is_err(), "Expected Err, got Ok");
    };
    ($result:expr, $pattern:pat) => {
        match $result {
            Err($pattern) => {}
            Ok(value) => panic!("Expected Err, got Ok: {:?}", value),
            Err(e) => panic!("Expected different error variant, got: {:?}", e),
        }
    };
}

/// Assert that events are ordered by start time, earliest first
pub fn assert_sorted_by_start(events: &[Event]) {
    for pair in events.windows(2) {
        assert!(
            pair[0].start_time <= pair[1].start_time,
            "{} ({}) listed before {} ({})",
            pair[0].name,
            pair[0].start_time,
            pair[1].name,
            pair[1].start_time
        );
    }
}

/// Assert that two name lists hold the same names, ignoring order
pub fn assert_same_names<A: AsRef<str>, B: AsRef<str>>(actual: &[A], expected: &[B]) {
    fn counts<S: AsRef<str>>(names: &[S]) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for name in names {
            *counts.entry(name.as_ref()).or_insert(0) += 1;
        }
        counts
    }
    assert_eq!(counts(actual), counts(expected));
}

/// Assert that a GraphQL response failed with the given `extensions.code`
pub fn assert_graphql_error(response: &Value, code: &str) {
    let errors = response["errors"]
        .as_array()
        .unwrap_or_else(|| panic!("Expected errors in {}", response));
    assert!(
        errors.iter().any(|e| e["extensions"]["code"] == code),
        "Expected error code {} in {}",
        code,
        response
    );
}

/// Assert that a GraphQL response has no errors
pub fn assert_graphql_ok(response: &Value) {
    assert!(
        response.get("errors").is_none(),
        "Unexpected GraphQL errors: {}",
        response
    );
}
