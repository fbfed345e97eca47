//! Error types for filter selection parsing.

use thiserror::Error;

/// Errors raised while turning caller-supplied filter strings into a
/// [`FilterSelection`](crate::filters::FilterSelection).
///
/// Scoring and ranking never fail; only the input boundary does.
#[derive(Debug, Error, PartialEq)]
pub enum SearchError {
    /// Filter key is not one of the recognized attributes.
    #[error("Unknown filter key '{key}'")]
    UnknownFilterKey {
        /// The unrecognized key
        key: String,
    },

    /// Filter value could not be parsed for its attribute.
    #[error("Invalid value '{value}' for filter '{key}': {reason}")]
    InvalidFilterValue {
        /// The filter key
        key: String,
        /// The rejected value
        value: String,
        /// Why the value was rejected
        reason: String,
    },
}
