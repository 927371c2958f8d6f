//! Error type for string-to-enum conversions.

use thiserror::Error;

/// A textual value did not match any member of a closed vocabulary.
///
/// Produced by the `FromStr` impls on the model enums; the XML layer wraps
/// this into its own malformed-value failure with tag and line context.
#[derive(Debug, Clone, Error)]
#[error("not a recognized {what}: {value:?} (expected one of {expected})")]
pub struct ParseValueError {
    /// What kind of value was expected, e.g. "terrain kind".
    pub what: &'static str,
    /// The offending text.
    pub value: String,
    /// Comma-separated list of accepted tokens.
    pub expected: &'static str,
}

impl ParseValueError {
    pub(crate) fn new(what: &'static str, value: &str, expected: &'static str) -> Self {
        Self {
            what,
            value: value.to_owned(),
            expected,
        }
    }
}
