//! Hard-failure taxonomy for reading and writing map files.
//!
//! Recoverable anomalies are a separate type ([`crate::Warning`]); the
//! variants here abort the whole read, since a structural ambiguity
//! anywhere leaves no trustworthy partial document.

use thiserror::Error;

use crate::Warning;

/// Errors that abort a map read or write.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error from the underlying stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The XML itself could not be parsed.
    #[error("malformed XML near line {line}: {detail}")]
    MalformedXml { detail: String, line: u64 },

    /// A required attribute is absent.
    #[error("line {line}: <{tag}> is missing required attribute \"{attribute}\"")]
    MissingProperty {
        tag: String,
        attribute: &'static str,
        line: u64,
    },

    /// An attribute is present but its text cannot be interpreted.
    #[error(
        "line {line}: <{tag}> attribute \"{attribute}\" has malformed value {value:?}: {detail}"
    )]
    MalformedValue {
        tag: String,
        attribute: &'static str,
        value: String,
        detail: String,
        line: u64,
    },

    /// A child element appeared where the grammar forbids it. `expected`
    /// names the tags that would have been legal at that position.
    #[error("line {line}: unexpected child <{child}> in <{parent}> (expected: {expected})")]
    UnwantedChild {
        parent: String,
        child: String,
        expected: String,
        line: u64,
    },

    /// An element name is not recognized at all in its position.
    #[error("line {line}: unsupported tag <{tag}>")]
    UnsupportedTag { tag: String, line: u64 },

    /// The document ended before the current element was closed.
    #[error("unexpected end of document while reading <{tag}>")]
    UnexpectedEof { tag: String },

    /// The document has no map element at all.
    #[error("no <map> or <view> element found")]
    MissingMapElement,

    /// A recoverable anomaly escalated by the strict warning policy.
    #[error("strict mode: {0}")]
    Strict(Warning),

    /// Failure while emitting XML.
    #[error("XML write error: {0}")]
    Write(String),
}

/// Result type for map reading and writing.
pub type Result<T> = std::result::Result<T, Error>;
