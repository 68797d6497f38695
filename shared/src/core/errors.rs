//! Core error types for the Vintry shared library.
//!
//! This module defines the error taxonomy used throughout the record
//! machinery, keeping configuration mistakes, violated file preconditions,
//! decode failures, and domain-rule violations clearly separated.

use thiserror::Error;

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Common error type for store, codec, comparator, and record operations
#[derive(Error, Debug)]
pub enum CoreError {
    /// Store or comparator configured with an unsupported separator or an
    /// unknown field name
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// A file-existence precondition was violated
    #[error("precondition failed: {message}")]
    Precondition { message: String },

    /// A line of stored text failed to decode
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A record-level rule was violated
    #[error("domain rule violated: {message}")]
    Domain { message: String },

    /// A rewritten display template could not be rendered
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Underlying I/O failure while touching the backing file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        CoreError::Configuration {
            message: message.into(),
        }
    }

    pub fn precondition<S: Into<String>>(message: S) -> Self {
        CoreError::Precondition {
            message: message.into(),
        }
    }

    pub fn domain<S: Into<String>>(message: S) -> Self {
        CoreError::Domain {
            message: message.into(),
        }
    }
}

/// Errors raised while decoding one line of stored text into a record
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The line did not split into the record type's fixed field count
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    /// One field's text did not convert to its declared primitive kind
    #[error("invalid {field}: '{value}'")]
    InvalidField { field: &'static str, value: String },

    /// The JSON form of a record was malformed
    #[error("malformed json record: {message}")]
    Json { message: String },
}

impl ParseError {
    pub fn invalid_field<S: Into<String>>(field: &'static str, value: S) -> Self {
        ParseError::InvalidField {
            field,
            value: value.into(),
        }
    }
}

/// Errors raised by the native template formatter.
///
/// These surface when a rewritten template still contains conversion
/// sequences the formatter does not understand, which is exactly what
/// happens to `%` text the interpreter passed through unmatched.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    /// A conversion other than `%d`, `%f`, `%s`, or `%%`
    #[error("unknown conversion '%{0}' in template")]
    UnknownConversion(char),

    /// The template consumed more values than were supplied
    #[error("not enough values for template")]
    MissingValue,

    /// A value's kind does not fit the conversion it reached
    #[error("value does not match conversion '%{conversion}'")]
    Mismatch { conversion: char },

    /// The template ended in the middle of a conversion
    #[error("template ends inside a conversion")]
    Truncated,
}
