//! Text codecs for one record per line.
//!
//! A store is configured with one [`Codec`]: either the delimited form
//! (fields joined by a single separator character, fixed order and arity
//! per record type) or the JSON form (one serde-encoded object per line).
//! The per-type field conversions live on the record types themselves;
//! this module carries the codec selection and the split/join helpers the
//! delimited implementations share.

use crate::core::errors::{CoreError, CoreResult, ParseError};
use crate::models::Record;

/// Default field separator for delimited text
pub const DEFAULT_SEPARATOR: char = ':';

/// Line codec a store is configured with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    /// Fields joined by a single separator character
    Delimited { separator: char },

    /// One JSON object per line
    Json,
}

impl Codec {
    /// Delimited codec with the given separator.
    ///
    /// Line terminators cannot separate fields of a line-oriented format
    /// and are rejected as a configuration error.
    pub fn delimited(separator: char) -> CoreResult<Self> {
        if separator == '\n' || separator == '\r' {
            return Err(CoreError::configuration(format!(
                "separator must not be a line terminator: {separator:?}"
            )));
        }
        Ok(Codec::Delimited { separator })
    }

    /// JSON-lines codec
    pub fn json() -> Self {
        Codec::Json
    }

    /// Encode one record to one line of text (without the newline)
    pub fn encode<R: Record>(&self, record: &R) -> CoreResult<String> {
        match self {
            Codec::Delimited { separator } => Ok(record.encode_delimited(*separator)),
            Codec::Json => serde_json::to_string(record).map_err(|e| {
                ParseError::Json {
                    message: e.to_string(),
                }
                .into()
            }),
        }
    }

    /// Decode one line of text into a record
    pub fn decode<R: Record>(&self, line: &str) -> Result<R, ParseError> {
        match self {
            Codec::Delimited { separator } => R::decode_delimited(line, *separator),
            Codec::Json => serde_json::from_str(line).map_err(|e| ParseError::Json {
                message: e.to_string(),
            }),
        }
    }
}

/// Join canonical field texts into one delimited line
pub fn join_fields(fields: &[String], separator: char) -> String {
    fields.join(&separator.to_string())
}

/// Split one line into exactly `expected` fields.
///
/// The split is conservative: at most `expected` parts are produced, so
/// only the final field can legally contain the separator. The stored
/// form does not escape separators, so a separator inside any earlier
/// free-text field shifts the split and misparses. Known fragility of
/// the format.
pub fn split_fields(line: &str, separator: char, expected: usize) -> Result<Vec<&str>, ParseError> {
    let line = line.strip_suffix('\n').unwrap_or(line);
    let line = line.strip_suffix('\r').unwrap_or(line);

    let parts: Vec<&str> = line.splitn(expected, separator).collect();
    if parts.len() != expected {
        return Err(ParseError::FieldCount {
            expected,
            found: parts.len(),
        });
    }
    Ok(parts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_and_split_are_inverse() {
        let fields = vec!["0".to_string(), "red".to_string(), "Fontodi".to_string()];
        let line = join_fields(&fields, ':');
        assert_eq!(line, "0:red:Fontodi");
        assert_eq!(split_fields(&line, ':', 3).unwrap(), fields);
    }

    #[test]
    fn test_split_strips_the_line_terminator() {
        assert_eq!(split_fields("a|b\n", '|', 2).unwrap(), vec!["a", "b"]);
        assert_eq!(split_fields("a|b\r\n", '|', 2).unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_split_rejects_missing_fields() {
        assert_eq!(
            split_fields("a:b", ':', 3),
            Err(ParseError::FieldCount {
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            split_fields("", ':', 9),
            Err(ParseError::FieldCount {
                expected: 9,
                found: 1
            })
        );
    }

    #[test]
    fn test_final_field_keeps_extra_separators() {
        let parts = split_fields("1:note:rich, dark: almost inky", ':', 3).unwrap();
        assert_eq!(parts, vec!["1", "note", "rich, dark: almost inky"]);
    }

    #[test]
    fn test_line_terminators_are_not_separators() {
        assert!(matches!(
            Codec::delimited('\n'),
            Err(CoreError::Configuration { .. })
        ));
        assert!(Codec::delimited('|').is_ok());
    }
}
