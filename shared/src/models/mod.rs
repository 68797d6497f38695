//! Shared data models for Vintry
//!
//! This module contains the record contract every storable type
//! implements, the dynamically typed field views used by the comparator
//! and the display machinery, and the identity sequence that keeps record
//! identities unique within a store.

pub mod supply;
pub mod wine;

use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::core::errors::{CoreResult, ParseError};
use crate::core::format::{compile_template, render_template, FormatValue};

pub use supply::{Supply, SupplyCategory};
pub use wine::{Wine, WineColor, RATING_MAX, RATING_MIN};

/// Primitive kinds a record field can have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Whole number
    Integer,

    /// Floating-point number
    Float,

    /// Free text
    Text,

    /// Calendar date
    Date,

    /// One name out of a closed set
    Symbol,
}

impl FieldKind {
    /// Get the display name for this field kind
    pub fn display_name(&self) -> &'static str {
        match self {
            FieldKind::Integer => "integer",
            FieldKind::Float => "float",
            FieldKind::Text => "text",
            FieldKind::Date => "date",
            FieldKind::Symbol => "symbol",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A dynamically typed view of one record field's value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Integer(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    Symbol(&'static str),
}

impl FieldValue {
    /// The primitive kind of this value
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Integer(_) => FieldKind::Integer,
            FieldValue::Float(_) => FieldKind::Float,
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::Date(_) => FieldKind::Date,
            FieldValue::Symbol(_) => FieldKind::Symbol,
        }
    }

    /// Natural three-way comparison: numeric for numbers, chronological
    /// for dates, lexicographic for text and symbols.
    pub fn compare(&self, other: &FieldValue) -> Ordering {
        match (self, other) {
            (FieldValue::Integer(a), FieldValue::Integer(b)) => a.cmp(b),
            (FieldValue::Float(a), FieldValue::Float(b)) => a.total_cmp(b),
            (FieldValue::Text(a), FieldValue::Text(b)) => a.cmp(b),
            (FieldValue::Date(a), FieldValue::Date(b)) => a.cmp(b),
            (FieldValue::Symbol(a), FieldValue::Symbol(b)) => a.cmp(b),
            // One field of one record type always yields one kind
            _ => Ordering::Equal,
        }
    }
}

/// Identity high-watermark for one store.
///
/// Raised both by record creation and by decoding, so records created
/// after a load can never collide with stored identities. Each store owns
/// its own sequence; independent stores do not contaminate each other.
#[derive(Debug, Clone, Default)]
pub struct IdSequence {
    high_water: Option<u32>,
}

impl IdSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the watermark to at least `id`
    pub fn observe(&mut self, id: u32) {
        self.high_water = Some(self.high_water.map_or(id, |max| max.max(id)));
    }

    /// Allocate the next identity: one past the watermark, starting at 0
    pub fn next_id(&mut self) -> u32 {
        let id = self.high_water.map_or(0, |max| max + 1);
        self.observe(id);
        id
    }

    /// The largest identity observed so far, if any
    pub fn high_water(&self) -> Option<u32> {
        self.high_water
    }
}

/// Capability interface for one storable record type.
///
/// The store, codec, comparator, and display machinery depend only on
/// this trait; each concrete type implements its codec and placeholder
/// table explicitly. `FIELD_NAMES` fixes both the field order and the
/// arity of the delimited text form.
pub trait Record: Clone + fmt::Debug + Serialize + DeserializeOwned {
    /// Name used in logs and error messages
    const TYPE_NAME: &'static str;

    /// Stable field names, in codec order
    const FIELD_NAMES: &'static [&'static str];

    /// Name of the identity field
    const ID_FIELD: &'static str = "id";

    /// Template used when the caller does not supply one
    const DEFAULT_TEMPLATE: &'static str;

    /// The record's identity within its store
    fn id(&self) -> u32;

    /// Read one field by name. `None` means the name is unknown or the
    /// field is an optional one that is currently unset.
    fn field_value(&self, name: &str) -> Option<FieldValue>;

    /// One line of delimited text, fields joined in `FIELD_NAMES` order
    fn encode_delimited(&self, separator: char) -> String;

    /// Rebuild a record from one line of delimited text
    fn decode_delimited(line: &str, separator: char) -> Result<Self, ParseError>;

    /// Placeholder table for the display interpreter: resolve one
    /// placeholder character against this record
    fn placeholder(&self, code: char) -> Option<FormatValue>;

    /// Render this record through a display template, or through
    /// `DEFAULT_TEMPLATE` when none is given
    fn render(&self, template: Option<&str>) -> CoreResult<String> {
        let template = template.unwrap_or(Self::DEFAULT_TEMPLATE);
        let compiled = compile_template(template, |code| self.placeholder(code));
        Ok(render_template(&compiled)?)
    }
}
