//! Lexical validation of user-supplied wine fields.
//!
//! These patterns gate what the CLI accepts before a record is ever
//! constructed: dates in `DD/MM/YY` form, four-digit vintages, prices
//! with exactly two decimals, ratings within the accepted range. Date
//! validation is lexical only, so an impossible-but-well-formed day such
//! as `30/02/24` passes here and is rejected when the date is actually
//! built.

use regex::Regex;

use crate::models::{RATING_MAX, RATING_MIN};

/// `DD/MM/YY`, day 01-31 and month 01-12
pub const DATE_PATTERN: &str = r"^(0[1-9]|[12][0-9]|3[01])/(0[1-9]|1[0-2])/[0-9]{2}$";

/// Four-digit vintage year
pub const VINTAGE_PATTERN: &str = r"^[0-9]{4}$";

/// Price with exactly two fractional digits
pub const PRICE_PATTERN: &str = r"^[0-9]+\.[0-9]{2}$";

/// Non-negative record identity
pub const ID_PATTERN: &str = r"^[0-9]+$";

fn matches(pattern: &str, text: &str) -> bool {
    Regex::new(pattern).map(|re| re.is_match(text)).unwrap_or(false)
}

pub fn is_valid_date(text: &str) -> bool {
    matches(DATE_PATTERN, text)
}

pub fn is_valid_vintage(text: &str) -> bool {
    matches(VINTAGE_PATTERN, text)
}

pub fn is_valid_price(text: &str) -> bool {
    matches(PRICE_PATTERN, text)
}

pub fn is_valid_id(text: &str) -> bool {
    matches(ID_PATTERN, text)
}

pub fn is_valid_rating(rating: u8) -> bool {
    (RATING_MIN..=RATING_MAX).contains(&rating)
}

/// Validation outcome with accumulated error messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Create a successful validation result
    pub fn success() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    /// Add an error to this validation result
    pub fn add_error(&mut self, error: String) {
        self.errors.push(error);
        self.is_valid = false;
    }

    /// Merge another validation result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        if !other.is_valid {
            self.is_valid = false;
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::success()
    }
}

/// Validate the textual fields of an `add` request before construction
pub fn validate_new_wine(
    color: &str,
    appellation: &str,
    vintage: &str,
    name: &str,
    price: &str,
) -> ValidationResult {
    let mut result = ValidationResult::success();

    if color.parse::<crate::models::WineColor>().is_err() {
        result.add_error(format!("unknown wine color: '{color}'"));
    }
    if appellation.trim().is_empty() {
        result.add_error("appellation cannot be empty".to_string());
    }
    if !is_valid_vintage(vintage) {
        result.add_error(format!("vintage must be a four-digit year: '{vintage}'"));
    }
    if name.trim().is_empty() {
        result.add_error("name cannot be empty".to_string());
    }
    if !is_valid_price(price) {
        result.add_error(format!("price must have two decimals, like 19.99: '{price}'"));
    }

    result
}
