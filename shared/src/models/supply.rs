//! The cellar-supply record.
//!
//! Supplies (corks, labels, glassware, ...) are the second record shape
//! stored by the same machinery as wines: five fields, their own
//! placeholder table, no optional pair. Every field is immutable after
//! construction.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::codec::{join_fields, split_fields};
use crate::core::errors::ParseError;
use crate::core::format::FormatValue;
use crate::models::{FieldValue, IdSequence, Record};

/// Supply categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupplyCategory {
    Corks,
    Labels,
    Cleaning,
    Glassware,
    Storage,
}

impl SupplyCategory {
    pub fn label(&self) -> &'static str {
        match self {
            SupplyCategory::Corks => "corks",
            SupplyCategory::Labels => "labels",
            SupplyCategory::Cleaning => "cleaning",
            SupplyCategory::Glassware => "glassware",
            SupplyCategory::Storage => "storage",
        }
    }
}

impl fmt::Display for SupplyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for SupplyCategory {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "corks" => Ok(SupplyCategory::Corks),
            "labels" => Ok(SupplyCategory::Labels),
            "cleaning" => Ok(SupplyCategory::Cleaning),
            "glassware" => Ok(SupplyCategory::Glassware),
            "storage" => Ok(SupplyCategory::Storage),
            other => Err(ParseError::invalid_field("category", other)),
        }
    }
}

/// One stocked supply item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supply {
    id: u32,
    category: SupplyCategory,
    name: String,
    quantity: i64,
    unit_price: f64,
}

impl Supply {
    pub fn new(
        id: u32,
        category: SupplyCategory,
        name: impl Into<String>,
        quantity: i64,
        unit_price: f64,
    ) -> Self {
        Self {
            id,
            category,
            name: name.into(),
            quantity,
            unit_price,
        }
    }

    /// Factory taking the next identity from the sequence
    pub fn create(
        ids: &mut IdSequence,
        category: SupplyCategory,
        name: impl Into<String>,
        quantity: i64,
        unit_price: f64,
    ) -> Self {
        Self::new(ids.next_id(), category, name, quantity, unit_price)
    }

    pub fn category(&self) -> SupplyCategory {
        self.category
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn unit_price(&self) -> f64 {
        self.unit_price
    }
}

impl Record for Supply {
    const TYPE_NAME: &'static str = "supply";

    const FIELD_NAMES: &'static [&'static str] =
        &["id", "category", "name", "quantity", "unit_price"];

    const DEFAULT_TEMPLATE: &'static str = "%-3I %-10C %-24N x%Q @ %.2U$";

    fn id(&self) -> u32 {
        self.id
    }

    fn field_value(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::Integer(self.id as i64)),
            "category" => Some(FieldValue::Symbol(self.category.label())),
            "name" => Some(FieldValue::Text(self.name.clone())),
            "quantity" => Some(FieldValue::Integer(self.quantity)),
            "unit_price" => Some(FieldValue::Float(self.unit_price)),
            _ => None,
        }
    }

    fn encode_delimited(&self, separator: char) -> String {
        let fields = [
            self.id.to_string(),
            self.category.label().to_string(),
            self.name.clone(),
            self.quantity.to_string(),
            format!("{:.2}", self.unit_price),
        ];
        join_fields(&fields, separator)
    }

    fn decode_delimited(line: &str, separator: char) -> Result<Self, ParseError> {
        let parts = split_fields(line, separator, Self::FIELD_NAMES.len())?;

        let id = parts[0]
            .parse()
            .map_err(|_| ParseError::invalid_field("id", parts[0]))?;
        let category = parts[1].parse()?;
        let quantity = parts[3]
            .parse()
            .map_err(|_| ParseError::invalid_field("quantity", parts[3]))?;
        let unit_price: f64 = parts[4]
            .parse()
            .map_err(|_| ParseError::invalid_field("unit_price", parts[4]))?;
        if !unit_price.is_finite() || unit_price < 0.0 {
            return Err(ParseError::invalid_field("unit_price", parts[4]));
        }

        Ok(Self {
            id,
            category,
            name: parts[2].to_string(),
            quantity,
            unit_price,
        })
    }

    fn placeholder(&self, code: char) -> Option<FormatValue> {
        match code {
            'I' => Some(FormatValue::Int(self.id as i64)),
            'C' => Some(FormatValue::Str(self.category.label().to_string())),
            'N' => Some(FormatValue::Str(self.name.clone())),
            'Q' => Some(FormatValue::Int(self.quantity)),
            'U' => Some(FormatValue::Float(self.unit_price)),
            _ => None,
        }
    }
}
