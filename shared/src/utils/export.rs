//! Export of a wine collection for use outside the cellar file.
//!
//! Two formats: pretty-printed JSON carrying the full records, and flat
//! CSV rows for spreadsheet import.

use serde::Serialize;

use crate::core::errors::{CoreResult, ParseError};
use crate::models::{Record, Wine};

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// JSON array with full record data
    Json,
    /// CSV rows for spreadsheet import
    Csv,
}

impl ExportFormat {
    /// Get file extension for the format
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

/// Flat CSV row for one wine
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    id: u32,
    purchased_on: String,
    color: &'a str,
    appellation: &'a str,
    vintage: u16,
    name: &'a str,
    price: f64,
    rating: String,
    comment: &'a str,
}

impl<'a> CsvRow<'a> {
    fn from_wine(wine: &'a Wine) -> Self {
        Self {
            id: wine.id(),
            purchased_on: wine.purchased_on().format("%d/%m/%y").to_string(),
            color: wine.color().label(),
            appellation: wine.appellation(),
            vintage: wine.vintage(),
            name: wine.name(),
            price: wine.price(),
            rating: wine.rating().map(|r| r.to_string()).unwrap_or_default(),
            comment: wine.comment().unwrap_or_default(),
        }
    }
}

/// Export a collection in the requested format
pub fn export_wines(wines: &[Wine], format: ExportFormat) -> CoreResult<Vec<u8>> {
    match format {
        ExportFormat::Json => export_json(wines),
        ExportFormat::Csv => export_csv(wines),
    }
}

fn export_json(wines: &[Wine]) -> CoreResult<Vec<u8>> {
    serde_json::to_vec_pretty(wines).map_err(|e| {
        ParseError::Json {
            message: e.to_string(),
        }
        .into()
    })
}

fn export_csv(wines: &[Wine]) -> CoreResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    for wine in wines {
        writer
            .serialize(CsvRow::from_wine(wine))
            .map_err(|e| std::io::Error::other(format!("csv export failed: {e}")))?;
    }

    writer
        .into_inner()
        .map_err(|e| std::io::Error::other(format!("csv export failed: {e}")).into())
}
