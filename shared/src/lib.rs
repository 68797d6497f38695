//! Vintry Shared Library
//!
//! This crate contains the record machinery and data models used by the
//! Vintry cellar manager. Collections of uniform records live in flat
//! delimited text files, one record per line, and render themselves
//! through a printf-style display template language.
//!
//! # Features
//!
//! - **Record contract**: a capability trait each storable type
//!   implements (codec, placeholder table, field access by name)
//! - **Text store**: generic init/load/save over one backing file, with
//!   a backup copy written before every save
//! - **Display templates**: `%`-placeholder templates compiled and
//!   rendered per record
//! - **Comparator**: runtime-configured multi-key ordering, total by
//!   construction
//! - **Cellar domain**: the wine collection with its rating rules,
//!   filters, and exports
//!
//! # Usage
//!
//! ```rust
//! use vintry_shared::models::{Record, Wine, WineColor};
//! use chrono::NaiveDate;
//!
//! let date = NaiveDate::from_ymd_opt(2014, 10, 11).unwrap();
//! let mut wine = Wine::new(10, date, WineColor::Red, "Chianti Classico", 2011, "Fontodi", 20.99);
//!
//! assert!(!wine.is_rated());
//! wine.rate(4, "Tres bon!").unwrap();
//!
//! let line = wine.encode_delimited(':');
//! assert_eq!(Wine::decode_delimited(&line, ':').unwrap(), wine);
//! ```

pub mod cellar;
pub mod config;
pub mod core;
pub mod models;
pub mod utils;

// Re-export commonly used types for convenience
pub use cellar::Cellar;
pub use config::{AppConfig, ConfigManager};
pub use crate::core::{
    backup_path, Codec, CoreError, CoreResult, FieldComparator, FormatError, FormatValue,
    ParseError, TextStore, BACKUP_SUFFIX, DEFAULT_SEPARATOR, STDIN_SENTINEL,
};
pub use models::{
    FieldKind, FieldValue, IdSequence, Record, Supply, SupplyCategory, Wine, WineColor,
    RATING_MAX, RATING_MIN,
};
pub use utils::{export_wines, ExportFormat, WineFilter};

/// Current library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
