//! Utility modules for Vintry
//!
//! Validation of user-supplied fields, selection filters for listings,
//! and export of the collection to interchange formats.

pub mod export;
pub mod filter;
pub mod validation;

// Re-export commonly used items for convenience
pub use export::{export_wines, ExportFormat};
pub use filter::WineFilter;
pub use validation::{
    is_valid_date, is_valid_id, is_valid_price, is_valid_rating, is_valid_vintage,
    validate_new_wine, ValidationResult,
};
