//! Generic record machinery: errors, codecs, display templates, the
//! comparator, and the file-backed store.

pub mod codec;
pub mod compare;
pub mod errors;
pub mod format;
pub mod store;

pub use codec::{Codec, DEFAULT_SEPARATOR};
pub use compare::FieldComparator;
pub use errors::{CoreError, CoreResult, FormatError, ParseError};
pub use format::{compile_template, render_template, CompiledTemplate, FormatValue};
pub use store::{backup_path, TextStore, BACKUP_SUFFIX, STDIN_SENTINEL};
