//! Multi-key record comparison.
//!
//! A [`FieldComparator`] is configured with an ordered list of field
//! names and compares two records field by field, returning the first
//! non-equal natural ordering. The identity field is appended
//! automatically when absent, so the comparison is always total: no two
//! distinct records of one store ever compare equal.

use std::cmp::Ordering;
use std::marker::PhantomData;

use crate::core::errors::{CoreError, CoreResult};
use crate::models::Record;

/// Total-order comparison over records of one type, driven by a
/// configured list of sort keys
#[derive(Debug, Clone)]
pub struct FieldComparator<R: Record> {
    keys: Vec<&'static str>,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> FieldComparator<R> {
    /// Configure a comparator from field names.
    ///
    /// Every name must belong to `R::FIELD_NAMES`; unknown names are a
    /// configuration error. The identity field is appended when the
    /// caller did not include it.
    pub fn new(keys: &[&str]) -> CoreResult<Self> {
        let mut canonical = Vec::with_capacity(keys.len() + 1);
        for &key in keys {
            match R::FIELD_NAMES.iter().find(|&&name| name == key) {
                Some(&name) => canonical.push(name),
                None => {
                    return Err(CoreError::configuration(format!(
                        "unknown {} field: '{key}'",
                        R::TYPE_NAME
                    )))
                }
            }
        }
        if !canonical.contains(&R::ID_FIELD) {
            canonical.push(R::ID_FIELD);
        }

        Ok(Self {
            keys: canonical,
            _record: PhantomData,
        })
    }

    /// The configured keys, identity included
    pub fn keys(&self) -> &[&'static str] {
        &self.keys
    }

    /// Three-way comparison: first non-equal key wins. An unset optional
    /// value orders before any set value.
    pub fn compare(&self, a: &R, b: &R) -> Ordering {
        for key in &self.keys {
            let ordering = match (a.field_value(key), b.field_value(key)) {
                (Some(x), Some(y)) => x.compare(&y),
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }

    /// Sort ascending by the configured keys; `descending` applies one
    /// global sign flip to the comparison, never a per-field one
    pub fn sort(&self, records: &mut [R], descending: bool) {
        records.sort_by(|a, b| {
            let ordering = self.compare(a, b);
            if descending {
                ordering.reverse()
            } else {
                ordering
            }
        });
    }
}
