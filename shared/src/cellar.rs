//! The cellar repository.
//!
//! A [`Cellar`] owns a wine store and the loaded collection between
//! `open` and `close`, and carries the business operations the CLI
//! drives: adding, rating, removing, sorting, and selecting wines. The
//! generic machinery below it stays free of these rules.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::compare::FieldComparator;
use crate::core::errors::{CoreError, CoreResult};
use crate::core::store::TextStore;
use crate::models::{Record, Wine, WineColor};
use crate::utils::filter::WineFilter;

/// An open cellar: one backing file and its in-memory collection
#[derive(Debug)]
pub struct Cellar {
    store: TextStore<Wine>,
    path: PathBuf,
    wines: Vec<Wine>,
}

impl Cellar {
    /// Load the cellar at `path` into memory
    pub fn open(path: impl Into<PathBuf>, separator: char) -> CoreResult<Self> {
        let path = path.into();
        let mut store = TextStore::delimited(separator)?;
        let wines = store.load(&path)?;

        Ok(Self { store, path, wines })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every wine, in file order
    pub fn wines(&self) -> &[Wine] {
        &self.wines
    }

    pub fn len(&self) -> usize {
        self.wines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wines.is_empty()
    }

    /// The wine with the given identity, by linear scan
    pub fn wine(&self, id: u32) -> Option<&Wine> {
        self.wines.iter().find(|wine| wine.id() == id)
    }

    /// Create a wine through the factory and append it to the collection.
    /// Returns the new wine's identity.
    pub fn add(
        &mut self,
        color: WineColor,
        appellation: &str,
        vintage: u16,
        name: &str,
        price: f64,
    ) -> u32 {
        let wine = Wine::create(
            self.store.ids_mut(),
            color,
            appellation,
            vintage,
            name,
            price,
        );
        let id = wine.id();
        debug!(id, name, "added wine");
        self.wines.push(wine);
        id
    }

    /// Rate the wine with the given identity
    pub fn rate(&mut self, id: u32, rating: u8, comment: &str) -> CoreResult<()> {
        let wine = self
            .wines
            .iter_mut()
            .find(|wine| wine.id() == id)
            .ok_or_else(|| CoreError::domain(format!("no wine with id {id}")))?;
        wine.rate(rating, comment)
    }

    /// Remove an unrated wine from the collection.
    ///
    /// A rated wine is part of the cellar's history and cannot be
    /// removed.
    pub fn remove(&mut self, id: u32) -> CoreResult<Wine> {
        let index = self
            .wines
            .iter()
            .position(|wine| wine.id() == id)
            .ok_or_else(|| CoreError::domain(format!("no wine with id {id}")))?;

        if self.wines[index].is_rated() {
            return Err(CoreError::domain(format!(
                "wine {id} is already rated and cannot be removed"
            )));
        }

        Ok(self.wines.remove(index))
    }

    /// A sorted copy of the collection; `descending` flips the whole
    /// ordering, not individual keys
    pub fn sorted(&self, keys: &[&str], descending: bool) -> CoreResult<Vec<Wine>> {
        let comparator = FieldComparator::<Wine>::new(keys)?;
        let mut sorted = self.wines.clone();
        comparator.sort(&mut sorted, descending);
        Ok(sorted)
    }

    /// The wines satisfying a filter, in file order
    pub fn select(&self, filter: &WineFilter) -> CoreResult<Vec<&Wine>> {
        let mut selected = Vec::new();
        for wine in &self.wines {
            if filter.matches(wine)? {
                selected.push(wine);
            }
        }
        Ok(selected)
    }

    /// Save the collection back to the backing file
    pub fn save(&self) -> CoreResult<()> {
        self.store.save(&self.path, &self.wines)
    }

    /// Save and drop the cellar
    pub fn close(self) -> CoreResult<()> {
        self.save()
    }
}
