//! Portfolio struct and core methods.

use bondcalc_core::PricedBond;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analytics::{compute_metrics, price_series, yield_series, PortfolioMetrics, SeriesPoint};

/// A priced bond held in a portfolio.
///
/// Serialized flat: the id sits alongside the bond's fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioEntry {
    /// Unique entry identifier.
    pub id: Uuid,

    /// The bond as priced when it was added.
    #[serde(flatten)]
    pub bond: PricedBond,
}

impl PortfolioEntry {
    /// Wraps a bond with a fresh random id.
    #[must_use]
    pub fn new(bond: PricedBond) -> Self {
        Self {
            id: Uuid::new_v4(),
            bond,
        }
    }
}

/// Ordered collection of priced bonds.
///
/// Entries keep insertion order and are never edited in place; they are only
/// appended, removed by id, or cleared. Serializes as a JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Portfolio {
    entries: Vec<PortfolioEntry>,
}

impl Portfolio {
    /// Creates an empty portfolio.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a portfolio from existing entries.
    #[must_use]
    pub fn from_entries(entries: Vec<PortfolioEntry>) -> Self {
        Self { entries }
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[PortfolioEntry] {
        &self.entries
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the portfolio has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up an entry by id.
    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<&PortfolioEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Appends a bond under a fresh id and returns the id.
    pub fn add(&mut self, bond: PricedBond) -> Uuid {
        let entry = PortfolioEntry::new(bond);
        let id = entry.id;
        self.entries.push(entry);
        id
    }

    /// Removes the entry with `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Aggregate metrics over all entries.
    #[must_use]
    pub fn metrics(&self) -> PortfolioMetrics {
        compute_metrics(&self.entries)
    }

    /// `(display name, price)` per entry.
    #[must_use]
    pub fn price_series(&self) -> Vec<SeriesPoint> {
        price_series(&self.entries)
    }

    /// `(display name, ytm)` per entry.
    #[must_use]
    pub fn yield_series(&self) -> Vec<SeriesPoint> {
        yield_series(&self.entries)
    }
}

impl<'a> IntoIterator for &'a Portfolio {
    type Item = &'a PortfolioEntry;
    type IntoIter = std::slice::Iter<'a, PortfolioEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
