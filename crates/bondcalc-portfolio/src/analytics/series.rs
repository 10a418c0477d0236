//! Per-entry chart series.

use serde::{Deserialize, Serialize};

use crate::portfolio::PortfolioEntry;

/// A labelled value for one portfolio entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Entry display name, e.g. `10-Year Treasury`.
    pub label: String,
    /// Plotted value.
    pub value: f64,
}

/// Price of each entry, in portfolio order.
#[must_use]
pub fn price_series(entries: &[PortfolioEntry]) -> Vec<SeriesPoint> {
    series(entries, |e| e.bond.price)
}

/// Approximate yield to maturity of each entry (decimal), in portfolio order.
#[must_use]
pub fn yield_series(entries: &[PortfolioEntry]) -> Vec<SeriesPoint> {
    series(entries, |e| e.bond.ytm)
}

fn series(entries: &[PortfolioEntry], value: impl Fn(&PortfolioEntry) -> f64) -> Vec<SeriesPoint> {
    entries
        .iter()
        .map(|e| SeriesPoint {
            label: e.bond.display_name(),
            value: value(e),
        })
        .collect()
}
