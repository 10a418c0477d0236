//! Aggregate portfolio metrics.

use serde::{Deserialize, Serialize};

use crate::portfolio::PortfolioEntry;

/// Aggregated metrics for a portfolio.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioMetrics {
    /// Sum of entry prices.
    pub total_value: f64,

    /// Price-weighted average yield to maturity (decimal).
    pub avg_yield: f64,

    /// Annual coupon income, `Σ face × coupon_rate`.
    pub expected_annual_return: f64,

    /// Number of entries.
    pub bond_count: usize,
}

impl PortfolioMetrics {
    /// Average yield in percent.
    #[must_use]
    pub fn avg_yield_percent(&self) -> f64 {
        self.avg_yield * 100.0
    }
}

/// Computes aggregate metrics.
///
/// ## Formula
///
/// ```text
/// total_value = Σ price_i
/// avg_yield   = Σ(price_i × ytm_i) / total_value     (0 when total_value = 0)
/// expected_annual_return = Σ face_i × coupon_i
/// ```
///
/// Result depends only on the multiset of entries, not their order.
#[must_use]
pub fn compute_metrics(entries: &[PortfolioEntry]) -> PortfolioMetrics {
    let (total_value, weighted_yield, annual_income) =
        entries
            .iter()
            .fold((0.0, 0.0, 0.0), |(value, weighted, income), entry| {
                let bond = &entry.bond;
                (
                    value + bond.price,
                    weighted + bond.price * bond.ytm,
                    income + bond.annual_coupon(),
                )
            });

    let avg_yield = if total_value == 0.0 {
        0.0
    } else {
        weighted_yield / total_value
    };

    PortfolioMetrics {
        total_value,
        avg_yield,
        expected_annual_return: annual_income,
        bond_count: entries.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bondcalc_core::prelude::*;

    fn entry(face: f64, coupon: f64, market: f64) -> PortfolioEntry {
        PortfolioEntry::new(
            price_bond(&BondTerms::new(face, coupon, 10.0, market), BondType::Custom).unwrap(),
        )
    }

    #[test]
    fn test_empty_portfolio() {
        let metrics = compute_metrics(&[]);
        assert_eq!(metrics, PortfolioMetrics::default());
        assert_eq!(metrics.bond_count, 0);
    }

    #[test]
    fn test_single_entry() {
        let e = entry(1000.0, 0.05, 0.045);
        let metrics = compute_metrics(std::slice::from_ref(&e));

        assert_relative_eq!(metrics.total_value, e.bond.price);
        assert_relative_eq!(metrics.avg_yield, e.bond.ytm, epsilon = 1e-15);
        assert_relative_eq!(metrics.expected_annual_return, 50.0);
        assert_eq!(metrics.bond_count, 1);
    }

    #[test]
    fn test_price_weighting() {
        let mut a = entry(1000.0, 0.05, 0.05);
        let mut b = entry(1000.0, 0.05, 0.05);
        a.bond.price = 300.0;
        a.bond.ytm = 0.02;
        b.bond.price = 100.0;
        b.bond.ytm = 0.06;

        let metrics = compute_metrics(&[a, b]);
        // (300×0.02 + 100×0.06) / 400
        assert_relative_eq!(metrics.avg_yield, 0.03, epsilon = 1e-15);
        assert_relative_eq!(metrics.total_value, 400.0);
        assert_relative_eq!(metrics.expected_annual_return, 100.0);
    }

    #[test]
    fn test_zero_total_value() {
        let mut a = entry(1000.0, 0.05, 0.05);
        a.bond.price = 0.0;
        let metrics = compute_metrics(&[a]);
        assert_eq!(metrics.avg_yield, 0.0);
        assert_eq!(metrics.bond_count, 1);
    }

    #[test]
    fn test_idempotent() {
        let entries = [entry(1000.0, 0.03, 0.04), entry(5000.0, 0.06, 0.05)];
        assert_eq!(compute_metrics(&entries), compute_metrics(&entries));
    }
}
