//! Change notifications for portfolio sessions.

use bondcalc_core::PricedBond;

use crate::analytics::PortfolioMetrics;
use crate::portfolio::Portfolio;

/// Receives session events.
///
/// Observers run synchronously on the mutating thread, after the change has
/// been applied and persisted.
pub trait PortfolioObserver: Send + Sync {
    /// Called after every portfolio mutation.
    fn on_portfolio_changed(&self, portfolio: &Portfolio, metrics: &PortfolioMetrics);

    /// Called after the session prices a bond.
    fn on_priced(&self, _bond: &PricedBond) {}
}

impl<F> PortfolioObserver for F
where
    F: Fn(&Portfolio, &PortfolioMetrics) + Send + Sync,
{
    fn on_portfolio_changed(&self, portfolio: &Portfolio, metrics: &PortfolioMetrics) {
        self(portfolio, metrics);
    }
}
