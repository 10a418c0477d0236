//! Stateful portfolio session.
//!
//! A [`PortfolioSession`] owns the working portfolio, writes it through to a
//! [`KeyValueStore`](bondcalc_traits::KeyValueStore) on every change and
//! notifies registered [`PortfolioObserver`]s.

mod observer;
#[allow(clippy::module_inception)]
mod session;

pub use observer::PortfolioObserver;
pub use session::{PortfolioSession, DEFAULT_PORTFOLIO_KEY};
