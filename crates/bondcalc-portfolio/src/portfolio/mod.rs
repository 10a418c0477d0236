//! Portfolio and entry types.

#[allow(clippy::module_inception)]
mod portfolio;

pub use portfolio::{Portfolio, PortfolioEntry};
