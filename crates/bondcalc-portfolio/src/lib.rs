//! # Bondcalc Portfolio
//!
//! Portfolio tracking for priced bonds.
//!
//! ## Design Philosophy
//!
//! - **Pure aggregation**: [`compute_metrics`](analytics::compute_metrics) and
//!   the chart series take entries as input and return computed results
//! - **Explicit ownership**: the working portfolio lives in a
//!   [`PortfolioSession`](session::PortfolioSession) that owns its store and
//!   observers; there is no global state
//! - **Recoverable storage**: persistence failures are logged and recorded,
//!   never fatal
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use bondcalc_core::prelude::*;
//! use bondcalc_portfolio::prelude::*;
//! # use bondcalc_traits::{KeyValueStore, TraitError};
//! # #[derive(Default)]
//! # struct Nowhere;
//! # impl KeyValueStore for Nowhere {
//! #     fn get(&self, _: &str) -> Result<Option<String>, TraitError> { Ok(None) }
//! #     fn set(&self, _: &str, _: &str) -> Result<(), TraitError> { Ok(()) }
//! #     fn remove(&self, _: &str) -> Result<(), TraitError> { Ok(()) }
//! # }
//!
//! let mut session = PortfolioSession::open(Arc::new(Nowhere));
//! session.price(&BondTerms::new(1000.0, 0.05, 10.0, 0.045), BondType::Custom)?;
//! session.add_last_priced()?;
//!
//! let metrics = session.metrics();
//! assert_eq!(metrics.bond_count, 1);
//! assert_eq!(metrics.expected_annual_return, 50.0);
//! # Ok::<(), PortfolioError>(())
//! ```
//!
//! ## Module Overview
//!
//! - [`analytics`] - Aggregate metrics and per-entry chart series
//! - [`benchmark`] - Portfolio yield versus a treasury benchmark
//! - [`portfolio`] - Portfolio and entry types
//! - [`session`] - Persistent session and observers

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod analytics;
pub mod benchmark;
pub mod error;
pub mod portfolio;
pub mod session;

// Re-export error types at crate root
pub use error::{PortfolioError, PortfolioResult};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::analytics::{
        compute_metrics, price_series, yield_series, PortfolioMetrics, SeriesPoint,
    };
    pub use crate::benchmark::{compare_to_benchmark, BenchmarkComparison};
    pub use crate::error::{PortfolioError, PortfolioResult};
    pub use crate::portfolio::{Portfolio, PortfolioEntry};
    pub use crate::session::{PortfolioObserver, PortfolioSession, DEFAULT_PORTFOLIO_KEY};
}
