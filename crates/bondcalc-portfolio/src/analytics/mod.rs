//! Portfolio-level analytics.
//!
//! All functions are pure - they take entries as input and return computed
//! results. No caching, no I/O, no side effects.

mod metrics;
mod series;

pub use metrics::*;
pub use series::*;
