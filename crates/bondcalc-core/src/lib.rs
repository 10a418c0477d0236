//! # Bondcalc Core
//!
//! Pricing primitives for the bond calculator.
//!
//! - **Types**: [`BondTerms`], [`PricedBond`], [`Frequency`], [`TreasurySymbol`]
//! - **Pricing**: discounted cash flow price, approximate yield, premium/discount
//!   classification and explanation text
//! - **Curve**: price/yield curve sampling over a yield sweep
//!
//! All rates are decimal fractions except curve yields, which are percent.
//!
//! ## Example
//!
//! ```rust
//! use bondcalc_core::prelude::*;
//!
//! let terms = BondTerms::new(1000.0, 0.05, 10.0, 0.045);
//! let bond = price_bond(&terms, BondType::Custom).unwrap();
//! assert_eq!(bond.classification(), PricingClass::Premium);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::float_cmp)]
#![allow(clippy::len_without_is_empty)]
#![allow(clippy::uninlined_format_args)]

pub mod curve;
pub mod error;
pub mod pricing;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::curve::{
        locate_nearest_sample, sample_curve, sample_curve_with, CurveSample, YieldSweep,
    };
    pub use crate::error::{BondError, BondResult};
    pub use crate::pricing::{
        calculate_price, classify_pricing, estimate_ytm, explain, price_bond, BondPricer,
    };
    pub use crate::types::{
        BondTerms, BondType, Frequency, PeriodRounding, PricedBond, PricingClass, TreasurySymbol,
        MAX_PERIODS, MAX_YEARS_TO_MATURITY,
    };
}

pub use error::{BondError, BondResult};
pub use types::{
    BondTerms, BondType, Frequency, PeriodRounding, PricedBond, PricingClass, TreasurySymbol,
    MAX_YEARS_TO_MATURITY,
};
