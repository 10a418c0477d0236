//! Domain types for bond pricing.

mod frequency;
mod priced;
mod symbol;
mod terms;

pub use frequency::{Frequency, PeriodRounding, MAX_PERIODS};
pub use priced::{PricedBond, PricingClass};
pub use symbol::{BondType, TreasurySymbol};
pub use terms::{BondTerms, MAX_YEARS_TO_MATURITY};
