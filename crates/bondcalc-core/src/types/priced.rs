//! Pricing results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{BondTerms, BondType, Frequency};

/// Where a price sits relative to face value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingClass {
    /// Price above face value.
    Premium,
    /// Price below face value.
    Discount,
    /// Price exactly equal to face value.
    Par,
}

impl fmt::Display for PricingClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PricingClass::Premium => "Premium",
            PricingClass::Discount => "Discount",
            PricingClass::Par => "Par",
        };
        write!(f, "{name}")
    }
}

/// A bond together with its computed price.
///
/// Produced by [`crate::pricing::price_bond`]; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedBond {
    /// Redemption value.
    pub face_value: f64,
    /// Annual coupon rate (decimal).
    pub coupon_rate: f64,
    /// Years to maturity.
    pub years_to_maturity: f64,
    /// Coupon payments per year.
    pub frequency: Frequency,
    /// Yield the price was computed at (decimal).
    pub market_yield: f64,
    /// Treasury benchmark or custom.
    #[serde(default)]
    pub bond_type: BondType,
    /// Present value.
    pub price: f64,
    /// Approximate yield to maturity implied by `price` (decimal).
    pub ytm: f64,
    /// `(price - face) / face`.
    pub price_change_from_par: f64,
    /// When the price was computed.
    pub computed_at: DateTime<Utc>,
}

impl PricedBond {
    /// The terms this bond was priced from.
    #[must_use]
    pub fn terms(&self) -> BondTerms {
        BondTerms {
            face_value: self.face_value,
            coupon_rate: self.coupon_rate,
            years_to_maturity: self.years_to_maturity,
            frequency: self.frequency,
            market_yield: self.market_yield,
        }
    }

    /// Annual coupon income.
    #[must_use]
    pub fn annual_coupon(&self) -> f64 {
        self.face_value * self.coupon_rate
    }

    /// Premium / discount / par classification.
    #[must_use]
    pub fn classification(&self) -> PricingClass {
        crate::pricing::classify_pricing(self.price, self.face_value)
    }

    /// Label used in portfolio listings and charts.
    #[must_use]
    pub fn display_name(&self) -> String {
        match self.bond_type {
            BondType::Treasury(sym) => sym.display_name(),
            BondType::Custom => format!(
                "Custom Bond ({:.0} @ {:.2}%)",
                self.face_value,
                self.coupon_rate * 100.0
            ),
        }
    }
}
