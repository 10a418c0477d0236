//! Bond terms supplied by the caller.

use serde::{Deserialize, Serialize};

use super::Frequency;
use crate::error::{ensure_finite, BondError, BondResult};

/// Longest maturity accepted for pricing.
pub const MAX_YEARS_TO_MATURITY: f64 = 100.0;

/// Contractual terms plus the market yield used to discount them.
///
/// Rates are decimal fractions (`0.05` for 5%).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BondTerms {
    /// Redemption value paid at maturity.
    pub face_value: f64,
    /// Annual coupon as a fraction of face value.
    pub coupon_rate: f64,
    /// Time to redemption in years.
    pub years_to_maturity: f64,
    /// Coupon payments per year.
    #[serde(default)]
    pub frequency: Frequency,
    /// Annual discount rate.
    pub market_yield: f64,
}

impl BondTerms {
    /// Creates semi-annual terms.
    #[must_use]
    pub fn new(face_value: f64, coupon_rate: f64, years_to_maturity: f64, market_yield: f64) -> Self {
        Self {
            face_value,
            coupon_rate,
            years_to_maturity,
            frequency: Frequency::SemiAnnual,
            market_yield,
        }
    }

    /// Sets the coupon frequency.
    #[must_use]
    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    /// Replaces the market yield.
    #[must_use]
    pub fn with_yield(mut self, market_yield: f64) -> Self {
        self.market_yield = market_yield;
        self
    }

    /// Periodic coupon amount.
    #[must_use]
    pub fn coupon_payment(&self) -> f64 {
        self.coupon_rate * self.face_value / f64::from(self.frequency.periods_per_year())
    }

    /// Discount rate per coupon period.
    #[must_use]
    pub fn rate_per_period(&self) -> f64 {
        self.market_yield / f64::from(self.frequency.periods_per_year())
    }

    /// Annual coupon income (`face × coupon`).
    #[must_use]
    pub fn annual_coupon(&self) -> f64 {
        self.face_value * self.coupon_rate
    }

    /// Checks the terms can be priced.
    ///
    /// Rejects non-finite values, a non-positive face value, a maturity outside
    /// `(0, MAX_YEARS_TO_MATURITY]`, a coupon outside `[0, 1]`, and yields with
    /// `1 + rate_per_period <= 0`.
    pub fn validate(&self) -> BondResult<()> {
        let face = ensure_finite("face_value", self.face_value)?;
        let coupon = ensure_finite("coupon_rate", self.coupon_rate)?;
        let years = ensure_finite("years_to_maturity", self.years_to_maturity)?;
        ensure_finite("market_yield", self.market_yield)?;

        if face <= 0.0 {
            return Err(BondError::invalid_input("face_value", "must be positive"));
        }
        if !(0.0..=1.0).contains(&coupon) {
            return Err(BondError::invalid_input(
                "coupon_rate",
                format!("{coupon} is outside [0, 1]"),
            ));
        }
        if years <= 0.0 {
            return Err(BondError::invalid_input("years_to_maturity", "must be positive"));
        }
        if years > MAX_YEARS_TO_MATURITY {
            return Err(BondError::invalid_input(
                "years_to_maturity",
                format!("{years} exceeds the {MAX_YEARS_TO_MATURITY}-year limit"),
            ));
        }
        if 1.0 + self.rate_per_period() <= 0.0 {
            return Err(BondError::invalid_input(
                "market_yield",
                format!(
                    "{} gives a non-positive discount base at {} payments per year",
                    self.market_yield,
                    self.frequency.periods_per_year()
                ),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_derived_amounts() {
        let terms = BondTerms::new(1000.0, 0.05, 10.0, 0.045);
        assert_relative_eq!(terms.coupon_payment(), 25.0);
        assert_relative_eq!(terms.rate_per_period(), 0.0225);
        assert_relative_eq!(terms.annual_coupon(), 50.0);

        let quarterly = terms.with_frequency(Frequency::Quarterly);
        assert_relative_eq!(quarterly.coupon_payment(), 12.5);
    }

    #[test]
    fn test_validate() {
        assert!(BondTerms::new(1000.0, 0.05, 10.0, 0.045).validate().is_ok());
        assert!(BondTerms::new(0.0, 0.05, 10.0, 0.045).validate().is_err());
        assert!(BondTerms::new(-100.0, 0.05, 10.0, 0.045).validate().is_err());
        assert!(BondTerms::new(1000.0, -0.01, 10.0, 0.045).validate().is_err());
        assert!(BondTerms::new(1000.0, 1.5, 10.0, 0.045).validate().is_err());
        assert!(BondTerms::new(1000.0, 0.05, 0.0, 0.045).validate().is_err());
        assert!(BondTerms::new(1000.0, 0.05, f64::NAN, 0.045).validate().is_err());
        assert!(BondTerms::new(1000.0, 0.05, MAX_YEARS_TO_MATURITY, 0.045).validate().is_ok());
        assert!(BondTerms::new(1000.0, 0.05, 100.5, 0.045).validate().is_err());
        assert!(BondTerms::new(1000.0, 0.05, 3.0e8, 0.045).validate().is_err());
        // -2.0 semi-annual: 1 + (-1.0) = 0
        assert!(BondTerms::new(1000.0, 0.05, 10.0, -2.0).validate().is_err());
        // negative but above the pole is allowed
        assert!(BondTerms::new(1000.0, 0.05, 10.0, -0.01).validate().is_ok());
    }

    #[test]
    fn test_frequency_defaults_when_missing() {
        let json = r#"{"face_value":1000.0,"coupon_rate":0.05,"years_to_maturity":5.0,"market_yield":0.04}"#;
        let terms: BondTerms = serde_json::from_str(json).unwrap();
        assert_eq!(terms.frequency, Frequency::SemiAnnual);
    }
}
