//! Bond pricing engine.
//!
//! Prices a fixed-coupon bond by discounting its coupons and redemption at a
//! flat per-period yield, and backs out an approximate yield from a price.
//!
//! ## Formula
//!
//! ```text
//! n = years × frequency              (resolved by PeriodRounding)
//! C = coupon × face / frequency
//! r = yield / frequency
//! P = Σ_{i=1..n} C / (1 + r)^i + face / (1 + r)^n
//!   = C × (1 - vⁿ) / r + face × vⁿ,  v = 1 / (1 + r)   (C × n + face when r = 0)
//! ```

mod explain;

pub use explain::explain;

use chrono::Utc;

use crate::error::{ensure_finite, BondError, BondResult};
use crate::types::{BondTerms, BondType, PeriodRounding, PricedBond, PricingClass};

/// Discounted cash flow pricer with a configurable period-rounding policy.
///
/// # Example
///
/// ```rust
/// use bondcalc_core::prelude::*;
///
/// let pricer = BondPricer::new(PeriodRounding::Reject);
/// let terms = BondTerms::new(1000.0, 0.05, 10.0, 0.05);
/// let price = pricer.price(&terms).unwrap();
/// assert!((price - 1000.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BondPricer {
    rounding: PeriodRounding,
}

impl BondPricer {
    /// Creates a pricer with the given rounding policy.
    #[must_use]
    pub fn new(rounding: PeriodRounding) -> Self {
        Self { rounding }
    }

    /// Returns the rounding policy.
    #[must_use]
    pub fn rounding(&self) -> PeriodRounding {
        self.rounding
    }

    /// Present value of the bond's remaining cash flows.
    pub fn price(&self, terms: &BondTerms) -> BondResult<f64> {
        terms.validate()?;
        let periods = self.rounding.resolve(terms.years_to_maturity, terms.frequency)?;

        let coupon = terms.coupon_payment();
        let rate = terms.rate_per_period();
        let n = i32::try_from(periods).map_err(|_| {
            BondError::invalid_input("years_to_maturity", "too many coupon periods")
        })?;

        if rate == 0.0 {
            return Ok(coupon * f64::from(periods) + terms.face_value);
        }
        let df = (1.0 + rate).powi(-n);
        Ok(coupon * (1.0 - df) / rate + terms.face_value * df)
    }

    /// Prices the terms and records the result with its approximate yield.
    pub fn price_bond(&self, terms: &BondTerms, bond_type: BondType) -> BondResult<PricedBond> {
        let price = self.price(terms)?;
        let ytm = estimate_ytm(
            price,
            terms.face_value,
            terms.coupon_rate,
            terms.years_to_maturity,
        )?;

        log::debug!(
            "priced {bond_type} face={} coupon={} years={} yield={} -> {price:.6}",
            terms.face_value,
            terms.coupon_rate,
            terms.years_to_maturity,
            terms.market_yield
        );

        Ok(PricedBond {
            face_value: terms.face_value,
            coupon_rate: terms.coupon_rate,
            years_to_maturity: terms.years_to_maturity,
            frequency: terms.frequency,
            market_yield: terms.market_yield,
            bond_type,
            price,
            ytm,
            price_change_from_par: price_change_from_par(price, terms.face_value),
            computed_at: Utc::now(),
        })
    }
}

/// Prices `terms` with the default (round-to-nearest) period policy.
pub fn calculate_price(terms: &BondTerms) -> BondResult<f64> {
    BondPricer::default().price(terms)
}

/// Prices `terms` and wraps the result as a [`PricedBond`].
pub fn price_bond(terms: &BondTerms, bond_type: BondType) -> BondResult<PricedBond> {
    BondPricer::default().price_bond(terms, bond_type)
}

/// Approximate yield to maturity.
///
/// ```text
/// YTM ≈ (C + (F - P) / n) / ((F + P) / 2)
/// ```
///
/// This is the textbook closed-form approximation, not an IRR solve. It
/// drifts from the true yield for deep discount and high premium bonds.
pub fn estimate_ytm(
    price: f64,
    face_value: f64,
    coupon_rate: f64,
    years_to_maturity: f64,
) -> BondResult<f64> {
    let price = ensure_finite("price", price)?;
    let face = ensure_finite("face_value", face_value)?;
    let coupon = ensure_finite("coupon_rate", coupon_rate)?;
    let years = ensure_finite("years_to_maturity", years_to_maturity)?;

    if years <= 0.0 {
        return Err(BondError::invalid_input("years_to_maturity", "must be positive"));
    }
    let average_price = (face + price) / 2.0;
    if average_price == 0.0 {
        return Err(BondError::invalid_input(
            "price",
            "face value plus price must be non-zero",
        ));
    }

    let annual_coupon = coupon * face;
    Ok((annual_coupon + (face - price) / years) / average_price)
}

/// Classifies a price against face value. Exact comparison.
#[must_use]
pub fn classify_pricing(price: f64, face_value: f64) -> PricingClass {
    if price > face_value {
        PricingClass::Premium
    } else if price < face_value {
        PricingClass::Discount
    } else {
        PricingClass::Par
    }
}

/// `(price - face) / face`.
#[must_use]
pub fn price_change_from_par(price: f64, face_value: f64) -> f64 {
    (price - face_value) / face_value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Frequency;
    use approx::assert_relative_eq;

    #[test]
    fn test_premium_bond() {
        let terms = BondTerms::new(1000.0, 0.05, 10.0, 0.045);
        let price = calculate_price(&terms).unwrap();

        // 20 semi-annual periods at 2.25%
        assert_relative_eq!(price, 1039.9093, epsilon = 1e-3);
        assert_eq!(classify_pricing(price, 1000.0), PricingClass::Premium);
    }

    #[test]
    fn test_discount_bond() {
        let terms = BondTerms::new(1000.0, 0.04, 10.0, 0.05);
        let price = calculate_price(&terms).unwrap();

        assert_relative_eq!(price, 922.0542, epsilon = 1e-3);
        assert_eq!(classify_pricing(price, 1000.0), PricingClass::Discount);
    }

    #[test]
    fn test_par_bond() {
        for freq in [
            Frequency::Annual,
            Frequency::SemiAnnual,
            Frequency::Quarterly,
            Frequency::Monthly,
        ] {
            let terms = BondTerms::new(1000.0, 0.06, 7.0, 0.06).with_frequency(freq);
            let price = calculate_price(&terms).unwrap();
            assert_relative_eq!(price, 1000.0, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_zero_coupon() {
        let terms = BondTerms::new(1000.0, 0.0, 5.0, 0.04).with_frequency(Frequency::Annual);
        let price = calculate_price(&terms).unwrap();
        assert_relative_eq!(price, 1000.0 / 1.04_f64.powi(5), epsilon = 1e-9);
    }

    #[test]
    fn test_zero_yield_sums_cash_flows() {
        let terms = BondTerms::new(1000.0, 0.05, 10.0, 0.0);
        let price = calculate_price(&terms).unwrap();
        assert_relative_eq!(price, 1500.0, epsilon = 1e-9);
    }

    #[test]
    fn test_price_rejects_invalid_terms() {
        assert!(calculate_price(&BondTerms::new(0.0, 0.05, 10.0, 0.05)).is_err());
        assert!(calculate_price(&BondTerms::new(1000.0, 0.05, -1.0, 0.05)).is_err());
        assert!(calculate_price(&BondTerms::new(1000.0, 0.05, 10.0, -2.0)).is_err());
        assert!(calculate_price(&BondTerms::new(1000.0, 0.05, 10.0, f64::NAN)).is_err());
    }

    #[test]
    fn test_matches_cash_flow_sum() {
        let terms = BondTerms::new(1000.0, 0.07, 100.0, 0.055).with_frequency(Frequency::Monthly);
        let price = calculate_price(&terms).unwrap();

        let rate: f64 = 0.055 / 12.0;
        let coupon = 70.0 / 12.0;
        let mut expected = 0.0;
        for i in 1..=1200 {
            expected += coupon / (1.0 + rate).powi(i);
        }
        expected += 1000.0 / (1.0 + rate).powi(1200);

        assert_relative_eq!(price, expected, epsilon = 1e-6);
    }

    #[test]
    fn test_rejects_unbounded_maturity() {
        let terms = BondTerms::new(1000.0, 0.05, 3.0e8, 0.05).with_frequency(Frequency::Monthly);
        let err = calculate_price(&terms).unwrap_err();
        assert!(err.is_invalid_input());

        let curve = crate::curve::sample_curve(
            1000.0,
            0.05,
            3.0e8,
            Frequency::Monthly,
            &crate::curve::YieldSweep::default(),
        );
        assert!(curve.is_err());
    }

    #[test]
    fn test_rounding_policies() {
        let terms = BondTerms::new(1000.0, 0.05, 7.3, 0.06);

        let rounded = BondPricer::new(PeriodRounding::Round).price(&terms).unwrap();
        let truncated = BondPricer::new(PeriodRounding::Truncate).price(&terms).unwrap();
        let whole_15 = BondPricer::default()
            .price(&BondTerms::new(1000.0, 0.05, 7.5, 0.06))
            .unwrap();
        let whole_14 = BondPricer::default()
            .price(&BondTerms::new(1000.0, 0.05, 7.0, 0.06))
            .unwrap();

        assert_relative_eq!(rounded, whole_15, epsilon = 1e-9);
        assert_relative_eq!(truncated, whole_14, epsilon = 1e-9);
        assert!(BondPricer::new(PeriodRounding::Reject).price(&terms).is_err());
    }

    #[test]
    fn test_estimate_ytm() {
        // at par the approximation is exact
        assert_relative_eq!(estimate_ytm(1000.0, 1000.0, 0.05, 10.0).unwrap(), 0.05);

        // (50 + (1000 - 950) / 10) / 975
        let ytm = estimate_ytm(950.0, 1000.0, 0.05, 10.0).unwrap();
        assert_relative_eq!(ytm, 55.0 / 975.0, epsilon = 1e-12);
        assert!(ytm > 0.05);
    }

    #[test]
    fn test_estimate_ytm_errors() {
        assert!(estimate_ytm(950.0, 1000.0, 0.05, 0.0).unwrap_err().is_invalid_input());
        assert!(estimate_ytm(-1000.0, 1000.0, 0.05, 10.0).is_err());
        assert!(estimate_ytm(f64::INFINITY, 1000.0, 0.05, 10.0).is_err());
    }

    #[test]
    fn test_classify_exact_boundary() {
        assert_eq!(classify_pricing(1000.0, 1000.0), PricingClass::Par);
        assert_eq!(classify_pricing(1000.0 + 1e-9, 1000.0), PricingClass::Premium);
        assert_eq!(classify_pricing(999.999_999_9, 1000.0), PricingClass::Discount);
    }

    #[test]
    fn test_price_bond_fields() {
        let terms = BondTerms::new(1000.0, 0.05, 10.0, 0.045);
        let bond = price_bond(&terms, BondType::Custom).unwrap();

        assert_eq!(bond.terms(), terms);
        assert_relative_eq!(bond.price_change_from_par, (bond.price - 1000.0) / 1000.0);
        assert_relative_eq!(
            bond.ytm,
            estimate_ytm(bond.price, 1000.0, 0.05, 10.0).unwrap()
        );
        assert_eq!(bond.classification(), PricingClass::Premium);
    }
}
