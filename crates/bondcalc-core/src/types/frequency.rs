//! Coupon frequency and period-count resolution.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{BondError, BondResult};

/// Payment frequency for coupon bonds.
///
/// Serialized as the number of payments per year so stored portfolios keep a
/// plain integer `frequency` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "u32", into = "u32")]
pub enum Frequency {
    /// Annual payments (1 per year)
    Annual,
    /// Semi-annual payments (2 per year) - most common for US bonds
    #[default]
    SemiAnnual,
    /// Quarterly payments (4 per year)
    Quarterly,
    /// Monthly payments (12 per year)
    Monthly,
}

impl Frequency {
    /// Returns the number of periods per year.
    #[must_use]
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Frequency::Annual => 1,
            Frequency::SemiAnnual => 2,
            Frequency::Quarterly => 4,
            Frequency::Monthly => 12,
        }
    }

    /// Returns the number of months per period.
    #[must_use]
    pub fn months_per_period(&self) -> u32 {
        12 / self.periods_per_year()
    }

    /// Looks up a frequency by payments per year.
    pub fn from_periods_per_year(n: u32) -> BondResult<Self> {
        match n {
            1 => Ok(Frequency::Annual),
            2 => Ok(Frequency::SemiAnnual),
            4 => Ok(Frequency::Quarterly),
            12 => Ok(Frequency::Monthly),
            0 => Err(BondError::invalid_input(
                "frequency",
                "must be a positive number of payments per year",
            )),
            other => Err(BondError::invalid_input(
                "frequency",
                format!("{other} payments per year is not supported; use 1, 2, 4 or 12"),
            )),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Frequency::Annual => "Annual",
            Frequency::SemiAnnual => "Semi-Annual",
            Frequency::Quarterly => "Quarterly",
            Frequency::Monthly => "Monthly",
        };
        write!(f, "{name}")
    }
}

impl TryFrom<u32> for Frequency {
    type Error = BondError;

    fn try_from(n: u32) -> Result<Self, Self::Error> {
        Frequency::from_periods_per_year(n)
    }
}

impl From<Frequency> for u32 {
    fn from(freq: Frequency) -> Self {
        freq.periods_per_year()
    }
}

/// How a fractional `years × frequency` product becomes a whole number of
/// coupon dates.
///
/// Coupons and redemption are always discounted over the same whole count.
/// Mixing a truncated coupon count with a fractional redemption exponent is
/// not offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PeriodRounding {
    /// Round to the nearest coupon date.
    #[default]
    Round,
    /// Drop the fractional final period.
    Truncate,
    /// Fail unless the product is already whole.
    Reject,
}

/// Most coupon periods a bond may have: 100 years of monthly payments.
pub const MAX_PERIODS: u32 = 1200;

/// Products within this distance of an integer count as whole, so binary
/// noise never changes the coupon count.
const WHOLE_PERIOD_TOLERANCE: f64 = 1e-9;

impl PeriodRounding {
    /// Resolves the number of coupon periods for a maturity.
    ///
    /// Always yields at least one period; a maturity that resolves to zero
    /// coupon dates is rejected regardless of policy.
    pub fn resolve(&self, years_to_maturity: f64, frequency: Frequency) -> BondResult<u32> {
        let raw = years_to_maturity * f64::from(frequency.periods_per_year());
        if !raw.is_finite() || raw < 0.0 {
            return Err(BondError::invalid_input(
                "years_to_maturity",
                format!("period count {raw} must be finite and non-negative"),
            ));
        }

        let nearest = raw.round();
        let periods = if (raw - nearest).abs() <= WHOLE_PERIOD_TOLERANCE {
            nearest
        } else {
            match self {
                PeriodRounding::Round => {
                    log::debug!("rounding {raw} periods to {nearest}");
                    nearest
                }
                PeriodRounding::Truncate => {
                    log::debug!("truncating {raw} periods to {}", raw.floor());
                    raw.floor()
                }
                PeriodRounding::Reject => {
                    return Err(BondError::invalid_input(
                        "years_to_maturity",
                        format!(
                            "{years_to_maturity} years at {frequency} gives {raw} periods, not a whole number"
                        ),
                    ));
                }
            }
        };

        if periods < 1.0 {
            return Err(BondError::invalid_input(
                "years_to_maturity",
                format!("{years_to_maturity} years leaves no coupon date at {frequency}"),
            ));
        }
        if periods > f64::from(MAX_PERIODS) {
            return Err(BondError::invalid_input(
                "years_to_maturity",
                format!("{periods} coupon periods exceeds the limit of {MAX_PERIODS}"),
            ));
        }

        Ok(periods as u32)
    }
}

impl fmt::Display for PeriodRounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PeriodRounding::Round => "round",
            PeriodRounding::Truncate => "truncate",
            PeriodRounding::Reject => "reject",
        };
        write!(f, "{name}")
    }
}

impl std::str::FromStr for PeriodRounding {
    type Err = BondError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "round" => Ok(PeriodRounding::Round),
            "truncate" => Ok(PeriodRounding::Truncate),
            "reject" => Ok(PeriodRounding::Reject),
            _ => Err(BondError::invalid_input(
                "period_rounding",
                format!("unknown policy '{s}'; use round, truncate or reject"),
            )),
        }
    }
}
