//! Price/yield curve sampling.
//!
//! Sweeps a grid of annual yields (in percent) and prices the same bond at
//! each one. Grid points are generated by index so the default `0..=10` by
//! `0.5` sweep yields exactly 21 samples.

use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, BondError, BondResult};
use crate::pricing::BondPricer;
use crate::types::{BondTerms, Frequency};

/// Upper bound on sweep size.
pub const MAX_SWEEP_POINTS: usize = 10_001;

/// One point on the price/yield curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveSample {
    /// Annual yield in percent (`4.5` for 4.5%).
    pub yield_percent: f64,
    /// Bond price at that yield.
    pub price: f64,
}

/// Inclusive yield grid, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YieldSweep {
    /// First yield.
    pub start: f64,
    /// Last yield (inclusive).
    pub end: f64,
    /// Spacing between points.
    pub step: f64,
}

impl Default for YieldSweep {
    fn default() -> Self {
        Self {
            start: 0.0,
            end: 10.0,
            step: 0.5,
        }
    }
}

impl YieldSweep {
    /// Creates a sweep.
    #[must_use]
    pub fn new(start: f64, end: f64, step: f64) -> Self {
        Self { start, end, step }
    }

    /// Number of grid points.
    pub fn len(&self) -> BondResult<usize> {
        let start = ensure_finite("sweep.start", self.start)?;
        let end = ensure_finite("sweep.end", self.end)?;
        let step = ensure_finite("sweep.step", self.step)?;

        if step <= 0.0 {
            return Err(BondError::invalid_input("sweep.step", "must be positive"));
        }
        if end < start {
            return Err(BondError::invalid_input(
                "sweep.end",
                format!("{end} is below start {start}"),
            ));
        }

        // tolerate 0.1-style steps landing a hair under the end point
        let intervals = ((end - start) / step + 1e-9).floor();
        if intervals >= MAX_SWEEP_POINTS as f64 {
            return Err(BondError::invalid_input(
                "sweep.step",
                format!("sweep exceeds {MAX_SWEEP_POINTS} points"),
            ));
        }
        Ok(intervals as usize + 1)
    }

    /// Grid yields in percent, `start + i × step`.
    pub fn points(&self) -> BondResult<Vec<f64>> {
        let n = self.len()?;
        Ok((0..n).map(|i| self.start + i as f64 * self.step).collect())
    }
}

/// Prices the bond at every yield in `sweep`.
///
/// Uses the default period rounding. See [`sample_curve_with`] to choose one.
pub fn sample_curve(
    face_value: f64,
    coupon_rate: f64,
    years_to_maturity: f64,
    frequency: Frequency,
    sweep: &YieldSweep,
) -> BondResult<Vec<CurveSample>> {
    let terms =
        BondTerms::new(face_value, coupon_rate, years_to_maturity, 0.0).with_frequency(frequency);
    sample_curve_with(&BondPricer::default(), &terms, sweep)
}

/// Prices `terms` at every yield in `sweep`, ignoring `terms.market_yield`.
pub fn sample_curve_with(
    pricer: &BondPricer,
    terms: &BondTerms,
    sweep: &YieldSweep,
) -> BondResult<Vec<CurveSample>> {
    sweep
        .points()?
        .into_iter()
        .map(|yield_percent| {
            let price = pricer.price(&terms.with_yield(yield_percent / 100.0))?;
            Ok(CurveSample {
                yield_percent,
                price,
            })
        })
        .collect()
}

/// Index of the sample whose yield is closest to `target_yield_percent`.
///
/// Ties resolve to the lowest index. Returns `None` for an empty slice.
#[must_use]
pub fn locate_nearest_sample(samples: &[CurveSample], target_yield_percent: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, sample) in samples.iter().enumerate() {
        let distance = (sample.yield_percent - target_yield_percent).abs();
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((i, distance));
        }
    }
    best.map(|(i, _)| i)
}
