//! Portfolio yield versus a treasury benchmark.

use bondcalc_core::TreasurySymbol;
use serde::{Deserialize, Serialize};

use crate::analytics::PortfolioMetrics;

/// Yield comparison between portfolio and benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkComparison {
    /// Benchmark the portfolio is measured against.
    pub benchmark: TreasurySymbol,

    /// Portfolio price-weighted yield (decimal).
    pub portfolio_yield: f64,

    /// Benchmark yield (decimal).
    pub benchmark_yield: f64,

    /// Portfolio minus benchmark, in basis points.
    pub spread_bps: f64,
}

impl BenchmarkComparison {
    /// Returns true if the portfolio out-yields the benchmark.
    #[must_use]
    pub fn is_above(&self) -> bool {
        self.spread_bps > 0.0
    }

    /// Returns true if the portfolio yields less than the benchmark.
    #[must_use]
    pub fn is_below(&self) -> bool {
        self.spread_bps < 0.0
    }
}

/// Compares the portfolio's average yield with a benchmark yield.
///
/// ```text
/// spread_bps = (avg_yield - benchmark_yield) × 10_000
/// ```
#[must_use]
pub fn compare_to_benchmark(
    metrics: &PortfolioMetrics,
    benchmark: TreasurySymbol,
    benchmark_yield: f64,
) -> BenchmarkComparison {
    BenchmarkComparison {
        benchmark,
        portfolio_yield: metrics.avg_yield,
        benchmark_yield,
        spread_bps: (metrics.avg_yield - benchmark_yield) * 10_000.0,
    }
}
