//! Market data source traits.
//!
//! [`YieldSource`] supplies current treasury yields. Implementations live in
//! extension crates (static tables, CSV files, remote feeds).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TraitError;
use bondcalc_core::TreasurySymbol;

/// Source type for market data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    /// Snapshot/request-response (REST APIs)
    Snapshot,
    /// File-based (CSV, JSON)
    File,
    /// Hard-coded values
    Static,
}

/// A yield observation for one benchmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldQuote {
    /// Benchmark the yield is for
    pub symbol: TreasurySymbol,
    /// Annual yield as a decimal fraction
    #[serde(rename = "yield")]
    pub yield_value: f64,
    /// Where the value came from (`"static"`, `"csv"`, `"fallback"`, ...)
    pub source: String,
    /// When the value was observed or served
    pub timestamp: DateTime<Utc>,
}

impl YieldQuote {
    /// Creates a quote stamped now.
    pub fn new(symbol: TreasurySymbol, yield_value: f64, source: impl Into<String>) -> Self {
        Self {
            symbol,
            yield_value,
            source: source.into(),
            timestamp: Utc::now(),
        }
    }

    /// Yield in percent.
    pub fn yield_percent(&self) -> f64 {
        self.yield_value * 100.0
    }
}

/// Trait for treasury yield providers.
#[async_trait]
pub trait YieldSource: Send + Sync {
    /// Source type.
    fn source_type(&self) -> SourceType;

    /// Get the current yield for a benchmark.
    async fn get_yield(&self, symbol: &TreasurySymbol) -> Result<YieldQuote, TraitError>;

    /// Get yields for several benchmarks, failing on the first error.
    async fn get_yields(&self, symbols: &[TreasurySymbol]) -> Result<Vec<YieldQuote>, TraitError> {
        let mut quotes = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            quotes.push(self.get_yield(symbol).await?);
        }
        Ok(quotes)
    }
}

#[async_trait]
impl<T: YieldSource + ?Sized> YieldSource for std::sync::Arc<T> {
    fn source_type(&self) -> SourceType {
        (**self).source_type()
    }

    async fn get_yield(&self, symbol: &TreasurySymbol) -> Result<YieldQuote, TraitError> {
        (**self).get_yield(symbol).await
    }
}
