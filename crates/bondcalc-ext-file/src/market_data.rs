//! File-based and static treasury yield sources.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use serde::Deserialize;

use bondcalc_core::TreasurySymbol;
use bondcalc_traits::error::TraitError;
use bondcalc_traits::market_data::*;

/// Yield returned for codes outside the static table.
pub const DEFAULT_FALLBACK_YIELD: f64 = 0.0425;

/// Static benchmark yields, shortest tenor first.
pub const FALLBACK_YIELDS: [(TreasurySymbol, f64); 11] = [
    (TreasurySymbol::M1, 0.0500),
    (TreasurySymbol::M3, 0.0480),
    (TreasurySymbol::M6, 0.0470),
    (TreasurySymbol::Y1, 0.0460),
    (TreasurySymbol::Y2, 0.0450),
    (TreasurySymbol::Y3, 0.0445),
    (TreasurySymbol::Y5, 0.0435),
    (TreasurySymbol::Y7, 0.0430),
    (TreasurySymbol::Y10, 0.0425),
    (TreasurySymbol::Y20, 0.0435),
    (TreasurySymbol::Y30, 0.0440),
];

/// Static yield for a benchmark.
pub fn fallback_yield(symbol: TreasurySymbol) -> f64 {
    FALLBACK_YIELDS
        .iter()
        .find(|(s, _)| *s == symbol)
        .map_or(DEFAULT_FALLBACK_YIELD, |(_, y)| *y)
}

/// Static yield for a ticker code; unknown codes get [`DEFAULT_FALLBACK_YIELD`].
pub fn fallback_yield_for_code(code: &str) -> f64 {
    code.parse::<TreasurySymbol>()
        .map_or(DEFAULT_FALLBACK_YIELD, fallback_yield)
}

// =============================================================================
// STATIC YIELD SOURCE
// =============================================================================

/// Serves the hard-coded fallback table.
#[derive(Debug, Clone)]
pub struct StaticYieldSource {
    label: String,
}

impl Default for StaticYieldSource {
    fn default() -> Self {
        Self {
            label: "static".to_string(),
        }
    }
}

impl StaticYieldSource {
    /// Create a static source labelled `static`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a static source whose quotes carry `label` as their source.
    pub fn labelled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    /// Quote without going through the async trait.
    pub fn quote(&self, symbol: TreasurySymbol) -> YieldQuote {
        YieldQuote::new(symbol, fallback_yield(symbol), self.label.clone())
    }
}

#[async_trait]
impl YieldSource for StaticYieldSource {
    fn source_type(&self) -> SourceType {
        SourceType::Static
    }

    async fn get_yield(&self, symbol: &TreasurySymbol) -> Result<YieldQuote, TraitError> {
        Ok(self.quote(*symbol))
    }
}

// =============================================================================
// CSV YIELD SOURCE
// =============================================================================

/// CSV record for yields.
#[derive(Debug, Deserialize)]
struct YieldRecord {
    symbol: String,
    #[serde(rename = "yield")]
    yield_value: f64,
}

/// CSV-based yield source for EOD loads.
///
/// Expects a header row `symbol,yield` with decimal yields.
pub struct CsvYieldSource {
    file_path: PathBuf,
    yields: DashMap<TreasurySymbol, f64>,
}

impl CsvYieldSource {
    /// Create a new CSV yield source.
    pub fn new(file_path: impl AsRef<Path>) -> Result<Self, TraitError> {
        let source = Self {
            file_path: file_path.as_ref().to_path_buf(),
            yields: DashMap::new(),
        };
        source.reload()?;
        Ok(source)
    }

    /// Reload yields from file.
    pub fn reload(&self) -> Result<(), TraitError> {
        if !self.file_path.exists() {
            return Ok(()); // Empty source
        }

        let mut reader = csv::Reader::from_path(&self.file_path)
            .map_err(|e| TraitError::IoError(e.to_string()))?;

        self.yields.clear();
        for result in reader.deserialize() {
            let record: YieldRecord = result.map_err(|e| TraitError::ParseError(e.to_string()))?;
            let symbol: TreasurySymbol = record
                .symbol
                .parse()
                .map_err(|e: bondcalc_core::BondError| TraitError::ParseError(e.to_string()))?;
            if !record.yield_value.is_finite() {
                return Err(TraitError::ParseError(format!(
                    "non-finite yield for {symbol}"
                )));
            }
            self.yields.insert(symbol, record.yield_value);
        }

        tracing::debug!(
            path = %self.file_path.display(),
            count = self.yields.len(),
            "loaded yields"
        );
        Ok(())
    }

    /// Number of loaded symbols.
    pub fn len(&self) -> usize {
        self.yields.len()
    }

    /// Returns true if no yields are loaded.
    pub fn is_empty(&self) -> bool {
        self.yields.is_empty()
    }
}

#[async_trait]
impl YieldSource for CsvYieldSource {
    fn source_type(&self) -> SourceType {
        SourceType::File
    }

    async fn get_yield(&self, symbol: &TreasurySymbol) -> Result<YieldQuote, TraitError> {
        self.yields
            .get(symbol)
            .map(|y| YieldQuote::new(*symbol, *y, "csv"))
            .ok_or_else(|| TraitError::NotFound(format!("no yield for {symbol}")))
    }
}

// =============================================================================
// FALLBACK YIELD SOURCE
// =============================================================================

/// Tries a primary source, then an optional backup, then the static table.
///
/// Never fails. Static-table quotes carry `fallback` as their source.
pub struct FallbackYieldSource<P> {
    primary: P,
    backup: Option<Box<dyn YieldSource>>,
    fallback: StaticYieldSource,
    timeout: Option<Duration>,
}

impl<P: YieldSource> FallbackYieldSource<P> {
    /// Wrap `primary`.
    pub fn new(primary: P) -> Self {
        Self {
            primary,
            backup: None,
            fallback: StaticYieldSource::labelled("fallback"),
            timeout: None,
        }
    }

    /// Consult `backup` before the static table.
    pub fn with_backup(mut self, backup: impl YieldSource + 'static) -> Self {
        self.backup = Some(Box::new(backup));
        self
    }

    /// Give up on the primary after `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    async fn primary_yield(&self, symbol: &TreasurySymbol) -> Result<YieldQuote, TraitError> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.primary.get_yield(symbol))
                .await
                .map_err(|_| TraitError::Timeout)?,
            None => self.primary.get_yield(symbol).await,
        }
    }
}

#[async_trait]
impl<P: YieldSource> YieldSource for FallbackYieldSource<P> {
    fn source_type(&self) -> SourceType {
        self.primary.source_type()
    }

    async fn get_yield(&self, symbol: &TreasurySymbol) -> Result<YieldQuote, TraitError> {
        let e = match self.primary_yield(symbol).await {
            Ok(quote) => return Ok(quote),
            Err(e) => e,
        };

        if let Some(backup) = &self.backup {
            match backup.get_yield(symbol).await {
                Ok(quote) => {
                    tracing::warn!(
                        %symbol,
                        error = %e,
                        source = %quote.source,
                        "yield source failed, using backup"
                    );
                    return Ok(quote);
                }
                Err(backup_err) => {
                    tracing::debug!(%symbol, error = %backup_err, "backup yield source failed");
                }
            }
        }

        tracing::warn!(%symbol, error = %e, "yield source failed, using fallback table");
        Ok(self.fallback.quote(*symbol))
    }
}
