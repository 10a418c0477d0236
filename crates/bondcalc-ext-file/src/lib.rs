//! # Bondcalc Ext File
//!
//! Storage and market yields for the bond calculator.
//!
//! This crate provides default implementations for local use, EOD loads and
//! tests:
//! - JSON-file and in-memory key-value stores
//! - Static treasury yield table
//! - CSV-based yield source
//! - Live yields from an HTTP quote endpoint
//! - Fallback combinator that substitutes stored yields on failure

#![warn(missing_docs)]
#![warn(clippy::all)]

mod live;
mod market_data;
mod storage;

pub use live::*;
pub use market_data::*;
pub use storage::*;

use std::path::PathBuf;
use std::sync::Arc;

use bondcalc_traits::error::TraitError;
use bondcalc_traits::market_data::YieldSource;

/// Where the front ends get treasury yields.
#[derive(Debug, Clone, Default)]
pub struct YieldSourceOptions {
    /// CSV of `symbol,yield` rows.
    pub yields_file: Option<PathBuf>,
    /// Live quote endpoint.
    pub live: Option<LiveFeed>,
}

/// Create the yield source used by the front ends.
///
/// Lookups try the live feed, then the CSV file, then the static table,
/// skipping whichever is not configured.
pub fn create_yield_source(
    options: &YieldSourceOptions,
) -> Result<Arc<dyn YieldSource>, TraitError> {
    let csv = options
        .yields_file
        .as_ref()
        .map(CsvYieldSource::new)
        .transpose()?;

    let source: Arc<dyn YieldSource> = match (&options.live, csv) {
        (Some(feed), csv) => {
            if feed.api_key.is_none() {
                tracing::warn!(url = %feed.url, "live yield feed has no API key");
            }
            let live =
                FallbackYieldSource::new(HttpYieldSource::new(feed)?).with_timeout(feed.timeout);
            match csv {
                Some(csv) => Arc::new(live.with_backup(csv)),
                None => Arc::new(live),
            }
        }
        (None, Some(csv)) => Arc::new(FallbackYieldSource::new(csv)),
        (None, None) => Arc::new(StaticYieldSource::new()),
    };
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bondcalc_core::TreasurySymbol;
    use bondcalc_traits::market_data::SourceType;
    use std::time::Duration;

    #[tokio::test]
    async fn test_create_static_source() {
        let source = create_yield_source(&YieldSourceOptions::default()).unwrap();
        assert_eq!(source.source_type(), SourceType::Static);
        let quote = source.get_yield(&TreasurySymbol::Y3).await.unwrap();
        assert_eq!(quote.yield_value, 0.0445);
    }

    #[tokio::test]
    async fn test_create_csv_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("yields.csv");
        std::fs::write(&path, "symbol,yield\nUS3Y,0.03\n").unwrap();

        let options = YieldSourceOptions {
            yields_file: Some(path),
            live: None,
        };
        let source = create_yield_source(&options).unwrap();
        assert_eq!(source.source_type(), SourceType::File);
        assert_eq!(
            source.get_yield(&TreasurySymbol::Y3).await.unwrap().yield_value,
            0.03
        );
        assert_eq!(
            source.get_yield(&TreasurySymbol::Y7).await.unwrap().source,
            "fallback"
        );
    }

    #[tokio::test]
    async fn test_unreachable_live_feed_uses_csv_then_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("yields.csv");
        std::fs::write(&path, "symbol,yield\nUS3Y,0.03\n").unwrap();

        // Nothing listens on port 9 locally; connection is refused.
        let feed =
            LiveFeed::new("http://127.0.0.1:9/yield").with_timeout(Duration::from_millis(500));
        let options = YieldSourceOptions {
            yields_file: Some(path),
            live: Some(feed),
        };
        let source = create_yield_source(&options).unwrap();
        assert_eq!(source.source_type(), SourceType::Snapshot);

        let csv = source.get_yield(&TreasurySymbol::Y3).await.unwrap();
        assert_eq!(csv.source, "csv");
        let table = source.get_yield(&TreasurySymbol::Y10).await.unwrap();
        assert_eq!(table.source, "fallback");
        assert_eq!(table.yield_value, 0.0425);
    }
}
