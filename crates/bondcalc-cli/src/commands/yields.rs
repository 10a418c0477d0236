//! Yield command implementation.
//!
//! Looks up current treasury yields from the configured market-data source.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use bondcalc_core::TreasurySymbol;

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::output::{format_percent, print_header, print_output};

/// Arguments for the yield command.
#[derive(Args, Debug)]
pub struct YieldArgs {
    /// Treasury benchmark (defaults to market_data.benchmark_symbol)
    pub symbol: Option<TreasurySymbol>,

    /// Show every benchmark from 1-month to 30-year
    #[arg(long, conflicts_with = "symbol")]
    pub all: bool,
}

#[derive(Debug, Serialize, Tabled)]
struct YieldRow {
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Yield")]
    #[serde(skip)]
    display: String,
    #[tabled(skip)]
    #[serde(rename = "yield")]
    yield_value: f64,
    #[tabled(rename = "Source")]
    source: String,
}

/// Execute the yield command.
pub fn execute(args: YieldArgs, ctx: &Context) -> Result<()> {
    let symbols: Vec<TreasurySymbol> = if args.all {
        TreasurySymbol::ALL.to_vec()
    } else {
        vec![args
            .symbol
            .unwrap_or(ctx.config.market_data.benchmark_symbol)]
    };

    let rows: Vec<YieldRow> = ctx
        .fetch_yields(&symbols)?
        .into_iter()
        .map(|q| YieldRow {
            symbol: q.symbol.to_string(),
            name: q.symbol.display_name(),
            display: format_percent(q.yield_value),
            yield_value: q.yield_value,
            source: q.source,
        })
        .collect();

    match ctx.format {
        OutputFormat::Table => {
            print_header("Treasury Yields");
            print_output(&rows, ctx.format)?;
        }
        OutputFormat::Minimal => {
            for row in &rows {
                println!("{:.4}", row.yield_value * 100.0);
            }
        }
        OutputFormat::Json | OutputFormat::Csv => print_output(&rows, ctx.format)?,
    }

    Ok(())
}
