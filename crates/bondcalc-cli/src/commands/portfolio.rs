//! Portfolio command implementation.
//!
//! The portfolio lives in `<storage.data_dir>/<storage.portfolio_key>.json`
//! and is shared with the server.

use std::sync::Arc;

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use bondcalc_ext_file::JsonFileStore;
use bondcalc_portfolio::prelude::*;

use crate::cli::OutputFormat;
use crate::commands::{BondArgs, Context, MarketYieldArgs};
use crate::error::CliError;
use crate::output::{
    format_bps, format_currency, format_percent, print_header, print_info, print_output,
    print_report, print_success, print_warning, KeyValue,
};

/// Arguments for the portfolio command.
#[derive(Args, Debug)]
pub struct PortfolioArgs {
    #[command(subcommand)]
    pub command: PortfolioCommand,
}

/// Portfolio subcommands.
#[derive(Subcommand, Debug)]
pub enum PortfolioCommand {
    /// Price a bond and add it to the portfolio
    Add(AddArgs),

    /// List saved bonds
    List,

    /// Remove one bond by id
    Remove(RemoveArgs),

    /// Remove every bond
    Clear(ClearArgs),

    /// Aggregate metrics and benchmark comparison
    Metrics,
}

/// Arguments for portfolio add.
#[derive(Args, Debug)]
pub struct AddArgs {
    #[command(flatten)]
    pub bond: BondArgs,

    #[command(flatten)]
    pub market: MarketYieldArgs,
}

/// Arguments for portfolio remove.
#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Entry id as shown by `portfolio list`
    pub id: Uuid,
}

/// Arguments for portfolio clear.
#[derive(Args, Debug)]
pub struct ClearArgs {
    /// Confirm removing every bond
    #[arg(long)]
    pub yes: bool,
}

#[derive(Debug, Serialize, Tabled)]
struct EntryRow {
    #[tabled(rename = "Id")]
    id: Uuid,
    #[tabled(rename = "Bond")]
    name: String,
    #[tabled(rename = "Face")]
    face: String,
    #[tabled(rename = "Coupon")]
    coupon: String,
    #[tabled(rename = "Yield")]
    market_yield: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Pricing")]
    pricing: String,
}

impl From<&PortfolioEntry> for EntryRow {
    fn from(entry: &PortfolioEntry) -> Self {
        let bond = &entry.bond;
        Self {
            id: entry.id,
            name: bond.display_name(),
            face: format_currency(bond.face_value),
            coupon: format_percent(bond.coupon_rate),
            market_yield: format_percent(bond.market_yield),
            price: format_currency(bond.price),
            pricing: bond.classification().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct MetricsReport {
    #[serde(flatten)]
    metrics: PortfolioMetrics,
    benchmark: Option<BenchmarkComparison>,
    price_series: Vec<SeriesPoint>,
    yield_series: Vec<SeriesPoint>,
}

/// Execute the portfolio command.
pub fn execute(args: PortfolioArgs, ctx: &Context) -> Result<()> {
    let mut session = open_session(ctx)?;

    match args.command {
        PortfolioCommand::Add(add) => execute_add(&mut session, add, ctx)?,
        PortfolioCommand::List => execute_list(&session, ctx.format)?,
        PortfolioCommand::Remove(remove) => execute_remove(&mut session, remove.id),
        PortfolioCommand::Clear(clear) => execute_clear(&mut session, clear.yes)?,
        PortfolioCommand::Metrics => execute_metrics(&session, ctx)?,
    }

    if let Some(err) = session.last_storage_error() {
        print_warning(&err.to_string());
    }
    Ok(())
}

fn open_session(ctx: &Context) -> Result<PortfolioSession> {
    let storage = &ctx.config.storage;
    let store = JsonFileStore::new(&storage.data_dir)?;
    Ok(
        PortfolioSession::open_with_key(Arc::new(store), storage.portfolio_key.clone())
            .with_pricer(ctx.config.pricer()),
    )
}

fn execute_add(session: &mut PortfolioSession, args: AddArgs, ctx: &Context) -> Result<()> {
    let (market_yield, bond_type) = args.market.resolve(ctx)?;
    let terms = args.bond.to_terms(&ctx.config, market_yield)?;
    let name = session.price(&terms, bond_type)?.display_name();
    let id = session.add_last_priced()?;

    if ctx.format == OutputFormat::Table {
        print_success(&format!("Added {name} ({id})"));
    } else {
        println!("{id}");
    }
    Ok(())
}

fn execute_list(session: &PortfolioSession, format: OutputFormat) -> Result<()> {
    let portfolio = session.portfolio();
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(portfolio)?),
        OutputFormat::Table => {
            print_header("Portfolio");
            let rows: Vec<EntryRow> = portfolio.into_iter().map(EntryRow::from).collect();
            print_output(&rows, format)?;
        }
        OutputFormat::Csv => {
            let rows: Vec<EntryRow> = portfolio.into_iter().map(EntryRow::from).collect();
            print_output(&rows, format)?;
        }
        OutputFormat::Minimal => {
            for entry in portfolio {
                println!("{} {:.2}", entry.id, entry.bond.price);
            }
        }
    }
    Ok(())
}

fn execute_remove(session: &mut PortfolioSession, id: Uuid) {
    if session.remove(id) {
        print_success(&format!("Removed {id}"));
    } else {
        print_info(&format!("No entry with id {id}; portfolio unchanged"));
    }
}

fn execute_clear(session: &mut PortfolioSession, confirmed: bool) -> Result<()> {
    if !confirmed {
        return Err(CliError::NotConfirmed("clear the portfolio".to_string()).into());
    }
    let removed = session.portfolio().len();
    session.clear();
    print_success(&format!("Cleared {removed} bond(s)"));
    Ok(())
}

fn execute_metrics(session: &PortfolioSession, ctx: &Context) -> Result<()> {
    let portfolio = session.portfolio();
    let metrics = portfolio.metrics();

    let benchmark = if portfolio.is_empty() {
        None
    } else {
        let symbol = ctx.config.market_data.benchmark_symbol;
        let quote = ctx.fetch_yield(symbol)?;
        Some(compare_to_benchmark(&metrics, symbol, quote.yield_value))
    };

    let mut rows = vec![
        KeyValue::new("Bonds", metrics.bond_count.to_string()),
        KeyValue::new("Total Value", format_currency(metrics.total_value)),
        KeyValue::new("Average Yield", format_percent(metrics.avg_yield)),
        KeyValue::new(
            "Expected Annual Return",
            format_currency(metrics.expected_annual_return),
        ),
    ];
    if let Some(cmp) = &benchmark {
        rows.push(KeyValue::new(
            cmp.benchmark.display_name(),
            format_percent(cmp.benchmark_yield),
        ));
        rows.push(KeyValue::new("Spread", format_bps(cmp.spread_bps)));
    }

    let report = MetricsReport {
        metrics,
        benchmark,
        price_series: portfolio.price_series(),
        yield_series: portfolio.yield_series(),
    };

    print_report(
        "Portfolio Metrics",
        &rows,
        &report,
        &format!("{:.2}", metrics.total_value),
        ctx.format,
    )
}
