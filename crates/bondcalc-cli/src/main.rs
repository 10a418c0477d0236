//! Bondcalc CLI - Command-line bond price calculator.
//!
//! # Usage
//!
//! ```bash
//! # Price a 10-year 5% bond at a 4.5% market yield
//! bondcalc price --coupon 5 --years 10 --yield 4.5
//!
//! # Price the 10-year treasury at its current yield
//! bondcalc price --coupon 4.25 --years 10 --symbol US10Y
//!
//! # Approximate yield to maturity from a quoted price
//! bondcalc ytm --price 950 --coupon 5 --years 10
//!
//! # Price/yield curve, marking the sample nearest 4.25%
//! bondcalc curve --coupon 5 --years 10 --highlight 4.25
//!
//! # Save a bond and view portfolio metrics
//! bondcalc portfolio add --coupon 5 --years 10 --yield 4.5
//! bondcalc portfolio metrics
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};
use commands::Context;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let (config, source) = bondcalc_config::load_config(cli.config.as_deref())?;
    let ctx = Context {
        config,
        source,
        format: cli.format,
    };

    match cli.command {
        Commands::Price(args) => commands::price::execute(args, &ctx)?,
        Commands::Ytm(args) => commands::ytm::execute(args, &ctx)?,
        Commands::Curve(args) => commands::curve::execute(args, &ctx)?,
        Commands::Yield(args) => commands::yields::execute(args, &ctx)?,
        Commands::Portfolio(args) => commands::portfolio::execute(args, &ctx)?,
        Commands::Config(args) => commands::config::execute(args, &ctx)?,
    }

    Ok(())
}

/// Logs go to stderr so table/JSON output on stdout stays clean.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
