//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{
    ConfigArgs, CurveArgs, PortfolioArgs, PriceArgs, YieldArgs, YtmArgs,
};

/// Bondcalc - Bond price, yield and portfolio calculator
#[derive(Parser)]
#[command(name = "bondcalc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Configuration file (defaults to $BONDCALC_CONFIG, then the user config dir)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Price a bond from its terms and a market yield
    Price(PriceArgs),

    /// Approximate yield to maturity from a price
    Ytm(YtmArgs),

    /// Sample the price/yield curve of a bond
    Curve(CurveArgs),

    /// Look up the current yield of a treasury benchmark
    Yield(YieldArgs),

    /// Manage the saved portfolio
    Portfolio(PortfolioArgs),

    /// Inspect configuration
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the value)
    Minimal,
}
