//! Config command implementation.
//!
//! Shows the active configuration and where it was loaded from.

use anyhow::Result;
use clap::{Args, Subcommand};

use bondcalc_config::{default_config_path, ConfigSource};

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::output::{format_currency, format_percent, print_header, print_info, print_report, KeyValue};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the active configuration
    Show,

    /// Show which configuration file is in use
    Path,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => execute_show(ctx),
        ConfigCommand::Path => execute_path(ctx),
    }
}

/// Show the active configuration.
fn execute_show(ctx: &Context) -> Result<()> {
    let config = &ctx.config;

    if ctx.format == OutputFormat::Minimal {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    let rows = vec![
        KeyValue::new("pricing.default_frequency", config.pricing.default_frequency.to_string()),
        KeyValue::new(
            "pricing.default_face_value",
            format_currency(config.pricing.default_face_value),
        ),
        KeyValue::new("pricing.period_rounding", config.pricing.period_rounding.to_string()),
        KeyValue::new(
            "curve",
            format!(
                "{}% to {}% step {}%",
                config.curve.start_percent, config.curve.end_percent, config.curve.step_percent
            ),
        ),
        KeyValue::new("storage.data_dir", config.storage.data_dir.display().to_string()),
        KeyValue::new("storage.portfolio_key", config.storage.portfolio_key.clone()),
        KeyValue::new(
            "market_data.benchmark_symbol",
            config.market_data.benchmark_symbol.to_string(),
        ),
        KeyValue::new(
            "market_data.yields_file",
            config
                .market_data
                .yields_file
                .as_ref()
                .map_or_else(|| "(static table)".to_string(), |p| p.display().to_string()),
        ),
        KeyValue::new(
            "market_data.live_url",
            match (&config.market_data.live_url, config.market_data.api_key()) {
                (None, _) => "(disabled)".to_string(),
                (Some(url), Some(_)) => format!("{url} (key from ${})", config.market_data.api_key_env),
                (Some(url), None) => format!("{url} (${} not set)", config.market_data.api_key_env),
            },
        ),
        KeyValue::new(
            "market_data.default_yield",
            format_percent(config.market_data.default_yield),
        ),
        KeyValue::new("server", config.server.bind_address()),
    ];

    if ctx.format == OutputFormat::Table {
        print_info(&format!("Source: {}", ctx.source));
    }
    print_report("Current Configuration", &rows, config, "", ctx.format)
}

/// Show configuration file path.
fn execute_path(ctx: &Context) -> Result<()> {
    match (&ctx.source, ctx.format) {
        (ConfigSource::Defaults, OutputFormat::Minimal) => {}
        (source, OutputFormat::Minimal) => {
            if let Some(path) = source.path() {
                println!("{}", path.display());
            }
        }
        (ConfigSource::Defaults, _) => {
            print_header("Configuration");
            print_info("No config file found (using defaults)");
            if let Some(path) = default_config_path() {
                print_info(&format!("Create one at: {}", path.display()));
            }
        }
        (source, _) => {
            print_header("Configuration");
            print_info(&format!("Config file: {source}"));
        }
    }
    Ok(())
}
