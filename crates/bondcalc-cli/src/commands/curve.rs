//! Curve command implementation.
//!
//! Samples the price/yield curve of one bond over a yield sweep.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use bondcalc_core::curve::{locate_nearest_sample, sample_curve_with, YieldSweep};

use crate::cli::OutputFormat;
use crate::commands::{validate_yield, BondArgs, Context};
use crate::output::{format_currency, print_header};

/// Arguments for the curve command.
#[derive(Args, Debug)]
pub struct CurveArgs {
    #[command(flatten)]
    pub bond: BondArgs,

    /// First yield in percent (defaults to curve.start_percent)
    #[arg(long)]
    pub start: Option<f64>,

    /// Last yield in percent (defaults to curve.end_percent)
    #[arg(long)]
    pub end: Option<f64>,

    /// Yield spacing in percent (defaults to curve.step_percent)
    #[arg(long)]
    pub step: Option<f64>,

    /// Mark the sample nearest this yield (percent)
    #[arg(long)]
    pub highlight: Option<f64>,
}

#[derive(Debug, Serialize, Tabled)]
struct CurveRow {
    #[tabled(rename = "Yield (%)")]
    yield_percent: f64,
    #[tabled(rename = "Price")]
    #[serde(skip)]
    price_display: String,
    #[tabled(skip)]
    price: f64,
    #[tabled(rename = "")]
    #[serde(skip)]
    marker: &'static str,
    #[tabled(skip)]
    highlighted: bool,
}

/// Execute the curve command.
pub fn execute(args: CurveArgs, ctx: &Context) -> Result<()> {
    let defaults = ctx.config.sweep();
    let sweep = YieldSweep::new(
        args.start.unwrap_or(defaults.start),
        args.end.unwrap_or(defaults.end),
        args.step.unwrap_or(defaults.step),
    );
    let terms = args.bond.to_terms(&ctx.config, 0.0)?;
    let samples = sample_curve_with(&ctx.config.pricer(), &terms, &sweep)?;

    let highlighted = match args.highlight {
        Some(target) => locate_nearest_sample(&samples, validate_yield(target)?),
        None => None,
    };

    let rows: Vec<CurveRow> = samples
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let hit = highlighted == Some(i);
            CurveRow {
                yield_percent: s.yield_percent,
                price_display: format_currency(s.price),
                price: s.price,
                marker: if hit { "◀" } else { "" },
                highlighted: hit,
            }
        })
        .collect();

    match ctx.format {
        OutputFormat::Table => {
            print_header("Price/Yield Curve");
            println!(
                "Face {} | Coupon {:.2}% | {} years | {}",
                format_currency(terms.face_value),
                terms.coupon_rate * 100.0,
                terms.years_to_maturity,
                terms.frequency
            );
            println!();
            println!("{}", Table::new(&rows).with(Style::rounded()));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            for row in &rows {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }
        OutputFormat::Minimal => {
            for row in &rows {
                println!("{} {:.2}", row.yield_percent, row.price);
            }
        }
    }

    Ok(())
}
