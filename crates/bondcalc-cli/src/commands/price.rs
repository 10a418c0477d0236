//! Price command implementation.
//!
//! Prices a bond from its terms and a market yield, then classifies and
//! explains the result.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use bondcalc_core::pricing::explain;
use bondcalc_core::{PricedBond, PricingClass};

use crate::commands::{BondArgs, Context, MarketYieldArgs};
use crate::output::{format_currency, format_percent, format_signed_percent, print_report, KeyValue};

/// Arguments for the price command.
#[derive(Args, Debug)]
pub struct PriceArgs {
    #[command(flatten)]
    pub bond: BondArgs,

    #[command(flatten)]
    pub market: MarketYieldArgs,
}

/// JSON shape of a priced bond.
#[derive(Debug, Serialize)]
pub struct PriceReport<'a> {
    #[serde(flatten)]
    pub bond: &'a PricedBond,
    pub display_name: String,
    pub classification: PricingClass,
    pub explanation: String,
}

/// Execute the price command.
pub fn execute(args: PriceArgs, ctx: &Context) -> Result<()> {
    let (market_yield, bond_type) = args.market.resolve(ctx)?;
    let terms = args.bond.to_terms(&ctx.config, market_yield)?;
    let bond = ctx.config.pricer().price_bond(&terms, bond_type)?;

    let report = PriceReport {
        bond: &bond,
        display_name: bond.display_name(),
        classification: bond.classification(),
        explanation: explain(&bond),
    };
    let rows = price_rows(&bond);

    print_report(
        "Bond Pricing Results",
        &rows,
        &report,
        &format!("{:.2}", bond.price),
        ctx.format,
    )?;

    if ctx.format == crate::cli::OutputFormat::Table {
        println!("\n{}", report.explanation);
    }

    Ok(())
}

/// Table rows describing a priced bond.
pub(crate) fn price_rows(bond: &PricedBond) -> Vec<KeyValue> {
    vec![
        KeyValue::new("Bond", bond.display_name()),
        KeyValue::new("Face Value", format_currency(bond.face_value)),
        KeyValue::new("Coupon", format_percent(bond.coupon_rate)),
        KeyValue::new("Years to Maturity", format!("{}", bond.years_to_maturity)),
        KeyValue::new("Frequency", bond.frequency.to_string()),
        KeyValue::new("Market Yield", format_percent(bond.market_yield)),
        KeyValue::new("Price", format_currency(bond.price)),
        KeyValue::new("Change from Par", format_signed_percent(bond.price_change_from_par)),
        KeyValue::new("Approx. YTM", format_percent(bond.ytm)),
        KeyValue::new("Pricing", bond.classification().to_string()),
    ]
}
