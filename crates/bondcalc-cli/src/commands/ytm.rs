//! Ytm command implementation.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use bondcalc_core::pricing::estimate_ytm;

use crate::commands::{validate_coupon, validate_face, validate_price, validate_years, Context};
use crate::output::{format_currency, format_percent, print_report, KeyValue};

/// Arguments for the ytm command.
#[derive(Args, Debug)]
pub struct YtmArgs {
    /// Quoted price
    #[arg(short, long)]
    pub price: f64,

    /// Face value (defaults to pricing.default_face_value)
    #[arg(long)]
    pub face: Option<f64>,

    /// Annual coupon rate in percent
    #[arg(short = 'C', long)]
    pub coupon: f64,

    /// Years to maturity
    #[arg(short = 'Y', long)]
    pub years: f64,
}

#[derive(Debug, Serialize)]
struct YtmReport {
    price: f64,
    face_value: f64,
    coupon_rate: f64,
    years_to_maturity: f64,
    ytm: f64,
}

/// Execute the ytm command.
pub fn execute(args: YtmArgs, ctx: &Context) -> Result<()> {
    let price = validate_price(args.price)?;
    let face = validate_face(args.face.unwrap_or(ctx.config.pricing.default_face_value))?;
    let coupon = validate_coupon(args.coupon)? / 100.0;
    let years = validate_years(args.years)?;

    let ytm = estimate_ytm(price, face, coupon, years)?;
    tracing::debug!(price, face, coupon, years, ytm, "estimated yield to maturity");

    let rows = vec![
        KeyValue::new("Price", format_currency(price)),
        KeyValue::new("Face Value", format_currency(face)),
        KeyValue::new("Coupon", format_percent(coupon)),
        KeyValue::new("Years to Maturity", format!("{years}")),
        KeyValue::new("Approx. YTM", format_percent(ytm)),
    ];
    let report = YtmReport {
        price,
        face_value: face,
        coupon_rate: coupon,
        years_to_maturity: years,
        ytm,
    };

    print_report(
        "Yield to Maturity (approximate)",
        &rows,
        &report,
        &format!("{:.4}", ytm * 100.0),
        ctx.format,
    )
}
