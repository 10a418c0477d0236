//! CLI command implementations.

pub mod config;
pub mod curve;
pub mod portfolio;
pub mod price;
pub mod yields;
pub mod ytm;

pub use config::ConfigArgs;
pub use curve::CurveArgs;
pub use portfolio::PortfolioArgs;
pub use price::PriceArgs;
pub use yields::YieldArgs;
pub use ytm::YtmArgs;

use std::sync::Arc;

use clap::Args;

use bondcalc_config::{CalculatorConfig, ConfigSource};
use bondcalc_core::{BondTerms, BondType, Frequency, TreasurySymbol, MAX_YEARS_TO_MATURITY};
use bondcalc_ext_file::{create_yield_source, LiveFeed, YieldSourceOptions};
use bondcalc_traits::{YieldQuote, YieldSource};

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};

/// Everything a command needs besides its own arguments.
pub struct Context {
    /// Active configuration.
    pub config: CalculatorConfig,
    /// Where `config` was loaded from.
    pub source: ConfigSource,
    /// Output format.
    pub format: OutputFormat,
}

impl Context {
    /// Yield source configured by the `[market_data]` section.
    pub fn yield_source(&self) -> CliResult<Arc<dyn YieldSource>> {
        let market = &self.config.market_data;
        let options = YieldSourceOptions {
            yields_file: market.yields_file.clone(),
            live: market.live_url.as_ref().map(|url| {
                LiveFeed::new(url.clone())
                    .with_api_key(market.api_key())
                    .with_timeout(market.live_timeout())
            }),
        };
        Ok(create_yield_source(&options)?)
    }

    /// Fetches quotes on a throwaway runtime.
    pub fn fetch_yields(&self, symbols: &[TreasurySymbol]) -> CliResult<Vec<YieldQuote>> {
        let source = self.yield_source()?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        Ok(runtime.block_on(source.get_yields(symbols))?)
    }

    /// Fetches one quote.
    pub fn fetch_yield(&self, symbol: TreasurySymbol) -> CliResult<YieldQuote> {
        self.fetch_yields(&[symbol])?
            .pop()
            .ok_or_else(|| CliError::MissingArgument(format!("quote for {symbol}")))
    }
}

/// Bond terms shared by `price`, `curve` and `portfolio add`.
///
/// Rates are entered in percent.
#[derive(Args, Debug, Clone)]
pub struct BondArgs {
    /// Face value (defaults to pricing.default_face_value)
    #[arg(long)]
    pub face: Option<f64>,

    /// Annual coupon rate in percent (e.g. 5 for 5%)
    #[arg(short = 'C', long)]
    pub coupon: f64,

    /// Years to maturity
    #[arg(short = 'Y', long)]
    pub years: f64,

    /// Coupon payments per year: 1, 2, 4 or 12 (defaults to pricing.default_frequency)
    #[arg(long)]
    pub frequency: Option<u32>,
}

impl BondArgs {
    /// Validated terms at `market_yield` (decimal).
    pub fn to_terms(&self, config: &CalculatorConfig, market_yield: f64) -> CliResult<BondTerms> {
        let face = validate_face(self.face.unwrap_or(config.pricing.default_face_value))?;
        let coupon = validate_coupon(self.coupon)?;
        let years = validate_years(self.years)?;
        let frequency = match self.frequency {
            Some(n) => Frequency::from_periods_per_year(n)?,
            None => config.pricing.default_frequency,
        };
        Ok(BondTerms::new(face, coupon / 100.0, years, market_yield).with_frequency(frequency))
    }
}

/// Market yield input: an explicit percentage or a treasury to look up.
#[derive(Args, Debug, Clone)]
pub struct MarketYieldArgs {
    /// Market yield in percent
    #[arg(short = 'y', long = "yield", conflicts_with = "symbol")]
    pub yield_percent: Option<f64>,

    /// Treasury benchmark whose current yield to use (e.g. US10Y)
    #[arg(short, long)]
    pub symbol: Option<TreasurySymbol>,
}

impl MarketYieldArgs {
    /// Resolves the market yield (decimal) and bond type.
    ///
    /// With neither flag the configured default yield prices a custom bond.
    pub fn resolve(&self, ctx: &Context) -> CliResult<(f64, BondType)> {
        match (self.yield_percent, self.symbol) {
            (Some(pct), _) => Ok((validate_yield(pct)? / 100.0, BondType::Custom)),
            (None, Some(symbol)) => {
                let quote = ctx.fetch_yield(symbol)?;
                tracing::debug!(%symbol, source = %quote.source, "using market yield");
                Ok((quote.yield_value, BondType::Treasury(symbol)))
            }
            (None, None) => Ok((ctx.config.market_data.default_yield, BondType::Custom)),
        }
    }
}

/// Validates a face value.
pub fn validate_face(face: f64) -> CliResult<f64> {
    if !face.is_finite() || face <= 0.0 {
        return Err(CliError::InvalidFace(face));
    }
    Ok(face)
}

/// Validates a coupon rate in percent.
pub fn validate_coupon(coupon: f64) -> CliResult<f64> {
    if !(0.0..=100.0).contains(&coupon) {
        return Err(CliError::InvalidCoupon(coupon));
    }
    Ok(coupon)
}

/// Validates a yield in percent.
pub fn validate_yield(yield_value: f64) -> CliResult<f64> {
    if !(0.0..=100.0).contains(&yield_value) {
        return Err(CliError::InvalidYield(yield_value));
    }
    Ok(yield_value)
}

/// Validates years to maturity.
pub fn validate_years(years: f64) -> CliResult<f64> {
    if !years.is_finite() || years <= 0.0 || years > MAX_YEARS_TO_MATURITY {
        return Err(CliError::InvalidMaturity(years));
    }
    Ok(years)
}

/// Validates a price.
pub fn validate_price(price: f64) -> CliResult<f64> {
    if !price.is_finite() || price <= 0.0 {
        return Err(CliError::InvalidPrice(price));
    }
    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validators() {
        assert!(validate_face(1000.0).is_ok());
        assert!(matches!(validate_face(0.0), Err(CliError::InvalidFace(_))));
        assert!(validate_coupon(0.0).is_ok());
        assert!(validate_coupon(100.0).is_ok());
        assert!(matches!(validate_coupon(100.5), Err(CliError::InvalidCoupon(_))));
        assert!(matches!(validate_yield(-1.0), Err(CliError::InvalidYield(_))));
        assert!(matches!(validate_years(0.0), Err(CliError::InvalidMaturity(_))));
        assert!(matches!(validate_years(3.0e8), Err(CliError::InvalidMaturity(_))));
        assert_eq!(validate_years(100.0).unwrap(), 100.0);
        assert!(matches!(validate_price(f64::NAN), Err(CliError::InvalidPrice(_))));
    }

    #[test]
    fn test_bond_args_to_terms() {
        let config = CalculatorConfig::default();
        let args = BondArgs {
            face: None,
            coupon: 5.0,
            years: 10.0,
            frequency: None,
        };
        let terms = args.to_terms(&config, 0.045).unwrap();
        assert_eq!(terms.face_value, 1000.0);
        assert_eq!(terms.coupon_rate, 0.05);
        assert_eq!(terms.frequency, Frequency::SemiAnnual);
        assert_eq!(terms.market_yield, 0.045);

        let bad = BondArgs {
            frequency: Some(3),
            ..args
        };
        assert!(matches!(bad.to_terms(&config, 0.045), Err(CliError::Bond(_))));
    }
}
