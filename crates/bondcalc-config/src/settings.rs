//! Calculator settings loaded from TOML.

use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use bondcalc_core::curve::YieldSweep;
use bondcalc_core::pricing::BondPricer;
use bondcalc_core::{Frequency, PeriodRounding, TreasurySymbol};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};

/// Top-level configuration.
///
/// Every section and field has a default, so an empty file is valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Pricing defaults.
    pub pricing: PricingSettings,
    /// Price/yield curve sweep.
    pub curve: CurveSettings,
    /// Portfolio persistence.
    pub storage: StorageSettings,
    /// Treasury yield lookup.
    pub market_data: MarketDataSettings,
    /// HTTP server binding.
    pub server: ServerSettings,
}

/// Pricing defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingSettings {
    /// Coupon payments per year when a request omits it.
    pub default_frequency: Frequency,
    /// Face value when a request omits it.
    pub default_face_value: f64,
    /// How fractional coupon periods are resolved.
    pub period_rounding: PeriodRounding,
}

impl Default for PricingSettings {
    fn default() -> Self {
        Self {
            default_frequency: Frequency::SemiAnnual,
            default_face_value: 1000.0,
            period_rounding: PeriodRounding::Round,
        }
    }
}

/// Price/yield curve sweep, in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveSettings {
    /// First yield.
    pub start_percent: f64,
    /// Last yield (inclusive).
    pub end_percent: f64,
    /// Spacing.
    pub step_percent: f64,
}

impl Default for CurveSettings {
    fn default() -> Self {
        let sweep = YieldSweep::default();
        Self {
            start_percent: sweep.start,
            end_percent: sweep.end,
            step_percent: sweep.step,
        }
    }
}

/// Portfolio persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory for JSON files.
    pub data_dir: PathBuf,
    /// Key the portfolio is stored under.
    pub portfolio_key: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            portfolio_key: "bondPortfolio".to_string(),
        }
    }
}

/// Treasury yield lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketDataSettings {
    /// Benchmark for portfolio comparison.
    pub benchmark_symbol: TreasurySymbol,
    /// Optional CSV of `symbol,yield` rows.
    pub yields_file: Option<PathBuf>,
    /// Market yield used when a request omits one (decimal).
    pub default_yield: f64,
    /// Live quote endpoint, queried as `?symbol=US10Y&token=<key>`.
    pub live_url: Option<String>,
    /// Environment variable holding the live feed's API key.
    pub api_key_env: String,
    /// How long to wait for the live feed before using stored yields.
    pub live_timeout_ms: u64,
}

impl Default for MarketDataSettings {
    fn default() -> Self {
        Self {
            benchmark_symbol: TreasurySymbol::Y10,
            yields_file: None,
            default_yield: 0.0425,
            live_url: None,
            api_key_env: "FINNHUB_API_KEY".to_string(),
            live_timeout_ms: 3000,
        }
    }
}

impl MarketDataSettings {
    /// API key read from `api_key_env`, if set and non-empty.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }

    /// `live_timeout_ms` as a duration.
    pub fn live_timeout(&self) -> Duration {
        Duration::from_millis(self.live_timeout_ms)
    }
}

/// HTTP server binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Host to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerSettings {
    /// `host:port`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl CalculatorConfig {
    /// Parses and validates TOML.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Loads and validates a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Renders the configuration as TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Curve sweep from the `[curve]` section.
    pub fn sweep(&self) -> YieldSweep {
        YieldSweep::new(
            self.curve.start_percent,
            self.curve.end_percent,
            self.curve.step_percent,
        )
    }

    /// Pricer honouring `pricing.period_rounding`.
    pub fn pricer(&self) -> BondPricer {
        BondPricer::new(self.pricing.period_rounding)
    }
}

impl Validate for CalculatorConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        let face = self.pricing.default_face_value;
        if !face.is_finite() || face <= 0.0 {
            errors.push(ValidationError::new(
                "pricing.default_face_value",
                "must be a positive number",
            ));
        }

        if let Err(e) = self.sweep().len() {
            errors.push(ValidationError::new("curve", e.to_string()));
        }

        if self.storage.data_dir.as_os_str().is_empty() {
            errors.push(ValidationError::new("storage.data_dir", "must not be empty"));
        }
        let key = &self.storage.portfolio_key;
        if key.is_empty()
            || !key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-'))
        {
            errors.push(ValidationError::new(
                "storage.portfolio_key",
                "must be non-empty and use only letters, digits, '_' or '-'",
            ));
        }

        let y = self.market_data.default_yield;
        if !y.is_finite() || !(0.0..=1.0).contains(&y) {
            errors.push(ValidationError::new(
                "market_data.default_yield",
                "must be a decimal between 0 and 1",
            ));
        }

        if let Some(url) = &self.market_data.live_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                errors.push(ValidationError::new(
                    "market_data.live_url",
                    "must be an http:// or https:// URL",
                ));
            }
        }
        if self.market_data.live_timeout_ms == 0 {
            errors.push(ValidationError::new(
                "market_data.live_timeout_ms",
                "must be non-zero",
            ));
        }

        if self.server.host.parse::<IpAddr>().is_err() {
            errors.push(ValidationError::new(
                "server.host",
                format!("'{}' is not an IP address", self.server.host),
            ));
        }
        if self.server.port == 0 {
            errors.push(ValidationError::new("server.port", "must be non-zero"));
        }

        errors
    }
}
