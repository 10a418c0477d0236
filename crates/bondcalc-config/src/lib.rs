//! Bondcalc Configuration Layer
//!
//! TOML configuration shared by the `bondcalc` CLI and server.
//!
//! # Features
//!
//! - **Pricing defaults**: frequency, face value, fractional-period policy
//! - **Curve sweep**: start, end and step of the price/yield curve
//! - **Storage**: data directory and portfolio key
//! - **Market data**: benchmark symbol, live quote feed, optional yields CSV,
//!   default yield
//! - **Server**: bind address (an IP) and port
//!
//! Every field has a default, so an empty or absent file is valid.
//!
//! # Example
//!
//! ```rust
//! use bondcalc_config::CalculatorConfig;
//!
//! let config = CalculatorConfig::from_toml_str(r#"
//!     [pricing]
//!     default_frequency = 1
//!
//!     [server]
//!     port = 9090
//! "#).unwrap();
//!
//! assert_eq!(config.server.port, 9090);
//! assert_eq!(config.storage.portfolio_key, "bondPortfolio");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod loader;
pub mod settings;

pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
pub use loader::{
    default_config_path, load_config, resolve_config_source, ConfigSource, CONFIG_ENV_VAR,
};
pub use settings::{
    CalculatorConfig, CurveSettings, MarketDataSettings, PricingSettings, ServerSettings,
    StorageSettings,
};
