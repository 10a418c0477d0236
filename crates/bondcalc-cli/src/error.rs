//! CLI error types.

use bondcalc_config::ConfigError;
use bondcalc_core::BondError;
use bondcalc_portfolio::PortfolioError;
use bondcalc_traits::TraitError;
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Face value out of range.
    #[error("Invalid face value: {0}. Must be positive.")]
    InvalidFace(f64),

    /// Coupon rate out of range.
    #[error("Invalid coupon rate: {0}. Must be between 0 and 100.")]
    InvalidCoupon(f64),

    /// Yield out of range.
    #[error("Invalid yield: {0}. Must be between 0 and 100.")]
    InvalidYield(f64),

    /// Maturity out of range.
    #[error("Invalid maturity: {0}. Years to maturity must be positive and at most 100.")]
    InvalidMaturity(f64),

    /// Price out of range.
    #[error("Invalid price: {0}. Must be positive.")]
    InvalidPrice(f64),

    /// Missing required argument.
    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    /// Destructive command run without confirmation.
    #[error("Refusing to {0} without --yes")]
    NotConfirmed(String),

    /// Pricing error.
    #[error(transparent)]
    Bond(#[from] BondError),

    /// Portfolio error.
    #[error(transparent)]
    Portfolio(#[from] PortfolioError),

    /// Market data or storage error.
    #[error(transparent)]
    Collaborator(#[from] TraitError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
