//! Error types for portfolio operations.

use bondcalc_core::BondError;
use bondcalc_traits::TraitError;
use thiserror::Error;

/// Result type for portfolio operations.
pub type PortfolioResult<T> = Result<T, PortfolioError>;

/// Errors that can occur during portfolio operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PortfolioError {
    /// Pricing or state error from the core.
    #[error(transparent)]
    Bond(#[from] BondError),
}

impl PortfolioError {
    /// Create an incomplete state error.
    #[must_use]
    pub fn incomplete_state(reason: impl Into<String>) -> Self {
        Self::Bond(BondError::incomplete_state(reason))
    }

    /// Returns true for [`BondError::IncompleteState`].
    #[must_use]
    pub fn is_incomplete_state(&self) -> bool {
        matches!(self, Self::Bond(BondError::IncompleteState { .. }))
    }
}

impl From<TraitError> for PortfolioError {
    fn from(e: TraitError) -> Self {
        Self::Bond(BondError::storage(e.to_string()))
    }
}
