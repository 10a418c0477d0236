//! Error types for the Bondcalc library.
//!
//! Pricing and aggregation report failures synchronously through
//! [`BondError`]; nothing in the core retries.

use thiserror::Error;

/// A specialized Result type for Bondcalc operations.
pub type BondResult<T> = Result<T, BondError>;

/// The main error type for Bondcalc operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BondError {
    /// Out-of-range or non-finite numeric parameter.
    #[error("Invalid input: {field} - {reason}")]
    InvalidInput {
        /// Name of the offending parameter.
        field: String,
        /// Reason for invalidity.
        reason: String,
    },

    /// Operation requires state that does not exist yet.
    #[error("Incomplete state: {reason}")]
    IncompleteState {
        /// What is missing.
        reason: String,
    },

    /// Persistence read/write failure.
    #[error("Storage error: {reason}")]
    Storage {
        /// Description of the failure.
        reason: String,
    },
}

impl BondError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an incomplete state error.
    #[must_use]
    pub fn incomplete_state(reason: impl Into<String>) -> Self {
        Self::IncompleteState {
            reason: reason.into(),
        }
    }

    /// Creates a storage error.
    #[must_use]
    pub fn storage(reason: impl Into<String>) -> Self {
        Self::Storage {
            reason: reason.into(),
        }
    }

    /// Returns true for [`BondError::InvalidInput`].
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}

/// Fails with [`BondError::InvalidInput`] unless `value` is finite.
pub(crate) fn ensure_finite(field: &str, value: f64) -> BondResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(BondError::invalid_input(field, format!("{value} is not finite")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BondError::invalid_input("face_value", "must be positive");
        assert!(err.to_string().contains("face_value"));
        assert!(err.to_string().contains("must be positive"));

        let err = BondError::incomplete_state("no priced bond");
        assert!(err.to_string().contains("Incomplete state"));
    }

    #[test]
    fn test_ensure_finite() {
        assert_eq!(ensure_finite("x", 1.5), Ok(1.5));
        assert!(ensure_finite("x", f64::NAN).unwrap_err().is_invalid_input());
        assert!(ensure_finite("x", f64::INFINITY).is_err());
    }
}
