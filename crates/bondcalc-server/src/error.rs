//! API error responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use bondcalc_core::BondError;
use bondcalc_portfolio::PortfolioError;
use bondcalc_traits::TraitError;

/// Error returned by a handler, rendered as `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

/// Error response body.
#[derive(Serialize)]
pub struct ErrorResponse {
    error: String,
}

impl ApiError {
    /// 400 Bad Request.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// 404 Not Found.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// 409 Conflict.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    /// 500 Internal Server Error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// HTTP status.
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, error = %self.message, "request failed");
        }
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

impl From<BondError> for ApiError {
    fn from(err: BondError) -> Self {
        match err {
            BondError::InvalidInput { .. } => Self::bad_request(err.to_string()),
            BondError::IncompleteState { .. } => Self::conflict(err.to_string()),
            BondError::Storage { .. } => Self::internal(err.to_string()),
        }
    }
}

impl From<PortfolioError> for ApiError {
    fn from(err: PortfolioError) -> Self {
        match err {
            PortfolioError::Bond(e) => e.into(),
        }
    }
}

impl From<TraitError> for ApiError {
    fn from(err: TraitError) -> Self {
        match err {
            TraitError::NotFound(_) => Self::not_found(err.to_string()),
            TraitError::InvalidInput(_) => Self::bad_request(err.to_string()),
            _ => Self::internal(err.to_string()),
        }
    }
}

/// Handler result type.
pub type ApiResult<T> = Result<T, ApiError>;
