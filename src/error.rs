//! Error types and handling for the `TripVaults` backend

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Main error type for the `TripVaults` backend
#[derive(Error, Debug)]
pub enum TripVaultsError {
    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Missing or unusable service configuration
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Failures reported by (or while reaching) the completion API
    #[error("Upstream error: {message}")]
    Upstream { message: String },
}

impl TripVaultsError {
    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new upstream error
    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    /// HTTP status the error maps to at the handler boundary
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            TripVaultsError::Validation { .. } => StatusCode::BAD_REQUEST,
            TripVaultsError::Config { .. } | TripVaultsError::Upstream { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for TripVaultsError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Upstream messages reach the caller unchanged; the frontend
        // displays whatever lands in `error`.
        let message = match self {
            TripVaultsError::Validation { message }
            | TripVaultsError::Config { message }
            | TripVaultsError::Upstream { message } => message,
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
