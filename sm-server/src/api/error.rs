//! REST API error types
//!
//! These errors produce the canonical `{success:false, message}` JSON body
//! with the HTTP status codes of the auth contract.

use sm_auth::AuthError;
use sm_db::DbError;

use std::panic::Location;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;

/// The uniform message for any credential failure. Identical for unknown
/// email and wrong password so callers cannot enumerate accounts.
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub success: bool,
    pub message: String,
}

/// API errors with associated HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed input (400)
    #[error("Validation failed: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    /// Duplicate identity (400)
    #[error("Conflict: {message} {location}")]
    Conflict {
        message: String,
        location: ErrorLocation,
    },

    /// Bad credentials or invalid/expired token (401)
    #[error("Unauthorized: {message} {location}")]
    Unauthorized {
        message: String,
        location: ErrorLocation,
    },

    /// Internal server error (500)
    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Log the error with location for debugging
        match self {
            ApiError::Internal { .. } => log::error!("{}", self),
            _ => log::debug!("{}", self),
        }

        let (status, message) = match self {
            ApiError::Validation { message, .. } => (StatusCode::BAD_REQUEST, message),
            ApiError::Conflict { message, .. } => (StatusCode::BAD_REQUEST, message),
            ApiError::Unauthorized { message, .. } => (StatusCode::UNAUTHORIZED, message),
            // Never leak internal detail to clients
            ApiError::Internal { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Something went wrong!".to_string(),
            ),
        };

        (
            status,
            Json(ApiErrorResponse {
                success: false,
                message,
            }),
        )
            .into_response()
    }
}

/// Convert database errors to API errors
impl From<DbError> for ApiError {
    #[track_caller]
    fn from(e: DbError) -> Self {
        // Don't expose internal database details to clients
        log::error!("Database error: {}", e);
        ApiError::Internal {
            message: "Database operation failed".to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Convert auth-layer errors to API errors.
///
/// Header-shape failures keep their own messages; every token failure
/// collapses into a single 401, and only hashing and signing faults are
/// server-side errors.
impl From<AuthError> for ApiError {
    #[track_caller]
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::PasswordHash { .. } | AuthError::JwtEncode { .. } => {
                log::error!("Auth internal error: {}", e);
                ApiError::Internal {
                    message: e.to_string(),
                    location: ErrorLocation::from(Location::caller()),
                }
            }
            AuthError::MissingHeader { .. } => ApiError::Unauthorized {
                message: "Missing authorization header".to_string(),
                location: ErrorLocation::from(Location::caller()),
            },
            AuthError::InvalidScheme { .. } => ApiError::Unauthorized {
                message: "Invalid authorization scheme".to_string(),
                location: ErrorLocation::from(Location::caller()),
            },
            _ => ApiError::Unauthorized {
                message: "Invalid or expired token".to_string(),
                location: ErrorLocation::from(Location::caller()),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
