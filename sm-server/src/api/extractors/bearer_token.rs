//! Axum extractor for the bearer session token

use crate::{ApiError, AppState};

use sm_auth::AuthError;

use std::future::Future;
use std::panic::Location;

use axum::{extract::FromRequestParts, http::request::Parts};
use error_location::ErrorLocation;

/// Extracts the raw bearer token from the `Authorization` header.
///
/// Rejects with 401 when the header is missing or does not use the
/// `Bearer` scheme. Signature and expiry are checked by the handler.
pub struct BearerToken(pub String);

impl FromRequestParts<AppState> for BearerToken {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let auth_header = parts
                .headers
                .get("authorization")
                .and_then(|h| h.to_str().ok())
                .ok_or_else(|| {
                    log::warn!("Missing Authorization header");
                    AuthError::MissingHeader {
                        location: ErrorLocation::from(Location::caller()),
                    }
                })?;

            let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
                log::warn!("Invalid authorization scheme: expected 'Bearer'");
                AuthError::InvalidScheme {
                    location: ErrorLocation::from(Location::caller()),
                }
            })?;

            Ok(BearerToken(token.to_string()))
        }
    }
}
