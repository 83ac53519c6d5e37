//! Auth REST API handlers
//!
//! Register and login mint a session token; verify recomputes token
//! validity from the signature and expiry alone (no token is ever stored
//! server-side).

use crate::api::error::INVALID_CREDENTIALS;
use crate::{
    ApiError, ApiResult, AppState, AuthResponse, BearerToken, LoginRequest, RegisterRequest,
    VerifyResponse,
};

use sm_auth::TokenService;
use sm_core::User;
use sm_db::UserRepository;

use std::panic::Location;

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use uuid::Uuid;

const DUPLICATE_IDENTITY: &str = "User already exists with this email or username";

// =============================================================================
// Handlers
// =============================================================================

/// POST /api/auth/register
///
/// Create a user record and issue a session token for it.
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> ApiResult<Response> {
    if request.has_missing_fields() {
        return Err(ApiError::Validation {
            message: "Please fill all required fields".to_string(),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    let repo = UserRepository::new(state.pool.clone());

    // Fast path for duplicates; the UNIQUE constraints below remain the
    // authority when two registrations race.
    if repo
        .identity_taken(&request.email, &request.username)
        .await?
    {
        return Err(conflict());
    }

    let user = User {
        id: Uuid::new_v4(),
        username: request.username,
        full_name: request.full_name,
        email: request.email,
        password_hash: state.passwords.hash(&request.password)?,
        created_at: chrono::Utc::now(),
    };

    if let Err(e) = repo.create(&user).await {
        if e.is_unique_violation() {
            return Err(conflict());
        }
        return Err(e.into());
    }

    log::info!("Registered user {} ({})", user.username, user.id);

    let token = state.tokens.issue(user.id)?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse::new(user.identity(), token)),
    )
        .into_response())
}

/// POST /api/auth/login
///
/// Verify credentials and issue a session token. Unknown email and wrong
/// password produce byte-identical 401 responses.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Response> {
    if request.has_missing_fields() {
        return Err(ApiError::Validation {
            message: "Please provide email and password".to_string(),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    log::debug!("Login attempt for {}", request.email);

    let repo = UserRepository::new(state.pool.clone());
    let user = repo
        .find_by_email(&request.email)
        .await?
        .ok_or_else(invalid_credentials)?;

    if !state.passwords.verify(&request.password, &user.password_hash)? {
        return Err(invalid_credentials());
    }

    let token = state.tokens.issue(user.id)?;

    log::info!("User {} logged in", user.id);

    // The token travels in the body; the response header mirrors it for
    // clients that read credentials from headers.
    Ok((
        StatusCode::OK,
        [(header::AUTHORIZATION, format!("Bearer {}", token))],
        Json(AuthResponse::new(user.identity(), token)),
    )
        .into_response())
}

/// GET /api/auth/verify
///
/// Recompute validity of the presented bearer token and return the bound
/// identity. Any forgery, corruption, or expiry yields 401.
pub async fn verify(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> ApiResult<Json<VerifyResponse>> {
    let claims = state.tokens.verify(&token)?;
    let user_id = TokenService::subject_id(&claims)?;

    let repo = UserRepository::new(state.pool.clone());
    let user = repo.find_by_id(user_id).await?.ok_or_else(|| {
        // Token is well-signed but its subject no longer exists
        ApiError::Unauthorized {
            message: "Invalid or expired token".to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    })?;

    Ok(Json(VerifyResponse::new(user.identity())))
}

// =============================================================================
// Helpers
// =============================================================================

#[track_caller]
fn conflict() -> ApiError {
    ApiError::Conflict {
        message: DUPLICATE_IDENTITY.to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
}

#[track_caller]
fn invalid_credentials() -> ApiError {
    ApiError::Unauthorized {
        message: INVALID_CREDENTIALS.to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
}
