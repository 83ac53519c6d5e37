pub mod api;
pub mod app_state;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;

pub use api::{
    auth::{
        auth::{login, register, verify},
        auth_response::{AuthResponse, IdentityDto, SessionData, VerifyResponse},
        login_request::LoginRequest,
        register_request::RegisterRequest,
    },
    error::ApiError,
    error::Result as ApiResult,
    extractors::bearer_token::BearerToken,
};

pub use crate::app_state::AppState;
pub use crate::routes::build_router;
