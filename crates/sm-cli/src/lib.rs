//! Client-side session core for the StudyMate auth service.
//!
//! - [`ApiClient`]: HTTP client that attaches the bearer token to outbound
//!   calls and maps 401 responses to a typed error.
//! - [`SessionManager`]: single source of truth for "is this client
//!   authenticated", with a persisted token store and a cancellation guard
//!   so a logout always beats an in-flight validation.

pub mod client;
pub mod session;

pub use client::client::ApiClient;
pub use client::error::{CliClientResult, ClientError};
pub use session::launch_url::take_token_param;
pub use session::session_manager::{PendingValidation, SessionManager, SessionState};
pub use session::token_store::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use session::{Result as SessionResult, SessionError};

#[cfg(test)]
mod tests;
