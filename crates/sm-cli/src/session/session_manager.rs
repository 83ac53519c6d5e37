//! Client session lifecycle.
//!
//! Tracks whether the user is signed in, owns the persisted token, and
//! arbitrates between startup validation and user actions. Validation is
//! split into `begin_validation` / `finish_validation` stamped with an
//! epoch counter: any state change (login, logout, expiry) bumps the
//! epoch, so a validation result that raced with a logout is discarded
//! instead of resurrecting the session.

use crate::client::client::ApiClient;
use crate::session::Result as SessionResult;
use crate::session::token_store::TokenStore;

use log::{debug, info};

/// Where the session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Store not yet consulted.
    Initializing,
    /// A stored token exists and is being checked with the server.
    Validating,
    /// No usable token.
    Anonymous,
    /// Token accepted by the server.
    Authenticated,
}

/// An in-flight validation handle. Pass it back to `finish_validation`
/// with the server's verdict.
#[derive(Debug, Clone)]
pub struct PendingValidation {
    epoch: u64,
    token: String,
}

impl PendingValidation {
    pub fn token(&self) -> &str {
        &self.token
    }
}

pub struct SessionManager {
    state: SessionState,
    token: Option<String>,
    epoch: u64,
    store: Box<dyn TokenStore>,
}

impl SessionManager {
    /// Session restored from the store. Ends up in `Validating` when a
    /// token was found, `Anonymous` otherwise.
    pub fn new(store: Box<dyn TokenStore>) -> SessionResult<Self> {
        let mut manager = Self {
            state: SessionState::Initializing,
            token: None,
            epoch: 0,
            store,
        };

        match manager.store.load()? {
            Some(token) => {
                debug!("Stored session token found, validation required");
                manager.token = Some(token);
                manager.state = SessionState::Validating;
            }
            None => {
                debug!("No stored session token");
                manager.state = SessionState::Anonymous;
            }
        }

        Ok(manager)
    }

    /// Like `new`, but a `token` query parameter in the launch URL takes
    /// precedence over the stored token. The parameter is stripped from
    /// the URL either way.
    pub fn with_launch_url(
        store: Box<dyn TokenStore>,
        url: &mut reqwest::Url,
    ) -> SessionResult<Self> {
        let launch_token = crate::session::launch_url::take_token_param(url);
        let mut manager = Self::new(store)?;

        if let Some(token) = launch_token {
            info!("Adopting session token from launch URL");
            manager.store.save(&token)?;
            manager.token = Some(token);
            manager.state = SessionState::Validating;
            manager.epoch += 1;
        }

        Ok(manager)
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Current token, if any. Present in `Validating` and `Authenticated`.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state == SessionState::Authenticated
    }

    /// Starts a validation round for the current token. Returns `None`
    /// when there is nothing to validate.
    pub fn begin_validation(&mut self) -> Option<PendingValidation> {
        let token = self.token.clone()?;
        self.state = SessionState::Validating;
        Some(PendingValidation {
            epoch: self.epoch,
            token,
        })
    }

    /// Applies the outcome of a validation round. The outcome is dropped
    /// when the session changed underneath it (logout, new login, token
    /// handoff), so a stale success cannot re-authenticate.
    pub fn finish_validation(
        &mut self,
        pending: PendingValidation,
        valid: bool,
    ) -> SessionResult<()> {
        if pending.epoch != self.epoch || self.token.as_deref() != Some(pending.token.as_str()) {
            debug!("Discarding stale validation result");
            return Ok(());
        }

        if valid {
            info!("Session token validated");
            self.state = SessionState::Authenticated;
        } else {
            info!("Session token rejected, clearing session");
            self.clear_session()?;
        }

        Ok(())
    }

    /// Full validation round against the server. Any failure, network or
    /// authorization alike, clears the session and lands in `Anonymous`.
    pub async fn validate(&mut self, client: &ApiClient) -> SessionResult<SessionState> {
        let Some(pending) = self.begin_validation() else {
            return Ok(self.state);
        };

        let valid = client.verify_token(pending.token()).await.is_ok();
        self.finish_validation(pending, valid)?;
        Ok(self.state)
    }

    /// Adopts a freshly issued token and moves to `Authenticated`.
    pub fn login(&mut self, token: &str) -> SessionResult<()> {
        self.store.save(token)?;
        self.token = Some(token.to_string());
        self.state = SessionState::Authenticated;
        self.epoch += 1;
        info!("Session established");
        Ok(())
    }

    /// Clears the session unconditionally. Takes effect immediately:
    /// validation rounds still in flight are invalidated by the epoch
    /// bump and cannot undo the logout.
    pub fn logout(&mut self) -> SessionResult<()> {
        info!("Logging out");
        self.clear_session()
    }

    /// Handles a 401 on an authenticated request: the server no longer
    /// accepts the token, so drop it.
    pub fn expire(&mut self) -> SessionResult<()> {
        info!("Session expired, clearing stored token");
        self.clear_session()
    }

    fn clear_session(&mut self) -> SessionResult<()> {
        self.store.clear()?;
        self.token = None;
        self.state = SessionState::Anonymous;
        self.epoch += 1;
        Ok(())
    }
}
