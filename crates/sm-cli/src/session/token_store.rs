//! Persisted storage for the session token.
//!
//! The client analog of the browser's local storage: one well-known slot
//! holding at most one token string.

use crate::session::{Result as SessionResult, SessionError};

use std::panic::Location;
use std::path::PathBuf;

use error_location::ErrorLocation;

const TOKEN_FILENAME: &str = "session.token";

/// Persisted token slot. At most one token exists at a time; `save`
/// replaces wholesale.
pub trait TokenStore {
    fn load(&self) -> SessionResult<Option<String>>;
    fn save(&self, token: &str) -> SessionResult<()>;
    fn clear(&self) -> SessionResult<()>;
}

/// Token store backed by a file in the config directory.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Store at the default location, `<config_dir>/session.token`.
    pub fn new() -> SessionResult<Self> {
        let config_dir = sm_config::Config::config_dir()?;
        Ok(Self {
            path: config_dir.join(TOKEN_FILENAME),
        })
    }

    /// Store at an explicit path (for tests).
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    #[track_caller]
    fn store_error(&self, source: std::io::Error) -> SessionError {
        SessionError::Store {
            path: self.path.clone(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> SessionResult<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => {
                let token = content.trim().to_string();
                Ok((!token.is_empty()).then_some(token))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.store_error(e)),
        }
    }

    fn save(&self, token: &str) -> SessionResult<()> {
        if let Some(dir) = self.path.parent()
            && !dir.exists()
        {
            std::fs::create_dir_all(dir).map_err(|e| self.store_error(e))?;
        }

        std::fs::write(&self.path, token).map_err(|e| self.store_error(e))
    }

    fn clear(&self) -> SessionResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.store_error(e)),
        }
    }
}

/// In-memory token store for tests.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: std::sync::Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            token: std::sync::Mutex::new(Some(token.to_string())),
        }
    }
}

impl MemoryTokenStore {
    fn slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.token.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> SessionResult<Option<String>> {
        Ok(self.slot().clone())
    }

    fn save(&self, token: &str) -> SessionResult<()> {
        *self.slot() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> SessionResult<()> {
        *self.slot() = None;
        Ok(())
    }
}
