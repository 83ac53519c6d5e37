pub mod launch_url;
pub mod session_manager;
pub mod token_store;

use std::path::PathBuf;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Token store error at {path}: {source} {location}")]
    Store {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Config error: {0}")]
    Config(#[from] sm_config::ConfigError),
}

pub type Result<T> = std::result::Result<T, SessionError>;
