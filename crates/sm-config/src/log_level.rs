use crate::DEFAULT_LOG_LEVEL_STRING;

use log::LevelFilter;
use serde::{Deserialize, Deserializer};

/// Logging verbosity from config or the SM_LOG_LEVEL override.
///
/// Parsing is lenient: an unrecognized value falls back to `info`, so a
/// typo in config.toml cannot keep the server from starting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogLevel(LevelFilter);

impl LogLevel {
    pub fn parse(s: &str) -> Self {
        let filter = match s.to_ascii_lowercase().as_str() {
            "off" => LevelFilter::Off,
            "error" => LevelFilter::Error,
            "warn" => LevelFilter::Warn,
            "info" => LevelFilter::Info,
            "debug" => LevelFilter::Debug,
            "trace" => LevelFilter::Trace,
            _ => LevelFilter::Info,
        };

        Self(filter)
    }

    pub fn filter(self) -> LevelFilter {
        self.0
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        Self::parse(DEFAULT_LOG_LEVEL_STRING)
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(LogLevel::parse(&s))
    }
}
