use crate::{ConfigError, ConfigErrorResult, DEFAULT_TOKEN_TTL_DAYS, MIN_JWT_SECRET_BYTES};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 signing secret. Required; usually supplied via SM_AUTH_JWT_SECRET.
    pub jwt_secret: Option<String>,
    /// Session token lifetime from issuance
    pub token_ttl_days: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            token_ttl_days: DEFAULT_TOKEN_TTL_DAYS,
        }
    }
}

impl AuthConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        match self.jwt_secret {
            None => Err(ConfigError::auth(
                "auth.jwt_secret must be set (config.toml or SM_AUTH_JWT_SECRET)",
            )),
            Some(ref secret) if secret.len() < MIN_JWT_SECRET_BYTES => Err(ConfigError::auth(
                format!(
                    "auth.jwt_secret must be at least {} bytes, got {}",
                    MIN_JWT_SECRET_BYTES,
                    secret.len()
                ),
            )),
            Some(_) => Ok(()),
        }?;

        if self.token_ttl_days == 0 {
            return Err(ConfigError::auth("auth.token_ttl_days must be >= 1"));
        }

        Ok(())
    }
}
