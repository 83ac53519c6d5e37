use crate::Identity;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A registered user account.
///
/// `password_hash` is an Argon2id PHC string. The clear-text password is
/// never stored and never appears on this type.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    /// Unique handle chosen at registration
    pub username: String,
    /// Display name
    pub full_name: String,
    /// Unique, used as the login identifier
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// The identity attributes safe to return to clients.
    pub fn identity(&self) -> Identity {
        Identity {
            id: self.id,
            username: self.username.clone(),
            full_name: self.full_name.clone(),
            email: self.email.clone(),
        }
    }
}
