use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The public identity of a user: everything a client may see.
///
/// Excludes the password hash by construction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    pub id: Uuid,
    pub username: String,
    pub full_name: String,
    pub email: String,
}
