use serde::Deserialize;

/// Absent fields deserialize as empty strings so they fail the same
/// required-field check as explicit empties, instead of a deserializer
/// rejection that bypasses the error contract.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    /// Unique handle (required)
    pub username: String,

    /// Display name (required)
    #[serde(rename = "fullName")]
    pub full_name: String,

    /// Unique login identifier (required)
    pub email: String,

    /// Clear-text password; hashed before storage, never persisted
    pub password: String,
}

impl RegisterRequest {
    pub fn has_missing_fields(&self) -> bool {
        self.username.is_empty()
            || self.full_name.is_empty()
            || self.email.is_empty()
            || self.password.is_empty()
    }
}
