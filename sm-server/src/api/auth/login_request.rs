use serde::Deserialize;

/// Absent fields deserialize as empty strings and fail the same
/// required-field check as explicit empties.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn has_missing_fields(&self) -> bool {
        self.email.is_empty() || self.password.is_empty()
    }
}
