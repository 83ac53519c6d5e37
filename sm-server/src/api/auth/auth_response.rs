use sm_core::Identity;

use serde::Serialize;

/// Identity DTO in the wire shape clients expect.
#[derive(Debug, Serialize)]
pub struct IdentityDto {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub email: String,
}

impl From<Identity> for IdentityDto {
    fn from(identity: Identity) -> Self {
        Self {
            id: identity.id.to_string(),
            username: identity.username,
            full_name: identity.full_name,
            email: identity.email,
        }
    }
}

/// Identity plus a freshly issued session token.
#[derive(Debug, Serialize)]
pub struct SessionData {
    #[serde(flatten)]
    pub identity: IdentityDto,
    pub token: String,
}

/// Response for register and login
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub data: SessionData,
}

impl AuthResponse {
    pub fn new(identity: Identity, token: String) -> Self {
        Self {
            success: true,
            data: SessionData {
                identity: identity.into(),
                token,
            },
        }
    }
}

/// Response for token verification
#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub success: bool,
    pub data: IdentityDto,
}

impl VerifyResponse {
    pub fn new(identity: Identity) -> Self {
        Self {
            success: true,
            data: identity.into(),
        }
    }
}
