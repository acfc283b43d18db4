use nyay_core::entities::UserProfile;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request body for `POST /auth/login`.
///
/// Both fields are optional at the JSON level so that a missing field is
/// reported as a 400 with our own message instead of a deserializer error.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(required, length(min = 1))]
    #[serde(default)]
    pub email: Option<String>,
    #[validate(required, length(min = 1))]
    #[serde(default)]
    pub password: Option<String>,
}

/// The sanitized user returned on a successful login.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub created_at: String,
}

/// Response body for `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub user: UserResponse,
}

impl From<UserProfile> for UserResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id,
            email: profile.email,
            name: profile.name,
            created_at: profile.created_at.to_rfc3339(),
        }
    }
}
