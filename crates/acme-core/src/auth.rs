//! Authentication request and response payloads.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::base::BaseEntity;

/// Token type reported when the issuer does not name one.
pub const DEFAULT_TOKEN_TYPE: &str = "Bearer";

fn default_token_type() -> String {
    DEFAULT_TOKEN_TYPE.to_string()
}

/// Account creation request.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SignupRequest {
    #[schemars(email)]
    pub email: String,
    /// At least 8 characters.
    #[schemars(length(min = 8))]
    pub password: String,
    #[schemars(length(min = 1, max = 200))]
    pub name: String,
}

/// Credential login. The password is only checked for presence.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LoginRequest {
    #[schemars(email)]
    pub email: String,
    #[schemars(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    pub refresh_token: Uuid,
}

/// Tokens issued after a successful login, signup, or refresh.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// Opaque to clients.
    pub access_token: String,
    pub refresh_token: Uuid,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Lifetime of the access token in milliseconds.
    #[schemars(range(min = 1))]
    pub expires_in: u64,
}

impl AuthResponse {
    #[must_use]
    pub fn bearer(access_token: impl Into<String>, refresh_token: Uuid, expires_in: u64) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token,
            token_type: default_token_type(),
            expires_in,
        }
    }
}

/// Public view of a user account.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct UserResponse {
    #[serde(flatten)]
    pub base: BaseEntity,
    #[schemars(email)]
    pub email: String,
    pub name: String,
    pub enabled: bool,
}
