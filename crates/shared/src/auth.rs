//! Authentication payloads for the panel backend.
//!
//! The login body doubles as the password-verification probe: destructive
//! operations replay the session username with a freshly-typed password
//! against the same endpoint before mutating anything.

use serde::{Deserialize, Serialize};

use crate::types::UserId;

/// Login request payload (`POST /auth/login-json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Account username.
    pub username: String,
    /// Account password.
    pub password: String,
}

impl LoginRequest {
    /// Creates a login request.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Login response payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for subsequent requests.
    pub access_token: String,
    /// Token type, `bearer` in practice.
    pub token_type: String,
    /// The authenticated user.
    pub user: SessionUser,
}

/// The signed-in user as reported by the backend.
///
/// `role` stays a raw string at the wire; the core crate parses it and
/// treats anything unrecognized as most-restrictive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    /// User ID.
    pub id: UserId,
    /// Account username.
    pub username: String,
    /// Display name.
    pub full_name: String,
    /// Role name as the backend spells it.
    pub role: String,
    /// The user's manager, if any.
    #[serde(default)]
    pub manager_id: Option<UserId>,
}
