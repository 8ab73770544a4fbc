//! Sign-in and generic response payloads.

use serde::{Deserialize, Serialize};

use crate::user::UserRecord;

/// Body of `POST /user/signin`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInRequest {
    /// Account e-mail.
    pub email: String,
    /// Plain-text password (sent over TLS only).
    pub password: String,
}

/// Successful sign-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Server message.
    #[serde(default)]
    pub message: String,
    /// Bearer token for subsequent requests.
    pub token: String,
    /// Profile of the signed-in user.
    pub user: UserRecord,
}

/// Response carrying only a message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Server message.
    #[serde(default)]
    pub message: String,
}

/// Response carrying a message and a user profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// Server message.
    #[serde(default)]
    pub message: String,
    /// The user.
    pub user: UserRecord,
}
