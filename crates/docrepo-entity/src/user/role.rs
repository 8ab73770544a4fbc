//! User role.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role assigned by the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Portal administrator.
    Admin,
    /// Regular portal user.
    #[default]
    User,
    /// Any role this client does not know about.
    #[serde(other)]
    Other,
}

impl UserRole {
    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::User => write!(f, "user"),
            Self::Other => write!(f, "other"),
        }
    }
}
