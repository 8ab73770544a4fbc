//! User record as returned by the metrics and profile endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::role::UserRole;
use super::status::ActivityStatus;
use crate::datetime;

/// A portal user together with their raw usage counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Backend identifier.
    #[serde(default, alias = "_id")]
    pub id: String,
    /// E-mail address; unique per user.
    pub email: String,
    /// Display name.
    #[serde(default)]
    pub fullname: String,
    /// Assigned role.
    #[serde(default)]
    pub role: UserRole,
    /// When the account was created.
    #[serde(default, deserialize_with = "datetime::lenient")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last successful sign-in, `None` when the user never signed in.
    #[serde(default, deserialize_with = "datetime::lenient")]
    pub last_sign_in: Option<DateTime<Utc>>,
    /// Number of sign-ins.
    #[serde(default)]
    pub number_of_sign_ins: u64,
    /// Number of documents opened.
    #[serde(default)]
    pub documents_viewed: u64,
    /// Time spent in the portal, in seconds.
    #[serde(default)]
    pub time_spent: u64,
    /// Keys of recently opened documents.
    #[serde(default)]
    pub recent_docs: Vec<String>,
}

impl UserRecord {
    /// Activity status at `now`.
    pub fn status_at(&self, now: DateTime<Utc>, window_days: i64) -> ActivityStatus {
        ActivityStatus::derive(self.number_of_sign_ins, self.last_sign_in, now, window_days)
    }

    /// Check if this user has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
