//! Derived activity status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Engagement classification computed on the client.
///
/// Never stored and never taken from the server: it is a pure function of
/// the sign-in counter, the last sign-in instant and the current time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityStatus {
    /// Signed in at least once, most recently within the window.
    Active,
    /// Everyone else.
    Inactive,
}

impl ActivityStatus {
    /// Classify a user.
    ///
    /// Active iff `sign_ins > 0` and the last sign-in is at most
    /// `window_days` whole days before `now`. A missing last sign-in is
    /// inactive.
    pub fn derive(
        sign_ins: u64,
        last_sign_in: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
        window_days: i64,
    ) -> Self {
        let Some(last) = last_sign_in else {
            return Self::Inactive;
        };
        let days_since = (now - last).num_days();
        if sign_ins > 0 && days_since <= window_days {
            Self::Active
        } else {
            Self::Inactive
        }
    }

    /// Check if the status is active.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Inactive => write!(f, "inactive"),
        }
    }
}
