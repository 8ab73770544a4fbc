//! Usage metrics payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::datetime;
use crate::user::UserRecord;

/// Raw body of `GET /user/admin/users-metrics`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsersMetricsResponse {
    /// Users on this page.
    #[serde(default)]
    pub users: Vec<UserRecord>,
    /// Cursor information.
    #[serde(default)]
    pub page_info: PageInfo,
    /// Totals across the whole (filtered) listing.
    #[serde(default)]
    pub overall_metrics: Option<OverallMetrics>,
}

/// Cursor position returned with a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Opaque cursor of the next page.
    #[serde(default)]
    pub next_cursor: Option<String>,
    /// Whether another page follows.
    #[serde(default)]
    pub has_next_page: bool,
}

/// Headline user counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallMetrics {
    /// All users.
    #[serde(default)]
    pub total_users: u64,
    /// Active users.
    #[serde(default)]
    pub active_users: u64,
    /// Inactive users.
    #[serde(default)]
    pub inactive_users: u64,
}

/// Aggregated usage for one week.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyMetrics {
    /// Seconds spent in the portal.
    #[serde(default)]
    pub time_spent: u64,
    /// Documents opened.
    #[serde(default)]
    pub documents_viewed: u64,
    /// Sign-ins.
    #[serde(default)]
    pub sign_ins: u64,
    /// First day of the week.
    #[serde(default, deserialize_with = "datetime::lenient")]
    pub start_date: Option<DateTime<Utc>>,
    /// Last day of the week.
    #[serde(default, deserialize_with = "datetime::lenient")]
    pub end_date: Option<DateTime<Utc>>,
}

/// Body of `GET /user/getBiweeklyMetrics`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BiweeklyMetricsResponse {
    /// Server message.
    #[serde(default)]
    pub message: String,
    /// The running week.
    #[serde(default)]
    pub current_week: WeeklyMetrics,
    /// The week before.
    #[serde(default)]
    pub previous_week: WeeklyMetrics,
}
