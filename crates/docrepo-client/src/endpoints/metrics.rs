//! User metrics, analytics and export endpoints.

use reqwest::Response;

use docrepo_core::result::AppResult;
use docrepo_core::types::{ActivityFilter, ExportFormat};
use docrepo_entity::metrics::{BiweeklyMetricsResponse, UsersMetricsResponse};

use crate::client::ApiClient;

/// Parameters of the cursor-paginated user listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsersMetricsQuery {
    /// Cursor of the page to fetch; `None` for the first page.
    pub cursor: Option<String>,
    /// Page size.
    pub limit: Option<u32>,
    /// Committed search text.
    pub search: Option<String>,
    /// Activity filter.
    pub activity: ActivityFilter,
}

impl UsersMetricsQuery {
    /// Query-string pairs. Empty values and the `all` filter are omitted.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(4);
        if let Some(cursor) = self.cursor.as_deref().filter(|c| !c.is_empty()) {
            pairs.push(("cursor", cursor.to_string()));
        }
        if let Some(limit) = self.limit.filter(|l| *l > 0) {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("q", search.to_string()));
        }
        if let Some(activity) = self.activity.as_query() {
            pairs.push(("activity", activity.to_string()));
        }
        pairs
    }
}

impl ApiClient {
    /// `GET /user/admin/users-metrics`.
    pub async fn users_metrics(&self, query: &UsersMetricsQuery) -> AppResult<UsersMetricsResponse> {
        self.get_with_query("/user/admin/users-metrics", &query.to_pairs())
            .await
    }

    /// `GET /user/getBiweeklyMetrics`.
    pub async fn biweekly_metrics(&self) -> AppResult<BiweeklyMetricsResponse> {
        self.get("/user/getBiweeklyMetrics").await
    }

    /// `GET /user/admin/users-export`, returned unread for streaming.
    pub async fn users_export(&self, activity: ActivityFilter, format: ExportFormat) -> AppResult<Response> {
        self.get_stream(
            "/user/admin/users-export",
            &[("activity", activity.as_str()), ("format", format.as_str())],
            "Export failed",
        )
        .await
    }
}
