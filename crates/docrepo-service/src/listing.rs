//! Cursor-paginated user listing with debounced search and selection.

use std::collections::BTreeSet;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use docrepo_client::{ApiClient, UsersMetricsQuery};
use docrepo_core::config::users::ListingConfig;
use docrepo_core::error::AppError;
use docrepo_core::result::AppResult;
use docrepo_core::types::ActivityFilter;
use docrepo_entity::metrics::UsersMetricsResponse;
use docrepo_entity::user::{ActivityStatus, UserRecord};

use crate::debounce::Debouncer;

/// A user row with its client-side activity status.
#[derive(Debug, Clone, Serialize)]
pub struct ListedUser {
    /// The record as returned by the backend.
    #[serde(flatten)]
    pub user: UserRecord,
    /// Status derived from the sign-in counter and last sign-in.
    pub status: ActivityStatus,
}

/// Aggregate counters shown above the listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UserTotals {
    /// Total matching users.
    pub total_users: u64,
    /// Users the backend counts as active.
    pub active_users: u64,
    /// Users the backend counts as inactive.
    pub inactive_users: u64,
}

/// One fetched page of users.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserPage {
    /// Rows in backend order.
    pub records: Vec<ListedUser>,
    /// Cursor of the following page.
    pub next_cursor: Option<String>,
    /// Whether a following page exists.
    pub has_next_page: bool,
    /// Aggregate counters.
    pub totals: UserTotals,
}

impl UserPage {
    /// Build a page from a metrics response, deriving each row's status
    /// at `now`.
    pub fn from_response(response: UsersMetricsResponse, now: DateTime<Utc>, window_days: i64) -> Self {
        let overall = response.overall_metrics.unwrap_or_default();
        let records: Vec<ListedUser> = response
            .users
            .into_iter()
            .map(|user| {
                let status = user.status_at(now, window_days);
                ListedUser { user, status }
            })
            .collect();

        let total_users = if overall.total_users > 0 {
            overall.total_users
        } else {
            records.len() as u64
        };

        Self {
            records,
            next_cursor: response.page_info.next_cursor.filter(|c| !c.is_empty()),
            has_next_page: response.page_info.has_next_page,
            totals: UserTotals {
                total_users,
                active_users: overall.active_users,
                inactive_users: overall.inactive_users,
            },
        }
    }

    /// E-mails of the rows on this page.
    pub fn emails(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.user.email.as_str())
    }
}

/// Fetch a single page. Statuses are derived locally at the current time.
pub async fn fetch_page(
    client: &ApiClient,
    query: &UsersMetricsQuery,
    window_days: i64,
) -> AppResult<UserPage> {
    let response = client.users_metrics(query).await?;
    Ok(UserPage::from_response(response, Utc::now(), window_days))
}

/// State of the admin user listing.
///
/// Paging is forward-only: the controller keeps the cursor of the page it
/// shows and the cursor of the next one, nothing older. Any change to the
/// committed search or the activity filter drops the current page before
/// the first page of the new query is requested.
#[derive(Debug)]
pub struct UserListController {
    client: ApiClient,
    page_size: u32,
    window_days: i64,
    debouncer: Debouncer<String>,
    query: String,
    activity: ActivityFilter,
    cursor: Option<String>,
    page: UserPage,
    selection: BTreeSet<String>,
}

impl UserListController {
    /// Create a controller. Nothing is fetched until [`refresh`](Self::refresh)
    /// or a query change.
    pub fn new(client: ApiClient, config: &ListingConfig) -> Self {
        Self {
            client,
            page_size: config.page_size,
            window_days: config.active_window_days,
            debouncer: Debouncer::new(Duration::from_millis(config.search_debounce_ms)),
            query: String::new(),
            activity: ActivityFilter::All,
            cursor: None,
            page: UserPage::default(),
            selection: BTreeSet::new(),
        }
    }

    /// Rows of the current page.
    pub fn records(&self) -> &[ListedUser] {
        &self.page.records
    }

    /// The current page.
    pub fn page(&self) -> &UserPage {
        &self.page
    }

    /// Aggregate counters of the current page.
    pub fn totals(&self) -> UserTotals {
        self.page.totals
    }

    /// Cursor the current page was fetched with.
    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    /// Cursor of the next page.
    pub fn next_cursor(&self) -> Option<&str> {
        self.page.next_cursor.as_deref()
    }

    /// Whether [`go_next`](Self::go_next) may be called.
    pub fn has_next_page(&self) -> bool {
        self.page.has_next_page
    }

    /// Committed search text.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Active filter.
    pub fn activity(&self) -> ActivityFilter {
        self.activity
    }

    /// Record a keystroke. Nothing is committed until the debounce window
    /// passes; see [`settle_search`](Self::settle_search).
    pub fn type_search(&mut self, text: impl Into<String>) {
        self.debouncer.push(text.into());
    }

    /// Wait out the debounce window and commit the last typed text.
    ///
    /// Returns `true` when the committed query changed and the first page
    /// was refetched.
    pub async fn settle_search(&mut self) -> AppResult<bool> {
        match self.debouncer.settled().await {
            Some(text) => self.commit_search(&text).await,
            None => Ok(false),
        }
    }

    /// Commit a search immediately, bypassing the debouncer.
    pub async fn commit_search(&mut self, text: &str) -> AppResult<bool> {
        self.debouncer.cancel();
        let text = text.trim();
        if text == self.query {
            return Ok(false);
        }
        self.query = text.to_string();
        self.reset_and_fetch().await?;
        Ok(true)
    }

    /// Change the activity filter, refetching when it changed.
    pub async fn set_activity(&mut self, activity: ActivityFilter) -> AppResult<bool> {
        if activity == self.activity {
            return Ok(false);
        }
        self.activity = activity;
        self.reset_and_fetch().await?;
        Ok(true)
    }

    /// Replace the search and the filter together with a single fetch.
    pub async fn apply_filters(&mut self, text: &str, activity: ActivityFilter) -> AppResult<()> {
        self.debouncer.cancel();
        self.query = text.trim().to_string();
        self.activity = activity;
        self.reset_and_fetch().await
    }

    /// Refetch the first page of the current query.
    pub async fn refresh(&mut self) -> AppResult<()> {
        self.reset_and_fetch().await
    }

    /// Advance to the next page.
    pub async fn go_next(&mut self) -> AppResult<()> {
        let next = match (&self.page.next_cursor, self.page.has_next_page) {
            (Some(cursor), true) => cursor.clone(),
            _ => return Err(AppError::validation("No next page")),
        };
        self.load(Some(next)).await
    }

    async fn reset_and_fetch(&mut self) -> AppResult<()> {
        self.cursor = None;
        self.page = UserPage::default();
        self.load(None).await
    }

    async fn load(&mut self, cursor: Option<String>) -> AppResult<()> {
        let query = UsersMetricsQuery {
            cursor: cursor.clone(),
            limit: Some(self.page_size),
            search: Some(self.query.clone()),
            activity: self.activity,
        };
        debug!(?cursor, query = %self.query, activity = %self.activity, "Fetching user page");
        let page = fetch_page(&self.client, &query, self.window_days).await?;
        info!(
            rows = page.records.len(),
            has_next = page.has_next_page,
            "Loaded user page"
        );
        self.cursor = cursor;
        self.page = page;
        Ok(())
    }

    /// Toggle one e-mail. Returns whether it is selected afterwards.
    pub fn toggle_select(&mut self, email: &str) -> bool {
        if self.selection.remove(email) {
            false
        } else {
            self.selection.insert(email.to_string());
            true
        }
    }

    /// Select every row of the current page.
    pub fn select_page(&mut self) {
        let emails: Vec<String> = self.page.emails().map(str::to_string).collect();
        self.selection.extend(emails);
    }

    /// Empty the selection. Filter changes never do this implicitly.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Whether an e-mail is selected.
    pub fn is_selected(&self, email: &str) -> bool {
        self.selection.contains(email)
    }

    /// Selected e-mails in sorted order.
    pub fn selected_emails(&self) -> Vec<String> {
        self.selection.iter().cloned().collect()
    }
}
