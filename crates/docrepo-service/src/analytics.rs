//! Two-week usage comparison.

use serde::Serialize;

use docrepo_client::ApiClient;
use docrepo_core::result::AppResult;
use docrepo_entity::metrics::WeeklyMetrics;

/// Direction of a week-over-week change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    /// Increased.
    Up,
    /// Decreased.
    Down,
    /// Unchanged.
    Flat,
}

impl Trend {
    /// Trend of a percentage change.
    pub fn of(percent: f64) -> Self {
        if percent > 0.0 {
            Self::Up
        } else if percent < 0.0 {
            Self::Down
        } else {
            Self::Flat
        }
    }

    /// Arrow shown next to the figure.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Up => "↑",
            Self::Down => "↓",
            Self::Flat => "→",
        }
    }
}

/// Percentage change from `previous` to `current`.
///
/// From zero, any growth counts as 100% and no growth as 0%.
pub fn percent_change(current: u64, previous: u64) -> f64 {
    if previous == 0 {
        return if current > 0 { 100.0 } else { 0.0 };
    }
    (current as f64 - previous as f64) / previous as f64 * 100.0
}

/// Seconds as `"Xh Ym"`.
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    format!("{hours}h {minutes}m")
}

/// Rough active-user count for a week: half the sign-ins, at least one
/// when anyone signed in.
pub fn estimated_active_users(sign_ins: u64) -> u64 {
    if sign_ins == 0 { 0 } else { (sign_ins / 2).max(1) }
}

/// One metric compared across the two weeks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricChange {
    /// Metric name.
    pub label: &'static str,
    /// This week's value, formatted.
    pub current: String,
    /// Last week's value, formatted.
    pub previous: String,
    /// Percentage change.
    pub percent: f64,
    /// Direction.
    pub trend: Trend,
}

impl MetricChange {
    fn counted(label: &'static str, current: u64, previous: u64) -> Self {
        Self::formatted(label, current, previous, |v| v.to_string())
    }

    fn formatted(label: &'static str, current: u64, previous: u64, fmt: impl Fn(u64) -> String) -> Self {
        let percent = percent_change(current, previous);
        Self {
            label,
            current: fmt(current),
            previous: fmt(previous),
            percent,
            trend: Trend::of(percent),
        }
    }
}

/// Current and previous week side by side.
#[derive(Debug, Clone, Serialize)]
pub struct BiweeklyReport {
    /// The week in progress.
    pub current: WeeklyMetrics,
    /// The week before.
    pub previous: WeeklyMetrics,
}

impl BiweeklyReport {
    /// Fetch both weeks.
    pub async fn fetch(client: &ApiClient) -> AppResult<Self> {
        let response = client.biweekly_metrics().await?;
        Ok(Self {
            current: response.current_week,
            previous: response.previous_week,
        })
    }

    /// Week-over-week changes of every tracked metric.
    pub fn changes(&self) -> Vec<MetricChange> {
        let (c, p) = (&self.current, &self.previous);
        vec![
            MetricChange::formatted("Time spent", c.time_spent, p.time_spent, format_duration),
            MetricChange::counted("Documents viewed", c.documents_viewed, p.documents_viewed),
            MetricChange::counted("Sign-ins", c.sign_ins, p.sign_ins),
            MetricChange::counted(
                "Active users (est.)",
                estimated_active_users(c.sign_ins),
                estimated_active_users(p.sign_ins),
            ),
        ]
    }
}
