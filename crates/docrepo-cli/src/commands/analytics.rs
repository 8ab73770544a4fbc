//! Usage analytics command.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use docrepo_core::config::ClientConfig;
use docrepo_core::error::AppError;
use docrepo_service::analytics::{BiweeklyReport, MetricChange};

/// Arguments for the analytics command
#[derive(Debug, Args)]
pub struct AnalyticsArgs {}

/// Metric display row for table output
#[derive(Debug, Serialize, Tabled)]
struct MetricRow {
    /// Metric
    metric: String,
    /// This week
    this_week: String,
    /// Last week
    last_week: String,
    /// Change
    change: String,
}

impl From<&MetricChange> for MetricRow {
    fn from(m: &MetricChange) -> Self {
        Self {
            metric: m.label.to_string(),
            this_week: m.current.clone(),
            last_week: m.previous.clone(),
            change: format!("{} {:.1}%", m.trend.symbol(), m.percent.abs()),
        }
    }
}

/// Execute the analytics command
pub async fn execute(_args: &AnalyticsArgs, config: &ClientConfig, format: OutputFormat) -> Result<(), AppError> {
    let client = super::create_client(config).await?;
    let report = BiweeklyReport::fetch(&client).await?;
    let changes = report.changes();

    match format {
        OutputFormat::Json => output::print_json(&serde_json::json!({
            "current_week": report.current,
            "previous_week": report.previous,
            "changes": changes,
        })),
        OutputFormat::Table => {
            let rows: Vec<MetricRow> = changes.iter().map(MetricRow::from).collect();
            output::print_list(&rows, format);
        }
    }

    Ok(())
}
