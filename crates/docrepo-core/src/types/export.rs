//! Export scope and file format.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::types::ActivityFilter;

/// Which users an export covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportScope {
    /// Every user.
    All,
    /// Active users only.
    Active,
    /// Inactive users only.
    Inactive,
    /// The caller's explicit selection of e-mail addresses.
    Selected,
}

impl ExportScope {
    /// Name used in file names and query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Selected => "selected",
        }
    }

    /// The server-side activity filter, or `None` for `Selected`, which
    /// the backend cannot export.
    pub fn activity(&self) -> Option<ActivityFilter> {
        match self {
            Self::All => Some(ActivityFilter::All),
            Self::Active => Some(ActivityFilter::Active),
            Self::Inactive => Some(ActivityFilter::Inactive),
            Self::Selected => None,
        }
    }
}

impl fmt::Display for ExportScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportScope {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "selected" => Ok(Self::Selected),
            other => Err(AppError::validation(format!(
                "Unknown export scope '{other}'"
            ))),
        }
    }
}

/// Export file format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Comma-separated values.
    #[default]
    Csv,
    /// Office Open XML spreadsheet.
    Xlsx,
}

impl ExportFormat {
    /// Query-string value and file extension.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
        }
    }

    /// MIME type of the exported file.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "xlsx" => Ok(Self::Xlsx),
            other => Err(AppError::validation(format!(
                "Unknown export format '{other}' (expected csv or xlsx)"
            ))),
        }
    }
}
