//! Bulk user import results.

use serde::{Deserialize, Serialize};

/// Outcome of `POST /admin/users/import`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResults {
    /// Rows that created new users.
    #[serde(default)]
    pub new_employees_added: u64,
    /// Rows matching an existing user unchanged.
    #[serde(default)]
    pub unchanged_employees: u64,
    /// Existing users absent from the file, now removed.
    #[serde(default)]
    pub former_employees_removed: u64,
    /// Per-row problems as reported by the server.
    #[serde(default)]
    pub errors: Vec<serde_json::Value>,
}

impl ImportResults {
    /// Rows accepted, whether new or unchanged.
    pub fn processed(&self) -> u64 {
        self.new_employees_added + self.unchanged_employees
    }

    /// Errors rendered as display strings.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors
            .iter()
            .map(|e| match e {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect()
    }
}

/// Envelope of the import endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportResponse {
    /// Server message.
    #[serde(default)]
    pub message: String,
    /// Import counters.
    #[serde(default)]
    pub results: ImportResults,
}
