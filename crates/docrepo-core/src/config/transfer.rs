//! Export and upload configuration.

use serde::{Deserialize, Serialize};

use crate::types::ExportFormat;

/// User export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Format used when none is given on the command line.
    #[serde(default)]
    pub default_format: ExportFormat,
    /// Directory downloads are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            default_format: ExportFormat::default(),
            output_dir: default_output_dir(),
        }
    }
}

/// File and icon upload settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Largest accepted icon image, in bytes.
    #[serde(default = "default_max_icon_bytes")]
    pub max_icon_bytes: u64,
    /// Send the "new files" notification after an admin's upload batch.
    #[serde(default = "default_true")]
    pub notify_on_admin_upload: bool,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_icon_bytes: default_max_icon_bytes(),
            notify_on_admin_upload: true,
        }
    }
}

fn default_output_dir() -> String {
    ".".to_string()
}

fn default_max_icon_bytes() -> u64 {
    2 * 1024 * 1024
}

fn default_true() -> bool {
    true
}
