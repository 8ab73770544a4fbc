//! User listing configuration.

use serde::{Deserialize, Serialize};

/// Settings for the paginated user-metrics listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Records requested per page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Quiet period before typed search text is committed.
    #[serde(default = "default_debounce")]
    pub search_debounce_ms: u64,
    /// A user is active when their last sign-in is at most this many
    /// whole days ago.
    #[serde(default = "default_active_window")]
    pub active_window_days: i64,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            search_debounce_ms: default_debounce(),
            active_window_days: default_active_window(),
        }
    }
}

fn default_page_size() -> u32 {
    20
}

fn default_debounce() -> u64 {
    600
}

fn default_active_window() -> i64 {
    7
}
