//! Normalized document item and key helpers.

use serde::{Deserialize, Serialize};

use docrepo_core::types::ItemType;

/// One entry of a folder listing.
///
/// `key` is the full storage path and the sole identity; `name` is derived
/// for display and may differ from the last key segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentItem {
    /// Full storage key.
    pub key: String,
    /// Display name.
    pub name: String,
    /// File or folder.
    pub item_type: ItemType,
    /// Custom icon, when one was resolved.
    #[serde(default)]
    pub icon_url: Option<String>,
    /// Whether the signed-in user bookmarked this entry.
    #[serde(default)]
    pub is_bookmarked: bool,
}

impl DocumentItem {
    /// Create an entry with no icon and no bookmark.
    pub fn new(key: impl Into<String>, name: impl Into<String>, item_type: ItemType) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            item_type,
            icon_url: None,
            is_bookmarked: false,
        }
    }

    /// Check if this entry is a folder.
    pub fn is_folder(&self) -> bool {
        self.item_type == ItemType::Folder
    }
}

/// Last non-empty `/`-separated segment of a key, or the key itself.
pub fn display_name(key: &str) -> &str {
    key.trim_end_matches('/')
        .rsplit('/')
        .find(|s| !s.is_empty())
        .unwrap_or(key)
}

/// Join a folder prefix and a child name with exactly one `/`.
pub fn join_key(prefix: &str, name: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    let name = name.trim_start_matches('/');
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}/{name}")
    }
}
