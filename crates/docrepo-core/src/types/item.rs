//! Document item type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether a repository entry is a file or a folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    /// A stored object.
    File,
    /// A key prefix grouping other entries.
    Folder,
}

impl ItemType {
    /// Parse the loose type labels the listing endpoint has used.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_ascii_lowercase().as_str() {
            "file" | "document" | "object" => Some(Self::File),
            "folder" | "directory" | "dir" | "prefix" => Some(Self::Folder),
            _ => None,
        }
    }

    /// Lowercase label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Folder => "folder",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
