//! Bookmarks owned by the backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use docrepo_core::types::ItemType;

use crate::datetime;

/// What a bookmark points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookmarkKind {
    /// A file.
    #[serde(alias = "file")]
    Document,
    /// A folder.
    Folder,
}

impl From<ItemType> for BookmarkKind {
    fn from(value: ItemType) -> Self {
        match value {
            ItemType::File => Self::Document,
            ItemType::Folder => Self::Folder,
        }
    }
}

/// A bookmark as listed by `GET /user/bookmarks`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    /// Bookmark identifier.
    #[serde(default, alias = "_id")]
    pub id: String,
    /// Key of the bookmarked entry.
    pub item_id: String,
    /// Kind of entry.
    pub item_type: BookmarkKind,
    /// Display name at bookmark time.
    #[serde(default)]
    pub item_name: String,
    /// When the bookmark was created.
    #[serde(default, deserialize_with = "datetime::lenient")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of `POST /user/bookmarks`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddBookmarkRequest {
    /// Key of the entry.
    pub item_id: String,
    /// Kind of entry.
    pub item_type: BookmarkKind,
    /// Display name.
    pub item_name: String,
}

/// Body of `GET /user/bookmarks`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookmarksResponse {
    /// The caller's bookmarks.
    #[serde(default)]
    pub bookmarks: Vec<Bookmark>,
}
