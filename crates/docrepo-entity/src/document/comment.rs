//! Document comments.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::user::UserRecord;

/// A comment attached to a document key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Comment identifier.
    #[serde(alias = "_id")]
    pub id: String,
    /// Comment text.
    pub content: String,
    /// Author reference.
    #[serde(default)]
    pub user_id: String,
    /// Key of the commented document.
    #[serde(default)]
    pub document_id: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last edit time; equal to `created_at` when never edited.
    pub updated_at: DateTime<Utc>,
    /// Embedded author profile, when the server includes it.
    #[serde(default)]
    pub user: Option<UserRecord>,
}

impl Comment {
    /// Check if the comment was edited after creation.
    pub fn is_edited(&self) -> bool {
        self.created_at != self.updated_at
    }

    /// Best available author label.
    pub fn author(&self) -> &str {
        match &self.user {
            Some(u) if !u.fullname.is_empty() => &u.fullname,
            Some(u) => &u.email,
            None => &self.user_id,
        }
    }
}

/// Body of `POST /user/comment`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCommentRequest {
    /// Author e-mail.
    pub email: String,
    /// Document key.
    pub document_id: String,
    /// Comment text.
    pub comment: String,
}

/// Body of `PUT` and `DELETE /user/comment`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentTarget {
    /// Document key.
    pub document_id: String,
    /// Comment text; identifies the comment on delete, replaces it on edit.
    pub comment: String,
}

/// Response carrying one comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    /// Server message.
    #[serde(default)]
    pub message: String,
    /// The comment.
    pub comment: Comment,
}

/// Body of `GET /user/comments`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentsResponse {
    /// Comments of one document.
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// Body of `GET /user/comments/all`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllCommentsResponse {
    /// Comments grouped by document key.
    #[serde(default)]
    pub comments_by_document: BTreeMap<String, Vec<Comment>>,
}
