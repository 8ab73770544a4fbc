//! Cross-document comment feed.

use serde::Serialize;
use tracing::info;

use docrepo_client::ApiClient;
use docrepo_core::error::AppError;
use docrepo_core::result::AppResult;
use docrepo_core::types::ItemType;
use docrepo_entity::document::Comment;
use docrepo_entity::document::item::display_name;

/// A comment with the name of the document it belongs to.
#[derive(Debug, Clone, Serialize)]
pub struct FeedComment {
    /// The comment.
    #[serde(flatten)]
    pub comment: Comment,
    /// Last path segment of the document.
    pub document_name: String,
}

impl FeedComment {
    fn new(comment: Comment) -> Self {
        let document_name = display_name(&comment.document_id).to_string();
        Self {
            comment,
            document_name,
        }
    }
}

/// Guess whether a commented document id names a folder.
pub fn document_kind(document_id: &str) -> ItemType {
    if document_id.ends_with('/') {
        ItemType::Folder
    } else {
        ItemType::File
    }
}

/// Every comment across all documents, newest first.
#[derive(Debug)]
pub struct CommentFeed {
    client: ApiClient,
    comments: Vec<FeedComment>,
}

impl CommentFeed {
    /// Create an empty feed.
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            comments: Vec::new(),
        }
    }

    /// Comments currently held, newest first.
    pub fn comments(&self) -> &[FeedComment] {
        &self.comments
    }

    /// Fetch all comments and flatten them into one list.
    pub async fn load(&mut self) -> AppResult<&[FeedComment]> {
        let by_document = self.client.all_comments().await?;
        let mut comments: Vec<FeedComment> = by_document
            .into_values()
            .flatten()
            .map(FeedComment::new)
            .collect();
        comments.sort_by(|a, b| b.comment.created_at.cmp(&a.comment.created_at));
        info!(count = comments.len(), "Loaded comment feed");
        self.comments = comments;
        Ok(self.comments.as_slice())
    }

    /// Comment on a document. The new comment goes to the top of the feed.
    pub async fn reply(&mut self, author_email: &str, document_id: &str, text: &str) -> AppResult<&FeedComment> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::validation("Comment cannot be empty"));
        }
        let comment = self.client.add_comment(author_email, document_id, text).await?;
        self.comments.insert(0, FeedComment::new(comment));
        Ok(&self.comments[0])
    }

    /// Replace the text of a comment.
    pub async fn edit(&mut self, comment_id: &str, text: &str) -> AppResult<&FeedComment> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::validation("Comment cannot be empty"));
        }
        let idx = self.position(comment_id)?;
        let document_id = self.comments[idx].comment.document_id.clone();
        let updated = self.client.update_comment(&document_id, text).await?;
        self.comments[idx] = FeedComment::new(updated);
        Ok(&self.comments[idx])
    }

    /// Delete a comment. It leaves the feed only once the server confirms.
    pub async fn delete(&mut self, comment_id: &str) -> AppResult<()> {
        let idx = self.position(comment_id)?;
        let target = &self.comments[idx].comment;
        self.client
            .delete_comment(&target.document_id, &target.content)
            .await?;
        self.comments.retain(|c| c.comment.id != comment_id);
        Ok(())
    }

    /// Comments whose text, document name or author contains `term`,
    /// ignoring case.
    pub fn search(&self, term: &str) -> Vec<&FeedComment> {
        let term = term.trim().to_lowercase();
        self.comments
            .iter()
            .filter(|c| {
                term.is_empty()
                    || c.comment.content.to_lowercase().contains(&term)
                    || c.document_name.to_lowercase().contains(&term)
                    || c.comment.author().to_lowercase().contains(&term)
            })
            .collect()
    }

    /// Comments on one document.
    pub fn for_document(&self, document_id: &str) -> Vec<&FeedComment> {
        self.comments
            .iter()
            .filter(|c| c.comment.document_id == document_id)
            .collect()
    }

    fn position(&self, comment_id: &str) -> AppResult<usize> {
        self.comments
            .iter()
            .position(|c| c.comment.id == comment_id)
            .ok_or_else(|| AppError::not_found(format!("Comment '{comment_id}' not found")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_kind() {
        assert_eq!(document_kind("hr/policies/"), ItemType::Folder);
        assert_eq!(document_kind("hr/policies/leave.pdf"), ItemType::File);
    }

    #[test]
    fn test_feed_comment_document_name() {
        let comment: Comment = serde_json::from_value(serde_json::json!({
            "_id": "c1",
            "content": "Looks good",
            "userId": "u1",
            "documentId": "hr/policies/leave.pdf",
            "createdAt": "2024-03-01T10:00:00Z",
            "updatedAt": "2024-03-01T10:00:00Z",
        }))
        .expect("comment");
        assert_eq!(FeedComment::new(comment).document_name, "leave.pdf");
    }
}
