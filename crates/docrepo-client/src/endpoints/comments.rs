//! Comment endpoints.

use std::collections::BTreeMap;

use reqwest::Method;

use docrepo_core::result::AppResult;
use docrepo_entity::auth::MessageResponse;
use docrepo_entity::document::Comment;
use docrepo_entity::document::comment::{
    AddCommentRequest, AllCommentsResponse, CommentResponse, CommentTarget, CommentsResponse,
};

use crate::client::ApiClient;

impl ApiClient {
    /// `POST /user/comment`.
    pub async fn add_comment(&self, email: &str, document_id: &str, comment: &str) -> AppResult<Comment> {
        let body = AddCommentRequest {
            email: email.to_string(),
            document_id: document_id.to_string(),
            comment: comment.to_string(),
        };
        let response: CommentResponse = self.send_json(Method::POST, "/user/comment", &body).await?;
        Ok(response.comment)
    }

    /// `PUT /user/comment`.
    pub async fn update_comment(&self, document_id: &str, comment: &str) -> AppResult<Comment> {
        let body = CommentTarget {
            document_id: document_id.to_string(),
            comment: comment.to_string(),
        };
        let response: CommentResponse = self.send_json(Method::PUT, "/user/comment", &body).await?;
        Ok(response.comment)
    }

    /// `DELETE /user/comment`. The backend identifies the comment by its
    /// document and exact text.
    pub async fn delete_comment(&self, document_id: &str, comment: &str) -> AppResult<MessageResponse> {
        let body = CommentTarget {
            document_id: document_id.to_string(),
            comment: comment.to_string(),
        };
        self.send_json(Method::DELETE, "/user/comment", &body).await
    }

    /// `GET /user/comments?documentId=`.
    pub async fn comments(&self, document_id: &str) -> AppResult<Vec<Comment>> {
        let response: CommentsResponse = self
            .get_with_query("/user/comments", &[("documentId", document_id)])
            .await?;
        Ok(response.comments)
    }

    /// `GET /user/comments/all`, grouped by document key.
    pub async fn all_comments(&self) -> AppResult<BTreeMap<String, Vec<Comment>>> {
        let response: AllCommentsResponse = self.get("/user/comments/all").await?;
        Ok(response.comments_by_document)
    }
}
