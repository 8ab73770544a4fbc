//! Bookmark endpoints.

use reqwest::Method;

use docrepo_core::result::AppResult;
use docrepo_entity::auth::MessageResponse;
use docrepo_entity::document::bookmark::{AddBookmarkRequest, BookmarksResponse};
use docrepo_entity::document::{Bookmark, BookmarkKind};

use crate::client::{ApiClient, REQUEST_FAILED, execute};

impl ApiClient {
    /// `GET /user/bookmarks`.
    pub async fn bookmarks(&self) -> AppResult<Vec<Bookmark>> {
        let response: BookmarksResponse = self.get("/user/bookmarks").await?;
        Ok(response.bookmarks)
    }

    /// `POST /user/bookmarks`.
    pub async fn add_bookmark(&self, item_id: &str, item_type: BookmarkKind, item_name: &str) -> AppResult<MessageResponse> {
        let body = AddBookmarkRequest {
            item_id: item_id.to_string(),
            item_type,
            item_name: item_name.to_string(),
        };
        self.send_json(Method::POST, "/user/bookmarks", &body).await
    }

    /// `DELETE /user/bookmarks/{itemId}`.
    pub async fn remove_bookmark(&self, item_id: &str) -> AppResult<MessageResponse> {
        let url = self.url_with_segment("/user/bookmarks", item_id)?;
        let builder = self.json_request(Method::DELETE, url).await;
        execute(builder, REQUEST_FAILED).await
    }
}
