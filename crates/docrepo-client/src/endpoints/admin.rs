//! Admin-only endpoints: bulk import and upload notifications.

use bytes::Bytes;
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use serde::Serialize;

use docrepo_core::error::AppError;
use docrepo_core::result::AppResult;
use docrepo_entity::auth::MessageResponse;
use docrepo_entity::import::ImportResponse;

use crate::client::ApiClient;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UploadNotificationBody<'a> {
    file_names: &'a str,
    folder_path: &'a str,
}

impl ApiClient {
    /// `POST /admin/users/import` with the spreadsheet as multipart
    /// field `file`.
    pub async fn import_users(&self, file_name: &str, mime_type: &str, content: Bytes) -> AppResult<ImportResponse> {
        let part = Part::bytes(content.to_vec())
            .file_name(file_name.to_string())
            .mime_str(mime_type)
            .map_err(|e| AppError::validation(format!("Invalid MIME type '{mime_type}': {e}")))?;
        let form = Form::new().part("file", part);
        self.send_multipart("/admin/users/import", form, "Import failed")
            .await
    }

    /// `POST /api/notifications/upload`: tell users about new files.
    pub async fn send_upload_notification(&self, file_names: &str, folder_path: &str) -> AppResult<MessageResponse> {
        self.send_json(
            Method::POST,
            "/api/notifications/upload",
            &UploadNotificationBody {
                file_names,
                folder_path,
            },
        )
        .await
    }
}
