//! Folder listing, file URLs and folder icons.

use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use docrepo_core::error::AppError;
use docrepo_core::result::AppResult;
use docrepo_entity::auth::MessageResponse;

use crate::client::{ApiClient, REQUEST_FAILED, check_status, transport_error};

#[derive(Debug, Serialize)]
struct PrefixBody<'a> {
    prefix: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateFolderBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    prefix: Option<&'a str>,
    name: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct KeyBody<'a> {
    key: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_type: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteBody<'a> {
    file_path: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct IconUploadBody<'a> {
    item_path: &'a str,
    icon_type: &'a str,
}

#[derive(Debug, Deserialize)]
struct UrlResponse {
    url: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IconUploadResponse {
    #[serde(default)]
    upload_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IconResponse {
    #[serde(default)]
    icon_url: Option<String>,
}

/// Result of `POST /api/folders/create`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateFolderResponse {
    /// Server message.
    #[serde(default)]
    pub message: String,
    /// Storage key of the new folder.
    #[serde(default)]
    pub key: String,
}

impl ApiClient {
    /// `POST /api/folders`.
    ///
    /// Returned as raw JSON: deployments disagree on the entry shapes, so
    /// the caller normalizes them.
    pub async fn list_folders(&self, prefix: &str) -> AppResult<serde_json::Value> {
        self.send_json(Method::POST, "/api/folders", &PrefixBody { prefix })
            .await
    }

    /// `POST /api/folders/create`.
    pub async fn create_folder(&self, name: &str, prefix: Option<&str>) -> AppResult<CreateFolderResponse> {
        let prefix = prefix.filter(|p| !p.is_empty());
        self.send_json(
            Method::POST,
            "/api/folders/create",
            &CreateFolderBody { prefix, name },
        )
        .await
    }

    /// `POST /api/files/fetch`: retrieval URL for a stored object.
    pub async fn file_url(&self, key: &str) -> AppResult<String> {
        let response: UrlResponse = self
            .send_json(
                Method::POST,
                "/api/files/fetch",
                &KeyBody {
                    key,
                    content_type: None,
                },
            )
            .await?;
        Ok(response.url)
    }

    /// `POST /api/files/upload`: pre-signed upload URL for `key`.
    pub async fn upload_url(&self, key: &str, content_type: &str) -> AppResult<String> {
        let response: UrlResponse = self
            .send_json(
                Method::POST,
                "/api/files/upload",
                &KeyBody {
                    key,
                    content_type: Some(content_type),
                },
            )
            .await?;
        Ok(response.url)
    }

    /// `DELETE /api/files/delete`.
    pub async fn delete_document(&self, key: &str) -> AppResult<MessageResponse> {
        self.send_json(Method::DELETE, "/api/files/delete", &DeleteBody { file_path: key })
            .await
    }

    /// `POST /api/icons/upload`: pre-signed URL for an item's icon.
    pub async fn icon_upload_url(&self, item_path: &str, icon_type: &str) -> AppResult<String> {
        let response: IconUploadResponse = self
            .send_json(
                Method::POST,
                "/api/icons/upload",
                &IconUploadBody {
                    item_path,
                    icon_type,
                },
            )
            .await?;
        response
            .upload_url
            .filter(|u| !u.is_empty())
            .ok_or_else(|| AppError::internal("No upload URL received from server"))
    }

    /// `GET /api/icons/{path}`: custom icon of one storage path.
    ///
    /// A 404 means "no icon" and yields `Ok(None)`; other failures are
    /// errors so the caller can decide whether to keep probing.
    pub async fn folder_icon(&self, path: &str) -> AppResult<Option<String>> {
        let url = self.url_with_segment("/api/icons", path)?;
        debug!(path, "Probing folder icon");
        let builder = self.json_request(Method::GET, url).await;
        let response = builder.send().await.map_err(transport_error)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = check_status(response, REQUEST_FAILED).await?;
        let body = response.bytes().await.map_err(transport_error)?;
        if body.is_empty() {
            return Ok(None);
        }
        let icon: IconResponse = serde_json::from_slice(&body)?;
        Ok(icon.icon_url.filter(|u| !u.is_empty()))
    }
}

