//! Batch uploads into the open folder through pre-signed URLs.

use std::path::Path;

use bytes::Bytes;
use serde::Serialize;
use tracing::{info, warn};

use docrepo_client::ApiClient;
use docrepo_core::error::AppError;
use docrepo_core::result::AppResult;

use crate::browser::{IconUpload, upload_icon};

/// One file of a batch, with an optional icon.
#[derive(Debug, Clone)]
pub struct UploadEntry {
    /// Name the file is stored under.
    pub file_name: String,
    /// MIME type sent with the upload.
    pub content_type: String,
    /// File content.
    pub bytes: Bytes,
    /// Icon stored alongside the file.
    pub icon: Option<IconUpload>,
}

impl UploadEntry {
    /// Read a file from disk, guessing its MIME type from the extension.
    pub async fn from_path(path: &Path) -> AppResult<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| AppError::validation(format!("'{}' is not a file", path.display())))?;
        let content_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Ok(Self {
            file_name,
            content_type,
            bytes: Bytes::from(bytes),
            icon: None,
        })
    }

    /// Attach an icon.
    pub fn with_icon(mut self, icon: IconUpload) -> Self {
        self.icon = Some(icon);
        self
    }
}

/// Whether the post-batch notification went out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "error")]
pub enum NotificationOutcome {
    /// The uploader is not an admin, or notifications are disabled.
    Skipped,
    /// Sent.
    Sent,
    /// The request failed; the uploads stand.
    Failed(String),
}

/// Result of a completed batch.
#[derive(Debug, Clone, Serialize)]
pub struct UploadReport {
    /// Keys of the stored files, in upload order.
    pub uploaded: Vec<String>,
    /// Files whose icon could not be stored, with the reason.
    pub icon_failures: Vec<(String, String)>,
    /// Notification state.
    pub notification: NotificationOutcome,
}

/// Storage key of an uploaded file: the folder prefix with one trailing
/// slash, then the file name. The root has no prefix.
pub fn upload_key(folder: &str, file_name: &str) -> String {
    let folder = folder.trim_end_matches('/');
    if folder.is_empty() {
        file_name.to_string()
    } else {
        format!("{folder}/{file_name}")
    }
}

/// An ordered set of files bound for one folder.
#[derive(Debug, Clone, Default)]
pub struct UploadBatch {
    entries: Vec<UploadEntry>,
}

impl UploadBatch {
    /// Create an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a file.
    pub fn push(&mut self, entry: UploadEntry) {
        self.entries.push(entry);
    }

    /// Files in upload order.
    pub fn entries(&self) -> &[UploadEntry] {
        &self.entries
    }

    /// Whether the batch holds no files.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Upload every file into `folder`, one after another.
    ///
    /// A failed file stops the batch and the error names it; files before
    /// it stay stored. A failed icon is recorded and the batch continues.
    /// With `notify` set, one notification is sent after the last file.
    pub async fn upload_all(&self, client: &ApiClient, folder: &str, notify: bool) -> AppResult<UploadReport> {
        let mut report = UploadReport {
            uploaded: Vec::with_capacity(self.entries.len()),
            icon_failures: Vec::new(),
            notification: NotificationOutcome::Skipped,
        };
        if self.entries.is_empty() {
            return Ok(report);
        }

        for entry in &self.entries {
            let key = upload_key(folder, &entry.file_name);
            upload_file(client, &key, entry).await.map_err(|e| {
                AppError::new(e.kind, format!("Failed to upload {}: {}", entry.file_name, e.message))
            })?;
            info!(key = %key, bytes = entry.bytes.len(), "File uploaded");

            if let Some(icon) = &entry.icon {
                if let Err(e) = upload_icon(client, &key, icon).await {
                    warn!(key = %key, error = %e, "Icon upload failed");
                    report.icon_failures.push((entry.file_name.clone(), e.message));
                }
            }
            report.uploaded.push(key);
        }

        if notify {
            let names = self
                .entries
                .iter()
                .map(|e| e.file_name.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            let location = if folder.is_empty() { "Root" } else { folder };
            report.notification = match client.send_upload_notification(&names, location).await {
                Ok(_) => NotificationOutcome::Sent,
                Err(e) => {
                    warn!(error = %e, "Upload notification failed");
                    NotificationOutcome::Failed(e.message)
                }
            };
        }

        Ok(report)
    }
}

async fn upload_file(client: &ApiClient, key: &str, entry: &UploadEntry) -> AppResult<()> {
    let url = client.upload_url(key, &entry.content_type).await?;
    client
        .put_presigned(&url, entry.bytes.clone(), &entry.content_type)
        .await
}
