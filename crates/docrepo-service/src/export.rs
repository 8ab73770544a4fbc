//! User export: server-side streaming exports and local selection CSVs.

use std::path::{Path, PathBuf};

use bytes::{Bytes, BytesMut};
use futures::{Stream, StreamExt, TryStreamExt};
use tracing::{debug, info};

use docrepo_client::ApiClient;
use docrepo_core::error::{AppError, ErrorKind};
use docrepo_core::result::AppResult;
use docrepo_core::types::{ExportFormat, ExportScope};

/// Progress callback receiving the cumulative byte count.
pub type ProgressFn<'a> = &'a mut (dyn FnMut(u64) + Send);

/// A fully assembled export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportBlob {
    /// File content.
    pub bytes: Bytes,
    /// MIME type of `bytes`.
    pub mime_type: &'static str,
}

impl ExportBlob {
    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// CSV of selected e-mails: an `Email` header and one address per line,
/// without a trailing newline.
pub fn selected_csv(emails: &[String]) -> String {
    format!("Email\n{}", emails.join("\n"))
}

/// File name for a download: `users-<scope>-<epoch-ms>.<ext>`.
///
/// Selection exports are always CSV regardless of `format`.
pub fn download_file_name(scope: ExportScope, format: ExportFormat, epoch_ms: i64) -> String {
    let format = match scope {
        ExportScope::Selected => ExportFormat::Csv,
        _ => format,
    };
    format!("users-{}-{}.{}", scope.as_str(), epoch_ms, format.as_str())
}

/// Drain a byte stream into one buffer, reporting cumulative progress
/// after every non-empty chunk. Chunks are consumed one at a time.
pub async fn collect_with_progress<S>(
    stream: S,
    mut on_progress: Option<ProgressFn<'_>>,
) -> AppResult<Bytes>
where
    S: Stream<Item = AppResult<Bytes>>,
{
    let mut stream = std::pin::pin!(stream);
    let mut buf = BytesMut::new();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if chunk.is_empty() {
            continue;
        }
        buf.extend_from_slice(&chunk);
        if let Some(report) = on_progress.as_mut() {
            report(buf.len() as u64);
        }
    }
    Ok(buf.freeze())
}

/// Runs exports against the API.
#[derive(Debug, Clone)]
pub struct ExportController {
    client: ApiClient,
}

impl ExportController {
    /// Create a controller.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Produce an export of `scope`.
    ///
    /// `Selected` is built locally from `selected` and never touches the
    /// network. Every other scope streams the backend export.
    pub async fn export_scope(
        &self,
        scope: ExportScope,
        selected: &[String],
        format: ExportFormat,
        on_progress: Option<ProgressFn<'_>>,
    ) -> AppResult<ExportBlob> {
        let Some(activity) = scope.activity() else {
            debug!(count = selected.len(), "Building selection CSV");
            return Ok(ExportBlob {
                bytes: Bytes::from(selected_csv(selected)),
                mime_type: ExportFormat::Csv.mime_type(),
            });
        };

        let response = self.client.users_export(activity, format).await?;
        let stream = response.bytes_stream().map_err(|e| {
            AppError::with_source(ErrorKind::Network, format!("Export download failed: {e}"), e)
        });
        let bytes = collect_with_progress(stream, on_progress).await?;
        info!(scope = %scope, format = %format, bytes = bytes.len(), "Export downloaded");

        Ok(ExportBlob {
            bytes,
            mime_type: format.mime_type(),
        })
    }
}

/// Write a blob into `dir`, creating the directory if needed.
pub async fn save_blob(dir: impl AsRef<Path>, file_name: &str, blob: &ExportBlob) -> AppResult<PathBuf> {
    let dir = dir.as_ref();
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(file_name);
    tokio::fs::write(&path, &blob.bytes).await?;
    info!(path = %path.display(), bytes = blob.size(), "Export saved");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selected_csv_layout() {
        let emails = vec!["a@x.com".to_string(), "b@x.com".to_string()];
        assert_eq!(selected_csv(&emails), "Email\na@x.com\nb@x.com");
        assert_eq!(selected_csv(&[]), "Email\n");
    }

    #[test]
    fn test_download_file_name() {
        assert_eq!(
            download_file_name(ExportScope::Active, ExportFormat::Xlsx, 1700000000000),
            "users-active-1700000000000.xlsx"
        );
        assert_eq!(
            download_file_name(ExportScope::Selected, ExportFormat::Xlsx, 5),
            "users-selected-5.csv"
        );
    }

    #[tokio::test]
    async fn test_size_equals_sum_of_chunks() {
        let chunks: Vec<AppResult<Bytes>> = vec![
            Ok(Bytes::from_static(b"Email,Name\n")),
            Ok(Bytes::new()),
            Ok(Bytes::from_static(b"a@x.com,A\n")),
            Ok(Bytes::from_static(b"b@x.com,B\n")),
        ];
        let mut seen = Vec::new();
        let mut report = |n: u64| seen.push(n);
        let bytes = collect_with_progress(futures::stream::iter(chunks), Some(&mut report))
            .await
            .expect("collect");

        assert_eq!(seen, vec![11, 21, 31]);
        assert_eq!(bytes.len() as u64, *seen.last().expect("progress"));
    }

    #[tokio::test]
    async fn test_stream_error_aborts() {
        let chunks: Vec<AppResult<Bytes>> = vec![
            Ok(Bytes::from_static(b"partial")),
            Err(AppError::network("connection reset")),
        ];
        let err = collect_with_progress(futures::stream::iter(chunks), None)
            .await
            .expect_err("error");
        assert_eq!(err.kind, ErrorKind::Network);
    }

    #[tokio::test]
    async fn test_save_blob() {
        let dir = tempfile::tempdir().expect("tempdir");
        let blob = ExportBlob {
            bytes: Bytes::from_static(b"Email\n"),
            mime_type: "text/csv",
        };
        let path = save_blob(dir.path().join("out"), "users.csv", &blob)
            .await
            .expect("save");
        assert_eq!(std::fs::read(path).expect("read"), b"Email\n");
    }
}
