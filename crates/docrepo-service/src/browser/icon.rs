//! Custom folder icons: probing and uploads.

use async_trait::async_trait;
use bytes::Bytes;
use tracing::{debug, warn};

use docrepo_client::ApiClient;
use docrepo_core::error::AppError;
use docrepo_core::result::AppResult;
use docrepo_entity::document::item::join_key;

/// Looks up the icon stored for one path.
#[async_trait]
pub trait IconProbe: Send + Sync {
    /// Icon URL for `path`, `Ok(None)` when there is none.
    async fn probe_icon(&self, path: &str) -> AppResult<Option<String>>;
}

#[async_trait]
impl IconProbe for ApiClient {
    async fn probe_icon(&self, path: &str) -> AppResult<Option<String>> {
        self.folder_icon(path).await
    }
}

/// Paths under which a folder's icon may have been stored, in probe order.
///
/// Icons have been saved under the bare key, the key with a trailing
/// slash, and both forms qualified with the parent prefix.
pub fn icon_candidates(key: &str, prefix: &str) -> Vec<String> {
    let key = key.trim_end_matches('/');
    let mut candidates = vec![key.to_string(), format!("{key}/")];

    let prefix = prefix.trim_end_matches('/');
    if !prefix.is_empty() && !key.starts_with(&format!("{prefix}/")) {
        let qualified = join_key(prefix, key);
        candidates.push(format!("{qualified}/"));
        candidates.insert(2, qualified);
    }

    let mut seen = std::collections::HashSet::new();
    candidates.retain(|c| !c.is_empty() && seen.insert(c.clone()));
    candidates
}

/// Probe the candidates one after another and return the first non-empty
/// URL. Failed probes are logged and skipped.
pub async fn resolve_icon<P>(probe: &P, key: &str, prefix: &str) -> Option<String>
where
    P: IconProbe + ?Sized,
{
    for candidate in icon_candidates(key, prefix) {
        match probe.probe_icon(&candidate).await {
            Ok(Some(url)) if !url.is_empty() => {
                debug!(key, candidate = %candidate, "Resolved folder icon");
                return Some(url);
            }
            Ok(_) => {}
            Err(e) => warn!(key, candidate = %candidate, error = %e, "Icon probe failed"),
        }
    }
    None
}

/// A validated icon image ready for upload.
#[derive(Debug, Clone)]
pub struct IconUpload {
    /// Original file name.
    pub file_name: String,
    /// MIME type, always `image/*`.
    pub content_type: String,
    /// Image data.
    pub bytes: Bytes,
}

impl IconUpload {
    /// Validate an icon: it must be an image no larger than `max_bytes`.
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Bytes,
        max_bytes: u64,
    ) -> AppResult<Self> {
        let file_name = file_name.into();
        let content_type = content_type.into();
        if !content_type.starts_with("image/") {
            return Err(AppError::validation(format!(
                "Icon '{file_name}' is not an image ({content_type})"
            )));
        }
        if bytes.len() as u64 > max_bytes {
            return Err(AppError::validation(format!(
                "Icon '{file_name}' exceeds the {} limit",
                human_size(max_bytes)
            )));
        }
        Ok(Self {
            file_name,
            content_type,
            bytes,
        })
    }

    /// Load and validate an icon from disk, guessing its type from the
    /// extension.
    pub async fn from_path(path: &std::path::Path, max_bytes: u64) -> AppResult<Self> {
        let bytes = tokio::fs::read(path).await?;
        let content_type = mime_guess::from_path(path).first_or_octet_stream();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::new(file_name, content_type.essence_str(), Bytes::from(bytes), max_bytes)
    }

    /// Icon type sent when requesting an upload URL: the file's own
    /// extension, or the image subtype when the name has none.
    pub fn icon_type(&self) -> String {
        match self.file_name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => ext.to_ascii_lowercase(),
            _ => self
                .content_type
                .strip_prefix("image/")
                .and_then(|subtype| subtype.split(['+', ';']).next())
                .filter(|subtype| !subtype.is_empty())
                .unwrap_or("png")
                .to_string(),
        }
    }
}

fn human_size(bytes: u64) -> String {
    const MIB: u64 = 1024 * 1024;
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else if bytes >= 1024 {
        format!("{}KB", bytes / 1024)
    } else {
        format!("{bytes}B")
    }
}
