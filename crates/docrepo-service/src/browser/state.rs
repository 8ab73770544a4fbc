//! Stateful document browser.

use std::collections::HashSet;

use futures::future::join_all;
use serde::Serialize;
use tracing::{info, warn};

use docrepo_client::ApiClient;
use docrepo_core::error::AppError;
use docrepo_core::result::AppResult;
use docrepo_entity::document::item::join_key;
use docrepo_entity::document::{BookmarkKind, DocumentItem};

use super::icon::{IconUpload, resolve_icon};
use super::normalize::normalize_listing;
use super::preview::PreviewKind;

/// One step of the path shown above the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    /// Segment name.
    pub name: String,
    /// Key of the folder this segment opens.
    pub key: String,
}

/// Outcome of creating a folder.
///
/// The folder exists whenever this is returned; an icon failure is
/// reported here and does not undo the creation.
#[derive(Debug)]
pub struct FolderCreation {
    /// Key of the new folder.
    pub key: String,
    /// Why the icon could not be stored, if one was given and failed.
    pub icon_error: Option<AppError>,
}

/// A document opened for viewing.
#[derive(Debug, Clone, Serialize)]
pub struct OpenedDocument {
    /// Storage key.
    pub key: String,
    /// Retrieval URL.
    pub url: String,
    /// Viewer able to show it.
    pub preview: PreviewKind,
}

/// Browsing state for one folder of the repository.
#[derive(Debug)]
pub struct DocumentBrowser {
    client: ApiClient,
    current_path: String,
    items: Vec<DocumentItem>,
    filter: String,
}

impl DocumentBrowser {
    /// Create a browser positioned at the root. Call [`load`](Self::load)
    /// to fetch the listing.
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            current_path: String::new(),
            items: Vec::new(),
            filter: String::new(),
        }
    }

    /// Key of the open folder; empty at the root.
    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    /// Every entry of the open folder.
    pub fn items(&self) -> &[DocumentItem] {
        &self.items
    }

    /// Fetch the open folder, overlay bookmarks and resolve folder icons.
    pub async fn load(&mut self) -> AppResult<&[DocumentItem]> {
        let raw = self.client.list_folders(&self.current_path).await?;
        let mut items = normalize_listing(&raw, &self.current_path);

        match self.client.bookmarks().await {
            Ok(bookmarks) => {
                let marked: HashSet<&str> = bookmarks.iter().map(|b| b.item_id.as_str()).collect();
                for item in &mut items {
                    item.is_bookmarked = marked.contains(item.key.as_str());
                }
            }
            Err(e) => warn!(error = %e, "Failed to load bookmarks; showing none"),
        }

        let client = &self.client;
        let prefix = self.current_path.as_str();
        let lookups = items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.is_folder())
            .map(|(idx, item)| async move { (idx, resolve_icon(client, &item.key, prefix).await) });
        let resolved = join_all(lookups).await;
        for (idx, icon) in resolved {
            items[idx].icon_url = icon;
        }

        info!(path = %self.current_path, entries = items.len(), "Loaded folder");
        self.items = items;
        Ok(self.items.as_slice())
    }

    /// Open a folder by key.
    pub async fn open_folder(&mut self, key: &str) -> AppResult<&[DocumentItem]> {
        self.current_path = key.trim_matches('/').to_string();
        self.load().await
    }

    /// Open the parent folder. At the root this reloads the root.
    pub async fn navigate_up(&mut self) -> AppResult<&[DocumentItem]> {
        self.current_path = match self.current_path.rsplit_once('/') {
            Some((parent, _)) => parent.to_string(),
            None => String::new(),
        };
        self.load().await
    }

    /// Open the root.
    pub async fn navigate_root(&mut self) -> AppResult<&[DocumentItem]> {
        self.current_path.clear();
        self.load().await
    }

    /// Path segments of the open folder, each with the key it opens.
    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        let mut key = String::new();
        self.current_path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|segment| {
                key = join_key(&key, segment);
                Breadcrumb {
                    name: segment.to_string(),
                    key: key.clone(),
                }
            })
            .collect()
    }

    /// Set the name filter.
    pub fn set_filter(&mut self, text: impl Into<String>) {
        self.filter = text.into();
    }

    /// Entries whose name contains the filter, ignoring case.
    pub fn visible_items(&self) -> Vec<&DocumentItem> {
        let needle = self.filter.trim().to_lowercase();
        self.items
            .iter()
            .filter(|item| needle.is_empty() || item.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Get a retrieval URL for a file.
    ///
    /// With a viewer e-mail the view is recorded and the document added
    /// to the viewer's recent list. Tracking failures are logged only.
    pub async fn open_file(&self, key: &str, viewer_email: Option<&str>) -> AppResult<OpenedDocument> {
        let url = self.client.file_url(key).await?;

        if let Some(email) = viewer_email {
            if let Err(e) = self.client.document_viewed(email, key).await {
                warn!(key, error = %e, "Failed to record document view");
            }
            if let Err(e) = self.client.add_recent_document(email, key).await {
                warn!(key, error = %e, "Failed to update recent documents");
            }
        }

        Ok(OpenedDocument {
            key: key.to_string(),
            url,
            preview: PreviewKind::from_name(key),
        })
    }

    /// Flip the bookmark of an entry in the open folder.
    ///
    /// The flag changes before the request; on failure it is restored
    /// and the error returned. Returns the new state.
    pub async fn toggle_bookmark(&mut self, key: &str) -> AppResult<bool> {
        let idx = self
            .items
            .iter()
            .position(|i| i.key == key)
            .ok_or_else(|| AppError::not_found(format!("'{key}' is not in the open folder")))?;

        let was = self.items[idx].is_bookmarked;
        self.items[idx].is_bookmarked = !was;
        let item = &self.items[idx];

        let result = if was {
            self.client.remove_bookmark(&item.key).await
        } else {
            let kind = BookmarkKind::from(item.item_type);
            self.client.add_bookmark(&item.key, kind, &item.name).await
        };

        match result {
            Ok(_) => Ok(!was),
            Err(e) => {
                self.items[idx].is_bookmarked = was;
                Err(e)
            }
        }
    }

    /// Create a folder in the open folder, optionally with an icon, then
    /// reload the listing.
    pub async fn create_folder(&mut self, name: &str, icon: Option<IconUpload>) -> AppResult<FolderCreation> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Folder name cannot be empty"));
        }

        let response = self
            .client
            .create_folder(name, Some(&self.current_path))
            .await?;
        let key = if response.key.is_empty() {
            join_key(&self.current_path, name)
        } else {
            response.key.trim_end_matches('/').to_string()
        };
        info!(key = %key, "Folder created");

        let icon_error = match icon {
            Some(icon) => upload_icon(&self.client, &key, &icon).await.err(),
            None => None,
        };
        if let Some(e) = &icon_error {
            warn!(key = %key, error = %e, "Folder icon upload failed");
        }

        if let Err(e) = self.load().await {
            warn!(error = %e, "Failed to reload folder after creation");
        }

        Ok(FolderCreation { key, icon_error })
    }

    /// Delete a document and drop it from the listing.
    pub async fn delete_document(&mut self, key: &str) -> AppResult<()> {
        self.client.delete_document(key).await?;
        self.items.retain(|i| i.key != key);
        info!(key, "Document deleted");
        Ok(())
    }
}

/// Store an icon for `item_path` through a pre-signed URL.
pub async fn upload_icon(client: &ApiClient, item_path: &str, icon: &IconUpload) -> AppResult<()> {
    let url = client.icon_upload_url(item_path, &icon.icon_type()).await?;
    client
        .put_presigned(&url, icon.bytes.clone(), &icon.content_type)
        .await
}
