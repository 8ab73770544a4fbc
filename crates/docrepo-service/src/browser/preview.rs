//! How an opened document can be shown.

use serde::Serialize;

/// Viewer able to render a document, decided from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewKind {
    /// PDF viewer.
    Pdf,
    /// Inline image.
    Image,
    /// Plain text or markdown.
    Text,
    /// HTML page.
    Html,
    /// Download only.
    Download,
}

impl PreviewKind {
    /// Classify a file name or key.
    pub fn from_name(name: &str) -> Self {
        let ext = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "pdf" => Self::Pdf,
            "jpg" | "jpeg" | "png" | "gif" | "bmp" | "svg" => Self::Image,
            "txt" | "md" => Self::Text,
            "html" | "htm" => Self::Html,
            _ => Self::Download,
        }
    }

    /// Whether a viewer exists for this kind.
    pub fn is_viewable(&self) -> bool {
        !matches!(self, Self::Download)
    }
}
