//! Document browser: listing normalization, icon resolution, bookmarks
//! and folder management.

pub mod icon;
pub mod normalize;
pub mod preview;
pub mod state;

pub use icon::{IconProbe, IconUpload, icon_candidates, resolve_icon};
pub use normalize::{normalize_entry, normalize_listing};
pub use preview::PreviewKind;
pub use state::{Breadcrumb, DocumentBrowser, FolderCreation, OpenedDocument, upload_icon};
