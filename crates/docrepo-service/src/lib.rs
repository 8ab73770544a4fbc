//! # docrepo-service
//!
//! Controllers that own the state of each DocRepo view and drive the
//! [`ApiClient`](docrepo_client::ApiClient). Presentation code emits
//! intents (type, filter, page, toggle, export) and renders whatever the
//! controller holds afterwards.
//!
//! Every controller is owned by one view and mutated through `&mut self`,
//! so there is no shared mutable state between views.

pub mod analytics;
pub mod browser;
pub mod comments;
pub mod debounce;
pub mod export;
pub mod import;
pub mod listing;
pub mod session;
pub mod upload;

pub use browser::DocumentBrowser;
pub use comments::CommentFeed;
pub use export::{ExportBlob, ExportController};
pub use listing::{UserListController, UserPage};
pub use session::Session;
