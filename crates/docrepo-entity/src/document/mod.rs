//! Repository entries, bookmarks and comments.

pub mod bookmark;
pub mod comment;
pub mod item;

pub use bookmark::{Bookmark, BookmarkKind};
pub use comment::Comment;
pub use item::DocumentItem;
