//! # docrepo-entity
//!
//! Entities exchanged with the document-repository API. Field names
//! follow the API's camelCase JSON; anything the API has been seen to
//! omit is defaulted rather than rejected.

pub mod auth;
pub mod datetime;
pub mod document;
pub mod import;
pub mod metrics;
pub mod user;

pub use auth::{AuthResponse, MessageResponse, SignInRequest, UserResponse};
pub use document::{Bookmark, BookmarkKind, Comment, DocumentItem};
pub use import::ImportResults;
pub use metrics::{UsersMetricsResponse, WeeklyMetrics};
pub use user::{ActivityStatus, UserRecord, UserRole};
