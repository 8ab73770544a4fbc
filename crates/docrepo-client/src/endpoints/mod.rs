//! Endpoint methods of [`ApiClient`](crate::ApiClient), grouped by API area.

pub mod admin;
pub mod auth;
pub mod bookmarks;
pub mod comments;
pub mod documents;
pub mod metrics;
pub mod users;
