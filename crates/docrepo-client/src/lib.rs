//! # docrepo-client
//!
//! Typed wrapper over the document-repository REST API. [`ApiClient`]
//! attaches the bearer token, surfaces non-success responses as
//! [`AppError`](docrepo_core::AppError) carrying the server's text, and
//! decodes JSON bodies per endpoint. There is no retry policy: a failed
//! request reaches the caller immediately.
//!
//! The token lives in a [`KeyValueStore`](docrepo_core::traits::KeyValueStore)
//! so it survives restarts; see [`store`] for the file and memory backends.

pub mod client;
pub mod endpoints;
pub mod store;

pub use client::ApiClient;
pub use endpoints::metrics::UsersMetricsQuery;
pub use store::{FileKeyValueStore, MemoryKeyValueStore};
