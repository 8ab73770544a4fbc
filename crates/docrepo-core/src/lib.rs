//! # docrepo-core
//!
//! Core crate for the DocRepo client. Contains the unified error system,
//! configuration schemas, the small enums shared by the client and the
//! controllers, and the key-value store trait used for session state.
//!
//! This crate has **no** internal dependencies on other DocRepo crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
