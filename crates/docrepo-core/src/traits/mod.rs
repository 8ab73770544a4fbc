//! Core traits defined in `docrepo-core` and implemented by other crates.

pub mod store;

pub use store::KeyValueStore;
