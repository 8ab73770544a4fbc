//! Small enums shared by the client, the controllers and the CLI.

pub mod activity;
pub mod export;
pub mod item;

pub use activity::ActivityFilter;
pub use export::{ExportFormat, ExportScope};
pub use item::ItemType;
