//! User entities.

pub mod model;
pub mod role;
pub mod status;

pub use model::UserRecord;
pub use role::UserRole;
pub use status::ActivityStatus;
