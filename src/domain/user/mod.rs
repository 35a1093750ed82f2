//! User aggregate
//!
//! Contains the directory record, filter criteria, DTOs, and the
//! directory (repository) interface.

pub mod filter;
pub mod model;
pub mod repository;
pub mod seed;
pub mod stats;

mod dto_create;

// Re-export model types
pub use model::{LifecycleAction, UserRecord, UserRole, UserStatus, JUST_NOW, NEVER_ACTIVE};

// Re-export query types
pub use filter::{FilterCriteria, Selector};
pub use stats::DirectoryStats;

// Re-export DTOs
pub use dto_create::NewUser;

// Re-export repository trait
pub use repository::{RoleChange, StatusChange, Transition, UserDirectory};
pub use seed::sample_users;
