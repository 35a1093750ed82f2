//! # OceanWatch User Directory
//!
//! Staff account directory for the OceanWatch ocean hazard monitoring
//! dashboard: filtering, role and status lifecycle, and a simulated
//! presence feed for demo mode.
//!
//! ## Architecture
//!
//! - **domain**: User records, roles, statuses, filter criteria and the
//!   `UserDirectory` interface
//! - **application**: Directory use-cases and the presence simulator
//! - **infrastructure**: In-memory directory storage
//! - **notifications**: Change events for whatever renders the directory
//! - **shared**: Errors, clock and shutdown plumbing
//! - **runtime**: Wires everything together for front ends

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod notifications;
pub mod runtime;
pub mod shared;

pub use config::{default_config_path, AppConfig};

pub use application::{DemoMode, DirectoryService, PresenceSimulator};
pub use domain::{
    DirectoryStats, DomainError, DomainResult, FilterCriteria, NewUser, Selector, UserDirectory,
    UserRecord, UserRole, UserStatus,
};
pub use infrastructure::InMemoryUserDirectory;

// Re-export notifications
pub use notifications::{create_event_bus, Event, EventBus, SharedEventBus};
