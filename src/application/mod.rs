//! Application layer: use-cases over the user directory

pub mod directory;
pub mod presence;

pub use directory::DirectoryService;
pub use presence::{DemoMode, PresenceHandle, PresenceSimulator};
