//! Domain layer: user directory entities, filtering, and the directory
//! interface. No I/O lives here.

pub mod presence;
pub mod user;

pub use presence::{PresenceSource, PresenceTick, RandomPresence, ScriptedPresence};
pub use user::*;

pub use crate::shared::types::errors::{DomainError, DomainResult};
