//! Notification events
//!
//! Every directory mutation publishes one of these so views can re-read
//! the directory and show a notification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{UserRecord, UserRole, UserStatus};

/// Event types for notifications
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Event {
    /// New account added to the directory
    UserCreated(UserCreatedEvent),
    /// Role replaced
    RoleChanged(RoleChangedEvent),
    /// Status replaced
    StatusChanged(StatusChangedEvent),
    /// Pending account approved
    UserApproved(UserApprovedEvent),
    /// Account removed
    UserDeleted(UserDeletedEvent),
    /// Presence flags redrawn by demo mode
    PresenceTicked(PresenceTickedEvent),
    /// Demo mode switched on or off
    DemoModeChanged(DemoModeChangedEvent),
}

impl Event {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::UserCreated(_) => "user_created",
            Event::RoleChanged(_) => "role_changed",
            Event::StatusChanged(_) => "status_changed",
            Event::UserApproved(_) => "user_approved",
            Event::UserDeleted(_) => "user_deleted",
            Event::PresenceTicked(_) => "presence_ticked",
            Event::DemoModeChanged(_) => "demo_mode_changed",
        }
    }

    /// Get the user ID if the event concerns a single record
    pub fn user_id(&self) -> Option<&str> {
        match self {
            Event::UserCreated(e) => Some(&e.user.id),
            Event::RoleChanged(e) => Some(&e.user_id),
            Event::StatusChanged(e) => Some(&e.user_id),
            Event::UserApproved(e) => Some(&e.user_id),
            Event::UserDeleted(e) => Some(&e.user_id),
            Event::PresenceTicked(_) | Event::DemoModeChanged(_) => None,
        }
    }

    /// Text shown to the operator for this event.
    pub fn notification(&self) -> Notification {
        match self {
            Event::UserCreated(e) => Notification::new(
                "User Created",
                format!(
                    "{} has been added as {} and is awaiting approval",
                    e.user.name,
                    e.user.role.label()
                ),
            ),
            Event::RoleChanged(e) => Notification::new(
                "Role Updated Successfully",
                format!(
                    "{}'s role has been changed to {}. {}",
                    e.name,
                    e.new_role.label(),
                    e.new_role.description()
                ),
            ),
            Event::StatusChanged(e) => {
                let verb = e.new_status.action_verb();
                Notification::new(
                    format!("User {}", verb),
                    format!("{} has been {}", e.name, verb),
                )
            }
            Event::UserApproved(_) => Notification::new(
                "User Approved",
                "User has been approved and activated",
            ),
            Event::UserDeleted(e) => Notification::destructive(
                "User Deleted",
                format!("{} has been removed from the system", e.name),
            ),
            Event::PresenceTicked(e) => Notification::new(
                "Presence Updated",
                format!("{} of {} users online", e.online, e.total),
            ),
            Event::DemoModeChanged(e) => {
                if e.enabled {
                    Notification::new("Demo Mode Enabled", "Simulating live presence updates")
                } else {
                    Notification::new("Demo Mode Disabled", "Presence updates paused")
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationVariant {
    Default,
    Destructive,
}

/// Title and body of a user-facing notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
}

impl Notification {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NotificationVariant::Default,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            variant: NotificationVariant::Destructive,
            ..Self::new(title, description)
        }
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreatedEvent {
    pub user: UserRecord,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleChangedEvent {
    pub user_id: String,
    pub name: String,
    pub old_role: UserRole,
    pub new_role: UserRole,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusChangedEvent {
    pub user_id: String,
    pub name: String,
    pub old_status: UserStatus,
    pub new_status: UserStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserApprovedEvent {
    pub user_id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDeletedEvent {
    pub user_id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenceTickedEvent {
    pub total: usize,
    pub online: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoModeChangedEvent {
    pub enabled: bool,
}

/// Event envelope as delivered to subscribers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMessage {
    /// Per-bus sequence number, starting at 1
    pub seq: u64,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub event: Event,
}

impl EventMessage {
    pub fn new(seq: u64, timestamp: DateTime<Utc>, event: Event) -> Self {
        Self {
            seq,
            timestamp,
            event,
        }
    }
}
