//! Directory service: application-layer orchestration
//!
//! All user directory commands go through here: it applies the change to
//! the store and then publishes the matching notification event.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::{
    DirectoryStats, DomainResult, FilterCriteria, NewUser, PresenceSource, PresenceTick,
    RoleChange, StatusChange, UserDirectory, UserRecord, UserRole, UserStatus,
};
use crate::notifications::{
    Event, EventMessage, PresenceTickedEvent, RoleChangedEvent, SharedEventBus,
    StatusChangedEvent, UserApprovedEvent, UserCreatedEvent, UserDeletedEvent,
};
use crate::shared::SharedClock;

/// Display format for `joined_date`.
const JOINED_DATE_FORMAT: &str = "%Y-%m-%d";

/// Directory service. Owns no state of its own, only wiring.
///
/// Events are published after the store call returns, so a subscriber
/// that re-reads on receipt sees the new state. Commands run one at a
/// time through `commands`, so event sequence numbers follow the order
/// in which changes were applied.
pub struct DirectoryService {
    directory: Arc<dyn UserDirectory>,
    events: SharedEventBus,
    clock: SharedClock,
    commands: Mutex<()>,
}

impl DirectoryService {
    pub fn new(directory: Arc<dyn UserDirectory>, events: SharedEventBus, clock: SharedClock) -> Self {
        Self {
            directory,
            events,
            clock,
            commands: Mutex::new(()),
        }
    }

    pub fn events(&self) -> &SharedEventBus {
        &self.events
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn list(&self) -> DomainResult<Vec<UserRecord>> {
        self.directory.list().await
    }

    pub async fn get(&self, id: &str) -> DomainResult<UserRecord> {
        self.directory.get(id).await
    }

    pub async fn filter(&self, criteria: &FilterCriteria) -> DomainResult<Vec<UserRecord>> {
        let users = self.directory.filter(criteria).await?;
        debug!(?criteria, matched = users.len(), "Directory filtered");
        Ok(users)
    }

    pub async fn stats(&self) -> DomainResult<DirectoryStats> {
        self.directory.stats().await
    }

    pub async fn departments(&self) -> DomainResult<Vec<String>> {
        self.directory.departments().await
    }

    // ── Commands ────────────────────────────────────────────────

    pub async fn create(&self, user: NewUser) -> DomainResult<UserRecord> {
        let _guard = self.commands.lock().await;
        let joined = self.clock.now().format(JOINED_DATE_FORMAT).to_string();
        let created = self.directory.create(user, &joined).await.map_err(|e| {
            warn!(error = %e, "Rejected new user");
            e
        })?;

        info!(user_id = %created.id, role = %created.role, "User created");
        self.events.publish(Event::UserCreated(UserCreatedEvent {
            user: created.clone(),
        }));
        Ok(created)
    }

    pub async fn change_role(&self, id: &str, role: UserRole) -> DomainResult<RoleChange> {
        let _guard = self.commands.lock().await;
        let change = self.directory.change_role(id, role).await?;

        info!(user_id = id, from = %change.from, to = %change.to, "Role changed");
        self.events.publish(Event::RoleChanged(RoleChangedEvent {
            user_id: change.user.id.clone(),
            name: change.user.name.clone(),
            old_role: change.from,
            new_role: change.to,
        }));
        Ok(change)
    }

    pub async fn change_status(&self, id: &str, status: UserStatus) -> DomainResult<StatusChange> {
        let _guard = self.commands.lock().await;
        let change = self.directory.change_status(id, status).await?;
        self.publish_status_change(&change);
        Ok(change)
    }

    /// Activates the account. Publishes the status change followed by an
    /// approval notice.
    pub async fn approve(&self, id: &str) -> DomainResult<StatusChange> {
        let _guard = self.commands.lock().await;
        let change = self.directory.approve(id).await?;
        if change.from != UserStatus::Pending {
            debug!(user_id = id, from = %change.from, "Approving a non-pending user");
        }
        self.publish_status_change(&change);
        self.events.publish(Event::UserApproved(UserApprovedEvent {
            user_id: change.user.id.clone(),
            name: change.user.name.clone(),
        }));
        Ok(change)
    }

    /// Removes the record. Deleting an absent id is a silent no-op.
    pub async fn delete(&self, id: &str) -> DomainResult<Option<UserRecord>> {
        let _guard = self.commands.lock().await;
        let removed = self.directory.delete(id).await?;
        match &removed {
            Some(user) => {
                info!(user_id = id, "User deleted");
                self.events.publish(Event::UserDeleted(UserDeletedEvent {
                    user_id: user.id.clone(),
                    name: user.name.clone(),
                }));
            }
            None => debug!(user_id = id, "Delete skipped, no such user"),
        }
        Ok(removed)
    }

    pub async fn tick_presence(&self, source: &mut dyn PresenceSource) -> DomainResult<PresenceTick> {
        let _guard = self.commands.lock().await;
        let tick = self.directory.tick_presence(source).await?;
        debug!(total = tick.total, online = tick.online, "Presence redrawn");
        self.events.publish(Event::PresenceTicked(PresenceTickedEvent {
            total: tick.total,
            online: tick.online,
        }));
        Ok(tick)
    }

    /// Publish an arbitrary event through this service's bus.
    pub fn publish(&self, event: Event) -> EventMessage {
        self.events.publish(event)
    }

    fn publish_status_change(&self, change: &StatusChange) {
        info!(user_id = %change.user.id, from = %change.from, to = %change.to, "Status changed");
        self.events.publish(Event::StatusChanged(StatusChangedEvent {
            user_id: change.user.id.clone(),
            name: change.user.name.clone(),
            old_status: change.from,
            new_status: change.to,
        }));
    }
}
