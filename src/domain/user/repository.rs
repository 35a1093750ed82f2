use async_trait::async_trait;

use super::{DirectoryStats, FilterCriteria, NewUser, UserRecord, UserRole, UserStatus};
use crate::domain::presence::{PresenceSource, PresenceTick};
use crate::domain::DomainResult;

/// A field change applied to one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition<T> {
    /// Record after the change.
    pub user: UserRecord,
    pub from: T,
    pub to: T,
}

impl<T: PartialEq> Transition<T> {
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

pub type RoleChange = Transition<UserRole>;
pub type StatusChange = Transition<UserStatus>;

/// Owner of the user collection. Every command is applied atomically.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Full collection in insertion order.
    async fn list(&self) -> DomainResult<Vec<UserRecord>>;
    async fn get(&self, id: &str) -> DomainResult<UserRecord>;
    async fn filter(&self, criteria: &FilterCriteria) -> DomainResult<Vec<UserRecord>>;
    async fn stats(&self) -> DomainResult<DirectoryStats>;
    /// Distinct departments in first-seen order.
    async fn departments(&self) -> DomainResult<Vec<String>>;

    /// `joined_date` is the display date stamped on the new record.
    async fn create(&self, user: NewUser, joined_date: &str) -> DomainResult<UserRecord>;
    async fn change_role(&self, id: &str, role: UserRole) -> DomainResult<RoleChange>;
    async fn change_status(&self, id: &str, status: UserStatus) -> DomainResult<StatusChange>;

    async fn approve(&self, id: &str) -> DomainResult<StatusChange> {
        self.change_status(id, UserStatus::Active).await
    }

    /// Removes the record. `Ok(None)` when nothing matched.
    async fn delete(&self, id: &str) -> DomainResult<Option<UserRecord>>;

    /// Redraws `is_online` for every record.
    async fn tick_presence(&self, source: &mut dyn PresenceSource) -> DomainResult<PresenceTick>;
}
