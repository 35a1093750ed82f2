//! In-memory user directory

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use validator::Validate;

use crate::domain::{
    sample_users, DirectoryStats, DomainError, DomainResult, FilterCriteria, NewUser,
    PresenceSource, PresenceTick, RoleChange, StatusChange, Transition, UserDirectory, UserRecord,
    UserRole, UserStatus, NEVER_ACTIVE,
};

const ID_PREFIX: &str = "USR-";

/// Directory backed by a `Vec` behind a single `RwLock`.
///
/// Commands hold the write lock for their whole duration, so readers never
/// observe a half-applied change and concurrent writers are serialized.
pub struct InMemoryUserDirectory {
    users: RwLock<Vec<UserRecord>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(Vec::new()),
        }
    }

    /// Directory pre-loaded with the sample staff accounts.
    pub fn seeded() -> Self {
        Self::with_users(sample_users())
    }

    /// Loads `users`, dropping any whose id is already taken.
    pub fn with_users(users: Vec<UserRecord>) -> Self {
        let mut unique: Vec<UserRecord> = Vec::with_capacity(users.len());
        for user in users {
            if unique.iter().any(|u| u.id == user.id) {
                debug!(id = %user.id, "Skipping duplicate user id");
                continue;
            }
            unique.push(user);
        }
        Self {
            users: RwLock::new(unique),
        }
    }
}

impl Default for InMemoryUserDirectory {
    fn default() -> Self {
        Self::new()
    }
}

/// One past the highest numeric `USR-NNN` suffix in use.
fn next_user_id(users: &[UserRecord]) -> DomainResult<String> {
    let highest = users
        .iter()
        .filter_map(|u| u.id.strip_prefix(ID_PREFIX))
        .filter_map(|n| n.parse::<u32>().ok())
        .max()
        .unwrap_or(0);
    let next = highest.checked_add(1).ok_or_else(|| {
        DomainError::Conflict(format!(
            "user id space exhausted after {}{}",
            ID_PREFIX, highest
        ))
    })?;
    Ok(format!("{}{:03}", ID_PREFIX, next))
}

fn validation_error(errors: validator::ValidationErrors) -> DomainError {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect();
    messages.sort();
    DomainError::Validation(messages.join("; "))
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn list(&self) -> DomainResult<Vec<UserRecord>> {
        Ok(self.users.read().await.clone())
    }

    async fn get(&self, id: &str) -> DomainResult<UserRecord> {
        self.users
            .read()
            .await
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| DomainError::user_not_found(id))
    }

    async fn filter(&self, criteria: &FilterCriteria) -> DomainResult<Vec<UserRecord>> {
        let users = self.users.read().await;
        Ok(criteria.apply(users.iter()))
    }

    async fn stats(&self) -> DomainResult<DirectoryStats> {
        let users = self.users.read().await;
        Ok(DirectoryStats::from_records(users.iter()))
    }

    async fn departments(&self) -> DomainResult<Vec<String>> {
        let users = self.users.read().await;
        let mut departments: Vec<String> = Vec::new();
        for user in users.iter() {
            if !departments.contains(&user.department) {
                departments.push(user.department.clone());
            }
        }
        Ok(departments)
    }

    async fn create(&self, user: NewUser, joined_date: &str) -> DomainResult<UserRecord> {
        user.validate().map_err(validation_error)?;

        let mut users = self.users.write().await;
        if users
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(DomainError::Conflict(format!(
                "email {} is already registered",
                user.email
            )));
        }

        let id = next_user_id(&users)?;
        let record = UserRecord {
            id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            role: user.role,
            status: UserStatus::Pending,
            location: user.location,
            department: user.department,
            last_active: NEVER_ACTIVE.to_string(),
            reports_submitted: 0,
            verified_reports: 0,
            avatar: None,
            joined_date: joined_date.to_string(),
            permissions: user
                .role
                .default_permissions()
                .iter()
                .map(|p| p.to_string())
                .collect(),
            is_online: false,
        };
        users.push(record.clone());
        Ok(record)
    }

    async fn change_role(&self, id: &str, role: UserRole) -> DomainResult<RoleChange> {
        let mut users = self.users.write().await;
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| DomainError::user_not_found(id))?;

        let from = std::mem::replace(&mut user.role, role);
        Ok(Transition {
            user: user.clone(),
            from,
            to: role,
        })
    }

    async fn change_status(&self, id: &str, status: UserStatus) -> DomainResult<StatusChange> {
        let mut users = self.users.write().await;
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| DomainError::user_not_found(id))?;

        let from = std::mem::replace(&mut user.status, status);
        Ok(Transition {
            user: user.clone(),
            from,
            to: status,
        })
    }

    async fn delete(&self, id: &str) -> DomainResult<Option<UserRecord>> {
        let mut users = self.users.write().await;
        Ok(users
            .iter()
            .position(|u| u.id == id)
            .map(|index| users.remove(index)))
    }

    async fn tick_presence(&self, source: &mut dyn PresenceSource) -> DomainResult<PresenceTick> {
        let mut users = self.users.write().await;
        let mut online = 0;
        for user in users.iter_mut() {
            let is_online = source.next_online();
            user.set_presence(is_online);
            if is_online {
                online += 1;
            }
        }
        Ok(PresenceTick {
            total: users.len(),
            online,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ScriptedPresence, JUST_NOW};

    fn directory() -> InMemoryUserDirectory {
        InMemoryUserDirectory::seeded()
    }

    #[tokio::test]
    async fn change_role_touches_only_role() {
        let dir = directory();
        let before = dir.get("USR-003").await.unwrap();

        let change = dir.change_role("USR-003", UserRole::Admin).await.unwrap();
        assert_eq!(change.from, UserRole::Analyst);
        assert_eq!(change.to, UserRole::Admin);

        let after = dir.get("USR-003").await.unwrap();
        assert_eq!(after.role, UserRole::Admin);
        assert_eq!(UserRecord { role: before.role, ..after.clone() }, before);
        assert_eq!(change.user, after);
    }

    #[tokio::test]
    async fn change_role_is_idempotent() {
        let dir = directory();
        let first = dir.change_role("USR-002", UserRole::Viewer).await.unwrap();
        let snapshot = dir.list().await.unwrap();
        let second = dir.change_role("USR-002", UserRole::Viewer).await.unwrap();

        assert!(!first.is_noop());
        assert!(second.is_noop());
        assert_eq!(dir.list().await.unwrap(), snapshot);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found_and_changes_nothing() {
        let dir = directory();
        let snapshot = dir.list().await.unwrap();

        let err = dir
            .change_status("USR-999", UserStatus::Suspended)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(dir.change_role("USR-999", UserRole::Admin).await.is_err());
        assert!(dir.approve("USR-999").await.is_err());

        assert_eq!(dir.list().await.unwrap(), snapshot);
    }

    #[tokio::test]
    async fn approve_activates_any_status() {
        let dir = directory();
        let change = dir.approve("USR-004").await.unwrap();
        assert_eq!(change.from, UserStatus::Pending);
        assert_eq!(change.user.status, UserStatus::Active);

        let change = dir.approve("USR-007").await.unwrap();
        assert_eq!(change.from, UserStatus::Suspended);
        assert_eq!(change.to, UserStatus::Active);
    }

    #[tokio::test]
    async fn delete_is_permanent_and_idempotent() {
        let dir = directory();
        let removed = dir.delete("USR-005").await.unwrap();
        assert_eq!(removed.map(|u| u.name), Some("Dr. Rajesh Patel".to_string()));

        assert!(dir.get("USR-005").await.unwrap_err().is_not_found());
        assert_eq!(dir.list().await.unwrap().len(), 7);

        assert_eq!(dir.delete("USR-005").await.unwrap(), None);
        assert_eq!(dir.list().await.unwrap().len(), 7);

        let visible = dir.filter(&FilterCriteria::default()).await.unwrap();
        assert!(visible.iter().all(|u| u.id != "USR-005"));
    }

    #[tokio::test]
    async fn stats_track_mutations() {
        let dir = directory();
        let stats = dir.stats().await.unwrap();
        assert_eq!(stats.total, 8);
        assert_eq!(stats.active, 5);
        assert_eq!(stats.inactive, 1);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.suspended, 1);
        assert_eq!(stats.online, 5);

        dir.approve("USR-004").await.unwrap();
        dir.change_status("USR-001", UserStatus::Suspended).await.unwrap();
        dir.delete("USR-003").await.unwrap();

        let stats = dir.stats().await.unwrap();
        let recount = DirectoryStats::from_records(dir.list().await.unwrap().iter());
        assert_eq!(stats, recount);
        assert_eq!(stats.total, 7);
        assert_eq!(stats.active, 5);
        assert_eq!(stats.pending, 0);
        assert_eq!(stats.suspended, 2);
        assert_eq!(stats.inactive, 0);
    }

    #[tokio::test]
    async fn departments_in_first_seen_order() {
        let dir = directory();
        let departments = dir.departments().await.unwrap();
        assert_eq!(departments.len(), 8);
        assert_eq!(departments[0], "Administration");
        assert_eq!(departments[7], "Research");
    }

    #[tokio::test]
    async fn create_assigns_next_id_and_pending_status() {
        let dir = directory();
        let user = NewUser::new(
            "Ana Silva",
            "a.silva@oceansafe.gov",
            UserRole::Analyst,
            "Lisbon Station",
            "Research",
        );

        let created = dir.create(user, "2024-05-01").await.unwrap();
        assert_eq!(created.id, "USR-009");
        assert_eq!(created.status, UserStatus::Pending);
        assert_eq!(created.last_active, NEVER_ACTIVE);
        assert_eq!(created.joined_date, "2024-05-01");
        assert_eq!(created.permissions, vec!["view_reports", "analyze_data"]);
        assert!(!created.is_online);
        assert_eq!(dir.get("USR-009").await.unwrap(), created);
    }

    #[tokio::test]
    async fn create_rejects_invalid_and_duplicate_input() {
        let dir = directory();

        let bad_email = NewUser::new("Ana", "not-an-email", UserRole::Viewer, "Remote", "Research");
        let err = dir.create(bad_email, "2024-05-01").await.unwrap_err();
        assert_eq!(err, DomainError::Validation("invalid email format".into()));

        let no_name = NewUser::new("", "x@oceansafe.gov", UserRole::Viewer, "Remote", "Research");
        assert!(matches!(
            dir.create(no_name, "2024-05-01").await,
            Err(DomainError::Validation(_))
        ));

        let taken = NewUser::new(
            "Another Lisa",
            "L.Wang@oceansafe.gov",
            UserRole::Viewer,
            "Remote",
            "Research",
        );
        assert!(matches!(
            dir.create(taken, "2024-05-01").await,
            Err(DomainError::Conflict(_))
        ));
        assert_eq!(dir.list().await.unwrap().len(), 8);
    }

    #[tokio::test]
    async fn next_id_follows_highest_remaining() {
        let dir = directory();
        dir.delete("USR-008").await.unwrap();
        dir.delete("USR-002").await.unwrap();
        let created = dir
            .create(
                NewUser::new("New Hire", "new@oceansafe.gov", UserRole::Viewer, "Remote", "Research"),
                "2024-05-01",
            )
            .await
            .unwrap();
        assert_eq!(created.id, "USR-008");
    }

    #[tokio::test]
    async fn create_refuses_when_ids_run_out() {
        let mut users = sample_users();
        users[0].id = format!("USR-{}", u32::MAX);
        let dir = InMemoryUserDirectory::with_users(users);
        let snapshot = dir.list().await.unwrap();

        let err = dir
            .create(
                NewUser::new("New Hire", "new@oceansafe.gov", UserRole::Viewer, "Remote", "Research"),
                "2024-05-01",
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(dir.list().await.unwrap(), snapshot);
    }

    #[tokio::test]
    async fn with_users_drops_duplicate_ids() {
        let mut users = sample_users();
        users.push(users[0].clone());
        let dir = InMemoryUserDirectory::with_users(users);
        assert_eq!(dir.list().await.unwrap().len(), 8);
    }

    #[tokio::test]
    async fn tick_presence_applies_scripted_draws() {
        let dir = directory();
        let before = dir.list().await.unwrap();
        let script = vec![false, true, false, true, false, false, true, false];
        let mut source = ScriptedPresence::new(script.clone());

        let tick = dir.tick_presence(&mut source).await.unwrap();
        assert_eq!(tick, PresenceTick { total: 8, online: 3 });

        let after = dir.list().await.unwrap();
        for ((old, new), online) in before.iter().zip(&after).zip(&script) {
            assert_eq!(new.is_online, *online);
            if *online {
                assert_eq!(new.last_active, JUST_NOW);
            } else {
                assert_eq!(new.last_active, old.last_active);
            }
            assert_eq!(new.role, old.role);
            assert_eq!(new.status, old.status);
        }
        assert_eq!(dir.stats().await.unwrap().online, 3);
    }
}
