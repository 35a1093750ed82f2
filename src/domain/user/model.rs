//! User directory entity

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

/// `last_active` value written when a record is seen online.
pub const JUST_NOW: &str = "Just now";
/// `last_active` value for accounts that have never signed in.
pub const NEVER_ACTIVE: &str = "Never";

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    SuperAdmin,
    Admin,
    Operator,
    Analyst,
    Moderator,
    Viewer,
}

impl UserRole {
    pub const ALL: [UserRole; 6] = [
        Self::SuperAdmin,
        Self::Admin,
        Self::Operator,
        Self::Analyst,
        Self::Moderator,
        Self::Viewer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::Admin => "admin",
            Self::Operator => "operator",
            Self::Analyst => "analyst",
            Self::Moderator => "moderator",
            Self::Viewer => "viewer",
        }
    }

    /// Upper-cased display name, e.g. `SUPER ADMIN`.
    pub fn label(&self) -> String {
        self.as_str().replacen('_', " ", 1).to_uppercase()
    }

    /// Human readable summary of what the role grants. Display only,
    /// nothing enforces it.
    pub fn description(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "Full system access and control",
            Self::Admin => "Administrative privileges and user management",
            Self::Operator => "Field operations and report management",
            Self::Analyst => "Data analysis and reporting tools",
            Self::Moderator => "Community management and content moderation",
            Self::Viewer => "Read-only access to reports and data",
        }
    }

    /// Permission tags granted to a freshly created account with this role.
    pub fn default_permissions(&self) -> &'static [&'static str] {
        match self {
            Self::SuperAdmin => &["all"],
            Self::Admin => &["manage_users", "view_reports", "approve_reports"],
            Self::Operator => &["submit_reports"],
            Self::Analyst => &["view_reports", "analyze_data"],
            Self::Moderator => &["moderate_reports", "community_management"],
            Self::Viewer => &["view_reports"],
        }
    }
}

impl Default for UserRole {
    fn default() -> Self {
        Self::Viewer
    }
}

impl FromStr for UserRole {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| DomainError::InvalidEnum {
                kind: "role",
                value: s.to_string(),
            })
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Active,
    Inactive,
    Pending,
    Suspended,
}

impl UserStatus {
    pub const ALL: [UserStatus; 4] = [
        Self::Active,
        Self::Inactive,
        Self::Pending,
        Self::Suspended,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Pending => "pending",
            Self::Suspended => "suspended",
        }
    }

    /// Past-tense verb used in status change notifications.
    pub fn action_verb(&self) -> &'static str {
        match self {
            Self::Active => "activated",
            Self::Suspended => "suspended",
            other => other.as_str(),
        }
    }

    /// Status-specific actions offered for a record in this status.
    /// Advisory: the store accepts any transition.
    pub fn available_actions(&self) -> &'static [LifecycleAction] {
        match self {
            Self::Pending => &[LifecycleAction::Approve],
            Self::Active => &[LifecycleAction::Suspend],
            Self::Suspended => &[LifecycleAction::Activate],
            Self::Inactive => &[],
        }
    }
}

impl FromStr for UserStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::InvalidEnum {
                kind: "status",
                value: s.to_string(),
            })
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status transition offered to operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleAction {
    Approve,
    Suspend,
    Activate,
}

impl LifecycleAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Suspend => "suspend",
            Self::Activate => "activate",
        }
    }

    /// Status the record ends up in.
    pub fn target_status(&self) -> UserStatus {
        match self {
            Self::Approve | Self::Activate => UserStatus::Active,
            Self::Suspend => UserStatus::Suspended,
        }
    }
}

/// User directory record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub location: String,
    pub department: String,
    pub last_active: String,
    pub reports_submitted: u32,
    pub verified_reports: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub joined_date: String,
    #[serde(default)]
    pub permissions: Vec<String>,
    pub is_online: bool,
}

impl UserRecord {
    /// First letter of each word in the name, e.g. `Dr. Sarah Chen` -> `DSC`.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .collect()
    }

    /// Share of submitted reports that were verified, in percent.
    pub fn verification_rate(&self) -> Option<f64> {
        if self.reports_submitted == 0 {
            return None;
        }
        Some(f64::from(self.verified_reports) / f64::from(self.reports_submitted) * 100.0)
    }

    /// Marks the record as seen (or not) by the latest presence draw.
    pub fn set_presence(&mut self, online: bool) {
        self.is_online = online;
        if online {
            self.last_active = JUST_NOW.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> UserRecord {
        UserRecord {
            id: "USR-001".into(),
            name: "Dr. Sarah Chen".into(),
            email: "sarah.chen@oceansafe.gov".into(),
            phone: "+1-555-0101".into(),
            role: UserRole::SuperAdmin,
            status: UserStatus::Active,
            location: "Pacific Coast HQ".into(),
            department: "Administration".into(),
            last_active: "5 minutes ago".into(),
            reports_submitted: 47,
            verified_reports: 45,
            avatar: None,
            joined_date: "2023-01-15".into(),
            permissions: vec!["all".into()],
            is_online: false,
        }
    }

    #[test]
    fn role_parses_wire_names_only() {
        for role in UserRole::ALL {
            assert_eq!(role.as_str().parse::<UserRole>().unwrap(), role);
        }
        let err = "root".parse::<UserRole>().unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidEnum {
                kind: "role",
                value: "root".into()
            }
        );
        assert!("Admin".parse::<UserRole>().is_err());
    }

    #[test]
    fn status_rejects_unknown_values() {
        assert_eq!("pending".parse::<UserStatus>().unwrap(), UserStatus::Pending);
        assert!("deleted".parse::<UserStatus>().is_err());
    }

    #[test]
    fn role_label_and_description() {
        assert_eq!(UserRole::SuperAdmin.label(), "SUPER ADMIN");
        assert_eq!(UserRole::Viewer.label(), "VIEWER");
        assert_eq!(
            UserRole::Analyst.description(),
            "Data analysis and reporting tools"
        );
    }

    #[test]
    fn serde_uses_snake_case_enums() {
        let json = serde_json::to_value(sample_user()).unwrap();
        assert_eq!(json["role"], "super_admin");
        assert_eq!(json["status"], "active");
        assert_eq!(json["isOnline"], false);
        assert!(json.get("avatar").is_none());
    }

    #[test]
    fn action_verbs() {
        assert_eq!(UserStatus::Active.action_verb(), "activated");
        assert_eq!(UserStatus::Suspended.action_verb(), "suspended");
        assert_eq!(UserStatus::Pending.action_verb(), "pending");
    }

    #[test]
    fn actions_follow_status() {
        assert_eq!(
            UserStatus::Pending.available_actions(),
            &[LifecycleAction::Approve]
        );
        assert_eq!(
            UserStatus::Active.available_actions()[0].target_status(),
            UserStatus::Suspended
        );
        assert_eq!(
            UserStatus::Suspended.available_actions()[0].target_status(),
            UserStatus::Active
        );
        assert!(UserStatus::Inactive.available_actions().is_empty());
    }

    #[test]
    fn initials_and_verification_rate() {
        let mut user = sample_user();
        assert_eq!(user.initials(), "DSC");

        let rate = user.verification_rate().unwrap();
        assert!((rate - 95.744).abs() < 0.01);

        user.reports_submitted = 0;
        user.verified_reports = 0;
        assert_eq!(user.verification_rate(), None);
    }

    #[test]
    fn presence_only_touches_last_active_when_online() {
        let mut user = sample_user();
        user.set_presence(false);
        assert!(!user.is_online);
        assert_eq!(user.last_active, "5 minutes ago");

        user.set_presence(true);
        assert!(user.is_online);
        assert_eq!(user.last_active, JUST_NOW);
    }
}
