//! Directory filter criteria
//!
//! A record is visible when the search term matches any of its text
//! fields AND every categorical selector accepts it.

use std::str::FromStr;

use serde::Serialize;

use super::{UserRecord, UserRole, UserStatus};

/// Sentinel accepted by every selector.
pub const ALL: &str = "all";

/// Categorical filter: everything, or one exact value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Selector<T> {
    All,
    Only(T),
}

impl<T> Default for Selector<T> {
    fn default() -> Self {
        Selector::All
    }
}

impl<T: PartialEq> Selector<T> {
    pub fn accepts(&self, value: &T) -> bool {
        match self {
            Selector::All => true,
            Selector::Only(expected) => expected == value,
        }
    }
}

impl<T: FromStr> FromStr for Selector<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL {
            Ok(Selector::All)
        } else {
            s.parse().map(Selector::Only)
        }
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Selector<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Selector::All => write!(f, "{}", ALL),
            Selector::Only(value) => write!(f, "{}", value),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterCriteria {
    pub search_term: String,
    pub role: Selector<UserRole>,
    pub status: Selector<UserStatus>,
    pub department: Selector<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn role(mut self, role: UserRole) -> Self {
        self.role = Selector::Only(role);
        self
    }

    pub fn status(mut self, status: UserStatus) -> Self {
        self.status = Selector::Only(status);
        self
    }

    pub fn department(mut self, department: impl Into<String>) -> Self {
        self.department = Selector::Only(department.into());
        self
    }

    pub fn matches(&self, user: &UserRecord) -> bool {
        self.matches_lowered(user, &self.search_term.to_lowercase())
    }

    /// Records accepted by these criteria, in collection order.
    pub fn apply<'a, I>(&self, users: I) -> Vec<UserRecord>
    where
        I: IntoIterator<Item = &'a UserRecord>,
    {
        let needle = self.search_term.to_lowercase();
        users
            .into_iter()
            .filter(|user| self.matches_lowered(user, &needle))
            .cloned()
            .collect()
    }

    fn matches_lowered(&self, user: &UserRecord, needle: &str) -> bool {
        matches_search(user, needle)
            && self.role.accepts(&user.role)
            && self.status.accepts(&user.status)
            && self.department.accepts(&user.department)
    }
}

/// `needle` must already be lower-cased.
fn matches_search(user: &UserRecord, needle: &str) -> bool {
    [&user.name, &user.email, &user.location, &user.department]
        .into_iter()
        .any(|field| field.to_lowercase().contains(needle))
}
