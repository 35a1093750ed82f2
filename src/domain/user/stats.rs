use serde::Serialize;

use super::{UserRecord, UserStatus};

/// Headline counts over the whole directory, filters ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DirectoryStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub pending: usize,
    pub suspended: usize,
    pub online: usize,
}

impl DirectoryStats {
    pub fn from_records<'a, I>(users: I) -> Self
    where
        I: IntoIterator<Item = &'a UserRecord>,
    {
        users.into_iter().fold(Self::default(), |mut stats, user| {
            stats.total += 1;
            match user.status {
                UserStatus::Active => stats.active += 1,
                UserStatus::Inactive => stats.inactive += 1,
                UserStatus::Pending => stats.pending += 1,
                UserStatus::Suspended => stats.suspended += 1,
            }
            if user.is_online {
                stats.online += 1;
            }
            stats
        })
    }
}
