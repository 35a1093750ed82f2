//! Sample accounts loaded at startup.

use super::{UserRecord, UserRole, UserStatus};

struct Seed {
    id: &'static str,
    name: &'static str,
    email: &'static str,
    phone: &'static str,
    role: UserRole,
    status: UserStatus,
    location: &'static str,
    department: &'static str,
    last_active: &'static str,
    reports_submitted: u32,
    verified_reports: u32,
    avatar: Option<&'static str>,
    joined_date: &'static str,
    permissions: &'static [&'static str],
    is_online: bool,
}

const SEEDS: &[Seed] = &[
    Seed {
        id: "USR-001",
        name: "Dr. Sarah Chen",
        email: "sarah.chen@oceansafe.gov",
        phone: "+1-555-0101",
        role: UserRole::SuperAdmin,
        status: UserStatus::Active,
        location: "Pacific Coast HQ",
        department: "Administration",
        last_active: "5 minutes ago",
        reports_submitted: 47,
        verified_reports: 45,
        avatar: Some("/avatars/sarah.jpg"),
        joined_date: "2023-01-15",
        permissions: &["all"],
        is_online: true,
    },
    Seed {
        id: "USR-002",
        name: "Marcus Rodriguez",
        email: "m.rodriguez@oceansafe.gov",
        phone: "+1-555-0102",
        role: UserRole::Admin,
        status: UserStatus::Active,
        location: "Hawaii Station",
        department: "Operations",
        last_active: "2 hours ago",
        reports_submitted: 23,
        verified_reports: 22,
        avatar: None,
        joined_date: "2023-02-20",
        permissions: &["manage_users", "view_reports", "approve_reports"],
        is_online: true,
    },
    Seed {
        id: "USR-003",
        name: "Emma Thompson",
        email: "emma.t@oceansafe.gov",
        phone: "+1-555-0103",
        role: UserRole::Analyst,
        status: UserStatus::Inactive,
        location: "California Coast",
        department: "Data Analysis",
        last_active: "1 day ago",
        reports_submitted: 89,
        verified_reports: 87,
        avatar: None,
        joined_date: "2023-03-10",
        permissions: &["view_reports", "analyze_data"],
        is_online: false,
    },
    Seed {
        id: "USR-004",
        name: "James Park",
        email: "j.park@oceansafe.gov",
        phone: "+1-555-0104",
        role: UserRole::Operator,
        status: UserStatus::Pending,
        location: "Remote",
        department: "Field Operations",
        last_active: "Never",
        reports_submitted: 0,
        verified_reports: 0,
        avatar: None,
        joined_date: "2024-01-05",
        permissions: &["submit_reports"],
        is_online: false,
    },
    Seed {
        id: "USR-005",
        name: "Dr. Rajesh Patel",
        email: "r.patel@oceansafe.gov",
        phone: "+1-555-0105",
        role: UserRole::Analyst,
        status: UserStatus::Active,
        location: "Mumbai Research Center",
        department: "Marine Biology",
        last_active: "30 minutes ago",
        reports_submitted: 156,
        verified_reports: 152,
        avatar: None,
        joined_date: "2022-11-12",
        permissions: &["view_reports", "analyze_data", "research_access"],
        is_online: true,
    },
    Seed {
        id: "USR-006",
        name: "Lisa Wang",
        email: "l.wang@oceansafe.gov",
        phone: "+1-555-0106",
        role: UserRole::Moderator,
        status: UserStatus::Active,
        location: "Singapore Station",
        department: "Community Relations",
        last_active: "1 hour ago",
        reports_submitted: 34,
        verified_reports: 32,
        avatar: None,
        joined_date: "2023-06-18",
        permissions: &["moderate_reports", "community_management"],
        is_online: true,
    },
    Seed {
        id: "USR-007",
        name: "Captain Torres",
        email: "torres@oceansafe.gov",
        phone: "+1-555-0107",
        role: UserRole::Operator,
        status: UserStatus::Suspended,
        location: "Atlantic Fleet",
        department: "Maritime Operations",
        last_active: "5 days ago",
        reports_submitted: 78,
        verified_reports: 70,
        avatar: None,
        joined_date: "2023-04-22",
        permissions: &["submit_reports", "field_operations"],
        is_online: false,
    },
    Seed {
        id: "USR-008",
        name: "Dr. Priya Sharma",
        email: "p.sharma@oceansafe.gov",
        phone: "+1-555-0108",
        role: UserRole::Viewer,
        status: UserStatus::Active,
        location: "Chennai Coastal Lab",
        department: "Research",
        last_active: "3 hours ago",
        reports_submitted: 12,
        verified_reports: 10,
        avatar: None,
        joined_date: "2024-02-14",
        permissions: &["view_reports"],
        is_online: true,
    },
];

impl Seed {
    fn to_record(&self) -> UserRecord {
        UserRecord {
            id: self.id.to_string(),
            name: self.name.to_string(),
            email: self.email.to_string(),
            phone: self.phone.to_string(),
            role: self.role,
            status: self.status,
            location: self.location.to_string(),
            department: self.department.to_string(),
            last_active: self.last_active.to_string(),
            reports_submitted: self.reports_submitted,
            verified_reports: self.verified_reports,
            avatar: self.avatar.map(String::from),
            joined_date: self.joined_date.to_string(),
            permissions: self.permissions.iter().map(|p| p.to_string()).collect(),
            is_online: self.is_online,
        }
    }
}

/// The eight staff accounts the dashboard starts with.
pub fn sample_users() -> Vec<UserRecord> {
    SEEDS.iter().map(Seed::to_record).collect()
}
