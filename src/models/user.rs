//! Forum roles, member accounts and profiles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Admin,
}

impl UserRole {
    /// Dashboard a signed-in member of this role lands on.
    pub fn home(self) -> &'static str {
        match self {
            UserRole::User => "/user/dashboard",
            UserRole::Admin => "/admin/dashboard",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Active,
    Suspended,
    Banned,
}

/// Member account as listed on the admin users screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub status: AccountStatus,
    pub joined_at: DateTime<Utc>,
    pub last_active_at: DateTime<Utc>,
    pub posts_count: u32,
}

/// Admin edit of a member's role or status.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct UpdateUserAccount {
    pub role: Option<UserRole>,
    pub status: Option<AccountStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Profile {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub location: String,
}
