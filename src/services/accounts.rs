//! Member accounts as managed from the admin users screen.

use serde::Deserialize;

use crate::errors::AppError;
use crate::models::pagination::{PageWindow, Pagination};
use crate::models::user::{AccountStatus, UpdateUserAccount, UserAccount, UserRole};
use crate::services::listing::{all_or_none, matches_search, paginate};
use crate::store::Store;

pub const USERS_PER_PAGE: usize = 10;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AccountFilters {
    pub search: Option<String>,
    #[serde(default, deserialize_with = "all_or_none")]
    pub role: Option<UserRole>,
    #[serde(default, deserialize_with = "all_or_none")]
    pub status: Option<AccountStatus>,
}

/// Accounts matching the filters, most recently joined first.
pub async fn list(
    store: &Store,
    filters: &AccountFilters,
    pagination: &Pagination,
) -> Result<PageWindow<UserAccount>, AppError> {
    let catalog = store.read().await;
    let mut matching: Vec<UserAccount> = catalog
        .users
        .iter()
        .filter(|u| filters.role.is_none_or(|r| u.role == r))
        .filter(|u| filters.status.is_none_or(|s| u.status == s))
        .filter(|u| matches_search(filters.search.as_deref(), &[&u.name, &u.email]))
        .cloned()
        .collect();
    matching.sort_by(|a, b| b.id.cmp(&a.id));
    paginate(&matching, pagination, USERS_PER_PAGE)
}

/// Apply a role and/or status change to one account.
pub async fn update(
    store: &Store,
    id: u64,
    changes: &UpdateUserAccount,
) -> Result<UserAccount, AppError> {
    if changes.role.is_none() && changes.status.is_none() {
        return Err(AppError::Validation(
            "Nothing to update: provide a role or a status".to_string(),
        ));
    }

    let mut catalog = store.write().await;
    let account = catalog
        .users
        .iter_mut()
        .find(|u| u.id == id)
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    if let Some(role) = changes.role {
        account.role = role;
    }
    if let Some(status) = changes.status {
        account.status = status;
    }
    tracing::info!(
        user_id = id,
        role = ?account.role,
        status = ?account.status,
        "User account updated"
    );
    Ok(account.clone())
}

/// Newest accounts, for the admin overview.
pub async fn newest(store: &Store, limit: usize) -> Vec<UserAccount> {
    let catalog = store.read().await;
    let mut all = catalog.users.clone();
    all.sort_by(|a, b| b.id.cmp(&a.id));
    all.truncate(limit);
    all
}
