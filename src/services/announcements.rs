//! Site announcements: public listing and admin management.

use chrono::Utc;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::announcement::{Announcement, CreateAnnouncement};
use crate::models::pagination::{PageWindow, Pagination};
use crate::services::listing::{matches_search, paginate};
use crate::services::validation;
use crate::store::Store;

pub const ANNOUNCEMENTS_PER_PAGE: usize = 6;
pub const ADMIN_ANNOUNCEMENTS_PER_PAGE: usize = 5;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AnnouncementFilters {
    pub search: Option<String>,
}

/// Matching announcements, newest first.
pub async fn list(
    store: &Store,
    filters: &AnnouncementFilters,
    pagination: &Pagination,
    default_per_page: usize,
) -> Result<PageWindow<Announcement>, AppError> {
    let catalog = store.read().await;
    let mut matching: Vec<Announcement> = catalog
        .announcements
        .iter()
        .filter(|a| matches_search(filters.search.as_deref(), &[&a.title, &a.excerpt]))
        .cloned()
        .collect();
    matching.sort_by(|a, b| b.id.cmp(&a.id));
    paginate(&matching, pagination, default_per_page)
}

pub async fn find(store: &Store, id: u64) -> Result<Announcement, AppError> {
    let catalog = store.read().await;
    catalog
        .announcements
        .iter()
        .find(|a| a.id == id)
        .cloned()
        .ok_or_else(|| AppError::NotFound("Announcement not found".to_string()))
}

/// The `limit` most recent announcements.
pub async fn latest(store: &Store, limit: usize) -> Vec<Announcement> {
    let catalog = store.read().await;
    let mut all: Vec<Announcement> = catalog.announcements.clone();
    all.sort_by(|a, b| b.id.cmp(&a.id));
    all.truncate(limit);
    all
}

pub async fn delete(store: &Store, id: u64) -> Result<(), AppError> {
    let mut catalog = store.write().await;
    let before = catalog.announcements.len();
    catalog.announcements.retain(|a| a.id != id);
    if catalog.announcements.len() == before {
        return Err(AppError::NotFound("Announcement not found".to_string()));
    }
    tracing::info!(announcement_id = id, "Announcement deleted");
    Ok(())
}

pub async fn publish(store: &Store, form: &CreateAnnouncement) -> Result<Announcement, AppError> {
    validation::validate_announcement(form).into_result()?;

    let content = form.content.trim().to_string();
    let excerpt = match content.split_once("\n\n") {
        Some((first, _)) => first.to_string(),
        None => content.clone(),
    };

    let mut catalog = store.write().await;
    let announcement = Announcement {
        id: catalog.next_announcement_id(),
        title: form.title.trim().to_string(),
        excerpt,
        content,
        published_at: Utc::now(),
    };
    catalog.announcements.push(announcement.clone());
    tracing::info!(announcement_id = announcement.id, "Announcement published");
    Ok(announcement)
}
