//! In-memory content catalog shared by every handler.

pub mod seed;

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::announcement::Announcement;
use crate::models::post::{Comment, Post, Vote};
use crate::models::report::Report;
use crate::models::user::{Profile, UserAccount};

/// Every collection the forum screens read from.
#[derive(Debug, Default)]
pub struct Catalog {
    pub posts: Vec<Post>,
    pub comments: Vec<Comment>,
    /// Standing votes keyed by (post id, voter email).
    pub votes: HashMap<(u64, String), Vote>,
    pub announcements: Vec<Announcement>,
    pub users: Vec<UserAccount>,
    pub reports: Vec<Report>,
    /// Profiles keyed by member email.
    pub profiles: HashMap<String, Profile>,
}

impl Catalog {
    pub fn next_post_id(&self) -> u64 {
        self.posts.iter().map(|p| p.id).max().unwrap_or(0) + 1
    }

    pub fn next_comment_id(&self) -> u64 {
        self.comments.iter().map(|c| c.id).max().unwrap_or(0) + 1
    }

    pub fn next_announcement_id(&self) -> u64 {
        self.announcements.iter().map(|a| a.id).max().unwrap_or(0) + 1
    }

    pub fn next_report_id(&self) -> u64 {
        self.reports.iter().map(|r| r.id).max().unwrap_or(0) + 1
    }
}

/// Shared handle to the catalog.
pub type Store = Arc<RwLock<Catalog>>;

/// Create a store holding the given catalog.
pub fn create_store(catalog: Catalog) -> Store {
    Arc::new(RwLock::new(catalog))
}
