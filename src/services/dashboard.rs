//! Dashboard statistics aggregation for the home page and both dashboards.

use serde::Serialize;

use crate::models::announcement::Announcement;
use crate::models::post::{PostStatus, PostSummary};
use crate::models::report::{Report, ReportStatus};
use crate::models::user::UserAccount;
use crate::services::posts::CategoryCount;
use crate::services::{accounts, announcements, posts, reports};
use crate::store::Store;

const HOME_ANNOUNCEMENTS: usize = 4;
const HOME_POPULAR_POSTS: usize = 3;
const ADMIN_RECENT_REPORTS: usize = 5;
const ADMIN_NEWEST_USERS: usize = 5;
const USER_RECENT_POSTS: usize = 5;

/// Landing page content.
#[derive(Debug, Serialize)]
pub struct HomeSummary {
    pub categories: Vec<CategoryCount>,
    pub announcements: Vec<Announcement>,
    pub popular_posts: Vec<PostSummary>,
}

/// Totals over the caller's own posts.
#[derive(Debug, Serialize, Default, PartialEq)]
pub struct UserStats {
    pub posts: usize,
    pub published: usize,
    pub drafts: usize,
    pub views: u64,
    pub upvotes: u64,
    pub comments: u64,
}

#[derive(Debug, Serialize)]
pub struct UserDashboard {
    pub stats: UserStats,
    pub recent_posts: Vec<PostSummary>,
}

/// Site-wide totals for the admin overview.
#[derive(Debug, Serialize, PartialEq)]
pub struct AdminTotals {
    pub users: usize,
    pub posts: usize,
    /// Votes plus comments across every post.
    pub interactions: u64,
    pub pending_reports: usize,
}

#[derive(Debug, Serialize)]
pub struct AdminDashboard {
    pub totals: AdminTotals,
    pub recent_reports: Vec<Report>,
    pub newest_users: Vec<UserAccount>,
}

/// Fetch the landing page sections concurrently.
pub async fn home(store: &Store) -> HomeSummary {
    let (categories, announcements, popular_posts) = tokio::join!(
        posts::category_counts(store),
        announcements::latest(store, HOME_ANNOUNCEMENTS),
        posts::popular(store, HOME_POPULAR_POSTS),
    );
    HomeSummary {
        categories,
        announcements,
        popular_posts,
    }
}

async fn user_stats(store: &Store, email: &str) -> UserStats {
    let catalog = store.read().await;
    catalog
        .posts
        .iter()
        .filter(|p| p.author.email == email)
        .fold(UserStats::default(), |mut stats, p| {
            stats.posts += 1;
            match p.status {
                PostStatus::Published => stats.published += 1,
                PostStatus::Draft => stats.drafts += 1,
            }
            stats.views += u64::from(p.views);
            stats.upvotes += u64::from(p.upvotes);
            stats.comments += u64::from(p.comments);
            stats
        })
}

async fn recent_posts(store: &Store, email: &str) -> Vec<PostSummary> {
    let catalog = store.read().await;
    let mut mine: Vec<PostSummary> = catalog
        .posts
        .iter()
        .filter(|p| p.author.email == email)
        .map(PostSummary::from)
        .collect();
    mine.sort_by(|a, b| b.id.cmp(&a.id));
    mine.truncate(USER_RECENT_POSTS);
    mine
}

pub async fn user(store: &Store, email: &str) -> UserDashboard {
    let (stats, recent_posts) = tokio::join!(user_stats(store, email), recent_posts(store, email));
    UserDashboard {
        stats,
        recent_posts,
    }
}

async fn admin_totals(store: &Store) -> AdminTotals {
    let catalog = store.read().await;
    AdminTotals {
        users: catalog.users.len(),
        posts: catalog.posts.len(),
        interactions: catalog
            .posts
            .iter()
            .map(|p| u64::from(p.upvotes) + u64::from(p.downvotes) + u64::from(p.comments))
            .sum(),
        pending_reports: catalog
            .reports
            .iter()
            .filter(|r| r.status == ReportStatus::Pending)
            .count(),
    }
}

pub async fn admin(store: &Store) -> AdminDashboard {
    let (totals, recent_reports, newest_users) = tokio::join!(
        admin_totals(store),
        reports::recent_pending(store, ADMIN_RECENT_REPORTS),
        accounts::newest(store, ADMIN_NEWEST_USERS),
    );
    AdminDashboard {
        totals,
        recent_reports,
        newest_users,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{create_store, seed};

    fn store() -> Store {
        create_store(seed::catalog())
    }

    #[tokio::test]
    async fn home_sections_are_bounded() {
        let summary = home(&store()).await;
        assert_eq!(summary.categories.len(), 6);
        assert_eq!(summary.announcements.len(), HOME_ANNOUNCEMENTS);
        assert_eq!(summary.popular_posts.len(), HOME_POPULAR_POSTS);
        assert!(summary.popular_posts[0].upvotes >= summary.popular_posts[2].upvotes);
    }

    #[tokio::test]
    async fn home_category_counts_cover_published_posts() {
        let summary = home(&store()).await;
        let total: usize = summary.categories.iter().map(|c| c.count).sum();
        assert_eq!(total, 60);
    }

    #[tokio::test]
    async fn user_stats_split_drafts() {
        let dashboard = user(&store(), seed::DEMO_AUTHOR_EMAIL).await;
        assert_eq!(dashboard.stats.posts, 20);
        assert_eq!(dashboard.stats.published, 10);
        assert_eq!(dashboard.stats.drafts, 10);
        assert_eq!(dashboard.recent_posts.len(), USER_RECENT_POSTS);
        assert_eq!(dashboard.recent_posts[0].id, 70);
    }

    #[tokio::test]
    async fn stranger_has_empty_stats() {
        let dashboard = user(&store(), "nobody@example.com").await;
        assert_eq!(dashboard.stats, UserStats::default());
        assert!(dashboard.recent_posts.is_empty());
    }

    #[tokio::test]
    async fn admin_totals_count_pending() {
        let dashboard = admin(&store()).await;
        assert_eq!(dashboard.totals.users, 50);
        assert_eq!(dashboard.totals.posts, 70);
        assert_eq!(dashboard.totals.pending_reports, 18);
        assert!(dashboard.totals.interactions > 0);
        assert_eq!(dashboard.recent_reports.len(), ADMIN_RECENT_REPORTS);
        assert_eq!(dashboard.newest_users[0].id, 50);
    }
}
