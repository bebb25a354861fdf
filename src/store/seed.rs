//! Deterministic sample content loaded into the catalog at startup.
//!
//! Counts and derived numbers are fixed so list screens page the same way
//! on every run. Newer items always carry higher ids.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use super::Catalog;
use crate::models::announcement::Announcement;
use crate::models::post::{Author, Category, Comment, Post, PostStatus};
use crate::models::report::{Report, ReportKind, ReportStatus, ReportedContent};
use crate::models::user::{AccountStatus, Profile, UserAccount, UserRole};

pub const COMMUNITY_POSTS: u64 = 50;
pub const DEMO_AUTHOR_POSTS: u64 = 20;
pub const ANNOUNCEMENTS: u64 = 20;
pub const USERS: u64 = 50;
pub const REPORTS: u64 = 30;

/// Member whose posts fill the "my posts" screen in a fresh catalog.
pub const DEMO_AUTHOR_NAME: &str = "John Doe";
pub const DEMO_AUTHOR_EMAIL: &str = "john.doe@example.com";

const EXCERPT: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Sed do eiusmod tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, quis nostrud exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat.";

const POST_TOPICS: [&str; 6] = [
    "The Art of Programming",
    "Understanding Modern Physics",
    "Creative Writing Techniques",
    "History of Ancient Civilizations",
    "Philosophy in the Modern World",
    "Digital Art and Design",
];

const POST_AUTHORS: [&str; 6] = [
    "Alex Johnson",
    "Maria Chen",
    "James Smith",
    "Sarah Williams",
    "David Lee",
    "Emma Davis",
];

const ANNOUNCEMENT_TOPICS: [&str; 5] = [
    "New Community Guidelines",
    "Upcoming Maintenance",
    "New Feature Release",
    "Community Milestone",
    "Important Security Update",
];

const MEMBER_NAMES: [&str; 10] = [
    "Alex Johnson",
    "Maria Chen",
    "James Smith",
    "Sarah Williams",
    "David Lee",
    "Emma Davis",
    "Michael Brown",
    "Sophia Martinez",
    "Robert Taylor",
    "Olivia Anderson",
];

const REPORT_REASONS: [&str; 5] = [
    "Inappropriate content",
    "Spam",
    "Harassment",
    "Misinformation",
    "Copyright violation",
];

const REPORT_TOPICS: [&str; 5] = ["Technology", "Science", "Literature", "History", "Philosophy"];

const REPORTED_AUTHORS: [&str; 5] = [
    "Michael Brown",
    "Sophia Martinez",
    "Robert Taylor",
    "Olivia Anderson",
    "William Wilson",
];

/// Full sample catalog anchored at the current time.
pub fn catalog() -> Catalog {
    catalog_at(Utc::now())
}

pub fn catalog_at(now: DateTime<Utc>) -> Catalog {
    let mut posts = community_posts(now);
    posts.extend(demo_author_posts(now));

    let mut profiles = HashMap::new();
    profiles.insert(
        DEMO_AUTHOR_EMAIL.to_string(),
        Profile {
            name: DEMO_AUTHOR_NAME.to_string(),
            email: DEMO_AUTHOR_EMAIL.to_string(),
            ..Profile::default()
        },
    );

    Catalog {
        comments: comments(now),
        posts,
        votes: HashMap::new(),
        announcements: announcements(now),
        users: users(now),
        reports: reports(now),
        profiles,
    }
}

fn email_for(name: &str) -> String {
    format!("{}@example.com", name.to_lowercase().replace(' ', "."))
}

fn community_posts(now: DateTime<Utc>) -> Vec<Post> {
    (0..COMMUNITY_POSTS)
        .map(|i| {
            let slot = (i % 6) as usize;
            let name = POST_AUTHORS[slot];
            Post {
                id: i + 1,
                title: format!("Post {}: {}", i + 1, POST_TOPICS[slot]),
                author: Author {
                    name: name.to_string(),
                    email: email_for(name),
                },
                category: Category::ALL[slot],
                tags: Vec::new(),
                excerpt: EXCERPT.to_string(),
                content: format!("{EXCERPT}\n\n{EXCERPT}"),
                upvotes: ((i * 37 + 13) % 500) as u32,
                downvotes: ((i * 7 + 2) % 40) as u32,
                comments: ((i * 17 + 5) % 100) as u32,
                views: ((i * 131 + 90) % 2000) as u32,
                status: PostStatus::Published,
                published_at: now - Duration::hours((COMMUNITY_POSTS + DEMO_AUTHOR_POSTS - i) as i64 * 6),
            }
        })
        .collect()
}

fn demo_author_posts(now: DateTime<Utc>) -> Vec<Post> {
    (0..DEMO_AUTHOR_POSTS)
        .map(|i| {
            let slot = (i % 6) as usize;
            let id = COMMUNITY_POSTS + i + 1;
            Post {
                id,
                title: format!("My Post {}: {}", i + 1, POST_TOPICS[slot]),
                author: Author {
                    name: DEMO_AUTHOR_NAME.to_string(),
                    email: DEMO_AUTHOR_EMAIL.to_string(),
                },
                category: Category::ALL[slot],
                tags: Vec::new(),
                excerpt: EXCERPT.to_string(),
                content: format!("{EXCERPT}\n\n{EXCERPT}"),
                upvotes: ((i * 23 + 7) % 200) as u32,
                downvotes: ((i * 5 + 1) % 20) as u32,
                comments: ((i * 11 + 3) % 50) as u32,
                views: ((i * 97 + 40) % 1000) as u32,
                status: if i % 2 == 0 {
                    PostStatus::Published
                } else {
                    PostStatus::Draft
                },
                published_at: now - Duration::hours((DEMO_AUTHOR_POSTS - i) as i64 * 6),
            }
        })
        .collect()
}

fn comments(now: DateTime<Utc>) -> Vec<Comment> {
    let bodies = [
        ("Maria Chen", "This is a really insightful article. I especially appreciate the section on ethics and governance."),
        ("James Smith", "I agree. Ethics is becoming increasingly important as these systems become part of daily life."),
        ("Sarah Williams", "Curious about the timeline for some of these advancements. Any predictions for the next five years?"),
    ];
    bodies
        .iter()
        .enumerate()
        .map(|(i, (author, content))| Comment {
            id: i as u64 + 1,
            post_id: 1,
            author: author.to_string(),
            content: content.to_string(),
            created_at: now - Duration::hours(3 - i as i64),
        })
        .collect()
}

fn announcements(now: DateTime<Utc>) -> Vec<Announcement> {
    (0..ANNOUNCEMENTS)
        .map(|i| Announcement {
            id: i + 1,
            title: format!(
                "Announcement {}: {}",
                i + 1,
                ANNOUNCEMENT_TOPICS[(i % 5) as usize]
            ),
            excerpt: EXCERPT.to_string(),
            content: format!("{EXCERPT}\n\n{EXCERPT}"),
            published_at: now - Duration::days((ANNOUNCEMENTS - i) as i64),
        })
        .collect()
}

fn users(now: DateTime<Utc>) -> Vec<UserAccount> {
    (0..USERS)
        .map(|i| {
            let slot = (i % 5) as usize;
            UserAccount {
                id: i + 1,
                name: MEMBER_NAMES[(i % 10) as usize].to_string(),
                email: format!("user{}@example.com", i + 1),
                role: if slot == 4 { UserRole::Admin } else { UserRole::User },
                status: [
                    AccountStatus::Active,
                    AccountStatus::Active,
                    AccountStatus::Active,
                    AccountStatus::Suspended,
                    AccountStatus::Banned,
                ][slot],
                joined_at: now - Duration::days((USERS - i) as i64 * 9),
                last_active_at: now - Duration::days(((i * 13) % 30) as i64 + 1),
                posts_count: ((i * 7 + 3) % 50) as u32,
            }
        })
        .collect()
}

fn reports(now: DateTime<Utc>) -> Vec<Report> {
    (0..REPORTS)
        .map(|i| {
            let slot = (i % 5) as usize;
            let kind = if i % 2 == 0 {
                ReportKind::Post
            } else {
                ReportKind::Comment
            };
            let label = match kind {
                ReportKind::Post => "Post",
                ReportKind::Comment => "Comment",
            };
            Report {
                id: i + 1,
                kind,
                reason: REPORT_REASONS[slot].to_string(),
                status: [
                    ReportStatus::Pending,
                    ReportStatus::Pending,
                    ReportStatus::Pending,
                    ReportStatus::Resolved,
                    ReportStatus::Dismissed,
                ][slot],
                reporter: MEMBER_NAMES[slot].to_string(),
                content: ReportedContent {
                    id: 200 + i,
                    title: format!("{label} about {}", REPORT_TOPICS[slot]),
                    excerpt: EXCERPT.to_string(),
                    author: REPORTED_AUTHORS[slot].to_string(),
                },
                created_at: now - Duration::hours((REPORTS - i) as i64 * 5),
            }
        })
        .collect()
}
