//! Posts, comments and votes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    Technology,
    Science,
    Literature,
    History,
    Philosophy,
    Arts,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Technology,
        Category::Science,
        Category::Literature,
        Category::History,
        Category::Philosophy,
        Category::Arts,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Technology => "Technology",
            Category::Science => "Science",
            Category::Literature => "Literature",
            Category::History => "History",
            Category::Philosophy => "Philosophy",
            Category::Arts => "Arts",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == value)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Published,
    Draft,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Author {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub author: Author,
    pub category: Category,
    pub tags: Vec<String>,
    pub excerpt: String,
    pub content: String,
    pub upvotes: u32,
    pub downvotes: u32,
    pub comments: u32,
    pub views: u32,
    pub status: PostStatus,
    pub published_at: DateTime<Utc>,
}

/// Post card shown on list screens; omits the body.
#[derive(Debug, Clone, Serialize)]
pub struct PostSummary {
    pub id: u64,
    pub title: String,
    pub author: String,
    pub category: Category,
    pub excerpt: String,
    pub upvotes: u32,
    pub comments: u32,
    pub status: PostStatus,
    pub published_at: DateTime<Utc>,
}

impl From<&Post> for PostSummary {
    fn from(p: &Post) -> Self {
        Self {
            id: p.id,
            title: p.title.clone(),
            author: p.author.name.clone(),
            category: p.category,
            excerpt: p.excerpt.clone(),
            upvotes: p.upvotes,
            comments: p.comments,
            status: p.status,
            published_at: p.published_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    pub post_id: u64,
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostDetail {
    pub post: Post,
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Vote {
    Upvote,
    Downvote,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VoteRequest {
    pub vote: Vote,
}

/// Vote counts after a vote toggle, plus the caller's standing vote.
#[derive(Debug, Clone, Serialize)]
pub struct VoteTally {
    pub upvotes: u32,
    pub downvotes: u32,
    pub user_vote: Option<Vote>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateComment {
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePost {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PostSort {
    #[default]
    Newest,
    Oldest,
    MostUpvotes,
    MostComments,
}
