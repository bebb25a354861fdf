//! Posts: public browsing, member authoring, votes, comments and reports.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::pagination::{PageWindow, Pagination};
use crate::models::post::{
    Author, Category, Comment, CreatePost, Post, PostDetail, PostSort, PostStatus, PostSummary,
    Vote, VoteTally,
};
use crate::models::report::{Report, ReportKind, ReportStatus, ReportedContent};
use crate::services::listing::{all_or_none, matches_search, paginate};
use crate::services::validation::{self, normalize_tags};
use crate::store::Store;

pub const POSTS_PER_PAGE: usize = 9;
pub const USER_POSTS_PER_PAGE: usize = 5;
const EXCERPT_CHARS: usize = 200;

/// Filters for the public posts screen.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PostFilters {
    pub search: Option<String>,
    #[serde(default, deserialize_with = "all_or_none")]
    pub category: Option<Category>,
    #[serde(default, deserialize_with = "all_or_none")]
    pub sort: Option<PostSort>,
}

/// Filters for the member's own posts screen.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct UserPostFilters {
    pub search: Option<String>,
    #[serde(default, deserialize_with = "all_or_none")]
    pub category: Option<Category>,
    #[serde(default, deserialize_with = "all_or_none")]
    pub status: Option<PostStatus>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryCount {
    pub category: Category,
    pub count: usize,
}

fn sort_posts(posts: &mut [&Post], sort: PostSort) {
    match sort {
        PostSort::Newest => posts.sort_by(|a, b| b.id.cmp(&a.id)),
        PostSort::Oldest => posts.sort_by(|a, b| a.id.cmp(&b.id)),
        PostSort::MostUpvotes => posts.sort_by(|a, b| b.upvotes.cmp(&a.upvotes).then(b.id.cmp(&a.id))),
        PostSort::MostComments => {
            posts.sort_by(|a, b| b.comments.cmp(&a.comments).then(b.id.cmp(&a.id)))
        }
    }
}

/// Published posts matching the filters, one page at a time.
pub async fn list(
    store: &Store,
    filters: &PostFilters,
    pagination: &Pagination,
) -> Result<PageWindow<PostSummary>, AppError> {
    let catalog = store.read().await;
    let mut matching: Vec<&Post> = catalog
        .posts
        .iter()
        .filter(|p| p.status == PostStatus::Published)
        .filter(|p| filters.category.is_none_or(|c| p.category == c))
        .filter(|p| {
            matches_search(
                filters.search.as_deref(),
                &[&p.title, &p.author.name, &p.excerpt],
            )
        })
        .collect();
    sort_posts(&mut matching, filters.sort.unwrap_or_default());
    Ok(paginate(&matching, pagination, POSTS_PER_PAGE)?.map(PostSummary::from))
}

/// A published post with its comments, oldest comment first.
pub async fn find(store: &Store, id: u64) -> Result<PostDetail, AppError> {
    let catalog = store.read().await;
    let post = catalog
        .posts
        .iter()
        .find(|p| p.id == id && p.status == PostStatus::Published)
        .cloned()
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    let mut comments: Vec<Comment> = catalog
        .comments
        .iter()
        .filter(|c| c.post_id == id)
        .cloned()
        .collect();
    comments.sort_by_key(|c| c.created_at);

    Ok(PostDetail { post, comments })
}

/// Most upvoted published posts.
pub async fn popular(store: &Store, limit: usize) -> Vec<PostSummary> {
    let catalog = store.read().await;
    let mut published: Vec<&Post> = catalog
        .posts
        .iter()
        .filter(|p| p.status == PostStatus::Published)
        .collect();
    sort_posts(&mut published, PostSort::MostUpvotes);
    published.into_iter().take(limit).map(PostSummary::from).collect()
}

/// Published post count per category, in category order.
pub async fn category_counts(store: &Store) -> Vec<CategoryCount> {
    let catalog = store.read().await;
    Category::ALL
        .into_iter()
        .map(|category| CategoryCount {
            category,
            count: catalog
                .posts
                .iter()
                .filter(|p| p.status == PostStatus::Published && p.category == category)
                .count(),
        })
        .collect()
}

/// Apply a vote with toggle semantics: repeating a vote withdraws it,
/// the opposite vote replaces it.
pub async fn vote(store: &Store, id: u64, voter: &str, vote: Vote) -> Result<VoteTally, AppError> {
    let mut catalog = store.write().await;
    let key = (id, voter.to_string());
    let previous = catalog.votes.get(&key).copied();

    let post = catalog
        .posts
        .iter_mut()
        .find(|p| p.id == id && p.status == PostStatus::Published)
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    let current = match previous {
        Some(prev) if prev == vote => None,
        _ => Some(vote),
    };
    match previous {
        Some(Vote::Upvote) => post.upvotes = post.upvotes.saturating_sub(1),
        Some(Vote::Downvote) => post.downvotes = post.downvotes.saturating_sub(1),
        None => {}
    }
    match current {
        Some(Vote::Upvote) => post.upvotes += 1,
        Some(Vote::Downvote) => post.downvotes += 1,
        None => {}
    }
    let tally = VoteTally {
        upvotes: post.upvotes,
        downvotes: post.downvotes,
        user_vote: current,
    };

    match current {
        Some(v) => {
            catalog.votes.insert(key, v);
        }
        None => {
            catalog.votes.remove(&key);
        }
    }
    Ok(tally)
}

pub async fn add_comment(
    store: &Store,
    id: u64,
    author: &str,
    content: &str,
) -> Result<Comment, AppError> {
    validation::validate_comment(content).into_result()?;

    let mut catalog = store.write().await;
    let comment_id = catalog.next_comment_id();
    let post = catalog
        .posts
        .iter_mut()
        .find(|p| p.id == id && p.status == PostStatus::Published)
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;
    post.comments += 1;

    let comment = Comment {
        id: comment_id,
        post_id: id,
        author: author.to_string(),
        content: content.trim().to_string(),
        created_at: Utc::now(),
    };
    catalog.comments.push(comment.clone());
    tracing::info!(post_id = id, comment_id, "Comment added");
    Ok(comment)
}

/// Raise a pending moderation report against a published post.
pub async fn report(
    store: &Store,
    id: u64,
    reporter: &str,
    reason: &str,
) -> Result<Report, AppError> {
    validation::validate_report_reason(reason).into_result()?;

    let mut catalog = store.write().await;
    let post = catalog
        .posts
        .iter()
        .find(|p| p.id == id && p.status == PostStatus::Published)
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    let report = Report {
        id: catalog.next_report_id(),
        kind: ReportKind::Post,
        reason: reason.trim().to_string(),
        status: ReportStatus::Pending,
        reporter: reporter.to_string(),
        content: ReportedContent {
            id: post.id,
            title: post.title.clone(),
            excerpt: post.excerpt.clone(),
            author: post.author.name.clone(),
        },
        created_at: Utc::now(),
    };
    catalog.reports.push(report.clone());
    tracing::info!(report_id = report.id, post_id = id, "Post reported");
    Ok(report)
}

/// The member's own posts, drafts included, newest first.
pub async fn list_for_author(
    store: &Store,
    email: &str,
    filters: &UserPostFilters,
    pagination: &Pagination,
) -> Result<PageWindow<PostSummary>, AppError> {
    let catalog = store.read().await;
    let mut mine: Vec<&Post> = catalog
        .posts
        .iter()
        .filter(|p| p.author.email == email)
        .filter(|p| filters.category.is_none_or(|c| p.category == c))
        .filter(|p| filters.status.is_none_or(|s| p.status == s))
        .filter(|p| matches_search(filters.search.as_deref(), &[&p.title]))
        .collect();
    sort_posts(&mut mine, PostSort::Newest);
    Ok(paginate(&mine, pagination, USER_POSTS_PER_PAGE)?.map(PostSummary::from))
}

/// Delete a post owned by `email`.
pub async fn delete_own(store: &Store, id: u64, email: &str) -> Result<(), AppError> {
    let mut catalog = store.write().await;
    let index = catalog
        .posts
        .iter()
        .position(|p| p.id == id)
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;
    if catalog.posts[index].author.email != email {
        return Err(AppError::Forbidden("You can only delete your own posts".to_string()));
    }
    catalog.posts.remove(index);
    catalog.comments.retain(|c| c.post_id != id);
    catalog.votes.retain(|(post_id, _), _| *post_id != id);
    tracing::info!(post_id = id, "Post deleted");
    Ok(())
}

fn excerpt_of(content: &str) -> String {
    let trimmed = content.trim();
    if trimmed.chars().count() <= EXCERPT_CHARS {
        return trimmed.to_string();
    }
    let cut: String = trimmed.chars().take(EXCERPT_CHARS).collect();
    format!("{}...", cut.trim_end())
}

/// Validate and publish a new post.
pub async fn publish(store: &Store, author: Author, form: &CreatePost) -> Result<Post, AppError> {
    validation::validate_post(form).into_result()?;
    let category = Category::parse(form.category.trim())
        .ok_or_else(|| AppError::Invalid(vec!["Please select a category.".to_string()]))?;

    let mut catalog = store.write().await;
    let post = Post {
        id: catalog.next_post_id(),
        title: form.title.trim().to_string(),
        author,
        category,
        tags: normalize_tags(&form.tags),
        excerpt: excerpt_of(&form.content),
        content: form.content.trim().to_string(),
        upvotes: 0,
        downvotes: 0,
        comments: 0,
        views: 0,
        status: PostStatus::Published,
        published_at: Utc::now(),
    };
    catalog.posts.push(post.clone());
    tracing::info!(post_id = post.id, "Post published");
    Ok(post)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{create_store, seed};

    fn store() -> Store {
        create_store(seed::catalog())
    }

    fn first_page() -> Pagination {
        Pagination::default()
    }

    #[tokio::test]
    async fn public_list_hides_drafts() {
        let store = store();
        let window = list(&store, &PostFilters::default(), &first_page()).await.unwrap();
        // 50 community posts plus the 10 published demo posts.
        assert_eq!(window.total, 60);
        assert_eq!(window.items.len(), POSTS_PER_PAGE);
        assert_eq!(window.total_pages, 7);
        assert!(window.items.iter().all(|p| p.status == PostStatus::Published));
    }

    #[tokio::test]
    async fn newest_first_by_default() {
        let store = store();
        let window = list(&store, &PostFilters::default(), &first_page()).await.unwrap();
        let ids: Vec<u64> = window.items.iter().map(|p| p.id).collect();
        let mut sorted = ids.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(ids, sorted);
    }

    #[tokio::test]
    async fn category_and_search_filters_combine() {
        let store = store();
        let filters = PostFilters {
            search: Some("maria".to_string()),
            category: Some(Category::Science),
            sort: None,
        };
        let window = list(&store, &filters, &first_page()).await.unwrap();
        assert!(window.total > 0);
        assert!(window
            .items
            .iter()
            .all(|p| p.category == Category::Science && p.author == "Maria Chen"));
    }

    #[tokio::test]
    async fn most_upvotes_sort_descends() {
        let store = store();
        let filters = PostFilters {
            sort: Some(PostSort::MostUpvotes),
            ..PostFilters::default()
        };
        let window = list(&store, &filters, &first_page()).await.unwrap();
        for pair in window.items.windows(2) {
            assert!(pair[0].upvotes >= pair[1].upvotes);
        }
    }

    #[tokio::test]
    async fn no_match_gives_empty_window() {
        let store = store();
        let filters = PostFilters {
            search: Some("zzz-no-such-post".to_string()),
            ..PostFilters::default()
        };
        let window = list(&store, &filters, &first_page()).await.unwrap();
        assert!(window.is_empty());
        assert!(window.page_numbers.is_empty());
    }

    #[tokio::test]
    async fn draft_detail_not_found() {
        let store = store();
        // Demo post 2 (id 52) is a draft.
        assert!(find(&store, 52).await.unwrap_err().is_not_found());
        let detail = find(&store, 1).await.unwrap();
        assert_eq!(detail.comments.len(), 3);
    }

    #[tokio::test]
    async fn vote_toggles() {
        let store = store();
        let before = find(&store, 1).await.unwrap().post;

        let t = vote(&store, 1, "a@example.com", Vote::Upvote).await.unwrap();
        assert_eq!(t.upvotes, before.upvotes + 1);
        assert_eq!(t.user_vote, Some(Vote::Upvote));

        let t = vote(&store, 1, "a@example.com", Vote::Downvote).await.unwrap();
        assert_eq!(t.upvotes, before.upvotes);
        assert_eq!(t.downvotes, before.downvotes + 1);

        let t = vote(&store, 1, "a@example.com", Vote::Downvote).await.unwrap();
        assert_eq!(t.downvotes, before.downvotes);
        assert_eq!(t.user_vote, None);
    }

    #[tokio::test]
    async fn comment_increments_count() {
        let store = store();
        let before = find(&store, 2).await.unwrap().post.comments;
        add_comment(&store, 2, "Maria Chen", "  Great read  ").await.unwrap();
        let detail = find(&store, 2).await.unwrap();
        assert_eq!(detail.post.comments, before + 1);
        assert_eq!(detail.comments.last().unwrap().content, "Great read");
    }

    #[tokio::test]
    async fn empty_comment_rejected() {
        let store = store();
        let err = add_comment(&store, 2, "Maria Chen", "  ").await.unwrap_err();
        assert!(matches!(err, AppError::Invalid(_)));
    }

    #[tokio::test]
    async fn report_creates_pending_entry() {
        let store = store();
        let report = report(&store, 3, "Maria Chen", "Spam").await.unwrap();
        assert_eq!(report.status, ReportStatus::Pending);
        assert_eq!(report.content.id, 3);
        assert_eq!(report.id, seed::REPORTS + 1);
    }

    #[tokio::test]
    async fn author_listing_includes_drafts() {
        let store = store();
        let filters = UserPostFilters {
            status: Some(PostStatus::Draft),
            ..UserPostFilters::default()
        };
        let window = list_for_author(&store, seed::DEMO_AUTHOR_EMAIL, &filters, &first_page())
            .await
            .unwrap();
        assert_eq!(window.total, 10);
        assert_eq!(window.items.len(), USER_POSTS_PER_PAGE);
    }

    #[tokio::test]
    async fn only_owner_deletes() {
        let store = store();
        let err = delete_own(&store, 1, seed::DEMO_AUTHOR_EMAIL).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
        delete_own(&store, 51, seed::DEMO_AUTHOR_EMAIL).await.unwrap();
        assert!(find(&store, 51).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn publish_validates_and_stores() {
        let store = store();
        let author = Author {
            name: "John Doe".to_string(),
            email: seed::DEMO_AUTHOR_EMAIL.to_string(),
        };
        let form = CreatePost {
            title: "Rust for web services".to_string(),
            content: "x".repeat(300),
            category: "Technology".to_string(),
            tags: vec!["rust".to_string(), "rust".to_string()],
        };
        let post = publish(&store, author.clone(), &form).await.unwrap();
        assert_eq!(post.id, seed::COMMUNITY_POSTS + seed::DEMO_AUTHOR_POSTS + 1);
        assert_eq!(post.tags, vec!["rust"]);
        assert!(post.excerpt.ends_with("..."));

        let bad = CreatePost {
            title: "x".to_string(),
            ..form
        };
        assert!(publish(&store, author, &bad).await.is_err());
    }
}
