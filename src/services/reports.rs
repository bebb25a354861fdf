//! Moderation queue: listing and resolving reports.

use serde::Deserialize;

use crate::errors::AppError;
use crate::models::pagination::{PageWindow, Pagination};
use crate::models::report::{Report, ReportKind, ReportStatus};
use crate::services::listing::{all_or_none, matches_search, paginate};
use crate::store::Store;

pub const REPORTS_PER_PAGE: usize = 10;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ReportFilters {
    pub search: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "all_or_none")]
    pub kind: Option<ReportKind>,
    #[serde(default, deserialize_with = "all_or_none")]
    pub status: Option<ReportStatus>,
}

/// Reports matching the filters, newest first.
pub async fn list(
    store: &Store,
    filters: &ReportFilters,
    pagination: &Pagination,
) -> Result<PageWindow<Report>, AppError> {
    let catalog = store.read().await;
    let mut matching: Vec<Report> = catalog
        .reports
        .iter()
        .filter(|r| filters.kind.is_none_or(|k| r.kind == k))
        .filter(|r| filters.status.is_none_or(|s| r.status == s))
        .filter(|r| {
            matches_search(
                filters.search.as_deref(),
                &[&r.content.title, &r.reason, &r.reporter, &r.content.author],
            )
        })
        .cloned()
        .collect();
    matching.sort_by(|a, b| b.id.cmp(&a.id));
    paginate(&matching, pagination, REPORTS_PER_PAGE)
}

/// Most recent reports still awaiting a decision.
pub async fn recent_pending(store: &Store, limit: usize) -> Vec<Report> {
    let catalog = store.read().await;
    let mut pending: Vec<Report> = catalog
        .reports
        .iter()
        .filter(|r| r.status == ReportStatus::Pending)
        .cloned()
        .collect();
    pending.sort_by(|a, b| b.id.cmp(&a.id));
    pending.truncate(limit);
    pending
}

/// Move a pending report to `Resolved` or `Dismissed`. Decided reports
/// are final.
pub async fn decide(store: &Store, id: u64, outcome: ReportStatus) -> Result<Report, AppError> {
    if outcome == ReportStatus::Pending {
        return Err(AppError::InvalidTransition(
            "A report cannot be moved back to pending".to_string(),
        ));
    }

    let mut catalog = store.write().await;
    let report = catalog
        .reports
        .iter_mut()
        .find(|r| r.id == id)
        .ok_or_else(|| AppError::NotFound("Report not found".to_string()))?;

    if report.status != ReportStatus::Pending {
        return Err(AppError::InvalidTransition(format!(
            "Report {id} is already {:?}",
            report.status
        )));
    }
    report.status = outcome;
    tracing::info!(report_id = id, status = ?outcome, "Report decided");
    Ok(report.clone())
}

pub async fn resolve(store: &Store, id: u64) -> Result<Report, AppError> {
    decide(store, id, ReportStatus::Resolved).await
}

pub async fn dismiss(store: &Store, id: u64) -> Result<Report, AppError> {
    decide(store, id, ReportStatus::Dismissed).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{create_store, seed};

    fn store() -> Store {
        create_store(seed::catalog())
    }

    #[tokio::test]
    async fn thirty_reports_in_three_pages() {
        let store = store();
        let window = list(&store, &ReportFilters::default(), &Pagination::default())
            .await
            .unwrap();
        assert_eq!(window.total, 30);
        assert_eq!(window.total_pages, 3);
        assert_eq!(window.items[0].id, 30);
    }

    #[tokio::test]
    async fn type_filter_from_query_name() {
        let filters: ReportFilters =
            serde_json::from_str(r#"{"type":"comment","status":"all"}"#).unwrap();
        assert_eq!(filters.kind, Some(ReportKind::Comment));
        assert!(filters.status.is_none());

        let store = store();
        let window = list(&store, &filters, &Pagination::default()).await.unwrap();
        assert_eq!(window.total, 15);
    }

    #[tokio::test]
    async fn search_covers_reporter_and_content_author() {
        let store = store();
        let by_reporter = ReportFilters {
            search: Some("emma davis".to_string()),
            ..ReportFilters::default()
        };
        // No report is raised by Emma Davis.
        assert_eq!(list(&store, &by_reporter, &Pagination::default()).await.unwrap().total, 0);

        let by_author = ReportFilters {
            search: Some("william wilson".to_string()),
            ..ReportFilters::default()
        };
        assert_eq!(list(&store, &by_author, &Pagination::default()).await.unwrap().total, 6);
    }

    #[tokio::test]
    async fn pending_report_resolves_once() {
        let store = store();
        let resolved = resolve(&store, 1).await.unwrap();
        assert_eq!(resolved.status, ReportStatus::Resolved);

        let err = dismiss(&store, 1).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidTransition(_)));
    }

    #[tokio::test]
    async fn unknown_report_not_found() {
        let store = store();
        assert!(dismiss(&store, 999).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn recent_pending_excludes_decided() {
        let store = store();
        let pending = recent_pending(&store, 5).await;
        assert_eq!(pending.len(), 5);
        assert!(pending.iter().all(|r| r.status == ReportStatus::Pending));
        assert!(pending.windows(2).all(|w| w[0].id > w[1].id));
    }
}
