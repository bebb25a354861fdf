//! Search, filter-query and paging helpers shared by the list services.

use serde::de::{DeserializeOwned, IntoDeserializer};
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::AppError;
use crate::models::pagination::{compute_window, PageWindow, Pagination, DEFAULT_WINDOW_SIZE};

/// Deserialize an optional filter where `all` (or an empty value) means
/// "no filter".
pub fn all_or_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") | Some("all") => Ok(None),
        Some(value) => {
            T::deserialize(IntoDeserializer::<D::Error>::into_deserializer(value)).map(Some)
        }
    }
}

/// Case-insensitive substring match of `term` against any of `fields`.
/// A missing or blank term matches everything.
pub fn matches_search(term: Option<&str>, fields: &[&str]) -> bool {
    let term = match term.map(str::trim) {
        Some(t) if !t.is_empty() => t.to_lowercase(),
        _ => return true,
    };
    fields.iter().any(|f| f.to_lowercase().contains(&term))
}

/// Page an already filtered and sorted collection. The requested page is
/// clamped to the last page so a shrunken collection never yields a page
/// past its end.
pub fn paginate<T: Clone + Serialize>(
    items: &[T],
    pagination: &Pagination,
    default_per_page: usize,
) -> Result<PageWindow<T>, AppError> {
    let per_page = pagination.limit(default_per_page);
    let page = pagination.clamped_page(items.len(), per_page);
    compute_window(items, page, per_page, DEFAULT_WINDOW_SIZE)
}
