//! Pagination primitives shared across all list screens.
//!
//! A list screen filters and sorts its full collection, then hands it to
//! [`compute_window`] which selects the visible slice and the page controls.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Number of page controls shown around the current page on every screen.
pub const DEFAULT_WINDOW_SIZE: usize = 5;

/// Pagination query parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pagination {
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

impl Pagination {
    /// Maximum items per page.
    const MAX_PER_PAGE: usize = 100;

    pub fn current_page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }

    /// Page size, falling back to the screen's own default.
    pub fn limit(&self, default_per_page: usize) -> usize {
        self.per_page
            .unwrap_or(default_per_page)
            .clamp(1, Self::MAX_PER_PAGE)
    }

    /// Current page clamped into `1..=total_pages` for a collection of `total`
    /// items. List services call this so a stale page number never points
    /// past the end of a shrunken collection.
    pub fn clamped_page(&self, total: usize, per_page: usize) -> usize {
        let total_pages = total_pages(total, per_page);
        self.current_page().min(total_pages.max(1))
    }
}

/// One entry of the rendered page-control strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "page", rename_all = "snake_case")]
pub enum PageControl {
    Page(usize),
    Ellipsis,
}

/// Visible slice of a collection plus the page controls to render with it.
#[derive(Debug, Clone, Serialize)]
pub struct PageWindow<T: Serialize> {
    pub items: Vec<T>,
    /// Rendered controls, after the first/last slot substitutions.
    pub page_numbers: Vec<PageControl>,
    /// Contiguous page numbers the controls were derived from.
    pub window: Vec<usize>,
    pub current_page: usize,
    pub total_pages: usize,
    pub total: usize,
    pub per_page: usize,
}

impl<T: Serialize> PageWindow<T> {
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Convert the visible items, keeping the page controls.
    pub fn map<U: Serialize>(self, f: impl FnMut(T) -> U) -> PageWindow<U> {
        PageWindow {
            items: self.items.into_iter().map(f).collect(),
            page_numbers: self.page_numbers,
            window: self.window,
            current_page: self.current_page,
            total_pages: self.total_pages,
            total: self.total,
            per_page: self.per_page,
        }
    }
}

pub fn total_pages(total: usize, per_page: usize) -> usize {
    total.div_ceil(per_page)
}

/// Select the page `current_page` of `items` and compute its controls.
///
/// Fails only for degenerate arguments (zero page, page size or window
/// size). A page past the end yields an empty slice with the last window of
/// controls; keeping `current_page` in range is the caller's job.
pub fn compute_window<T: Clone + Serialize>(
    items: &[T],
    current_page: usize,
    page_size: usize,
    window_size: usize,
) -> Result<PageWindow<T>, AppError> {
    if page_size == 0 {
        return Err(AppError::Validation("page size must be positive".to_string()));
    }
    if current_page == 0 {
        return Err(AppError::Validation("page must be at least 1".to_string()));
    }
    if window_size == 0 {
        return Err(AppError::Validation("window size must be positive".to_string()));
    }

    let total = items.len();
    let total_pages = total_pages(total, page_size);
    if total == 0 {
        return Ok(PageWindow {
            items: Vec::new(),
            page_numbers: Vec::new(),
            window: Vec::new(),
            current_page,
            total_pages: 0,
            total: 0,
            per_page: page_size,
        });
    }

    let start = (current_page - 1).saturating_mul(page_size).min(total);
    let end = start.saturating_add(page_size).min(total);
    let window = page_window(current_page, total_pages, window_size);
    let page_numbers = render_controls(&window, current_page, total_pages, window_size);

    Ok(PageWindow {
        items: items[start..end].to_vec(),
        page_numbers,
        window,
        current_page,
        total_pages,
        total,
        per_page: page_size,
    })
}

/// Contiguous run of at most `window_size` page numbers around `current`.
fn page_window(current: usize, total_pages: usize, window_size: usize) -> Vec<usize> {
    let half = window_size / 2;
    let first = if total_pages <= window_size || current <= half + 1 {
        1
    } else if current >= total_pages.saturating_sub(half) {
        total_pages - window_size + 1
    } else {
        current - half
    };
    let len = window_size.min(total_pages);
    (first..first + len).collect()
}

fn render_controls(
    window: &[usize],
    current: usize,
    total_pages: usize,
    window_size: usize,
) -> Vec<PageControl> {
    let half = window_size / 2;
    let overflow = total_pages > window_size;
    let last_slot = window.len() - 1;

    let mut controls = Vec::with_capacity(window.len() + 2);
    for (slot, &page) in window.iter().enumerate() {
        // Slots are checked independently; both ends can be replaced at once.
        if slot == 0 && overflow && current > half + 1 {
            controls.push(PageControl::Page(1));
            controls.push(PageControl::Ellipsis);
        } else if slot == last_slot && overflow && current < total_pages.saturating_sub(half) {
            controls.push(PageControl::Ellipsis);
            controls.push(PageControl::Page(total_pages));
        } else {
            controls.push(PageControl::Page(page));
        }
    }
    controls
}
