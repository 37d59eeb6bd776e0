//! Page slicing for article listings

use serde::Serialize;

/// One page of a listing
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub items: Vec<T>,
    /// 1-based
    pub current_page: usize,
    pub total_pages: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub has_next: bool,
    pub has_previous: bool,
}

/// Slice `items` into the requested page
///
/// The page number is clamped into `1..=total_pages` (page 1 for an empty
/// listing); a `per_page` of zero is treated as one.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Paginated<T> {
    let per_page = per_page.max(1);
    let total_pages = items.len().div_ceil(per_page);
    let current_page = page.clamp(1, total_pages.max(1));

    let start = ((current_page - 1) * per_page).min(items.len());
    let end = (start + per_page).min(items.len());

    Paginated {
        items: items[start..end].to_vec(),
        current_page,
        total_pages,
        per_page,
        total_items: items.len(),
        has_next: current_page < total_pages,
        has_previous: current_page > 1,
    }
}
