//! Page slicing for search results.

/// Cut one zero-based page out of `items`.
///
/// When either `page_number` or `page_size` is missing the whole list is
/// returned.
pub fn apply_page<T>(items: Vec<T>, page_number: Option<usize>, page_size: Option<usize>) -> Vec<T> {
    match (page_number, page_size) {
        (Some(number), Some(size)) => items
            .into_iter()
            .skip(number.saturating_mul(size))
            .take(size)
            .collect(),
        _ => items,
    }
}
