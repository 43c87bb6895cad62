use std::ops::RangeInclusive;

use serde::Serialize;

/// 1ページあたりの既定件数
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// ページャーに並べるページ番号の最大数
pub const DEFAULT_MAX_PAGE_BUTTONS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PaginationError {
    #[error("page is 1-indexed and must be at least 1")]
    ZeroPage,
    #[error("page_size must be at least 1")]
    ZeroPageSize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

pub fn validate_page_request(page: usize, page_size: usize) -> Result<(), PaginationError> {
    if page_size == 0 {
        return Err(PaginationError::ZeroPageSize);
    }
    if page == 0 {
        return Err(PaginationError::ZeroPage);
    }
    Ok(())
}

/// 1始まりの `page` を切り出す
///
/// `total_pages = ceil(件数 / page_size)`。範囲外のページは空の `items` を返す（エラーにしない）。
pub fn paginate<T: Clone>(
    items: &[T],
    page: usize,
    page_size: usize,
) -> Result<Page<T>, PaginationError> {
    validate_page_request(page, page_size)?;

    let total_items = items.len();
    let start = (page - 1).saturating_mul(page_size);
    let slice = items
        .iter()
        .skip(start)
        .take(page_size)
        .cloned()
        .collect();

    Ok(Page {
        items: slice,
        page,
        page_size,
        total_items,
        total_pages: total_items.div_ceil(page_size),
    })
}

/// ページャーに表示するページ番号の範囲
///
/// 現在ページを中央に置き、端では範囲をずらして `max_visible` 件を保つ。
/// ページが無い場合は空の範囲。
pub fn page_window(current: usize, total_pages: usize, max_visible: usize) -> RangeInclusive<usize> {
    if total_pages == 0 || max_visible == 0 {
        return RangeInclusive::new(1, 0);
    }

    let current = current.clamp(1, total_pages);
    let mut start = current.saturating_sub(max_visible / 2).max(1);
    let end = (start.saturating_add(max_visible) - 1).min(total_pages);
    if end + 1 - start < max_visible {
        start = (end + 1).saturating_sub(max_visible).max(1);
    }
    start..=end
}
