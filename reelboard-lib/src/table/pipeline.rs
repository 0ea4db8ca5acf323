//! Filter, sort and paginate steps.
//!
//! The steps run in that order on every render and never mutate the input
//! records; each returns borrowed views into the caller's slice.

use super::column::Column;
use super::compare::Comparator;
use super::state::SortState;
use crate::model::Record;

/// Keeps the records where any column's raw value contains `query`,
/// ignoring case. An empty query keeps everything.
pub fn filter<'a>(data: &'a [Record], columns: &[Column], query: &str) -> Vec<&'a Record> {
    if query.is_empty() {
        return data.iter().collect();
    }

    let needle = query.to_lowercase();
    data.iter()
        .filter(|record| {
            columns
                .iter()
                .any(|column| record.value(&column.key).contains_lowercase(&needle))
        })
        .collect()
}

/// Stable sort by the active sort column, if any.
pub fn sort(rows: &mut [&Record], sort: Option<&SortState>, comparator: Comparator) {
    let Some(sort) = sort else { return };
    rows.sort_by(|a, b| comparator.compare(a.value(&sort.key), b.value(&sort.key), sort.order));
}

/// `ceil(len / page_size)`. Zero rows means zero pages.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1))
}

/// The rows of 1-based `page`. Out-of-range pages are empty.
pub fn page_slice<T>(rows: &[T], page: usize, page_size: usize) -> &[T] {
    let page_size = page_size.max(1);
    let start = page.saturating_sub(1).saturating_mul(page_size);
    if start >= rows.len() {
        return &[];
    }
    let end = (start + page_size).min(rows.len());
    &rows[start..end]
}
