//! Render model produced by [`DataTable::render`](super::DataTable::render).
//!
//! The model is independent of any UI toolkit; [`render_text`](super::render_text)
//! turns it into terminal output.

use super::column::ColumnWidth;
use super::pagination::PaginationBar;
use super::state::SortOrder;

/// A header cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub key: String,
    pub label: String,
    pub sortable: bool,
    /// Set on the column currently sorted.
    pub sorted: Option<SortOrder>,
    pub width: ColumnWidth,
}

/// A per-row action button supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowAction {
    pub id: String,
    pub label: String,
}

impl RowAction {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// A rendered body row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow {
    /// Stable row identity taken from the key field.
    pub key: String,
    pub cells: Vec<String>,
    pub actions: Vec<RowAction>,
}

/// "Showing first–last of total".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSummary {
    pub first: usize,
    pub last: usize,
    pub total: usize,
}

/// Table body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableBody {
    /// The caller is still loading data.
    Loading { skeleton_rows: usize },
    /// No rows to show, with the caller's empty-state message.
    Empty { message: String },
    /// The current page.
    Rows(Vec<RenderedRow>),
}

/// Output of a render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTable {
    pub search_query: String,
    pub header: Vec<HeaderCell>,
    pub body: TableBody,
    /// Present only when rows are shown.
    pub pagination: Option<PaginationBar>,
    pub summary: Option<PageSummary>,
}

impl RenderedTable {
    /// Body rows, empty unless the body is [`TableBody::Rows`].
    pub fn rows(&self) -> &[RenderedRow] {
        match &self.body {
            TableBody::Rows(rows) => rows,
            _ => &[],
        }
    }

    /// Returns `true` if any row has actions.
    pub fn has_actions(&self) -> bool {
        self.rows().iter().any(|row| !row.actions.is_empty())
    }
}
