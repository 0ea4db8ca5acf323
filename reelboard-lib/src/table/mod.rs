//! Tabular data view.
//!
//! [`DataTable`] renders an already-fetched collection of [`Record`]s as a
//! searchable, sortable, paginated table. It never fetches or mutates data:
//! row clicks and row actions are handed to caller callbacks, and callers
//! re-supply `data` on every render.
//!
//! Each render runs filter, then sort, then paginate over the full input.
//! Nothing derived is cached between renders.
//!
//! # Example
//!
//! ```
//! use reelboard_lib::model::Record;
//! use reelboard_lib::table::{Column, DataTable, TableEvent};
//!
//! let data = vec![
//!     Record::new().set("id", 1i64).set("name", "Zoe"),
//!     Record::new().set("id", 2i64).set("name", "Bob"),
//! ];
//!
//! let mut table = DataTable::new(
//!     vec![Column::new("id", "ID"), Column::new("name", "Name").sortable()],
//!     "id",
//! )
//! .unwrap();
//!
//! table.handle(TableEvent::HeaderClick("name".into()), &data);
//! let rendered = table.render(&data);
//! assert_eq!(rendered.rows()[0].cells[1], "Bob");
//! ```

mod column;
mod compare;
mod events;
mod pagination;
pub mod pipeline;
mod render;
mod state;
mod text;

use std::collections::HashSet;
use std::fmt;

use log::warn;

pub use column::*;
pub use compare::*;
pub use events::*;
pub use pagination::*;
pub use render::*;
pub use state::*;
pub use text::*;

pub use crate::error::TableError;
use crate::model::Record;

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

type RowCallback = Box<dyn FnMut(&Record) + Send>;
type ActionRenderer = Box<dyn Fn(&Record) -> Vec<RowAction> + Send + Sync>;
type ActionCallback = Box<dyn FnMut(&str, &Record) + Send>;

/// One render pass worth of derived rows.
#[derive(Debug, Clone)]
pub struct TableView<'a> {
    rows: Vec<&'a Record>,
    page: usize,
    total_pages: usize,
    page_size: usize,
}

impl<'a> TableView<'a> {
    /// All filtered rows in sorted order.
    pub fn rows(&self) -> &[&'a Record] {
        &self.rows
    }

    /// Rows on the effective page.
    pub fn page_rows(&self) -> &[&'a Record] {
        pipeline::page_slice(&self.rows, self.page, self.page_size)
    }

    /// Effective page, clamped to the current row count.
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Index of the first row of the page within [`rows`](Self::rows).
    pub fn offset(&self) -> usize {
        (self.page - 1) * self.page_size
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A searchable, sortable, paginated table over caller-supplied records.
pub struct DataTable {
    columns: Vec<Column>,
    key_field: String,
    page_size: usize,
    empty_message: String,
    comparator: Comparator,
    loading: bool,
    state: ViewState,
    on_row_click: Option<RowCallback>,
    row_actions: Option<ActionRenderer>,
    on_action: Option<ActionCallback>,
}

impl DataTable {
    /// Create a table over `columns`, identifying rows by `key_field`.
    ///
    /// Fails if `columns` is empty or two columns share a key.
    pub fn new(columns: Vec<Column>, key_field: impl Into<String>) -> Result<Self, TableError> {
        if columns.is_empty() {
            return Err(TableError::NoColumns);
        }
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.key.as_str()) {
                return Err(TableError::DuplicateColumn(column.key.clone()));
            }
        }

        Ok(Self {
            columns,
            key_field: key_field.into(),
            page_size: DEFAULT_PAGE_SIZE,
            empty_message: "No data available".to_string(),
            comparator: Comparator::default(),
            loading: false,
            state: ViewState::new(),
            on_row_click: None,
            row_actions: None,
            on_action: None,
        })
    }

    /// Set the page size (minimum 1).
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Set the message shown when there are no rows.
    pub fn with_empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    /// Set the comparator used for sorting.
    pub fn with_comparator(mut self, comparator: Comparator) -> Self {
        self.comparator = comparator;
        self
    }

    /// Invoke `callback` when a row is clicked.
    pub fn on_row_click<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&Record) + Send + 'static,
    {
        self.on_row_click = Some(Box::new(callback));
        self
    }

    /// Render per-row action buttons with `render`.
    pub fn with_row_actions<F>(mut self, render: F) -> Self
    where
        F: Fn(&Record) -> Vec<RowAction> + Send + Sync + 'static,
    {
        self.row_actions = Some(Box::new(render));
        self
    }

    /// Invoke `callback` with the action id when a row action is clicked.
    pub fn on_action<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&str, &Record) + Send + 'static,
    {
        self.on_action = Some(Box::new(callback));
        self
    }

    /// Show a loading skeleton instead of the body.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Run filter, sort and paginate over `data`.
    pub fn view<'a>(&self, data: &'a [Record]) -> TableView<'a> {
        let mut rows = pipeline::filter(data, &self.columns, self.state.search_query());
        pipeline::sort(&mut rows, self.state.sort(), self.comparator);
        let total_pages = pipeline::total_pages(rows.len(), self.page_size);
        TableView {
            rows,
            page: clamp_page(self.state.current_page(), total_pages),
            total_pages,
            page_size: self.page_size,
        }
    }

    /// Render `data` with the current view state.
    pub fn render(&self, data: &[Record]) -> RenderedTable {
        let header = self.header();
        let search_query = self.state.search_query().to_string();

        if self.loading {
            return RenderedTable {
                search_query,
                header,
                body: TableBody::Loading {
                    skeleton_rows: self.page_size,
                },
                pagination: None,
                summary: None,
            };
        }

        let view = self.view(data);
        if view.is_empty() {
            return RenderedTable {
                search_query,
                header,
                body: TableBody::Empty {
                    message: self.empty_message.clone(),
                },
                pagination: None,
                summary: None,
            };
        }

        let offset = view.offset();
        let mut missing_keys = 0;
        let rows: Vec<RenderedRow> = view
            .page_rows()
            .iter()
            .enumerate()
            .map(|(index, record)| {
                if record.value(&self.key_field).is_null() {
                    missing_keys += 1;
                }
                RenderedRow {
                    key: self.row_key(record, offset + index),
                    cells: self.columns.iter().map(|c| c.cell_text(record)).collect(),
                    actions: self
                        .row_actions
                        .as_ref()
                        .map(|render| render(record))
                        .unwrap_or_default(),
                }
            })
            .collect();

        if missing_keys > 0 {
            warn!(
                "{} row(s) on page {} have no '{}' value, using positional keys",
                missing_keys,
                view.page(),
                self.key_field
            );
        }

        let summary = PageSummary {
            first: offset + 1,
            last: offset + rows.len(),
            total: view.rows().len(),
        };

        RenderedTable {
            search_query,
            header,
            body: TableBody::Rows(rows),
            pagination: Some(PaginationBar::new(view.page(), view.total_pages())),
            summary: Some(summary),
        }
    }

    /// Apply a user event.
    pub fn handle(&mut self, event: TableEvent, data: &[Record]) -> EventOutcome {
        match event {
            TableEvent::Search(query) => {
                if query == self.state.search_query() && self.state.current_page() == 1 {
                    return EventOutcome::Ignored;
                }
                self.state.set_search(query);
                EventOutcome::Changed
            }
            TableEvent::HeaderClick(key) => {
                let sortable = self.columns.iter().any(|c| c.key == key && c.sortable);
                if !sortable {
                    return EventOutcome::Ignored;
                }
                self.state.toggle_sort(&key);
                EventOutcome::Changed
            }
            TableEvent::GoToPage(page) => self.go_to(data, |_, _| page),
            TableEvent::FirstPage => self.go_to(data, |_, _| 1),
            TableEvent::PrevPage => self.go_to(data, |current, _| current.saturating_sub(1)),
            TableEvent::NextPage => self.go_to(data, |current, _| current + 1),
            TableEvent::LastPage => self.go_to(data, |_, total| total),
            TableEvent::RowClick(key) => {
                let Some(record) = self.find_on_page(data, &key) else {
                    return EventOutcome::Ignored;
                };
                match self.on_row_click.as_mut() {
                    Some(callback) => {
                        callback(record);
                        EventOutcome::Delivered
                    }
                    None => EventOutcome::Ignored,
                }
            }
            TableEvent::Action { row, action } => {
                let Some(record) = self.find_on_page(data, &row) else {
                    return EventOutcome::Ignored;
                };
                match self.on_action.as_mut() {
                    Some(callback) => {
                        callback(&action, record);
                        EventOutcome::Delivered
                    }
                    None => EventOutcome::Ignored,
                }
            }
        }
    }

    fn go_to(&mut self, data: &[Record], target: impl FnOnce(usize, usize) -> usize) -> EventOutcome {
        let view = self.view(data);
        let (page, total) = (view.page(), view.total_pages());
        let before = self.state.current_page();
        let after = self.state.set_page(target(page, total), total);
        if after == before {
            EventOutcome::Ignored
        } else {
            EventOutcome::Changed
        }
    }

    fn find_on_page<'a>(&self, data: &'a [Record], key: &str) -> Option<&'a Record> {
        let view = self.view(data);
        let offset = view.offset();
        view.page_rows()
            .iter()
            .enumerate()
            .find(|(index, record)| self.row_key(record, offset + index) == key)
            .map(|(_, record)| *record)
    }

    fn row_key(&self, record: &Record, position: usize) -> String {
        let value = record.value(&self.key_field);
        if value.is_null() {
            format!("#{}", position)
        } else {
            value.to_string()
        }
    }

    fn header(&self) -> Vec<HeaderCell> {
        let sort = self.state.sort();
        self.columns
            .iter()
            .map(|column| HeaderCell {
                key: column.key.clone(),
                label: column.label.clone(),
                sortable: column.sortable,
                sorted: sort.filter(|s| s.key == column.key).map(|s| s.order),
                width: column.width,
            })
            .collect()
    }
}

impl fmt::Debug for DataTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataTable")
            .field("columns", &self.columns)
            .field("key_field", &self.key_field)
            .field("page_size", &self.page_size)
            .field("comparator", &self.comparator)
            .field("loading", &self.loading)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
