//! Table events.

/// User interaction with a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    /// The search box changed.
    Search(String),
    /// A column header was clicked.
    HeaderClick(String),
    /// A page button was clicked.
    GoToPage(usize),
    FirstPage,
    PrevPage,
    NextPage,
    LastPage,
    /// A row on the current page was clicked, identified by its key.
    RowClick(String),
    /// A row action was clicked.
    Action { row: String, action: String },
}

/// What handling an event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// View state changed; re-render.
    Changed,
    /// A caller callback was invoked.
    Delivered,
    /// Nothing happened (disabled control, unknown row, non-sortable column).
    Ignored,
}
