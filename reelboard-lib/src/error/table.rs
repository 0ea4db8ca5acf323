//! Table configuration errors

/// Errors raised when a table is constructed with invalid columns.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// A table needs at least one column.
    #[error("Table has no columns")]
    NoColumns,

    /// Column keys must be unique within a table.
    #[error("Duplicate column key '{0}'")]
    DuplicateColumn(String),
}
