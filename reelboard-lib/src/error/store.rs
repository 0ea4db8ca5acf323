//! Cookie store errors

/// Errors raised by persistent cookie stores.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] async_sqlite::Error),

    #[error("Encoding error: {0}")]
    Encoding(#[from] bincode::Error),
}
