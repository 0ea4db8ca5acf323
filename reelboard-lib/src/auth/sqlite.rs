//! SQLite-backed persistent cookie store.

use std::path::Path;

use async_sqlite::Client;
use async_sqlite::ClientBuilder;
use async_sqlite::JournalMode;
use async_sqlite::rusqlite;
use async_sqlite::rusqlite::OptionalExtension;
use async_trait::async_trait;
use log::warn;

use super::CookieStore;
use super::StoredCookie;
use crate::error::StoreError;

/// A cookie store persisted in a SQLite database.
///
/// Cookies are bincode-encoded into a single table keyed by name.
///
/// # Example
///
/// ```ignore
/// use reelboard_lib::auth::SqliteCookieStore;
///
/// let store = SqliteCookieStore::open("session.db").await?;
/// ```
pub struct SqliteCookieStore {
    client: Client,
}

impl SqliteCookieStore {
    /// Opens a store at the specified path, creating it if needed.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let client = ClientBuilder::new()
            .path(path)
            .journal_mode(JournalMode::Wal)
            .open()
            .await?;

        Self::init_schema(&client).await?;

        Ok(Self { client })
    }

    /// Opens an in-memory store. Cookies are lost when it is dropped.
    pub async fn open_in_memory() -> Result<Self, StoreError> {
        let client = ClientBuilder::new().path(":memory:").open().await?;

        Self::init_schema(&client).await?;

        Ok(Self { client })
    }

    async fn init_schema(client: &Client) -> Result<(), StoreError> {
        client
            .conn(|conn| {
                conn.execute(
                    "CREATE TABLE IF NOT EXISTS cookies (
                        name TEXT PRIMARY KEY,
                        data BLOB NOT NULL
                    )",
                    [],
                )?;
                Ok(())
            })
            .await?;
        Ok(())
    }

    /// Returns the number of stored cookies, including expired ones.
    pub async fn len(&self) -> Result<usize, StoreError> {
        let count = self
            .client
            .conn(|conn| conn.query_row("SELECT COUNT(*) FROM cookies", [], |row| row.get::<_, i64>(0)))
            .await?;
        Ok(count as usize)
    }

    pub async fn is_empty(&self) -> Result<bool, StoreError> {
        self.len().await.map(|len| len == 0)
    }
}

#[async_trait]
impl CookieStore for SqliteCookieStore {
    async fn get(&self, name: &str) -> Result<Option<StoredCookie>, StoreError> {
        let key = name.to_string();
        let data = self
            .client
            .conn(move |conn| {
                conn.query_row(
                    "SELECT data FROM cookies WHERE name = ?",
                    rusqlite::params![key],
                    |row| row.get::<_, Vec<u8>>(0),
                )
                .optional()
            })
            .await?;

        let Some(data) = data else { return Ok(None) };
        let cookie: StoredCookie = match bincode::deserialize(&data) {
            Ok(cookie) => cookie,
            Err(e) => {
                warn!("Dropping unreadable cookie '{}': {}", name, e);
                self.remove(name).await?;
                return Ok(None);
            }
        };

        if cookie.is_expired() {
            self.remove(name).await?;
            return Ok(None);
        }
        Ok(Some(cookie))
    }

    async fn set(&self, cookie: StoredCookie) -> Result<(), StoreError> {
        let data = bincode::serialize(&cookie)?;
        let name = cookie.name;
        self.client
            .conn(move |conn| {
                conn.execute(
                    "INSERT OR REPLACE INTO cookies (name, data) VALUES (?, ?)",
                    rusqlite::params![name, data],
                )
            })
            .await?;
        Ok(())
    }

    async fn remove(&self, name: &str) -> Result<(), StoreError> {
        let name = name.to_string();
        self.client
            .conn(move |conn| conn.execute("DELETE FROM cookies WHERE name = ?", [name]))
            .await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.client
            .conn(|conn| conn.execute("DELETE FROM cookies", []))
            .await?;
        Ok(())
    }
}
