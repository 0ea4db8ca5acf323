//! Session cookie storage.
//!
//! The API hands out bearer tokens as cookies (`adminToken`,
//! `creatorToken`). A browser keeps those in its cookie jar; here a
//! [`CookieStore`] does, so a session survives between CLI invocations.

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use dashmap::DashMap;
use serde::Deserialize;
use serde::Serialize;

use crate::error::StoreError;

/// A cookie as stored by a [`CookieStore`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCookie {
    pub name: String,
    pub value: String,
    /// When the cookie stops being sent. `None` means session cookie.
    pub expires_at: Option<DateTime<Utc>>,
    /// Set by the server with the `HttpOnly` attribute.
    pub http_only: bool,
}

impl StoredCookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            expires_at: None,
            http_only: false,
        }
    }

    /// Sets the expiry time.
    pub fn expires_at(mut self, expires_at: Option<DateTime<Utc>>) -> Self {
        self.expires_at = expires_at;
        self
    }

    /// Marks the cookie as HttpOnly.
    pub fn http_only(mut self, http_only: bool) -> Self {
        self.http_only = http_only;
        self
    }

    /// Returns `true` if the cookie has expired.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Utc::now() >= exp)
    }

    /// Parses a `Set-Cookie` header value.
    ///
    /// Understands `Expires`, `Max-Age` (which wins over `Expires`) and
    /// `HttpOnly`; other attributes are ignored. Returns `None` when the
    /// header has no `name=value` pair.
    pub fn parse_set_cookie(header: &str) -> Option<Self> {
        let mut parts = header.split(';');
        let (name, value) = parts.next()?.split_once('=')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let mut cookie = Self::new(name, value.trim().trim_matches('"'));
        let mut max_age = None;

        for attribute in parts {
            let (key, val) = match attribute.split_once('=') {
                Some((key, val)) => (key.trim(), val.trim()),
                None => (attribute.trim(), ""),
            };
            match key.to_ascii_lowercase().as_str() {
                "httponly" => cookie.http_only = true,
                "expires" => {
                    cookie.expires_at = DateTime::parse_from_rfc2822(val)
                        .ok()
                        .map(|dt| dt.with_timezone(&Utc));
                }
                "max-age" => max_age = val.parse::<i64>().ok(),
                _ => {}
            }
        }

        if let Some(seconds) = max_age {
            // Ages past the representable range never expire
            cookie.expires_at = Some(
                Duration::try_seconds(seconds)
                    .and_then(|age| Utc::now().checked_add_signed(age))
                    .unwrap_or(if seconds < 0 { DateTime::<Utc>::MIN_UTC } else { DateTime::<Utc>::MAX_UTC }),
            );
        }

        Some(cookie)
    }
}

/// Trait for cookie stores.
///
/// Implementations must never return expired cookies from `get()`.
#[async_trait]
pub trait CookieStore: Send + Sync {
    /// Retrieves a cookie by name.
    async fn get(&self, name: &str) -> Result<Option<StoredCookie>, StoreError>;

    /// Stores a cookie, replacing any cookie with the same name.
    async fn set(&self, cookie: StoredCookie) -> Result<(), StoreError>;

    /// Removes a cookie.
    async fn remove(&self, name: &str) -> Result<(), StoreError>;

    /// Removes all cookies.
    async fn clear(&self) -> Result<(), StoreError>;
}

/// A cookie store backed by a concurrent hash map.
///
/// Cookies are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryCookieStore {
    cookies: DashMap<String, StoredCookie>,
}

impl MemoryCookieStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }
}

#[async_trait]
impl CookieStore for MemoryCookieStore {
    async fn get(&self, name: &str) -> Result<Option<StoredCookie>, StoreError> {
        let cookie = self.cookies.get(name).map(|entry| entry.value().clone());
        match cookie {
            Some(cookie) if cookie.is_expired() => {
                self.cookies.remove(name);
                Ok(None)
            }
            other => Ok(other),
        }
    }

    async fn set(&self, cookie: StoredCookie) -> Result<(), StoreError> {
        self.cookies.insert(cookie.name.clone(), cookie);
        Ok(())
    }

    async fn remove(&self, name: &str) -> Result<(), StoreError> {
        self.cookies.remove(name);
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.cookies.clear();
        Ok(())
    }
}
