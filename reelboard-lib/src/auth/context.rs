//! Explicit holder of both actor sessions.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::warn;
use reqwest::Client;

use super::Actor;
use super::CookieStore;
use super::MemoryCookieStore;
use super::Session;
use super::TokenSource;
use super::session::DEFAULT_REFRESH_BUFFER;
use crate::error::Error;

/// The admin and creator sessions of one console instance.
///
/// Created once at startup and handed to whatever needs it (the client,
/// the CLI commands). Cheap to clone; clones share the sessions.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use reelboard_lib::auth::{Actor, AuthContext, SqliteCookieStore};
///
/// let store = Arc::new(SqliteCookieStore::open("session.db").await?);
/// let auth = AuthContext::new("http://localhost:5000/api/v1", store);
/// auth.session(Actor::Admin).login("root@example.com", "secret").await?;
/// ```
#[derive(Clone)]
pub struct AuthContext {
    inner: Arc<AuthContextInner>,
}

struct AuthContextInner {
    admin: Session,
    creator: Session,
}

impl AuthContext {
    /// Creates signed-out sessions against `api_root` backed by `store`.
    pub fn new(api_root: impl Into<String>, store: Arc<dyn CookieStore>) -> Self {
        Self::with_options(api_root, store, Client::new(), DEFAULT_REFRESH_BUFFER)
    }

    /// Creates sessions that only live in memory.
    pub fn in_memory(api_root: impl Into<String>) -> Self {
        Self::new(api_root, Arc::new(MemoryCookieStore::new()))
    }

    /// Creates sessions with a custom HTTP client and refresh buffer.
    pub fn with_options(
        api_root: impl Into<String>,
        store: Arc<dyn CookieStore>,
        http_client: Client,
        refresh_buffer: Duration,
    ) -> Self {
        let api_root = api_root.into();
        let session = |actor| {
            Session::new(actor, api_root.clone(), http_client.clone(), Arc::clone(&store))
                .with_refresh_buffer(refresh_buffer)
        };
        Self {
            inner: Arc::new(AuthContextInner {
                admin: session(Actor::Admin),
                creator: session(Actor::Creator),
            }),
        }
    }

    pub fn session(&self, actor: Actor) -> &Session {
        match actor {
            Actor::Admin => &self.inner.admin,
            Actor::Creator => &self.inner.creator,
        }
    }

    pub fn admin(&self) -> &Session {
        &self.inner.admin
    }

    pub fn creator(&self) -> &Session {
        &self.inner.creator
    }

    /// Loads stored tokens for both actors.
    pub async fn restore(&self) -> Result<(), Error> {
        for actor in Actor::ALL {
            self.session(actor).restore().await?;
        }
        Ok(())
    }

    /// Signs out both actors.
    ///
    /// Both sessions are torn down even if one of them fails; the first
    /// error is returned.
    pub async fn logout_all(&self) -> Result<(), Error> {
        let mut first_error = None;
        for actor in Actor::ALL {
            if let Err(e) = self.session(actor).logout().await {
                warn!("Failed to sign out {}: {}", actor, e);
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl TokenSource for AuthContext {
    async fn token(&self, actor: Actor) -> Result<String, Error> {
        self.session(actor).token().await
    }

    async fn invalidate(&self, actor: Actor) {
        if let Err(e) = self.session(actor).clear().await {
            warn!("Failed to clear {} session: {}", actor, e);
        }
    }
}
