//! One actor's signed-in session with proactive refresh.

use std::sync::Arc;
use std::time::Duration;

use log::debug;
use log::info;
use log::warn;
use reqwest::Client;
use reqwest::StatusCode;
use reqwest::header::COOKIE;
use reqwest::header::HeaderMap;
use reqwest::header::SET_COOKIE;
use serde::Deserialize;
use tokio::sync::RwLock;

use super::AccessToken;
use super::Actor;
use super::CookieStore;
use super::StoredCookie;
use crate::api::Endpoint;
use crate::api::Shape;
use crate::api::envelope;
use crate::error::ApiError;
use crate::error::AuthError;
use crate::error::Error;
use crate::model::Profile;

/// Tokens are refreshed this long before they expire.
pub const DEFAULT_REFRESH_BUFFER: Duration = Duration::from_secs(300);

/// A bearer-token session for one [`Actor`].
///
/// The token lives in memory and in the [`CookieStore`] under the actor's
/// cookie name. [`token`](Session::token) hands out the current token and
/// refreshes it when it is about to expire:
/// - still valid beyond the refresh buffer: returned as is
/// - inside the buffer: `POST /{actor}/refresh-token`, the new token
///   replaces the old one
/// - refresh failed: the session is cleared, `ReauthRequired`
/// - already expired: the session is cleared, `SessionExpired`
///
/// Concurrent callers refresh once; the rest wait on the lock and reuse
/// the new token.
pub struct Session {
    actor: Actor,
    api_root: String,
    http_client: Client,
    store: Arc<dyn CookieStore>,
    token: RwLock<Option<AccessToken>>,
    refresh_buffer: Duration,
}

#[derive(Deserialize)]
struct TokenData {
    token: String,
}

impl Session {
    /// Creates a signed-out session.
    ///
    /// `api_root` is the server URL including the API prefix.
    pub fn new(actor: Actor, api_root: impl Into<String>, http_client: Client, store: Arc<dyn CookieStore>) -> Self {
        Self {
            actor,
            api_root: api_root.into(),
            http_client,
            store,
            token: RwLock::new(None),
            refresh_buffer: DEFAULT_REFRESH_BUFFER,
        }
    }

    /// Sets how long before expiry tokens are refreshed.
    pub fn with_refresh_buffer(mut self, refresh_buffer: Duration) -> Self {
        self.refresh_buffer = refresh_buffer;
        self
    }

    pub fn actor(&self) -> Actor {
        self.actor
    }

    /// The token held in memory, without refreshing or touching the store.
    pub async fn current(&self) -> Option<AccessToken> {
        self.token.read().await.clone()
    }

    /// Loads a previously stored token into memory.
    ///
    /// Returns the token, or `None` if the store has no usable one.
    pub async fn restore(&self) -> Result<Option<AccessToken>, Error> {
        let mut guard = self.token.write().await;
        if guard.is_none() {
            *guard = self.load_stored().await?;
        }
        Ok(guard.clone())
    }

    /// Signs in with email and password.
    pub async fn login(&self, email: &str, password: &str) -> Result<AccessToken, Error> {
        debug!("Logging in as {} <{}>", self.actor, email);

        let response = self
            .http_client
            .post(self.url("login"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(AuthError::from)?;

        let status = response.status();
        if matches!(
            status,
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND
        ) {
            return Err(AuthError::InvalidCredentials.into());
        }

        let (token, http_only) = self.read_token_response(response, "login").await?;

        let mut guard = self.token.write().await;
        self.persist(&token, http_only).await?;
        *guard = Some(token.clone());

        info!("Signed in as {}", self.actor);
        Ok(token)
    }

    /// Returns a usable bearer token, refreshing it if it expires soon.
    pub async fn token(&self) -> Result<String, Error> {
        let buffer = chrono::Duration::from_std(self.refresh_buffer).unwrap_or(chrono::Duration::zero());

        // Fast path: cached token outside the refresh window
        {
            let guard = self.token.read().await;
            if let Some(token) = guard.as_ref() {
                if !token.expires_within(buffer) {
                    return Ok(token.access_token.clone());
                }
            }
        }

        let mut guard = self.token.write().await;
        if guard.is_none() {
            *guard = self.load_stored().await?;
        }

        // Another task may have refreshed while we waited for the lock
        let current = match guard.as_ref() {
            None => return Err(AuthError::NotLoggedIn { actor: self.actor }.into()),
            Some(token) if !token.expires_within(buffer) => return Ok(token.access_token.clone()),
            Some(token) => token.clone(),
        };

        if current.is_expired() {
            warn!("{} token expired, clearing session", self.actor);
            *guard = None;
            self.store.remove(self.actor.cookie_name()).await?;
            return Err(AuthError::SessionExpired { actor: self.actor }.into());
        }

        debug!("Refreshing {} token", self.actor);
        match self.request_refresh(&current).await {
            Ok((token, http_only)) => {
                self.persist(&token, http_only).await?;
                let bearer = token.access_token.clone();
                *guard = Some(token);
                Ok(bearer)
            }
            Err(e) => {
                warn!("{} token refresh failed: {}", self.actor, e);
                *guard = None;
                self.store.remove(self.actor.cookie_name()).await?;
                Err(AuthError::ReauthRequired {
                    actor: self.actor,
                    message: e.to_string(),
                }
                .into())
            }
        }
    }

    /// Fetches the signed-in account's profile.
    pub async fn profile(&self) -> Result<Profile, Error> {
        let bearer = self.token().await?;
        let endpoint = Endpoint::profile(self.actor);

        let response = self
            .http_client
            .get(format!("{}{}", self.api_root.trim_end_matches('/'), endpoint.path))
            .bearer_auth(&bearer)
            .header(COOKIE, format!("{}={}", self.actor.cookie_name(), bearer))
            .send()
            .await
            .map_err(AuthError::from)?;

        let status = response.status();
        let body = response.text().await.map_err(AuthError::from)?;
        if status == StatusCode::UNAUTHORIZED {
            self.clear().await?;
            return Err(AuthError::SessionExpired { actor: self.actor }.into());
        }
        if !status.is_success() {
            return Err(ApiError::from_body(status.as_u16(), &body).into());
        }

        Ok(envelope::decode(endpoint.shape, &body, &endpoint.path)?.data)
    }

    /// Signs out on the server and forgets the token.
    ///
    /// The local session is cleared even if the server call fails.
    pub async fn logout(&self) -> Result<(), Error> {
        let token = self.restore().await?;
        if let Some(token) = token {
            let result = self
                .http_client
                .post(self.url("logout"))
                .bearer_auth(&token.access_token)
                .header(COOKIE, format!("{}={}", self.actor.cookie_name(), token.access_token))
                .send()
                .await;
            match result {
                Ok(response) if response.status().is_success() => {}
                Ok(response) => warn!("{} logout returned {}", self.actor, response.status()),
                Err(e) => warn!("{} logout request failed: {}", self.actor, e),
            }
        }

        self.clear().await?;
        info!("Signed out {}", self.actor);
        Ok(())
    }

    /// Forgets the token locally without calling the server.
    pub async fn clear(&self) -> Result<(), Error> {
        *self.token.write().await = None;
        self.store.remove(self.actor.cookie_name()).await?;
        Ok(())
    }

    fn url(&self, action: &str) -> String {
        format!(
            "{}/{}/{}",
            self.api_root.trim_end_matches('/'),
            self.actor.segment(),
            action
        )
    }

    async fn load_stored(&self) -> Result<Option<AccessToken>, Error> {
        let Some(cookie) = self.store.get(self.actor.cookie_name()).await? else {
            return Ok(None);
        };
        match AccessToken::from_jwt(cookie.value) {
            Ok(token) => Ok(Some(token)),
            Err(e) => {
                warn!("Discarding stored {} token: {}", self.actor, e);
                self.store.remove(self.actor.cookie_name()).await?;
                Ok(None)
            }
        }
    }

    async fn persist(&self, token: &AccessToken, http_only: bool) -> Result<(), Error> {
        let cookie = StoredCookie::new(self.actor.cookie_name(), token.access_token.clone())
            .expires_at(token.expires_at)
            .http_only(http_only);
        self.store.set(cookie).await?;
        Ok(())
    }

    async fn request_refresh(&self, current: &AccessToken) -> Result<(AccessToken, bool), Error> {
        let response = self
            .http_client
            .post(self.url("refresh-token"))
            .bearer_auth(&current.access_token)
            .header(COOKIE, format!("{}={}", self.actor.cookie_name(), current.access_token))
            .send()
            .await
            .map_err(AuthError::from)?;
        self.read_token_response(response, "refresh-token").await
    }

    /// Takes the new token from the actor's `Set-Cookie` header, falling
    /// back to `data.token` in the body.
    async fn read_token_response(
        &self,
        response: reqwest::Response,
        action: &str,
    ) -> Result<(AccessToken, bool), Error> {
        let status = response.status();
        let cookie = token_cookie(response.headers(), self.actor.cookie_name());
        let body = response.text().await.map_err(AuthError::from)?;

        if !status.is_success() {
            return Err(ApiError::from_body(status.as_u16(), &body).into());
        }

        if let Some(cookie) = cookie {
            return Ok((AccessToken::from_jwt(cookie.value)?, cookie.http_only));
        }

        let endpoint = format!("/{}/{}", self.actor.segment(), action);
        let data: TokenData = envelope::decode(Shape::Wrapped, &body, &endpoint)
            .map_err(|e| AuthError::Parse(format!("no token in {} response: {}", action, e)))?
            .data;
        Ok((AccessToken::from_jwt(data.token)?, false))
    }
}

fn token_cookie(headers: &HeaderMap, name: &str) -> Option<StoredCookie> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(StoredCookie::parse_set_cookie)
        .find(|cookie| cookie.name == name && !cookie.value.is_empty())
}
