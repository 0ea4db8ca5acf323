//! TokenSource trait and AccessToken

use async_trait::async_trait;
use chrono::DateTime;
use chrono::TimeZone;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::Actor;
use super::jwt::decode_claims;
use crate::error::AuthError;
use crate::error::Error;

/// A bearer token with its decoded expiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessToken {
    /// The raw JWT sent as bearer token and cookie value.
    pub access_token: String,
    /// When the token expires, if the payload says.
    pub expires_at: Option<DateTime<Utc>>,
    /// Account id from the `sub` claim.
    pub subject: Option<String>,
}

impl AccessToken {
    /// Creates a token with unknown expiry.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at: None,
            subject: None,
        }
    }

    /// Creates a token from a JWT, reading `exp` and `sub` from its payload.
    pub fn from_jwt(jwt: impl Into<String>) -> Result<Self, AuthError> {
        let jwt = jwt.into();
        let claims = decode_claims(&jwt)?;
        let expires_at = match claims.exp {
            Some(exp) => Some(
                Utc.timestamp_opt(exp, 0)
                    .single()
                    .ok_or_else(|| AuthError::MalformedToken(format!("exp out of range: {}", exp)))?,
            ),
            None => None,
        };
        Ok(Self {
            access_token: jwt,
            expires_at,
            subject: claims.sub,
        })
    }

    /// Returns `true` if the token has expired.
    ///
    /// Returns `false` if expiration time is unknown.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Utc::now() >= exp)
    }

    /// Returns `true` if the token will expire within the given duration.
    ///
    /// Returns `false` if expiration time is unknown.
    pub fn expires_within(&self, duration: chrono::Duration) -> bool {
        self.expires_at
            .is_some_and(|exp| Utc::now().checked_add_signed(duration).is_none_or(|at| at >= exp))
    }

    /// Returns the token as a bearer authorization header value.
    pub fn as_bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

/// Supplies bearer tokens to the [`DashboardClient`](crate::DashboardClient).
///
/// The client asks for a token before every request and calls
/// [`invalidate`](TokenSource::invalidate) when the server answers 401.
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Returns a usable token for `actor`, refreshing it if needed.
    async fn token(&self, actor: Actor) -> Result<String, Error>;

    /// Drops the session of `actor`.
    async fn invalidate(&self, actor: Actor);
}

/// A token source that always returns the same token.
///
/// Useful for scripts with a long-lived token and for tests.
#[derive(Debug, Clone)]
pub struct StaticTokenSource {
    token: String,
}

impl StaticTokenSource {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl TokenSource for StaticTokenSource {
    async fn token(&self, _actor: Actor) -> Result<String, Error> {
        Ok(self.token.clone())
    }

    async fn invalidate(&self, _actor: Actor) {}
}
