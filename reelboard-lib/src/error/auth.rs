//! Authentication error types

use crate::auth::Actor;

/// Errors that can occur during login, refresh and logout.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Invalid email or password.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The server no longer accepts the session token.
    #[error("{actor} session expired")]
    SessionExpired { actor: Actor },

    /// The token could not be refreshed; the user has to log in again.
    #[error("{actor} session could not be refreshed: {message}")]
    ReauthRequired { actor: Actor, message: String },

    /// The token is not a decodable JWT.
    #[error("Malformed token: {0}")]
    MalformedToken(String),

    /// No session is stored for this actor.
    #[error("Not logged in as {actor}")]
    NotLoggedIn { actor: Actor },

    /// Network error during authentication.
    #[error("Network error during auth: {0}")]
    Network(#[from] reqwest::Error),

    /// Failed to parse authentication response.
    #[error("Auth response parse error: {0}")]
    Parse(String),
}

impl AuthError {
    /// The actor whose session is affected, if the error names one.
    pub fn actor(&self) -> Option<Actor> {
        match self {
            Self::SessionExpired { actor } | Self::ReauthRequired { actor, .. } | Self::NotLoggedIn { actor } => {
                Some(*actor)
            }
            _ => None,
        }
    }
}
