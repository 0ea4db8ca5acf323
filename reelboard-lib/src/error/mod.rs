//! Error types

mod api;
mod auth;
mod field;
mod store;
mod table;
mod validation;

pub use api::*;
pub use auth::*;
pub use field::*;
pub use store::*;
pub use table::*;
pub use validation::*;

/// Top-level error returned by client operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Field(#[from] FieldError),
}

impl Error {
    /// Returns `true` if the user has to log in again.
    pub fn needs_login(&self) -> bool {
        matches!(
            self,
            Self::Auth(
                AuthError::SessionExpired { .. }
                    | AuthError::ReauthRequired { .. }
                    | AuthError::NotLoggedIn { .. }
            )
        )
    }

    /// Returns the HTTP status code if the server answered with an error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api(err) => err.status_code(),
            _ => None,
        }
    }
}
