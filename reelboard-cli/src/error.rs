//! CLI errors.

use reelboard_lib::error::ApiError;
use reelboard_lib::error::StoreError;
use reelboard_lib::error::TableError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Lib(#[from] reelboard_lib::Error),

    /// The `--data` argument is not valid JSON.
    #[error("Invalid JSON in --data: {0}")]
    InvalidJson(serde_json::Error),

    #[error("Cannot open session store: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<TableError> for CliError {
    fn from(e: TableError) -> Self {
        Self::Lib(e.into())
    }
}

impl CliError {
    /// A follow-up hint for the user, if the error has an obvious fix.
    pub fn hint(&self) -> Option<String> {
        let Self::Lib(e) = self else { return None };
        match e {
            reelboard_lib::Error::Auth(auth) if e.needs_login() => auth
                .actor()
                .map(|actor| format!("run `reelboard login {}` to sign in again", actor)),
            reelboard_lib::Error::Api(ApiError::Network(_) | ApiError::Timeout(_)) => {
                Some("is the API server running? Check --api-url".to_string())
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json_error() -> serde_json::Error {
        serde_json::from_str::<serde_json::Value>("{").unwrap_err()
    }

    #[test]
    fn test_output_errors_do_not_blame_data() {
        let err = CliError::from(reelboard_lib::Error::from(json_error()));
        assert!(err.to_string().starts_with("Serialization error"));

        let err = CliError::InvalidJson(json_error());
        assert!(err.to_string().starts_with("Invalid JSON in --data"));
    }
}
