//! Client-side payload validation.
//!
//! Create payloads are checked before they are sent so obvious mistakes
//! (empty names, malformed emails, bad URLs) never reach the server.
//!
//! ```
//! use reelboard_lib::validation::Validator;
//!
//! let result = Validator::new()
//!     .field("name", "")
//!         .required("Name is required")
//!     .field("email", "not-an-email")
//!         .email("Invalid email format")
//!     .finish();
//!
//! let errors = result.unwrap_err();
//! assert!(errors.has("name", "required"));
//! assert!(errors.has("email", "email"));
//! ```

mod payloads;
mod validator;

pub use validator::*;

use crate::error::ValidationErrors;

/// A payload that can check itself before submission.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}
