//! Authentication
//!
//! Admins and creators sign in separately. Each gets a [`Session`] holding
//! a JWT bearer token that is also kept as a cookie in a [`CookieStore`].
//! Both sessions live in one [`AuthContext`].

mod actor;
mod context;
mod cookie;
pub mod jwt;
mod session;
mod sqlite;
mod token;

pub use actor::Actor;
pub use context::AuthContext;
pub use cookie::CookieStore;
pub use cookie::MemoryCookieStore;
pub use cookie::StoredCookie;
pub use session::DEFAULT_REFRESH_BUFFER;
pub use session::Session;
pub use sqlite::SqliteCookieStore;
pub use token::AccessToken;
pub use token::StaticTokenSource;
pub use token::TokenSource;
