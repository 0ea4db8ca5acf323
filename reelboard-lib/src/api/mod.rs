//! Platform API operations.
//!
//! Methods on [`DashboardClient`](crate::DashboardClient) live in the
//! submodules; this module also exposes the endpoint table and envelope
//! decoding they are built on.

mod crud;
mod endpoints;
pub mod envelope;
mod metrics;
mod request;
mod retry;

pub use crud::to_record;
pub use endpoints::*;
pub use envelope::Payload;
pub use envelope::Shape;
pub use retry::RetryConfig;
