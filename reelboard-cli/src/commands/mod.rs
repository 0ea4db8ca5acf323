//! Subcommand implementations.

pub mod metrics;
pub mod records;
pub mod session;

use reelboard_lib::DashboardClient;
use reelboard_lib::auth::AuthContext;

/// What every command gets to work with.
pub struct App {
    pub auth: AuthContext,
    pub client: DashboardClient,
}
