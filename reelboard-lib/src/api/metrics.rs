//! Dashboard metrics.

use super::Endpoint;
use crate::DashboardClient;
use crate::error::Error;
use crate::model::Metrics;

impl DashboardClient {
    /// Fetches the platform metrics shown on the dashboard.
    pub async fn metrics(&self) -> Result<Metrics, Error> {
        Ok(self.call::<Metrics>(&Endpoint::metrics(), None).await?.data)
    }
}
