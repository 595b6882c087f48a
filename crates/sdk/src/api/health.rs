//! Health API endpoints.

use crate::client::OrbitalClient;
use crate::error::OrbitalResult;
use serde::{Deserialize, Serialize};

/// Health API for checking server status.
pub struct HealthApi<'a> {
    client: &'a OrbitalClient,
}

impl<'a> HealthApi<'a> {
    pub(crate) fn new(client: &'a OrbitalClient) -> Self {
        Self { client }
    }

    /// Check basic health status.
    pub async fn check(&self) -> OrbitalResult<HealthCheck> {
        self.client
            .http
            .get("/health")
            .await
            .map_err(|e| e.with_context("check health"))
    }
}

/// Basic health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheck {
    pub status: String,
}
