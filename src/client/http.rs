//! Dashboard REST API client
//!
//! `GET {API_BASE}/dashboard` with caching disabled, and the `/health` probe.

use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use reqwest::Client;
use std::time::Duration;

use super::error::FetchError;
use super::SnapshotSource;
use crate::snapshot::Snapshot;

/// Snapshot endpoint, relative to the API base
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Liveness endpoint, relative to the API base
pub const HEALTH_PATH: &str = "/health";

/// Fetches snapshots over HTTP
#[derive(Debug, Clone)]
pub struct HttpSnapshotSource {
    client: Client,
    base_url: String,
}

impl HttpSnapshotSource {
    /// Create a source for the given API base (trailing slashes are ignored)
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Check that the backend is up
    pub async fn health_check(&self) -> Result<(), FetchError> {
        let response = self
            .client
            .get(self.url(HEALTH_PATH))
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .await
            .map_err(FetchError::from_transport)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(FetchError::Status {
                status: response.status().as_u16(),
                message: response.text().await.unwrap_or_default(),
            })
        }
    }
}

#[async_trait]
impl SnapshotSource for HttpSnapshotSource {
    fn name(&self) -> &str {
        &self.base_url
    }

    async fn fetch(&self) -> Result<Snapshot, FetchError> {
        let url = self.url(DASHBOARD_PATH);
        let request_id = uuid::Uuid::new_v4().to_string();

        tracing::debug!(%url, %request_id, "Fetching dashboard snapshot");

        let response = self
            .client
            .get(&url)
            .header(CACHE_CONTROL, "no-cache, no-store")
            .header(PRAGMA, "no-cache")
            .header("X-Request-Id", request_id.as_str())
            .send()
            .await
            .map_err(FetchError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await.map_err(FetchError::from_transport)?;
        let value: serde_json::Value = serde_json::from_str(&body)?;

        // A `null` body is well-formed but empty; it fails the usability check downstream
        if value.is_null() {
            return Ok(Snapshot::default());
        }

        Ok(serde_json::from_value(value)?)
    }
}
