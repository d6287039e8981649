//! HTTP client for the JSON data source.
//!
//! Only the collections named by [`Resource`] can be requested. Any failure
//! (transport, timeout, non-2xx status, undecodable body) surfaces as
//! [`DataError::FetchFailure`]; there is no retry.

use crate::error::DataError;
use crate::services::metrics::FETCH_DURATION;
use anyhow::{bail, Context};
use dashboard_core::error::AppError;
use dashboard_core::observability::trace_headers;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;
use tracing::{debug, instrument};

/// Collections exposed by the data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Invoices,
    Customers,
    Revenue,
}

impl Resource {
    pub fn path(&self) -> &'static str {
        match self {
            Resource::Invoices => "invoices",
            Resource::Customers => "customers",
            Resource::Revenue => "revenue",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Client for the JSON data source.
#[derive(Clone)]
pub struct FetchClient {
    client: Client,
    base_url: String,
}

impl FetchClient {
    /// Create a client whose requests fail after `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            AppError::InternalError(anyhow::anyhow!("Failed to build HTTP client: {}", e))
        })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch and decode a whole collection.
    #[instrument(skip(self), fields(resource = %resource))]
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        resource: Resource,
    ) -> Result<Vec<T>, DataError> {
        let timer = FETCH_DURATION
            .with_label_values(&[resource.path()])
            .start_timer();

        let result = self.get_collection(resource).await;

        timer.observe_duration();

        result.map_err(|source| DataError::FetchFailure { resource, source })
    }

    async fn get_collection<T: DeserializeOwned>(
        &self,
        resource: Resource,
    ) -> anyhow::Result<Vec<T>> {
        let url = format!("{}/{}", self.base_url, resource.path());

        let response = self
            .client
            .get(&url)
            .headers(trace_headers())
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?;

        let status = response.status();
        if !status.is_success() {
            bail!("{} responded with status {}", url, status);
        }

        let body = response
            .text()
            .await
            .with_context(|| format!("Failed to read body from {}", url))?;
        let items: Vec<T> = serde_json::from_str(&body)
            .with_context(|| format!("Malformed {} payload", resource))?;

        debug!(count = items.len(), "Fetched collection");

        Ok(items)
    }
}
