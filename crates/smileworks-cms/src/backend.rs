//! Content backend transport.
//!
//! [`ContentBackend`] is the seam between the typed data layer and the wire:
//! the production implementation speaks the backend's REST dialect over
//! `reqwest`, and a misconfigured deployment gets [`OfflineBackend`], which
//! degrades to empty results instead of failing the site.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use smileworks_core::Config;

use crate::error::{CmsError, Result};
use crate::query::Query;

/// Read/write access to the content backend.
#[async_trait]
pub trait ContentBackend: Send + Sync {
    /// List records of a collection matching the query.
    async fn list(&self, collection: &str, query: &Query) -> Result<Vec<Value>>;

    /// Fetch a singleton collection (e.g. global settings).
    async fn singleton(&self, collection: &str, query: &Query) -> Result<Value>;

    /// Create one record in a collection, returning the created record.
    async fn create(&self, collection: &str, payload: Value) -> Result<Value>;
}

/// Response envelope wrapping every backend payload.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// REST transport over `reqwest` with static-token bearer auth.
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl HttpBackend {
    /// Build a backend for the given base URL (trailing slash stripped).
    pub fn new(base_url: &str, token: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    fn items_url(&self, collection: &str) -> String {
        format!("{}/items/{}", self.base_url, collection)
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(CmsError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl ContentBackend for HttpBackend {
    async fn list(&self, collection: &str, query: &Query) -> Result<Vec<Value>> {
        let response = self
            .client
            .get(self.items_url(collection))
            .bearer_auth(&self.token)
            .query(&query.to_params())
            .send()
            .await?;
        let envelope: Envelope<Vec<Value>> = Self::check_status(response).await?.json().await?;
        Ok(envelope.data)
    }

    async fn singleton(&self, collection: &str, query: &Query) -> Result<Value> {
        let response = self
            .client
            .get(self.items_url(collection))
            .bearer_auth(&self.token)
            .query(&query.to_params())
            .send()
            .await?;
        let envelope: Envelope<Value> = Self::check_status(response).await?.json().await?;
        Ok(envelope.data)
    }

    async fn create(&self, collection: &str, payload: Value) -> Result<Value> {
        let response = self
            .client
            .post(self.items_url(collection))
            .bearer_auth(&self.token)
            .json(&payload)
            .send()
            .await?;
        let envelope: Envelope<Value> = Self::check_status(response).await?.json().await?;
        Ok(envelope.data)
    }
}

/// Stand-in backend used when no CMS is configured.
///
/// Reads return empty results so the site can serve its static fallbacks;
/// writes are rejected.
#[derive(Debug, Default)]
pub struct OfflineBackend;

#[async_trait]
impl ContentBackend for OfflineBackend {
    async fn list(&self, collection: &str, _query: &Query) -> Result<Vec<Value>> {
        tracing::warn!(collection, "backend not configured, returning empty result");
        Ok(Vec::new())
    }

    async fn singleton(&self, collection: &str, _query: &Query) -> Result<Value> {
        tracing::warn!(collection, "backend not configured, returning empty result");
        Ok(Value::Null)
    }

    async fn create(&self, _collection: &str, _payload: Value) -> Result<Value> {
        Err(CmsError::Offline)
    }
}

/// Build the backend described by the configuration.
///
/// Missing URL or token yields the offline backend with a single warning,
/// mirroring the "run without a CMS" deployment mode.
pub fn backend_from_config(config: &Config) -> Arc<dyn ContentBackend> {
    match (config.cms_base_url(), config.cms.static_token.as_deref()) {
        (Some(url), Some(token)) => {
            match HttpBackend::new(&url, token, Duration::from_secs(config.cms.timeout_secs)) {
                Ok(backend) => Arc::new(backend),
                Err(e) => {
                    tracing::error!(error = %e, "failed to build HTTP backend, running offline");
                    Arc::new(OfflineBackend)
                }
            }
        }
        _ => {
            tracing::warn!("cms.base_url or cms.static_token missing; CMS data will not be loaded");
            Arc::new(OfflineBackend)
        }
    }
}
