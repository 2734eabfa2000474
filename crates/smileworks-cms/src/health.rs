//! Content backend health reporting.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::store::ContentStore;

/// Detailed health snapshot served at `/health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub healthy: bool,
    pub url: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Whether the backend answers a minimal settings query.
pub async fn check_connection(store: &ContentStore) -> bool {
    store.global_settings().await.is_some()
}

/// Build the health snapshot for the given backend URL.
pub async fn health_status(store: &ContentStore, url: Option<String>) -> HealthStatus {
    let healthy = check_connection(store).await;
    HealthStatus {
        healthy,
        url,
        timestamp: Utc::now(),
        error: (!healthy).then(|| "content backend unreachable or unconfigured".to_string()),
    }
}
