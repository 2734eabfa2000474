//! Authenticated asset proxying and file URL helpers.
//!
//! The asset endpoint of the backend requires login credentials rather than
//! the static API token, so the proxy keeps a process-wide access token
//! cache: populated on first use, expired ahead of the backend's own TTL,
//! and invalidated on 401 with a single retry.

use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use smileworks_core::Config;
use smileworks_core::content::FileRef;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::error::{CmsError, Result};

/// Safety margin subtracted from the backend's token TTL.
const EXPIRY_BUFFER: Duration = Duration::from_secs(300);

/// TTL assumed when the login response carries none (15 minutes).
const DEFAULT_EXPIRES_MS: u64 = 900_000;

/// Process-wide access token cache with an explicit lifecycle:
/// populate on first use, expire on TTL, invalidate on 401.
#[derive(Debug, Default)]
pub struct TokenCache {
    inner: Mutex<CacheState>,
}

#[derive(Debug, Default)]
struct CacheState {
    token: Option<String>,
    expires_at: Option<Instant>,
}

impl TokenCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached token, if present and not within the expiry buffer.
    pub async fn get(&self) -> Option<String> {
        let state = self.inner.lock().await;
        let expires_at = state.expires_at?;
        if expires_at <= Instant::now() + EXPIRY_BUFFER {
            return None;
        }
        state.token.clone()
    }

    /// Store a fresh token with its time to live.
    pub async fn put(&self, token: String, expires_in: Duration) {
        let mut state = self.inner.lock().await;
        state.token = Some(token);
        state.expires_at = Some(Instant::now() + expires_in);
    }

    /// Drop the cached token (e.g. after a 401).
    pub async fn invalidate(&self) {
        let mut state = self.inner.lock().await;
        state.token = None;
        state.expires_at = None;
    }
}

/// A proxied asset body with its content type.
#[derive(Debug, Clone)]
pub struct FetchedAsset {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Fetches protected assets from the backend with cached login auth.
pub struct AssetProxy {
    client: reqwest::Client,
    base_url: String,
    email: String,
    password: String,
    tokens: TokenCache,
}

#[derive(Debug, Deserialize)]
struct LoginEnvelope {
    data: LoginData,
}

#[derive(Debug, Deserialize)]
struct LoginData {
    access_token: String,
    #[serde(default)]
    expires: Option<u64>,
}

impl AssetProxy {
    /// Build a proxy when the configuration carries login credentials.
    pub fn from_config(config: &Config) -> Option<Self> {
        let base_url = config.cms_base_url()?;
        let email = config.cms.email.clone()?;
        let password = config.cms.password.clone()?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.cms.timeout_secs))
            .build()
            .ok()?;
        Some(Self {
            client,
            base_url,
            email,
            password,
            tokens: TokenCache::new(),
        })
    }

    /// Fetch one asset by file id, retrying once on a stale token.
    pub async fn fetch(&self, file_id: &str) -> Result<FetchedAsset> {
        let token = self
            .access_token()
            .await
            .ok_or_else(|| CmsError::Auth("login to content backend failed".to_string()))?;

        let response = self.fetch_with_token(file_id, &token).await?;
        if response.status().as_u16() == 401 {
            self.tokens.invalidate().await;
            let token = self
                .access_token()
                .await
                .ok_or_else(|| CmsError::Auth("re-login to content backend failed".to_string()))?;
            let retry = self.fetch_with_token(file_id, &token).await?;
            return Self::into_asset(retry).await;
        }

        Self::into_asset(response).await
    }

    async fn fetch_with_token(&self, file_id: &str, token: &str) -> Result<reqwest::Response> {
        let url = format!("{}/assets/{}", self.base_url, file_id);
        Ok(self.client.get(url).bearer_auth(token).send().await?)
    }

    async fn into_asset(response: reqwest::Response) -> Result<FetchedAsset> {
        let status = response.status();
        if !status.is_success() {
            return Err(CmsError::Api {
                status: status.as_u16(),
                message: "failed to fetch asset".to_string(),
            });
        }
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("image/jpeg")
            .to_string();
        let bytes = response.bytes().await?.to_vec();
        Ok(FetchedAsset {
            bytes,
            content_type,
        })
    }

    async fn access_token(&self) -> Option<String> {
        if let Some(token) = self.tokens.get().await {
            return Some(token);
        }

        let login = self
            .client
            .post(format!("{}/auth/login", self.base_url))
            .json(&json!({"email": self.email, "password": self.password}))
            .send()
            .await;

        let response = match login {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                tracing::error!(status = %response.status(), "asset proxy login failed");
                return None;
            }
            Err(e) => {
                tracing::error!(error = %e, "asset proxy login error");
                return None;
            }
        };

        let envelope: LoginEnvelope = match response.json().await {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::error!(error = %e, "asset proxy login response failed to decode");
                return None;
            }
        };

        let expires_ms = envelope.data.expires.unwrap_or(DEFAULT_EXPIRES_MS);
        self.tokens
            .put(
                envelope.data.access_token.clone(),
                Duration::from_millis(expires_ms),
            )
            .await;
        Some(envelope.data.access_token)
    }
}

/// Whether a string is a well-formed backend file id.
#[must_use]
pub fn is_valid_file_id(id: &str) -> bool {
    uuid::Uuid::parse_str(id).is_ok()
}

/// Resolve a file reference to a servable URL.
///
/// Absolute, rooted, and data URLs pass through unchanged; bare ids must be
/// valid UUIDs and resolve against the backend's asset endpoint.
#[must_use]
pub fn file_url(base_url: Option<&str>, file: &FileRef) -> Option<String> {
    if let FileRef::Id(id) = file {
        if id.starts_with("http") || id.starts_with('/') || id.starts_with("data:") {
            return Some(id.clone());
        }
    }

    let id = file.id();
    if !is_valid_file_id(id) {
        tracing::warn!(id, "invalid file id, cannot build asset URL");
        return None;
    }

    let base = base_url?;
    Some(format!("{}/assets/{}", base.trim_end_matches('/'), id))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILE_ID: &str = "ec7f76a9-b773-48f2-ad44-c1ef877851dc";

    #[test]
    fn test_is_valid_file_id() {
        assert!(is_valid_file_id(FILE_ID));
        assert!(!is_valid_file_id("not-a-uuid"));
        assert!(!is_valid_file_id(""));
    }

    #[test]
    fn test_file_url_passthrough() {
        let url = FileRef::Id("https://cdn.example.com/a.png".to_string());
        assert_eq!(
            file_url(Some("https://cms.example.com"), &url).as_deref(),
            Some("https://cdn.example.com/a.png")
        );

        let rooted = FileRef::Id("/images/a.png".to_string());
        assert_eq!(file_url(None, &rooted).as_deref(), Some("/images/a.png"));
    }

    #[test]
    fn test_file_url_builds_asset_path() {
        let file = FileRef::Object {
            id: FILE_ID.to_string(),
        };
        assert_eq!(
            file_url(Some("https://cms.example.com/"), &file).as_deref(),
            Some(format!("https://cms.example.com/assets/{FILE_ID}").as_str())
        );
    }

    #[test]
    fn test_file_url_rejects_bad_id_and_missing_base() {
        let bad = FileRef::Id("junk".to_string());
        assert!(file_url(Some("https://cms.example.com"), &bad).is_none());

        let good = FileRef::Id(FILE_ID.to_string());
        assert!(file_url(None, &good).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_token_cache_lifecycle() {
        let cache = TokenCache::new();
        assert!(cache.get().await.is_none());

        cache
            .put("tok-1".to_string(), Duration::from_secs(900))
            .await;
        assert_eq!(cache.get().await.as_deref(), Some("tok-1"));

        // Within the 5-minute buffer of expiry the token reads as absent.
        tokio::time::advance(Duration::from_secs(650)).await;
        assert!(cache.get().await.is_none());

        cache
            .put("tok-2".to_string(), Duration::from_secs(900))
            .await;
        assert_eq!(cache.get().await.as_deref(), Some("tok-2"));

        cache.invalidate().await;
        assert!(cache.get().await.is_none());
    }
}
