//! Site configuration management.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Main configuration structure for Smileworks.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Content backend (CMS) settings.
    #[serde(default)]
    pub cms: CmsConfig,

    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Site-wide settings.
    #[serde(default)]
    pub site: SiteConfig,
}

/// Content backend configuration.
///
/// Both `base_url` and `static_token` are optional; without them the site
/// runs in degraded mode and serves the static fallback content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CmsConfig {
    /// Base URL of the CMS instance (e.g., "https://cms.example.com").
    #[serde(default)]
    pub base_url: Option<String>,

    /// Static API token used as bearer auth.
    #[serde(default)]
    pub static_token: Option<String>,

    /// Login email for the authenticated asset proxy.
    #[serde(default)]
    pub email: Option<String>,

    /// Login password for the authenticated asset proxy.
    #[serde(default)]
    pub password: Option<String>,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Site-wide configuration used by rendered chrome and fallbacks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Clinic display name.
    #[serde(default = "default_site_name")]
    pub name: String,

    /// Call-center phone number shown in fallback content.
    #[serde(default = "default_phone")]
    pub phone: String,

    /// LINE official account handle.
    #[serde(default = "default_line_handle")]
    pub line_handle: String,
}

// Default value functions
fn default_timeout_secs() -> u64 {
    10
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_site_name() -> String {
    "Smileworks Dental Clinic".to_string()
}

fn default_phone() -> String {
    "096 915 9391".to_string()
}

fn default_line_handle() -> String {
    "@BAOMUE".to_string()
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            static_token: None,
            email: None,
            password: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: default_site_name(),
            phone: default_phone(),
            line_handle: default_line_handle(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Variables use the `SMILEWORKS__` prefix with `__` as section
    /// separator, e.g. `SMILEWORKS__CMS__BASE_URL`.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let mut builder = config::Config::builder();
        if path.exists() {
            builder = builder.add_source(config::File::from(path));
        }
        let settings = builder
            .add_source(config::Environment::with_prefix("SMILEWORKS").separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        if let Some(url) = &self.cms.base_url {
            if url.is_empty() {
                return Err(CoreError::config("cms.base_url cannot be empty when set"));
            }
            if url.ends_with('/') {
                tracing::warn!("cms.base_url should not have a trailing slash");
            }
        }

        if self.cms.base_url.is_none() {
            tracing::warn!("cms.base_url is not configured; CMS data will not be loaded");
        }

        Ok(())
    }

    /// CMS base URL with any trailing slash stripped.
    #[must_use]
    pub fn cms_base_url(&self) -> Option<String> {
        self.cms
            .base_url
            .as_ref()
            .map(|url| url.trim_end_matches('/').to_string())
    }
}
