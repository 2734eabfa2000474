//! Serve command - runs the HTTP server.

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use smileworks_core::Config;

use crate::server::{AppState, build_router};

/// Run the serve command.
pub async fn run(config_path: &Path, port: Option<u16>) -> Result<()> {
    let mut config =
        Config::load_with_env(config_path).wrap_err("Failed to load configuration")?;
    if let Some(port) = port {
        config.server.port = port;
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let cms = config
        .cms_base_url()
        .unwrap_or_else(|| "offline (no backend configured)".to_string());

    let state = AppState::from_config(config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| format!("Failed to bind {addr}"))?;

    tracing::info!(%addr, cms = %cms, "smileworks listening");
    axum::serve(listener, app).await.wrap_err("Server failed")?;

    Ok(())
}
