//! Check command - validates configuration and backend connectivity.

use std::path::Path;

use color_eyre::eyre::{Result, eyre};
use smileworks_cms::{ContentStore, backend_from_config, health};
use smileworks_core::Config;

/// Run the check command.
pub async fn run(config_path: &Path, strict: bool) -> Result<()> {
    let config = Config::load_with_env(config_path)?;
    println!("  Configuration OK: {}", config_path.display());

    match config.cms_base_url() {
        Some(url) => println!("  Content backend: {url}"),
        None => println!("  Content backend: not configured (static fallback only)"),
    }

    let store = ContentStore::new(backend_from_config(&config));
    let status = health::health_status(&store, config.cms_base_url()).await;

    if status.healthy {
        println!("  Connectivity:    OK");
    } else {
        println!("  Connectivity:    UNREACHABLE");
        if strict {
            return Err(eyre!("content backend is unreachable"));
        }
    }

    Ok(())
}
