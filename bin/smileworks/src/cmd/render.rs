//! Render command - resolves one page and prints its HTML.
//!
//! Useful for inspecting what a slug produces without running the server.

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use smileworks_cms::{Resolution, Resolver, backend_from_config, collect_auxiliary};
use smileworks_core::Config;
use smileworks_render::document::render_document;
use smileworks_render::{PageRenderer, fallback};

/// Run the render command.
pub async fn run(config_path: &Path, slug: &str) -> Result<()> {
    let config = Config::load_with_env(config_path).wrap_err("Failed to load configuration")?;

    let store = smileworks_cms::ContentStore::new(backend_from_config(&config));
    let resolver = Resolver::new(store.clone());
    let renderer = PageRenderer::new();

    let (title, body) = match resolver.resolve_page(slug).await {
        Resolution::Found(page) => {
            let aux = collect_auxiliary(&store, &page.blocks).await;
            let body = renderer.render_page(&page.blocks, &aux);
            (format!("{} | {}", page.page.title, config.site.name), body)
        }
        Resolution::NotFound if slug == "home" => {
            (config.site.name.clone(), fallback::homepage(&config.site))
        }
        Resolution::NotFound => {
            eprintln!("page not found: {slug}");
            std::process::exit(1);
        }
    };

    println!("{}", render_document(&title, None, &body)?);
    Ok(())
}
