//! Smileworks CLI Library
//!
//! Wires the content backend, resolver, and renderer into an HTTP server
//! and the helper commands exposed by the binary.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (serve, check, render)
//! - [`server`] - HTTP server: router, route handlers, shared state

pub mod cmd;
pub mod server;

pub use server::{AppState, build_router};

/// Initialize tracing with the specified verbosity level.
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
