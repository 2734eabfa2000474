//! Smileworks CLI
//!
//! Serves the clinic site from the content backend, with helper commands
//! for checking the deployment and rendering single pages.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use clap::Parser;
use color_eyre::eyre::Result;

/// Command-line interface for Smileworks.
#[derive(Parser)]
#[command(
    name = "smileworks",
    version,
    about = "CMS-driven marketing site for a dental clinic"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: std::path::PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Override the configured port
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Validate configuration and content backend connectivity
    Check {
        /// Treat an unreachable backend as an error
        #[arg(long)]
        strict: bool,
    },
    /// Resolve one page and print its HTML to stdout
    Render {
        /// Page slug ("home" for the root route)
        slug: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    smileworks::init_tracing(cli.verbose);

    match cli.command {
        Commands::Serve { port } => {
            smileworks::cmd::serve::run(&cli.config, port).await?;
        }
        Commands::Check { strict } => {
            smileworks::cmd::check::run(&cli.config, strict).await?;
        }
        Commands::Render { slug } => {
            smileworks::cmd::render::run(&cli.config, &slug).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_cli_serve_command_parsing() {
        let args = ["smileworks", "serve", "--port", "8080"];
        let cli = Cli::parse_from(args);

        assert_eq!(cli.config, std::path::PathBuf::from("config.toml"));
        match cli.command {
            Commands::Serve { port } => assert_eq!(port, Some(8080)),
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_check_strict_flag() {
        let args = ["smileworks", "check", "--strict"];
        let cli = Cli::parse_from(args);

        match cli.command {
            Commands::Check { strict } => assert!(strict),
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_cli_render_command_parsing() {
        let args = ["smileworks", "--config", "site.toml", "-vv", "render", "about"];
        let cli = Cli::parse_from(args);

        assert_eq!(cli.config, std::path::PathBuf::from("site.toml"));
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Render { slug } => assert_eq!(slug, "about"),
            _ => panic!("Expected Render command"),
        }
    }
}
