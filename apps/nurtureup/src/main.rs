//! # NurtureUp - Stage Service
//!
//! The main binary for the NurtureUp developmental stage engine.
//!
//! This application provides:
//! - HTTP REST API server (axum-based) for dashboard pages
//! - CLI interface for classification and registry lookups
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │              apps/nurtureup (THE BINARY)             │
//! │                                                      │
//! │   ┌─────────────┐    ┌─────────────┐    ┌────────┐   │
//! │   │    CLI      │    │  HTTP API   │    │ Config │   │
//! │   │   (clap)    │    │   (axum)    │    │ (toml) │   │
//! │   └──────┬──────┘    └──────┬──────┘    └───┬────┘   │
//! │          └──────────────────┼───────────────┘        │
//! │                             ▼                        │
//! │                   ┌──────────────────┐               │
//! │                   │  nurtureup-core  │               │
//! │                   │   (THE ENGINE)   │               │
//! │                   └──────────────────┘               │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP server
//! nurtureup server --host 0.0.0.0 --port 8080
//!
//! # CLI operations
//! nurtureup classify 2023-01-15
//! nurtureup parent --child 2019-04-02 --child 2023-01-15@toddler
//! nurtureup upcoming 2023-01-15 --buffer-days 30
//! ```

use clap::Parser;
use nurtureup::{
    AppConfig, LogFormat,
    cli::{self, Cli},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Configuration decides the log format, so it loads before tracing exists.
    let config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    init_tracing(&config, cli.verbose);

    // Display startup banner
    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli, config).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing. `RUST_LOG` wins over the configured filter.
fn init_tracing(config: &AppConfig, verbose: bool) {
    let fallback = if verbose {
        "nurtureup=debug,tower_http=debug"
    } else {
        config.logging.filter.as_str()
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback));

    match config.logging.format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}

/// Print the NurtureUp startup banner.
fn print_banner() {
    println!(
        r#"
  _   _            _                  _   _
 | \ | |_   _ _ __| |_ _   _ _ __ ___| | | |_ __
 |  \| | | | | '__| __| | | | '__/ _ \ | | | '_ \
 | |\  | |_| | |  | |_| |_| | | |  __/ |_| | |_) |
 |_| \_|\__,_|_|   \__|\__,_|_|  \___|\___/| .__/
                                           |_|
  Stage Service v{}

  Newborn • Toddler • Early Childhood • School Age • Adolescence
"#,
        env!("CARGO_PKG_VERSION")
    );
}
