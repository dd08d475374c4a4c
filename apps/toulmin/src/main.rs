//! # Toulmin - Argument Verification Server
//!
//! The main binary for the Toulmin argument graph engine.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────┐
//! │              apps/toulmin (THE BINARY)            │
//! │                                                   │
//! │   ┌─────────────┐            ┌─────────────┐      │
//! │   │    CLI      │            │  HTTP API   │      │
//! │   │   (clap)    │            │   (axum)    │      │
//! │   └──────┬──────┘            └──────┬──────┘      │
//! │          └─────────────┬────────────┘             │
//! │                        ▼                          │
//! │                ┌───────────────┐                  │
//! │                │ toulmin-core  │                  │
//! │                │  (THE LOGIC)  │                  │
//! │                └───────────────┘                  │
//! └───────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP server
//! toulmin server --host 0.0.0.0 --port 8080
//!
//! # CLI operations
//! toulmin verify -f arguments.json
//! toulmin analyze -f arguments.json --json-mode
//! toulmin layout -f arguments.json --max-label-length 40
//! ```

use clap::Parser;
use toulmin::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // TOULMIN_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("TOULMIN_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "toulmin=info,tower_http=debug".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    let cli = cli::Cli::parse();

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the startup banner.
fn print_banner() {
    println!(
        r#"
  Toulmin v{}
  Claim - Grounds - Warrant - Backing - Rebuttal - Qualifier
"#,
        env!("CARGO_PKG_VERSION")
    );
}
