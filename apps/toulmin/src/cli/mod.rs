//! # Toulmin CLI Module
//!
//! This module implements the CLI interface for Toulmin.
//!
//! ## Available Commands
//!
//! - `server` - Start the HTTP gateway
//! - `verify` - Verify an argument file
//! - `analyze` - Quality report for an argument file
//! - `layout` - Export the layout of an argument file
//!
//! Input files are JSON: either a list of submissions
//! (`[{"claim": ..., "grounds": ..., "warrant": ...}]`) or a raw graph
//! (`{"nodes": [...], "relations": [...]}`).

mod commands;

use crate::config::AppConfig;
use crate::error::AppError;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Toulmin - argument graph verification
///
/// Stores arguments as Toulmin graphs, checks their structure, scores their
/// completeness and prepares them for rendering.
#[derive(Parser, Debug)]
#[command(name = "toulmin")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a TOML config file (default: ./toulmin.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server
    Server {
        /// Host to bind to (overrides config)
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Argument file to load before serving
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Verify the structure of an argument file
    Verify {
        /// Path to the input file
        #[arg(short, long)]
        file: PathBuf,

        /// Verify only the argument rooted at this claim id
        #[arg(short, long)]
        argument: Option<String>,
    },

    /// Score arguments and list improvement hints
    Analyze {
        /// Path to the input file
        #[arg(short, long)]
        file: PathBuf,

        /// Analyze only the argument rooted at this claim id
        #[arg(short, long)]
        argument: Option<String>,
    },

    /// Export a renderer-neutral layout
    Layout {
        /// Path to the input file
        #[arg(short, long)]
        file: PathBuf,

        /// Truncate labels to this many characters
        #[arg(short, long)]
        max_label_length: Option<usize>,

        /// Also write the canonical binary snapshot here
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), AppError> {
    let config = AppConfig::load(cli.config.as_deref())?;
    let json_mode = cli.json_mode;

    if cli.verbose {
        tracing::debug!("Loaded configuration: {:?}", config);
    }

    match cli.command {
        Some(Commands::Server { host, port, file }) => {
            cmd_server(config, host, port, file.as_deref()).await
        }
        Some(Commands::Verify { file, argument }) => {
            cmd_verify(&file, argument.as_deref(), json_mode)
        }
        Some(Commands::Analyze { file, argument }) => {
            cmd_analyze(&config, &file, argument.as_deref(), json_mode)
        }
        Some(Commands::Layout {
            file,
            max_label_length,
            output,
        }) => cmd_layout(
            &config,
            &file,
            max_label_length,
            output.as_deref(),
            json_mode,
        ),
        None => {
            println!("No command given. Run `toulmin --help` for usage.");
            Ok(())
        }
    }
}
