//! # toulmin
//!
//! Gateway and command line around `toulmin-core`.
//!
//! - [`api`]: axum HTTP gateway holding one in-memory argument graph
//! - [`cli`]: clap commands working on JSON argument files
//! - [`config`]: TOML configuration with environment overrides
//! - [`error`]: the application error type and its HTTP mapping

pub mod api;
pub mod cli;
pub mod config;
pub mod error;

pub use config::AppConfig;
pub use error::AppError;
