//! # Configuration
//!
//! Settings come from an optional TOML file, then environment overrides.
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 8080
//! rate_limit = 100          # requests per minute, 0 disables
//! cors_origins = "*"        # or a comma-separated list
//!
//! [scoring]
//! base_weight = 40
//! backing_weight = 20
//! rebuttal_weight = 20
//! qualifier_weight = 20
//!
//! [layout]
//! max_label_length = 40
//! ```
//!
//! ## Environment Overrides
//!
//! - `TOULMIN_RATE_LIMIT`: requests per minute
//! - `TOULMIN_CORS_ORIGINS`: `*` or comma-separated origins

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use toulmin_core::{LayoutOptions, ScoringWeights};

/// Config file read when `--config` is not given, if it exists.
pub const DEFAULT_CONFIG_FILE: &str = "toulmin.toml";

/// Default rate limit: 100 requests per minute.
pub const DEFAULT_RATE_LIMIT: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Requests per minute; 0 disables rate limiting.
    pub rate_limit: u32,
    /// `None` restricts CORS to localhost.
    pub cors_origins: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            rate_limit: DEFAULT_RATE_LIMIT,
            cors_origins: None,
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub scoring: ScoringWeights,
    pub layout: LayoutOptions,
}

impl AppConfig {
    /// Parse a TOML document and validate it.
    pub fn from_toml_str(source: &str) -> Result<Self, AppError> {
        let config: Self = toml::from_str(source)?;
        config.scoring.validate()?;
        Ok(config)
    }

    /// Load from `path`, or from [`DEFAULT_CONFIG_FILE`] if present, then
    /// apply environment overrides.
    ///
    /// An explicit path that cannot be read is an error; a missing default
    /// file is not.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let mut config = match path {
            Some(path) => Self::from_toml_str(&std::fs::read_to_string(path)?)?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_toml_str(&std::fs::read_to_string(DEFAULT_CONFIG_FILE)?)?
            }
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply `TOULMIN_*` overrides looked up through `lookup`.
    ///
    /// Unparseable values are ignored with a warning.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(raw) = lookup("TOULMIN_RATE_LIMIT") {
            match raw.trim().parse() {
                Ok(limit) => self.server.rate_limit = limit,
                Err(_) => tracing::warn!("Ignoring invalid TOULMIN_RATE_LIMIT '{}'", raw),
            }
        }
        if let Some(origins) = lookup("TOULMIN_CORS_ORIGINS") {
            self.server.cors_origins = Some(origins);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_document_gives_defaults() {
        let config = AppConfig::from_toml_str("").expect("parse");
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.server.addr(), "127.0.0.1:8080");
        assert_eq!(config.layout.max_label_length, None);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [server]
            port = 9000

            [scoring]
            base_weight = 50

            [layout]
            max_label_length = 24
            "#,
        )
        .expect("parse");

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.rate_limit, DEFAULT_RATE_LIMIT);
        assert_eq!(config.scoring.base_weight, 50);
        assert_eq!(config.scoring.backing_weight, 20);
        assert_eq!(config.layout.max_label_length, Some(24));
    }

    #[test]
    fn overweight_rejected() {
        let result = AppConfig::from_toml_str("[scoring]\nqualifier_weight = 150\n");
        assert!(matches!(result, Err(AppError::Core(_))));
    }

    #[test]
    fn malformed_toml_rejected() {
        assert!(matches!(
            AppConfig::from_toml_str("[server\nport = 1"),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn overrides_apply() {
        let mut config = AppConfig::default();
        config.apply_overrides(|key| match key {
            "TOULMIN_RATE_LIMIT" => Some("5".to_string()),
            "TOULMIN_CORS_ORIGINS" => Some("*".to_string()),
            _ => None,
        });
        assert_eq!(config.server.rate_limit, 5);
        assert_eq!(config.server.cors_origins.as_deref(), Some("*"));
    }

    #[test]
    fn invalid_override_ignored() {
        let mut config = AppConfig::default();
        config.apply_overrides(|key| (key == "TOULMIN_RATE_LIMIT").then(|| "lots".to_string()));
        assert_eq!(config.server.rate_limit, DEFAULT_RATE_LIMIT);
    }

    #[test]
    fn load_reads_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(file, "[server]\nhost = \"0.0.0.0\"").expect("write");

        let config = AppConfig::load(Some(file.path())).expect("load");
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn load_missing_explicit_file_fails() {
        let result = AppConfig::load(Some(Path::new("/nonexistent/toulmin.toml")));
        assert!(matches!(result, Err(AppError::Io(_))));
    }
}
