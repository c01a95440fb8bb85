//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{EngineName, ServerConfig};
use crate::config::validation::{validate_config, ValidationError};
use crate::server::EngineKind;

/// Error type for configuration loading and engine selection.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    /// The requested server engine name matches no engine.
    #[error("{0} is not a supported server type")]
    UnknownEngine(String),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Values given on the command line. They replace the file's values
/// before anything is validated.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub engine: Option<String>,
    pub port: Option<u16>,
}

impl ConfigOverrides {
    pub fn apply(self, config: &mut ServerConfig) {
        if let Some(name) = self.engine {
            config.engine = EngineName(name);
        }
        if let Some(port) = self.port {
            config.listener.port = port;
        }
    }
}

/// Build the effective configuration from an optional TOML file.
pub fn resolve_config(
    path: Option<&Path>,
    overrides: ConfigOverrides,
) -> Result<ServerConfig, ConfigError> {
    let content = match path {
        Some(path) => fs::read_to_string(path)?,
        None => String::new(),
    };
    parse_config(&content, overrides)
}

/// Parse TOML text, apply `overrides`, then validate.
///
/// An unknown engine name is reported as [`ConfigError::UnknownEngine`]
/// ahead of any other problem.
pub fn parse_config(content: &str, overrides: ConfigOverrides) -> Result<ServerConfig, ConfigError> {
    let mut config: ServerConfig = toml::from_str(content)?;
    overrides.apply(&mut config);

    config.engine.0.parse::<EngineKind>()?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}
