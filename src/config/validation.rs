//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the engine name resolves to an engine
//! - Validate value ranges (worker threads > 0, prefixes well formed)

use thiserror::Error;

use crate::config::schema::ServerConfig;
use crate::server::EngineKind;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is not a supported server type")]
    UnknownEngine(String),

    #[error("pooled.worker_threads must be greater than zero")]
    NoWorkerThreads,

    #[error("static_files.url_prefix must start with '/' and name a segment, got {0:?}")]
    BadUrlPrefix(String),

    #[error("auth.realm must not contain '\"'")]
    BadRealm,
}

/// Validate a parsed configuration, collecting every problem found.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = config.engine.0.parse::<EngineKind>() {
        tracing::debug!(error = %e, "Engine name rejected");
        errors.push(ValidationError::UnknownEngine(config.engine.to_string()));
    }

    if config.pooled.worker_threads == 0 {
        errors.push(ValidationError::NoWorkerThreads);
    }

    let prefix = &config.static_files.url_prefix;
    if !prefix.starts_with('/') || prefix.trim_matches('/').is_empty() {
        errors.push(ValidationError::BadUrlPrefix(prefix.clone()));
    }

    if config.auth.realm.contains('"') {
        errors.push(ValidationError::BadRealm);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ServerConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ServerConfig::default();
        config.engine.0 = "twisted".into();
        config.pooled.worker_threads = 0;
        config.static_files.url_prefix = "wsdls".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::NoWorkerThreads));
        assert!(errors.contains(&ValidationError::UnknownEngine("twisted".into())));
    }

    #[test]
    fn test_root_prefix_rejected() {
        let mut config = ServerConfig::default();
        config.static_files.url_prefix = "/".into();
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::BadUrlPrefix("/".into())]
        );
    }
}
