//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the fixture server.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Host every engine binds to. Not configurable.
pub const HOST: &str = "localhost";

/// Root configuration for the fixture server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (port, connection limit).
    pub listener: ListenerConfig,

    /// Name of the server engine to run (`cherrypy`, `wsgiref`, ...).
    pub engine: EngineName,

    /// Settings for the pooled engine.
    pub pooled: PooledConfig,

    /// Basic authentication settings for the secured mount.
    pub auth: AuthConfig,

    /// Service catalog served by both application instances.
    pub catalog: CatalogConfig,

    /// Static file exposure under each application.
    pub static_files: StaticFilesConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl ServerConfig {
    /// `host:port` string the listener binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", HOST, self.listener.port)
    }
}

/// Engine name as written by the operator. Parsed into an
/// [`EngineKind`](crate::server::EngineKind) at startup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct EngineName(pub String);

impl Default for EngineName {
    fn default() -> Self {
        Self("cherrypy".to_string())
    }
}

impl std::fmt::Display for EngineName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Port to bind on [`HOST`]. Zero picks an ephemeral port.
    pub port: u16,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self { port: 8080 }
    }
}

/// Pooled engine configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PooledConfig {
    /// Number of runtime worker threads serving connections.
    pub worker_threads: usize,

    /// Upper bound on waiting for open connections after shutdown.
    /// `None` waits until every connection closes on its own.
    pub drain_timeout_secs: Option<u64>,
}

impl Default for PooledConfig {
    fn default() -> Self {
        Self {
            worker_threads: 10,
            drain_timeout_secs: None,
        }
    }
}

/// Basic authentication configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Realm named in the `WWW-Authenticate` challenge.
    pub realm: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            realm: "Login".to_string(),
        }
    }
}

/// Service catalog configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Free-text description shown on the catalog page.
    pub description: String,

    /// Services listed by the catalog.
    pub services: Vec<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            description: "Ladon cannot cover all use cases for Suds, but it is easy to set up and generates WSDLs."
                .to_string(),
            services: vec!["calculator".to_string(), "testservice".to_string()],
        }
    }
}

/// Static file exposure configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    /// URL prefix the directory is exposed under, relative to the mount.
    pub url_prefix: String,

    /// Directory on disk.
    pub directory: String,
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            url_prefix: "/wsdls".to_string(),
            directory: "wsdls".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
