//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → CLI overrides (engine name, port)
//!     → validation.rs (semantic checks)
//!     → ServerConfig (validated, immutable)
//!     → read once while the dispatch graph is built
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no reload
//! - All fields have defaults so the server runs without a file
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{parse_config, resolve_config, ConfigError, ConfigOverrides};
pub use schema::{
    AuthConfig, CatalogConfig, EngineName, ListenerConfig, ObservabilityConfig, PooledConfig,
    ServerConfig, StaticFilesConfig, HOST,
};
