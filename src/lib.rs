//! Inspectable HTTP fixture server.
//!
//! Multiplexes requests across independently built applications, gates one
//! of them behind Basic authentication, and exposes an HTTP shutdown trigger,
//! all on a choice of server engine.
//!
//! ```text
//!                 ┌──────────────────────────────────────────────┐
//!   request ─────▶│ engine (pooled │ simple)                     │
//!                 │    └─▶ Director                              │
//!                 │          ├─ /        → SharedData → catalog  │
//!                 │          ├─ /secure  → BasicAuth → SharedData│
//!                 │          │                         → catalog │
//!                 │          └─ /exit    → ShutdownTrigger       │
//!                 └──────────────────────────────────────────────┘
//! ```

pub mod app;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod security;
pub mod server;

pub use config::ServerConfig;
pub use http::Handler;
pub use lifecycle::{ShutdownHandle, ShutdownTrigger};
pub use routing::Director;
pub use security::BasicAuth;
pub use server::{create_server, EngineKind, ServerError, ServerLifecycle};
