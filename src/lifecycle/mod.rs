//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     Config → build dispatch graph → bind listener → Running
//!
//! Shutdown (shutdown.rs):
//!     GET /exit → ShutdownTrigger → spawned task → ShutdownHandle::shutdown
//!     Ctrl+C   → signals.rs ─────────────────────→ ShutdownHandle::shutdown
//!     Running → Stopping → engine stops accepting → Stopped
//! ```
//!
//! # Design Decisions
//! - One state cell per engine, written by shutdown, read by the serve loop
//! - Shutdown is requested asynchronously so the confirmation reaches the client first
//! - Pooled engine drains open connections; simple engine checks between requests

pub mod shutdown;
pub mod signals;
pub mod state;

pub use shutdown::{ShutdownHandle, ShutdownTrigger, SHUTDOWN_MESSAGE};
pub use state::{ServerState, StateCell};
