//! HTTP request handling subsystem.
//!
//! # Data Flow
//! ```text
//! engine (pooled or simple)
//!     → handler.rs (Handler contract, adapters)
//!     → routing::Director (first segment → mount)
//!     → request.rs (path rewrite, MountPath bookkeeping)
//!     → security / lifecycle / app handlers
//!     → response.rs (plaintext & challenge responses)
//!     → Send to client
//! ```

pub mod handler;
pub mod request;
pub mod response;

pub use handler::{AxumApp, Handler, HandlerFuture, SharedHandler};
pub use request::MountPath;
