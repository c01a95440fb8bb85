//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events with structured fields
//!     → logging.rs (subscriber, filter, formatting)
//!
//! Pooled engine additionally:
//!     → tower-http TraceLayer spans per request
//!     → x-request-id set and propagated
//! ```

pub mod logging;
