//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path)
//!     → director.rs (first segment lookup)
//!     → matched mount: path rewritten relative to the mount, MountPath extended
//!     → no match: default handler sees the original path
//!
//! Route Table (at startup):
//!     fixed (name, handler) pairs
//!     → lower-cased keys, duplicates rejected
//!     → frozen inside the Director
//! ```
//!
//! # Design Decisions
//! - Routes built at startup, immutable at runtime
//! - Deterministic: same path always reaches the same handler
//! - No dynamic registration

pub mod director;

pub use director::{Director, RouteTable, RouteTableError};
