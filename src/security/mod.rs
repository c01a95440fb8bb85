//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Request for a secured mount
//!     → basic_auth.rs (decode Authorization, username == password)
//!     → accepted: inner handler, request untouched
//!     → rejected: 401 + WWW-Authenticate challenge
//! ```

pub mod basic_auth;

pub use basic_auth::{authenticate, AuthRejection, BasicAuth, Credentials};
