//! OS signal handling.
//!
//! # Responsibilities
//! - Register a Ctrl+C handler on the engine's runtime
//! - Translate it into the same shutdown request `/exit` makes
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - The listener task ends with the server; it never outlives the runtime

use crate::lifecycle::shutdown::ShutdownHandle;

/// Wait for Ctrl+C, then request shutdown. Returns early if shutdown is
/// requested some other way first.
pub async fn shutdown_on_ctrl_c(handle: ShutdownHandle) {
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            match result {
                Ok(()) => {
                    tracing::info!("Shutdown signal received");
                    handle.shutdown();
                }
                Err(e) => tracing::error!(error = %e, "Failed to install Ctrl+C handler"),
            }
        }
        _ = handle.requested() => {}
    }
}
