//! Shutdown coordination for the server engines.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use tokio::sync::watch;

use crate::http::handler::{Handler, HandlerFuture};
use crate::http::response::text;
use crate::lifecycle::state::{ServerState, StateCell};

/// Body of the response to a shutdown request.
pub const SHUTDOWN_MESSAGE: &str = "Server shutting down...";

/// Coordinator for shutdown.
///
/// Owns the engine's state cell and a watch channel that serve loops can
/// wait on. Cloning shares both.
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    state: Arc<StateCell>,
    tx: Arc<watch::Sender<bool>>,
}

impl ShutdownHandle {
    /// Create a new shutdown coordinator in the `Unstarted` state.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self {
            state: Arc::new(StateCell::new()),
            tx: Arc::new(tx),
        }
    }

    /// Shared state cell.
    pub fn state(&self) -> &StateCell {
        &self.state
    }

    /// Request shutdown: Running → Stopping.
    ///
    /// Returns false if the server was not running (never started, or
    /// shutdown already requested).
    pub fn shutdown(&self) -> bool {
        if !self.state.transition(ServerState::Running, ServerState::Stopping) {
            tracing::debug!(state = %self.state.get(), "Shutdown ignored");
            return false;
        }
        tracing::info!("Shutdown requested");
        self.tx.send_replace(true);
        true
    }

    /// Resolve once shutdown has been requested.
    pub async fn requested(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives in self, so wait_for can only fail if self is gone.
        let _ = rx.wait_for(|requested| *requested).await;
    }
}

impl Default for ShutdownHandle {
    fn default() -> Self {
        Self::new()
    }
}

type Callback = Arc<dyn Fn() + Send + Sync>;

/// Handler that schedules a shutdown callback and confirms immediately.
///
/// The callback runs on a separate task so the confirmation is written
/// before the listener goes away; a handler must never wait on its own
/// server's shutdown.
pub struct ShutdownTrigger {
    callback: Callback,
}

impl ShutdownTrigger {
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self {
            callback: Arc::new(callback),
        }
    }

    /// Trigger bound to a [`ShutdownHandle`].
    pub fn for_handle(handle: ShutdownHandle) -> Self {
        Self::new(move || {
            handle.shutdown();
        })
    }
}

impl Handler for ShutdownTrigger {
    fn handle(&self, request: Request<Body>) -> HandlerFuture<'_> {
        tracing::info!(method = %request.method(), "Shutdown trigger invoked");
        let callback = Arc::clone(&self.callback);
        tokio::spawn(async move { callback() });

        Box::pin(async { text(StatusCode::OK, SHUTDOWN_MESSAGE) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    #[test]
    fn test_shutdown_only_from_running() {
        let handle = ShutdownHandle::new();
        assert!(!handle.shutdown());
        assert_eq!(handle.state().get(), ServerState::Unstarted);

        handle.state().set(ServerState::Running);
        assert!(handle.shutdown());
        assert_eq!(handle.state().get(), ServerState::Stopping);

        assert!(!handle.shutdown());
    }

    #[tokio::test]
    async fn test_requested_resolves_across_clones() {
        let handle = ShutdownHandle::new();
        handle.state().set(ServerState::Running);

        let waiter = handle.clone();
        let task = tokio::spawn(async move { waiter.requested().await });

        handle.shutdown();
        tokio::time::timeout(Duration::from_secs(1), task)
            .await
            .expect("waiter did not wake")
            .unwrap();
    }

    #[tokio::test]
    async fn test_trigger_confirms_and_schedules() {
        let fired = Arc::new(AtomicBool::new(false));
        let f = fired.clone();
        let trigger = ShutdownTrigger::new(move || f.store(true, Ordering::SeqCst));

        let res = trigger
            .handle(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers()["content-type"], "text/plain");
        let body = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], SHUTDOWN_MESSAGE.as_bytes());

        for _ in 0..100 {
            if fired.load(Ordering::SeqCst) {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("shutdown callback never ran");
    }

    #[tokio::test]
    async fn test_trigger_for_handle() {
        let handle = ShutdownHandle::new();
        handle.state().set(ServerState::Running);
        let trigger = ShutdownTrigger::for_handle(handle.clone());

        let _ = trigger.handle(Request::new(Body::empty())).await;
        tokio::time::timeout(Duration::from_secs(1), handle.requested())
            .await
            .expect("shutdown not requested");
        assert_eq!(handle.state().get(), ServerState::Stopping);
    }
}
