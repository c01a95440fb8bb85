//! Thread-pooled server engine.
//!
//! # Responsibilities
//! - Run the dispatch graph on a multi-threaded runtime via `axum::serve`
//! - Keep connections alive between requests
//! - Stop accepting on shutdown and drain open connections
//!
//! # Design Decisions
//! - Draining is not immediate: idle keep-alive connections close on their own
//! - An optional drain deadline bounds the wait
//! - Request IDs and HTTP tracing are added here, outside the dispatch graph

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::time::Duration;

use axum::{extract::Request, Router};
use tokio::net::TcpListener;
use tokio::runtime::{Builder, Runtime};
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::http::{Handler, SharedHandler};
use crate::lifecycle::{signals, ServerState, ShutdownHandle};
use crate::server::{bind_listener, build_dispatch_graph, EngineKind, ServerError, ServerLifecycle};

/// Multi-threaded engine with connection keep-alive and graceful drain.
pub struct PooledServer {
    config: ServerConfig,
    runtime: Runtime,
    handle: ShutdownHandle,
    graph: SharedHandler,
    listener: Option<TcpListener>,
    local_addr: Option<SocketAddr>,
}

impl PooledServer {
    /// Build the runtime and the dispatch graph. Nothing is bound yet.
    pub fn new(config: ServerConfig) -> Result<Self, ServerError> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(config.pooled.worker_threads.max(1))
            .thread_name("fixture-worker")
            .enable_all()
            .build()
            .map_err(ServerError::Runtime)?;

        let handle = ShutdownHandle::new();
        let graph = build_dispatch_graph(&config, handle.clone())?;

        Ok(Self {
            config,
            runtime,
            handle,
            graph: std::sync::Arc::new(graph),
            listener: None,
            local_addr: None,
        })
    }

    fn app(&self) -> Router {
        let graph = self.graph.clone();
        Router::new()
            .fallback(move |request: Request| {
                let graph = graph.clone();
                async move { graph.handle(request).await }
            })
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }
}

impl ServerLifecycle for PooledServer {
    fn kind(&self) -> EngineKind {
        EngineKind::Pooled
    }

    fn start(&mut self) -> Result<SocketAddr, ServerError> {
        let (listener, addr) = bind_listener(&self.runtime, &self.config, &self.handle)?;
        self.listener = Some(listener);
        self.local_addr = Some(addr);
        Ok(addr)
    }

    fn serve_until_stopped(&mut self) -> Result<(), ServerError> {
        let listener = self.listener.take().ok_or(ServerError::NotStarted)?;
        let app = self.app();
        let handle = self.handle.clone();
        let drain_timeout = self.config.pooled.drain_timeout_secs.map(Duration::from_secs);

        tracing::info!(
            address = ?self.local_addr,
            worker_threads = self.config.pooled.worker_threads,
            "Pooled server serving"
        );

        let result = self.runtime.block_on(async move {
            tokio::spawn(signals::shutdown_on_ctrl_c(handle.clone()));

            let stop = handle.clone();
            let serve = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    stop.requested().await;
                    tracing::info!("Stopped accepting, draining connections");
                })
                .into_future();

            match drain_timeout {
                None => serve.await,
                Some(timeout) => {
                    tokio::pin!(serve);
                    tokio::select! {
                        result = &mut serve => result,
                        _ = async {
                            handle.requested().await;
                            tokio::time::sleep(timeout).await;
                        } => {
                            tracing::warn!(timeout_secs = timeout.as_secs(), "Drain deadline reached, closing");
                            Ok(())
                        }
                    }
                }
            }
        });

        self.handle.state().set(ServerState::Stopped);
        tracing::info!("Pooled server stopped");
        result.map_err(ServerError::Serve)
    }

    fn shutdown_handle(&self) -> ShutdownHandle {
        self.handle.clone()
    }

    fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }
}
