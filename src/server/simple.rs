//! Single-request reference engine.
//!
//! Accepts one connection, serves its one request, closes it, then checks
//! whether to continue. A shutdown requested while the loop is blocked in
//! `accept` takes effect after the next request has been served.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Body;
use hyper::{body::Incoming, server::conn::http1, service::service_fn, Request};
use hyper_util::rt::TokioIo;
use tokio::net::{TcpListener, TcpStream};
use tokio::runtime::{Builder, Runtime};

use crate::config::ServerConfig;
use crate::http::handler::{serve_request, SharedHandler};
use crate::lifecycle::{ServerState, ShutdownHandle};
use crate::server::{bind_listener, build_dispatch_graph, EngineKind, ServerError, ServerLifecycle};

/// One-at-a-time engine on a current-thread runtime.
pub struct SimpleServer {
    config: ServerConfig,
    runtime: Runtime,
    handle: ShutdownHandle,
    graph: SharedHandler,
    listener: Option<TcpListener>,
    local_addr: Option<SocketAddr>,
}

impl SimpleServer {
    pub fn new(config: ServerConfig) -> Result<Self, ServerError> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ServerError::Runtime)?;

        let handle = ShutdownHandle::new();
        let graph = build_dispatch_graph(&config, handle.clone())?;

        Ok(Self {
            config,
            runtime,
            handle,
            graph: Arc::new(graph),
            listener: None,
            local_addr: None,
        })
    }
}

/// Serve the single request on `stream`, then close it.
async fn handle_request(stream: TcpStream, peer: SocketAddr, graph: SharedHandler) {
    let service = service_fn(move |request: Request<Incoming>| {
        let graph = graph.clone();
        tracing::info!(peer = %peer, method = %request.method(), uri = %request.uri(), "Request");
        serve_request(graph, request.map(Body::new))
    });

    if let Err(e) = http1::Builder::new()
        .keep_alive(false)
        .serve_connection(TokioIo::new(stream), service)
        .await
    {
        tracing::debug!(peer = %peer, error = %e, "Connection error");
    }
}

impl ServerLifecycle for SimpleServer {
    fn kind(&self) -> EngineKind {
        EngineKind::Simple
    }

    fn start(&mut self) -> Result<SocketAddr, ServerError> {
        let (listener, addr) = bind_listener(&self.runtime, &self.config, &self.handle)?;
        self.listener = Some(listener);
        self.local_addr = Some(addr);
        Ok(addr)
    }

    fn serve_until_stopped(&mut self) -> Result<(), ServerError> {
        let listener = self.listener.take().ok_or(ServerError::NotStarted)?;
        let graph = self.graph.clone();
        let handle = self.handle.clone();

        tracing::info!(address = ?self.local_addr, "Simple server serving");

        self.runtime.block_on(async move {
            while handle.state().should_serve() {
                let accepted = tokio::select! {
                    accepted = listener.accept() => accepted,
                    Ok(()) = tokio::signal::ctrl_c() => {
                        tracing::info!("Shutdown signal received");
                        handle.shutdown();
                        break;
                    }
                };

                match accepted {
                    Ok((stream, peer)) => handle_request(stream, peer, graph.clone()).await,
                    Err(e) => tracing::warn!(error = %e, "Failed to accept"),
                }
            }
        });

        self.handle.state().set(ServerState::Stopped);
        tracing::info!("Simple server stopped");
        Ok(())
    }

    fn shutdown_handle(&self) -> ShutdownHandle {
        self.handle.clone()
    }

    fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }
}
