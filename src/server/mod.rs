//! Server engines and their shared lifecycle.
//!
//! # Data Flow
//! ```text
//! engine name (CLI / config)
//!     → EngineKind::from_str (case & whitespace folded)
//!     → create_server → Box<dyn ServerLifecycle>
//!         → graph.rs builds the dispatch graph, bound to the engine's ShutdownHandle
//!     → start() binds HOST:port
//!     → serve_until_stopped() blocks, feeding requests to the graph
//!     → shutdown() (from /exit, Ctrl+C or the caller) ends the loop
//! ```
//!
//! # Design Decisions
//! - Each engine owns its runtime; the public lifecycle is blocking
//! - Unknown engine names fail before any socket is opened
//! - pooled.rs: multi-threaded, keep-alive, drains on shutdown
//! - simple.rs: one request at a time, flag checked between requests

pub mod graph;
pub mod pooled;
pub mod simple;

use std::net::SocketAddr;
use std::str::FromStr;

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::runtime::Runtime;

use crate::config::{ConfigError, ServerConfig, HOST};
use crate::lifecycle::{ServerState, ShutdownHandle};
use crate::routing::RouteTableError;

pub use graph::build_dispatch_graph;
pub use pooled::PooledServer;
pub use simple::SimpleServer;

/// Errors from starting or running an engine.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("server has not been started")]
    NotStarted,

    #[error("server has already been started")]
    AlreadyStarted,

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),

    #[error("invalid dispatch graph: {0}")]
    Routes(#[from] RouteTableError),
}

/// Lifecycle shared by every server engine.
///
/// `start` binds the listener (Unstarted → Running), `serve_until_stopped`
/// blocks the calling thread until a shutdown request has been honoured,
/// `shutdown` requests the stop (Running → Stopping) and returns at once.
pub trait ServerLifecycle: Send {
    fn kind(&self) -> EngineKind;

    fn start(&mut self) -> Result<SocketAddr, ServerError>;

    fn serve_until_stopped(&mut self) -> Result<(), ServerError>;

    fn shutdown_handle(&self) -> ShutdownHandle;

    fn local_addr(&self) -> Option<SocketAddr>;

    fn shutdown(&self) -> bool {
        self.shutdown_handle().shutdown()
    }

    fn state(&self) -> ServerState {
        self.shutdown_handle().state().get()
    }
}

/// The available server engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineKind {
    /// Thread-pooled engine with keep-alive connections.
    #[default]
    Pooled,
    /// Single request at a time on the calling thread.
    Simple,
}

impl EngineKind {
    pub fn name(&self) -> &'static str {
        match self {
            EngineKind::Pooled => "CHERRYPY",
            EngineKind::Simple => "WSGIREF",
        }
    }
}

impl std::fmt::Display for EngineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EngineKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "cherrypy" | "pooled" => Ok(EngineKind::Pooled),
            "wsgiref" | "simple" => Ok(EngineKind::Simple),
            _ => Err(ConfigError::UnknownEngine(s.trim().to_string())),
        }
    }
}

/// Construct the engine of the given kind. Nothing is bound until `start`.
pub fn create_server(
    kind: EngineKind,
    config: ServerConfig,
) -> Result<Box<dyn ServerLifecycle>, ServerError> {
    let server: Box<dyn ServerLifecycle> = match kind {
        EngineKind::Pooled => Box::new(PooledServer::new(config)?),
        EngineKind::Simple => Box::new(SimpleServer::new(config)?),
    };
    tracing::debug!(engine = %kind, "Server created");
    Ok(server)
}

/// Bind `HOST:port` on `runtime` and mark the engine Running.
pub(crate) fn bind_listener(
    runtime: &Runtime,
    config: &ServerConfig,
    handle: &ShutdownHandle,
) -> Result<(TcpListener, SocketAddr), ServerError> {
    if handle.state().get() != ServerState::Unstarted {
        return Err(ServerError::AlreadyStarted);
    }

    let addr = config.bind_address();
    let listener = runtime
        .block_on(TcpListener::bind(&addr))
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;
    let local_addr = listener
        .local_addr()
        .map_err(|source| ServerError::Bind { addr, source })?;

    if !handle
        .state()
        .transition(ServerState::Unstarted, ServerState::Running)
    {
        return Err(ServerError::AlreadyStarted);
    }

    tracing::info!(address = %local_addr, "Listener bound");
    Ok((listener, local_addr))
}

/// Reachable endpoints, as (label, URL) pairs.
pub fn endpoints(port: u16) -> Vec<(&'static str, String)> {
    let base = format!("http://{}:{}", HOST, port);
    vec![
        ("Unsecured web services", format!("{}/", base)),
        ("Unsecured files", format!("{}/wsdls/", base)),
        ("Secured web services", format!("{}/secure/", base)),
        ("Secured files", format!("{}/secure/wsdls/", base)),
        ("Shutdown the server", format!("{}/exit", base)),
    ]
}
