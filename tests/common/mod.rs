//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::path::Path;
use std::thread::JoinHandle;
use std::time::Duration;

use fixture_server::config::ServerConfig;
use fixture_server::lifecycle::ShutdownHandle;
use fixture_server::server::{create_server, EngineKind, ServerError};

/// An engine serving on its own thread.
pub struct RunningServer {
    pub addr: SocketAddr,
    pub handle: ShutdownHandle,
    thread: Option<JoinHandle<Result<(), ServerError>>>,
}

impl RunningServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Wait for `serve_until_stopped` to return.
    pub async fn join(mut self, timeout: Duration) -> Result<(), ServerError> {
        let thread = self.thread.take().expect("already joined");
        let joined = tokio::time::timeout(timeout, tokio::task::spawn_blocking(move || thread.join()))
            .await
            .expect("server did not stop in time")
            .unwrap();
        joined.expect("server thread panicked")
    }
}

/// Config on an ephemeral port with `wsdls` pointing at `dir`.
pub fn test_config(dir: &Path) -> ServerConfig {
    let mut config = ServerConfig::default();
    config.listener.port = 0;
    config.pooled.worker_threads = 2;
    config.static_files.directory = dir.to_string_lossy().into_owned();
    config
}

/// Start an engine of `kind` on a background thread.
pub fn spawn_server(kind: EngineKind, config: ServerConfig) -> RunningServer {
    let (tx, rx) = std::sync::mpsc::channel();
    let thread = std::thread::spawn(move || {
        let mut server = create_server(kind, config)?;
        let addr = server.start()?;
        tx.send((addr, server.shutdown_handle())).unwrap();
        server.serve_until_stopped()
    });

    let (addr, handle) = rx
        .recv_timeout(Duration::from_secs(5))
        .expect("server failed to start");
    RunningServer {
        addr,
        handle,
        thread: Some(thread),
    }
}

/// Directory holding a couple of WSDL files.
pub fn wsdl_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("calculator.wsdl"), "<definitions name=\"calculator\"/>").unwrap();
    std::fs::write(dir.path().join("testservice.wsdl"), "<definitions name=\"testservice\"/>").unwrap();
    dir
}

/// Client without connection reuse, so drains finish promptly.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}
