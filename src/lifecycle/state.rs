//! Server lifecycle state machine.
//!
//! # States
//! - Unstarted: constructed, nothing bound
//! - Running: listener bound, serving
//! - Stopping: shutdown requested, serve loop winding down
//! - Stopped: serve loop returned
//!
//! # State Transitions
//! ```text
//! Unstarted → Running: start()
//! Running → Stopping: shutdown()
//! Running | Stopping → Stopped: serve_until_stopped() returns
//! ```

use std::sync::atomic::{AtomicU8, Ordering};

/// Lifecycle state of a server engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ServerState {
    Unstarted = 0,
    Running = 1,
    Stopping = 2,
    Stopped = 3,
}

impl ServerState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => ServerState::Unstarted,
            1 => ServerState::Running,
            2 => ServerState::Stopping,
            _ => ServerState::Stopped,
        }
    }
}

impl std::fmt::Display for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ServerState::Unstarted => "unstarted",
            ServerState::Running => "running",
            ServerState::Stopping => "stopping",
            ServerState::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

/// Atomically updated [`ServerState`].
#[derive(Debug)]
pub struct StateCell(AtomicU8);

impl StateCell {
    pub fn new() -> Self {
        Self(AtomicU8::new(ServerState::Unstarted as u8))
    }

    pub fn get(&self) -> ServerState {
        ServerState::from_u8(self.0.load(Ordering::SeqCst))
    }

    /// Move from `from` to `to`. Returns false, leaving the state alone, if
    /// the current state is not `from`.
    pub fn transition(&self, from: ServerState, to: ServerState) -> bool {
        self.0
            .compare_exchange(from as u8, to as u8, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    /// Unconditionally set the state.
    pub fn set(&self, state: ServerState) {
        self.0.store(state as u8, Ordering::SeqCst);
    }

    /// Whether the serve loop should keep accepting.
    pub fn should_serve(&self) -> bool {
        self.get() == ServerState::Running
    }
}

impl Default for StateCell {
    fn default() -> Self {
        Self::new()
    }
}
