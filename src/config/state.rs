// Application state module
// Shared runtime state for the accept loop and connection tasks

use std::sync::atomic::{AtomicUsize, Ordering};

use super::types::Config;

/// Application state
pub struct AppState {
    pub config: Config,
    /// Connections currently being served
    active_connections: AtomicUsize,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            active_connections: AtomicUsize::new(0),
        }
    }

    /// Register a newly accepted connection, returning the previous count
    pub fn connection_opened(&self) -> usize {
        self.active_connections.fetch_add(1, Ordering::SeqCst)
    }

    /// Unregister a finished connection
    pub fn connection_closed(&self) {
        self.active_connections.fetch_sub(1, Ordering::SeqCst);
    }

    /// Number of connections currently being served
    pub fn connections(&self) -> usize {
        self.active_connections.load(Ordering::SeqCst)
    }
}
