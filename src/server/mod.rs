// Server module entry
// Accept loop with graceful shutdown and connection draining

pub mod connection;
pub mod listener;
pub mod shutdown;

use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use crate::config::AppState;
use crate::logger;

pub use listener::bind_listener;

const DRAIN_DEADLINE: Duration = Duration::from_secs(5);
const DRAIN_POLL: Duration = Duration::from_millis(50);

/// Run the accept loop until a shutdown signal arrives, then drain
pub async fn run(listener: TcpListener, state: Arc<AppState>) {
    let shutdown = shutdown::wait_for_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accepted = listener.accept() => {
                match accepted {
                    Ok((stream, peer_addr)) => {
                        connection::spawn_connection(stream, peer_addr, &state);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }
            () = &mut shutdown => {
                logger::log_shutdown_requested();
                break;
            }
        }
    }

    // Stop accepting immediately; in-flight requests may still finish
    drop(listener);
    drain_connections(&state).await;
}

/// Wait for active connections to finish, bounded by a deadline
async fn drain_connections(state: &Arc<AppState>) {
    let deadline = tokio::time::Instant::now() + DRAIN_DEADLINE;

    while state.connections() > 0 && tokio::time::Instant::now() < deadline {
        tokio::time::sleep(DRAIN_POLL).await;
    }

    logger::log_shutdown_complete(state.connections());
}
