// Shutdown signal handling
//
// SIGTERM and SIGINT (Ctrl+C) both request a graceful stop: the accept
// loop closes its listener and in-flight connections get a short drain.

use crate::logger;

/// Resolve when a shutdown signal arrives
#[cfg(unix)]
pub async fn wait_for_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(s) => s,
        Err(e) => {
            logger::log_error(&format!("Failed to register SIGTERM handler: {e}"));
            wait_for_ctrl_c().await;
            return;
        }
    };

    tokio::select! {
        () = wait_for_ctrl_c() => {}
        _ = sigterm.recv() => {}
    }
}

/// Resolve when a shutdown signal arrives
#[cfg(not(unix))]
pub async fn wait_for_signal() {
    wait_for_ctrl_c().await;
}

async fn wait_for_ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        logger::log_error(&format!("Failed to listen for Ctrl+C: {e}"));
        // No signal source left; park instead of shutting down
        std::future::pending::<()>().await;
    }
}
