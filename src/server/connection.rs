// Connection handling module
// Admits accepted TCP connections and serves HTTP/1.1 on them

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpStream;

use crate::config::AppState;
use crate::handler;
use crate::logger;

/// Admit an accepted connection, enforcing the connection limit.
///
/// The counter is incremented before the limit check so concurrent
/// accepts cannot race past the cap; a rejected connection rolls it back.
pub fn spawn_connection(stream: TcpStream, peer_addr: SocketAddr, state: &Arc<AppState>) {
    let prev_count = state.connection_opened();

    if let Some(max_conn) = state.config.performance.max_connections {
        if prev_count >= usize::try_from(max_conn).unwrap_or(usize::MAX) {
            state.connection_closed();
            logger::log_warning(&format!(
                "Max connections reached: {prev_count}/{max_conn}. Connection rejected."
            ));
            drop(stream);
            return;
        }
    }

    if state.config.logging.level == "debug" {
        logger::log_connection_accepted(&peer_addr);
    }

    let state = Arc::clone(state);
    tokio::spawn(serve_connection(stream, peer_addr, state));
}

/// Serve HTTP/1.1 on one connection until it closes or times out
async fn serve_connection(stream: TcpStream, peer_addr: SocketAddr, state: Arc<AppState>) {
    let io = TokioIo::new(stream);

    let keep_alive = state.config.performance.keep_alive_timeout > 0;
    let timeout_secs = std::cmp::max(
        state.config.performance.read_timeout,
        state.config.performance.write_timeout,
    );

    let mut builder = http1::Builder::new();
    builder.keep_alive(keep_alive);

    let service_state = Arc::clone(&state);
    let conn = builder.serve_connection(
        io,
        service_fn(move |req| handler::handle_request(req, peer_addr, Arc::clone(&service_state))),
    );

    // A zero timeout disables the deadline
    if timeout_secs == 0 {
        if let Err(err) = conn.await {
            logger::log_connection_error(&err);
        }
    } else {
        match tokio::time::timeout(Duration::from_secs(timeout_secs), conn).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => logger::log_connection_error(&err),
            Err(_) => logger::log_warning(&format!(
                "Connection from {peer_addr} timed out after {timeout_secs} seconds"
            )),
        }
    }

    state.connection_closed();
}
