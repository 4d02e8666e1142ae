// TCP listener setup module
// Creates the server socket with address reuse and a configurable backlog

use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::TcpListener;

/// Create a bound `TcpListener` ready for the accept loop.
///
/// `SO_REUSEADDR` is set so a restarted server can rebind its port
/// immediately instead of waiting out sockets in TIME_WAIT. On Unix,
/// `SO_REUSEPORT` is also set, letting a replacement process bind the
/// port while the old one drains.
///
/// Must be called from within the Tokio runtime: the final conversion
/// registers the socket with the active reactor.
pub fn bind_listener(addr: std::net::SocketAddr, backlog: u32) -> std::io::Result<TcpListener> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;

    // Non-blocking mode for async compatibility
    socket.set_nonblocking(true)?;

    socket.bind(&addr.into())?;
    socket.listen(i32::try_from(backlog).unwrap_or(i32::MAX))?;

    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}
