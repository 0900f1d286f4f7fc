//! Acceptor: bind, listen, accept, hand off.
//!
//! Bind and listen failures are fatal; accept failures are logged and the
//! loop retries without delay. The acceptor performs no IO on accepted
//! sockets beyond handing them to the session launch.

use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;

use socket2::{Domain, Protocol, Socket, Type};
use splice_types::Profile;
use tracing::{info, warn};

use crate::config::RelayConfig;
use crate::error::{RelayError, Result};
use crate::session;

const BACKLOG: i32 = 10;

pub struct Acceptor {
    listener: TcpListener,
}

impl Acceptor {
    /// Bind the listen endpoint with address reuse and a backlog of
    /// [`BACKLOG`].
    pub fn bind(listen: SocketAddr) -> Result<Self> {
        let socket = Socket::new(Domain::for_address(listen), Type::STREAM, Some(Protocol::TCP))
            .map_err(|e| RelayError::Listener(format!("socket creation failed: {e}")))?;
        socket
            .set_reuse_address(true)
            .map_err(|e| RelayError::Listener(format!("SO_REUSEADDR failed: {e}")))?;
        socket
            .bind(&listen.into())
            .map_err(|e| RelayError::Listener(format!("bind {listen} failed: {e}")))?;
        socket
            .listen(BACKLOG)
            .map_err(|e| RelayError::Listener(format!("listen on {listen} failed: {e}")))?;

        let listener: TcpListener = socket.into();
        info!(%listen, "listening");
        Ok(Self { listener })
    }

    /// The bound address, useful when listening on port 0.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept clients forever, launching one splice per connection.
    pub fn serve(&self, profile: &Profile, config: &Arc<RelayConfig>) -> ! {
        loop {
            match self.listener.accept() {
                Ok((client, peer)) => {
                    info!(%peer, "accepted client connection");
                    match session::launch(client, profile.clone(), Arc::clone(config)) {
                        Ok(_threads) => {} // stages run detached; session ends via socket closure
                        Err(e) => warn!("failed to launch session threads: {e}"),
                    }
                }
                Err(e) => warn!("accept failed: {e}"),
            }
        }
    }
}
