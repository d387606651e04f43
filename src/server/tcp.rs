//! Stream server: one worker thread per accepted connection.

use std::io;
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;

use crate::log::log_sink::LogSink;
use crate::server::dispatcher::{self, RequestOutcome};
use crate::server::session::Session;
use crate::transport::stream;
use crate::{sink_debug, sink_info, sink_warn};

pub struct TcpServer {
    listener: TcpListener,
    logger: Arc<dyn LogSink>,
}

impl TcpServer {
    /// Binds the listener. `run` must be called to start serving.
    pub fn bind(addr: &str, logger: Arc<dyn LogSink>) -> io::Result<Self> {
        let listener = TcpListener::bind(addr)?;
        Ok(Self { listener, logger })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept loop. Each connection gets a detached worker thread owning its
    /// own `Session`; the loop itself never blocks on a client.
    pub fn run(&self) -> io::Result<()> {
        sink_info!(
            self.logger,
            "tcp server listening on {}",
            self.local_addr()?
        );
        loop {
            match self.listener.accept() {
                Ok((socket, peer)) => {
                    let logger = Arc::clone(&self.logger);
                    thread::spawn(move || handle_client(socket, peer, &logger));
                }
                Err(e) => {
                    sink_warn!(self.logger, "accept failed: {e}");
                }
            }
        }
    }
}

/// Serves one connection until the peer disconnects, a framing error makes
/// the stream position unknown, or the peer sends Exit.
fn handle_client(mut socket: TcpStream, peer: SocketAddr, logger: &Arc<dyn LogSink>) {
    sink_info!(logger, "tcp client connected: {peer}");
    let mut session = Session::new();

    loop {
        let (header, payload) = match stream::read_message(&mut socket) {
            Ok(message) => message,
            Err(e) => {
                sink_debug!(logger, "tcp client {peer} closed: {e}");
                break;
            }
        };

        let (reply, outcome) = dispatcher::dispatch(&mut session, header.command, &payload);
        if let Err(e) = stream::write_message(
            &mut socket,
            reply.command,
            reply.status,
            header.request_id,
            &reply.payload,
        ) {
            sink_warn!(logger, "tcp client {peer} send failed: {e}");
            break;
        }

        if outcome == RequestOutcome::Shutdown {
            sink_info!(logger, "tcp client {peer} requested exit");
            break;
        }
    }
}
