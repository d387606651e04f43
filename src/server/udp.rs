//! Datagram server: a single sequential loop over incoming packets.
//!
//! Unlike the stream side there is no connection to key state on, so sessions
//! live in an address-keyed map. Every well-formed request is acknowledged
//! before it is processed; malformed packets are dropped without a reply.

use std::io;
use std::net::{SocketAddr, UdpSocket};
use std::sync::Arc;

use crate::log::log_sink::LogSink;
use crate::protocol::command::{Command, Status};
use crate::server::dispatcher::{self, RequestOutcome};
use crate::server::session::SessionMap;
use crate::transport::datagram::{self, MAX_DATAGRAM_SIZE};
use crate::{sink_debug, sink_info, sink_warn};

pub struct UdpServer {
    socket: UdpSocket,
    sessions: SessionMap,
    logger: Arc<dyn LogSink>,
}

impl UdpServer {
    pub fn bind(addr: &str, logger: Arc<dyn LogSink>) -> io::Result<Self> {
        let socket = UdpSocket::bind(addr)?;
        Ok(Self {
            socket,
            sessions: SessionMap::new(),
            logger,
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    pub fn run(&self) -> io::Result<()> {
        sink_info!(
            self.logger,
            "udp server listening on {}",
            self.local_addr()?
        );
        let mut buf = vec![0u8; MAX_DATAGRAM_SIZE];
        loop {
            let (n, peer) = match self.socket.recv_from(&mut buf) {
                Ok(received) => received,
                Err(e) => {
                    sink_warn!(self.logger, "recv_from failed: {e}");
                    continue;
                }
            };
            self.handle_packet(&buf[..n], peer);
        }
    }

    fn handle_packet(&self, packet: &[u8], peer: SocketAddr) {
        let (header, payload) = match datagram::decode_datagram(packet) {
            Ok(message) => message,
            Err(e) => {
                // A datagram frames itself, so a bad one is just dropped.
                sink_debug!(self.logger, "dropping packet from {peer}: {e}");
                return;
            }
        };

        // Acknowledge receipt before doing any work, so the peer stops
        // resending even if the computation takes a while.
        if let Err(e) = datagram::send_to(
            &self.socket,
            peer,
            Command::Ack,
            Status::Ok,
            header.request_id,
            &[],
        ) {
            sink_warn!(self.logger, "ack to {peer} failed: {e}");
        }

        let session = self.sessions.entry(peer);
        let (reply, outcome) = {
            let mut session = session.lock().expect("session lock poisoned");
            dispatcher::dispatch(&mut session, header.command, &payload)
        };

        if outcome == RequestOutcome::Shutdown {
            self.sessions.remove(peer);
            sink_info!(self.logger, "udp client {peer} requested exit");
        }

        if let Err(e) = datagram::send_to(
            &self.socket,
            peer,
            reply.command,
            reply.status,
            header.request_id,
            &reply.payload,
        ) {
            sink_warn!(self.logger, "reply to {peer} failed: {e}");
        }
    }
}
