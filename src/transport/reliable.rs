//! Ack-based delivery over UDP.
//!
//! Datagrams are unordered and may be dropped, so every request is retried
//! until the peer acknowledges the request id. The receiver acknowledges
//! before it processes, then sends the real response with the same id.

use std::fmt;
use std::io;
use std::net::UdpSocket;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::log::log_sink::LogSink;
use crate::protocol::command::{Command, Status};
use crate::protocol::header::MessageHeader;
use crate::transport::datagram::{self, MAX_DATAGRAM_SIZE};
use crate::{sink_debug, sink_warn};

pub const DEFAULT_ATTEMPTS: u32 = 3;
pub const DEFAULT_ACK_TIMEOUT: Duration = Duration::from_secs(3);

/// Retry settings from the `[Reliability]` config section.
///
/// Keys `attempts` and `ack_timeout_ms` override the defaults; missing or
/// unparseable values fall back. Attempts are clamped to at least 1.
#[must_use]
pub fn timing_from_config(config: &Config) -> (u32, Duration) {
    let attempts = config.get_u64_or("Reliability", "attempts", u64::from(DEFAULT_ATTEMPTS));
    let attempts = u32::try_from(attempts).unwrap_or(DEFAULT_ATTEMPTS).max(1);
    let ack_timeout_ms = config.get_u64_or(
        "Reliability",
        "ack_timeout_ms",
        DEFAULT_ACK_TIMEOUT.as_millis() as u64,
    );
    (attempts, Duration::from_millis(ack_timeout_ms))
}

#[derive(Debug)]
pub enum ReliableError {
    Io(io::Error),
    /// All send attempts elapsed without an acknowledgment from the peer.
    ConnectivityLoss,
}

impl fmt::Display for ReliableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReliableError::Io(e) => write!(f, "io error: {e}"),
            ReliableError::ConnectivityLoss => write!(f, "lost connectivity with the peer"),
        }
    }
}

impl std::error::Error for ReliableError {}

impl From<io::Error> for ReliableError {
    fn from(e: io::Error) -> Self {
        ReliableError::Io(e)
    }
}

/// Request/response channel over a connected UDP socket.
///
/// Request ids start at 1 and increment per request; id 0 is never issued so
/// a zeroed header can never match an in-flight request.
pub struct ReliableChannel {
    socket: UdpSocket,
    next_request_id: u16,
    attempts: u32,
    ack_timeout: Duration,
    recv_buf: Vec<u8>,
    logger: Arc<dyn LogSink>,
}

impl ReliableChannel {
    pub fn new(socket: UdpSocket, logger: Arc<dyn LogSink>) -> Self {
        Self::with_timing(socket, DEFAULT_ATTEMPTS, DEFAULT_ACK_TIMEOUT, logger)
    }

    /// Shorter timings are used by tests; production callers take the defaults.
    pub fn with_timing(
        socket: UdpSocket,
        attempts: u32,
        ack_timeout: Duration,
        logger: Arc<dyn LogSink>,
    ) -> Self {
        Self {
            socket,
            next_request_id: 1,
            attempts: attempts.max(1),
            ack_timeout,
            recv_buf: vec![0u8; MAX_DATAGRAM_SIZE],
            logger,
        }
    }

    /// Sends a request and blocks until the matching response arrives.
    ///
    /// Each attempt resends the datagram and waits `ack_timeout` for an
    /// acknowledgment carrying the same request id. Once acknowledged, the
    /// wait for the response itself has no deadline: the peer has the request
    /// and will answer when it is done. Replies with a stale id are ignored.
    ///
    /// # Errors
    /// [`ReliableError::ConnectivityLoss`] when every attempt times out.
    pub fn exchange(
        &mut self,
        command: Command,
        payload: &[u8],
    ) -> Result<(MessageHeader, Vec<u8>), ReliableError> {
        let request_id = self.next_request_id;
        self.next_request_id = self.next_request_id.checked_add(1).unwrap_or(1);

        let packet = datagram::encode_datagram(command, Status::Ok, request_id, payload)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;

        for attempt in 1..=self.attempts {
            self.socket.send(&packet)?;
            sink_debug!(
                self.logger,
                "request {} ({:?}) attempt {}/{}",
                request_id,
                command,
                attempt,
                self.attempts
            );

            let deadline = Instant::now() + self.ack_timeout;
            while let Some(remaining) = deadline.checked_duration_since(Instant::now()).filter(|d| !d.is_zero()) {
                self.socket.set_read_timeout(Some(remaining))?;
                let n = match self.socket.recv(&mut self.recv_buf) {
                    Ok(n) => n,
                    Err(e) if is_timeout(&e) => break,
                    Err(e) => return Err(e.into()),
                };
                let Ok((header, body)) = datagram::decode_datagram(&self.recv_buf[..n]) else {
                    continue; // malformed packet, drop
                };
                if header.request_id != request_id {
                    continue; // stale reply from an earlier attempt
                }
                if header.command == Command::Ack {
                    return self.await_response(request_id);
                }
                // Response arrived without a separate acknowledgment.
                return Ok((header, body));
            }
            sink_warn!(
                self.logger,
                "request {} unacknowledged after attempt {}/{}",
                request_id,
                attempt,
                self.attempts
            );
        }
        Err(ReliableError::ConnectivityLoss)
    }

    /// The request is acknowledged, so block without a deadline until the
    /// response with the matching id shows up.
    fn await_response(
        &mut self,
        request_id: u16,
    ) -> Result<(MessageHeader, Vec<u8>), ReliableError> {
        self.socket.set_read_timeout(None)?;
        loop {
            let n = self.socket.recv(&mut self.recv_buf)?;
            let Ok((header, body)) = datagram::decode_datagram(&self.recv_buf[..n]) else {
                continue;
            };
            if header.request_id != request_id || header.command == Command::Ack {
                continue;
            }
            return Ok((header, body));
        }
    }
}

fn is_timeout(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
    )
}
