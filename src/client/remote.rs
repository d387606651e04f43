//! Request/response seam between the shell and the two transports.

use std::fmt;
use std::io;
use std::net::TcpStream;

use crate::protocol::command::{Command, Status};
use crate::protocol::errors::FrameError;
use crate::protocol::header::MessageHeader;
use crate::transport::reliable::{ReliableChannel, ReliableError};
use crate::transport::stream;

#[derive(Debug)]
pub enum ClientError {
    Io(io::Error),
    Frame(FrameError),
    /// The peer stopped answering; the session cannot continue.
    ConnectivityLoss,
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Io(e) => write!(f, "io error: {e}"),
            ClientError::Frame(e) => write!(f, "framing error: {e}"),
            ClientError::ConnectivityLoss => write!(f, "lost connection to the server"),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<io::Error> for ClientError {
    fn from(e: io::Error) -> Self {
        ClientError::Io(e)
    }
}

impl From<FrameError> for ClientError {
    fn from(e: FrameError) -> Self {
        ClientError::Frame(e)
    }
}

impl From<ReliableError> for ClientError {
    fn from(e: ReliableError) -> Self {
        match e {
            ReliableError::Io(io_e) => ClientError::Io(io_e),
            ReliableError::ConnectivityLoss => ClientError::ConnectivityLoss,
        }
    }
}

/// One request out, one response back, whatever the transport underneath.
pub trait Remote {
    fn exchange(
        &mut self,
        command: Command,
        payload: &[u8],
    ) -> Result<(MessageHeader, Vec<u8>), ClientError>;
}

/// Stream transport: the connection itself keeps messages ordered and whole.
pub struct TcpRemote {
    socket: TcpStream,
    next_request_id: u16,
}

impl TcpRemote {
    pub fn connect(addr: &str) -> io::Result<Self> {
        let socket = TcpStream::connect(addr)?;
        Ok(Self {
            socket,
            next_request_id: 1,
        })
    }
}

impl Remote for TcpRemote {
    fn exchange(
        &mut self,
        command: Command,
        payload: &[u8],
    ) -> Result<(MessageHeader, Vec<u8>), ClientError> {
        let request_id = self.next_request_id;
        self.next_request_id = self.next_request_id.checked_add(1).unwrap_or(1);

        stream::write_message(&mut self.socket, command, Status::Ok, request_id, payload)?;
        let (header, body) = stream::read_message(&mut self.socket)?;
        Ok((header, body))
    }
}

/// Datagram transport: the ack/retry channel supplies the reliability the
/// socket does not.
pub struct UdpRemote {
    channel: ReliableChannel,
}

impl UdpRemote {
    /// Wraps an already connected channel; the caller picks the retry timing.
    pub fn from_channel(channel: ReliableChannel) -> Self {
        Self { channel }
    }
}

impl Remote for UdpRemote {
    fn exchange(
        &mut self,
        command: Command,
        payload: &[u8],
    ) -> Result<(MessageHeader, Vec<u8>), ClientError> {
        Ok(self.channel.exchange(command, payload)?)
    }
}
