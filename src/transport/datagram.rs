//! Whole-packet message I/O over a UDP socket.
//!
//! Each datagram carries exactly one message. Packets that are shorter than a
//! header, fail to decode, or do not match their declared payload length are
//! dropped by callers rather than terminating anything.

use std::io;
use std::net::{SocketAddr, UdpSocket};

use bytes::{BufMut, Bytes, BytesMut};

use crate::protocol::command::{Command, Status};
use crate::protocol::constants::{HEADER_SIZE, MAX_PAYLOAD_SIZE};
use crate::protocol::errors::ProtoError;
use crate::protocol::header::MessageHeader;

/// Largest packet we ever need to receive: one header plus one full payload.
pub const MAX_DATAGRAM_SIZE: usize = HEADER_SIZE + MAX_PAYLOAD_SIZE as usize;

/// Assembles a single-message datagram.
pub fn encode_datagram(
    command: Command,
    status: Status,
    request_id: u16,
    payload: &[u8],
) -> Result<Bytes, ProtoError> {
    if payload.len() > MAX_PAYLOAD_SIZE as usize {
        return Err(ProtoError::PayloadTooLarge(payload.len() as u32));
    }
    let mut header = MessageHeader::new(command, status, request_id);
    header.payload_size = payload.len() as u32;

    let mut packet = BytesMut::with_capacity(HEADER_SIZE + payload.len());
    packet.put_slice(&header.encode());
    packet.put_slice(payload);
    Ok(packet.freeze())
}

/// Splits a received packet into header and payload.
///
/// The packet must contain the declared payload exactly: short packets are
/// `Truncated`, longer ones are `TrailingBytes`.
pub fn decode_datagram(packet: &[u8]) -> Result<(MessageHeader, Vec<u8>), ProtoError> {
    if packet.len() < HEADER_SIZE {
        return Err(ProtoError::Truncated);
    }
    let header = MessageHeader::decode(&packet[..HEADER_SIZE])?;
    let body = &packet[HEADER_SIZE..];
    if body.len() < header.payload_size as usize {
        return Err(ProtoError::Truncated);
    }
    if body.len() > header.payload_size as usize {
        return Err(ProtoError::TrailingBytes);
    }
    Ok((header, body.to_vec()))
}

/// Sends one message to an explicit peer address.
pub fn send_to(
    socket: &UdpSocket,
    peer: SocketAddr,
    command: Command,
    status: Status,
    request_id: u16,
    payload: &[u8],
) -> io::Result<()> {
    let packet = encode_datagram(command, status, request_id, payload)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;
    socket.send_to(&packet, peer)?;
    Ok(())
}

/// Sends one message on a connected socket.
pub fn send(
    socket: &UdpSocket,
    command: Command,
    status: Status,
    request_id: u16,
    payload: &[u8],
) -> io::Result<()> {
    let packet = encode_datagram(command, status, request_id, payload)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;
    socket.send(&packet)?;
    Ok(())
}
