use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::Cursor;

use crate::protocol::command::{Command, Status};
use crate::protocol::constants::{HEADER_SIZE, MAX_PAYLOAD_SIZE};
use crate::protocol::errors::ProtoError;

/// Fixed 12-byte message header, shared by every request and response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageHeader {
    pub command: Command,
    pub status: Status,
    pub request_id: u16,
    pub payload_size: u32,
    pub reserved: u32,
}

impl MessageHeader {
    pub fn new(command: Command, status: Status, request_id: u16) -> Self {
        Self {
            command,
            status,
            request_id,
            payload_size: 0,
            reserved: 0,
        }
    }

    pub fn encode(&self) -> [u8; HEADER_SIZE] {
        let mut buf = Vec::with_capacity(HEADER_SIZE);
        // Writing into a Vec cannot fail.
        let _ = buf.write_u8(self.command.as_u8());
        let _ = buf.write_u8(self.status.as_u8());
        let _ = buf.write_u16::<BigEndian>(self.request_id);
        let _ = buf.write_u32::<BigEndian>(self.payload_size);
        let _ = buf.write_u32::<BigEndian>(self.reserved);
        let mut out = [0u8; HEADER_SIZE];
        out.copy_from_slice(&buf);
        out
    }

    /// Decode a header from exactly `HEADER_SIZE` bytes.
    ///
    /// A buffer of any other length, a payload size above `MAX_PAYLOAD_SIZE`,
    /// or a command/status byte outside the protocol's closed sets are all
    /// framing errors: fatal on a stream transport, a silent drop on a
    /// datagram transport.
    pub fn decode(buf: &[u8]) -> Result<Self, ProtoError> {
        if buf.len() != HEADER_SIZE {
            return Err(ProtoError::BadHeaderLength(buf.len()));
        }
        let mut cursor = Cursor::new(buf);
        let command_byte = cursor.read_u8().map_err(|_| ProtoError::Truncated)?;
        let status_byte = cursor.read_u8().map_err(|_| ProtoError::Truncated)?;
        let request_id = cursor
            .read_u16::<BigEndian>()
            .map_err(|_| ProtoError::Truncated)?;
        let payload_size = cursor
            .read_u32::<BigEndian>()
            .map_err(|_| ProtoError::Truncated)?;
        let reserved = cursor
            .read_u32::<BigEndian>()
            .map_err(|_| ProtoError::Truncated)?;

        if payload_size > MAX_PAYLOAD_SIZE {
            return Err(ProtoError::PayloadTooLarge(payload_size));
        }

        Ok(Self {
            command: Command::from_u8(command_byte)?,
            status: Status::from_u8(status_byte)?,
            request_id,
            payload_size,
            reserved,
        })
    }
}
