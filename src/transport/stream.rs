//! Framed message I/O over a blocking byte stream.

use std::io::{self, Read, Write};

use crate::protocol::command::{Command, Status};
use crate::protocol::constants::{HEADER_SIZE, MAX_PAYLOAD_SIZE};
use crate::protocol::errors::FrameError;
use crate::protocol::header::MessageHeader;

/// Write a single message: the 12-byte header followed by the payload.
pub fn write_message<W: Write>(
    w: &mut W,
    command: Command,
    status: Status,
    request_id: u16,
    payload: &[u8],
) -> io::Result<()> {
    if payload.len() > MAX_PAYLOAD_SIZE as usize {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "payload too large",
        ));
    }
    let mut header = MessageHeader::new(command, status, request_id);
    header.payload_size = payload.len() as u32;
    w.write_all(&header.encode())?;
    w.write_all(payload)?;
    w.flush()?;
    Ok(())
}

/// Read a single message, enforcing the header's declared payload length.
///
/// Any decode failure leaves the stream position unknown, so callers must
/// treat an `Err` as fatal for the connection.
pub fn read_message<R: Read>(r: &mut R) -> Result<(MessageHeader, Vec<u8>), FrameError> {
    let mut header_buf = [0u8; HEADER_SIZE];
    r.read_exact(&mut header_buf)?; // io::Error -> FrameError::Io

    let header = MessageHeader::decode(&header_buf)?; // ProtoError -> FrameError::Proto

    let mut payload = vec![0u8; header.payload_size as usize];
    r.read_exact(&mut payload)?;

    Ok((header, payload))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use crate::protocol::errors::ProtoError;
    use std::io::Cursor;

    #[test]
    fn message_round_trip_over_buffer() {
        let mut wire = Vec::new();
        write_message(&mut wire, Command::PathQuery, Status::Ok, 42, &[0, 1, 0, 3]).unwrap();

        let mut cursor = Cursor::new(wire);
        let (header, payload) = read_message(&mut cursor).unwrap();
        assert_eq!(header.command, Command::PathQuery);
        assert_eq!(header.status, Status::Ok);
        assert_eq!(header.request_id, 42);
        assert_eq!(payload, vec![0, 1, 0, 3]);
    }

    #[test]
    fn two_messages_stay_framed() {
        let mut wire = Vec::new();
        write_message(&mut wire, Command::Help, Status::Ok, 1, &[]).unwrap();
        write_message(&mut wire, Command::Exit, Status::Ok, 2, b"bye").unwrap();

        let mut cursor = Cursor::new(wire);
        let (first, first_payload) = read_message(&mut cursor).unwrap();
        let (second, second_payload) = read_message(&mut cursor).unwrap();
        assert_eq!(first.command, Command::Help);
        assert!(first_payload.is_empty());
        assert_eq!(second.command, Command::Exit);
        assert_eq!(second_payload, b"bye");
    }

    #[test]
    fn truncated_payload_is_an_io_error() {
        let mut wire = Vec::new();
        write_message(&mut wire, Command::UploadGraph, Status::Ok, 5, &[9; 16]).unwrap();
        wire.truncate(HEADER_SIZE + 8);

        let mut cursor = Cursor::new(wire);
        match read_message(&mut cursor) {
            Err(FrameError::Io(_)) => {}
            other => panic!("expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn unknown_command_is_a_proto_error() {
        let mut wire = Vec::new();
        write_message(&mut wire, Command::Help, Status::Ok, 1, &[]).unwrap();
        wire[0] = 0xEE;

        let mut cursor = Cursor::new(wire);
        match read_message(&mut cursor) {
            Err(FrameError::Proto(ProtoError::UnknownCommand(0xEE))) => {}
            other => panic!("expected UnknownCommand, got {:?}", other),
        }
    }

    #[test]
    fn oversized_payload_is_refused_on_write() {
        let payload = vec![0u8; MAX_PAYLOAD_SIZE as usize + 1];
        let mut wire = Vec::new();
        let err = write_message(&mut wire, Command::UploadGraph, Status::Ok, 1, &payload)
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
