//! Payload encode/decode.
//!
//! All multi-byte integers are big endian, written and read through the
//! `byteorder` extension traits so the codec has a single endian-aware
//! primitive per integer width instead of per-field byte shuffling.
//!
//! Every decoder enforces full consumption of its buffer: unconsumed
//! trailing bytes are corruption, never silently ignored.

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::Cursor;

use crate::protocol::errors::ProtoError;
use crate::protocol::payload::{PathQueryPayload, PathResultPayload, UploadGraphPayload};

// ---- Encode to body bytes -------------------------------------------------

/// Layout: vertex_count(2B) · edge_count(2B) · bits_len(4B) · bits ·
/// weight_count(4B) · weight_count x 4B weights.
pub fn encode_upload_graph(payload: &UploadGraphPayload) -> Vec<u8> {
    let mut body =
        Vec::with_capacity(12 + payload.incidence_bits.len() + payload.weights.len() * 4);
    let _ = body.write_u16::<BigEndian>(payload.vertex_count);
    let _ = body.write_u16::<BigEndian>(payload.edge_count);
    let _ = body.write_u32::<BigEndian>(payload.incidence_bits.len() as u32);
    body.extend_from_slice(&payload.incidence_bits);
    let _ = body.write_u32::<BigEndian>(payload.weights.len() as u32);
    for weight in &payload.weights {
        let _ = body.write_u32::<BigEndian>(*weight);
    }
    body
}

/// Layout: source(2B) · target(2B).
pub fn encode_path_query(payload: &PathQueryPayload) -> Vec<u8> {
    let mut body = Vec::with_capacity(4);
    let _ = body.write_u16::<BigEndian>(payload.source);
    let _ = body.write_u16::<BigEndian>(payload.target);
    body
}

/// Layout: distance(4B) · path_len(2B) · path_len x 2B vertex indices.
pub fn encode_path_result(payload: &PathResultPayload) -> Vec<u8> {
    let mut body = Vec::with_capacity(6 + payload.path.len() * 2);
    let _ = body.write_u32::<BigEndian>(payload.distance);
    let _ = body.write_u16::<BigEndian>(payload.path.len() as u16);
    for vertex in &payload.path {
        let _ = body.write_u16::<BigEndian>(*vertex);
    }
    body
}

/// Layout: text_len(2B) · UTF-8 bytes. Used for Error and Help bodies.
pub fn encode_string(text: &str) -> Result<Vec<u8>, ProtoError> {
    let bytes = text.as_bytes();
    if bytes.len() > u16::MAX as usize {
        return Err(ProtoError::StringTooLong {
            max: u16::MAX as usize,
            actual: bytes.len(),
        });
    }
    let mut body = Vec::with_capacity(2 + bytes.len());
    let _ = body.write_u16::<BigEndian>(bytes.len() as u16);
    body.extend_from_slice(bytes);
    Ok(body)
}

// ---- Decode from body bytes ----------------------------------------------

pub fn decode_upload_graph(body: &[u8]) -> Result<UploadGraphPayload, ProtoError> {
    let mut cursor = Cursor::new(body);

    let vertex_count = get_u16(&mut cursor)?;
    let edge_count = get_u16(&mut cursor)?;

    let bits_len = get_u32(&mut cursor)? as usize;
    let incidence_bits = get_bytes(&mut cursor, bits_len)?;

    let weight_count = get_u32(&mut cursor)?;
    if weight_count != u32::from(edge_count) {
        return Err(ProtoError::WeightCountMismatch {
            declared: weight_count,
            edges: edge_count,
        });
    }
    let mut weights = Vec::with_capacity(weight_count as usize);
    for _ in 0..weight_count {
        weights.push(get_u32(&mut cursor)?);
    }

    finish(&cursor)?;
    Ok(UploadGraphPayload {
        vertex_count,
        edge_count,
        incidence_bits,
        weights,
    })
}

pub fn decode_path_query(body: &[u8]) -> Result<PathQueryPayload, ProtoError> {
    if body.len() != 4 {
        return Err(if body.len() < 4 {
            ProtoError::Truncated
        } else {
            ProtoError::TrailingBytes
        });
    }
    let mut cursor = Cursor::new(body);
    let source = get_u16(&mut cursor)?;
    let target = get_u16(&mut cursor)?;
    Ok(PathQueryPayload { source, target })
}

pub fn decode_path_result(body: &[u8]) -> Result<PathResultPayload, ProtoError> {
    let mut cursor = Cursor::new(body);
    let distance = get_u32(&mut cursor)?;
    let path_len = get_u16(&mut cursor)? as usize;
    let mut path = Vec::with_capacity(path_len);
    for _ in 0..path_len {
        path.push(get_u16(&mut cursor)?);
    }
    finish(&cursor)?;
    Ok(PathResultPayload { distance, path })
}

pub fn decode_string(body: &[u8]) -> Result<String, ProtoError> {
    let mut cursor = Cursor::new(body);
    let len = get_u16(&mut cursor)? as usize;
    let bytes = get_bytes(&mut cursor, len)?;
    finish(&cursor)?;
    String::from_utf8(bytes).map_err(|_| ProtoError::InvalidUtf8)
}

// ---- Cursor helpers --------------------------------------------------------

fn get_u16(cursor: &mut Cursor<&[u8]>) -> Result<u16, ProtoError> {
    cursor
        .read_u16::<BigEndian>()
        .map_err(|_| ProtoError::Truncated)
}

fn get_u32(cursor: &mut Cursor<&[u8]>) -> Result<u32, ProtoError> {
    cursor
        .read_u32::<BigEndian>()
        .map_err(|_| ProtoError::Truncated)
}

fn get_bytes(cursor: &mut Cursor<&[u8]>, len: usize) -> Result<Vec<u8>, ProtoError> {
    let start = cursor.position() as usize;
    let buf = *cursor.get_ref();
    let end = start.checked_add(len).ok_or(ProtoError::Truncated)?;
    if end > buf.len() {
        return Err(ProtoError::Truncated);
    }
    cursor.set_position(end as u64);
    Ok(buf[start..end].to_vec())
}

/// Enforce that the whole body was consumed.
fn finish(cursor: &Cursor<&[u8]>) -> Result<(), ProtoError> {
    if cursor.position() as usize != cursor.get_ref().len() {
        Err(ProtoError::TrailingBytes)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use crate::protocol::bits::pack_incidence_matrix;

    fn sample_upload() -> UploadGraphPayload {
        // 6-vertex ring over 6 edges.
        let mut matrix = vec![vec![0u8; 6]; 6];
        for e in 0..6usize {
            matrix[e][e] = 1;
            matrix[(e + 1) % 6][e] = 1;
        }
        UploadGraphPayload {
            vertex_count: 6,
            edge_count: 6,
            incidence_bits: pack_incidence_matrix(&matrix),
            weights: vec![1, 2, 3, 4, 5, 6],
        }
    }

    #[test]
    fn upload_graph_round_trip() {
        let payload = sample_upload();
        let body = encode_upload_graph(&payload);
        let decoded = decode_upload_graph(&body).unwrap();
        assert_eq!(decoded, payload);
    }

    #[test]
    fn upload_graph_rejects_weight_count_mismatch() {
        let mut payload = sample_upload();
        payload.weights.pop();
        let body = encode_upload_graph(&payload);
        match decode_upload_graph(&body) {
            Err(ProtoError::WeightCountMismatch { declared: 5, edges: 6 }) => {}
            other => panic!("expected WeightCountMismatch, got {:?}", other),
        }
    }

    #[test]
    fn upload_graph_rejects_truncated_bit_block() {
        let payload = sample_upload();
        let mut body = encode_upload_graph(&payload);
        body.truncate(6); // cuts into the incidence bits
        match decode_upload_graph(&body) {
            Err(ProtoError::Truncated) => {}
            other => panic!("expected Truncated, got {:?}", other),
        }
    }

    #[test]
    fn upload_graph_rejects_trailing_bytes() {
        let payload = sample_upload();
        let mut body = encode_upload_graph(&payload);
        body.push(0);
        match decode_upload_graph(&body) {
            Err(ProtoError::TrailingBytes) => {}
            other => panic!("expected TrailingBytes, got {:?}", other),
        }
    }

    #[test]
    fn path_query_round_trip() {
        let payload = PathQueryPayload { source: 0, target: 5 };
        let body = encode_path_query(&payload);
        assert_eq!(body.len(), 4);
        assert_eq!(decode_path_query(&body).unwrap(), payload);
    }

    #[test]
    fn path_query_must_be_exactly_four_bytes() {
        assert!(decode_path_query(&[0, 1, 0]).is_err());
        assert!(decode_path_query(&[0, 1, 0, 2, 9]).is_err());
    }

    #[test]
    fn path_result_round_trip() {
        let payload = PathResultPayload {
            distance: 42,
            path: vec![0, 3, 7, 9],
        };
        let body = encode_path_result(&payload);
        assert_eq!(decode_path_result(&body).unwrap(), payload);
    }

    #[test]
    fn path_result_rejects_size_mismatch() {
        let payload = PathResultPayload {
            distance: 1,
            path: vec![2, 4],
        };
        let mut body = encode_path_result(&payload);
        body.push(0xFF);
        match decode_path_result(&body) {
            Err(ProtoError::TrailingBytes) => {}
            other => panic!("expected TrailingBytes, got {:?}", other),
        }
    }

    #[test]
    fn string_round_trip() {
        let body = encode_string("no path between vertices").unwrap();
        assert_eq!(decode_string(&body).unwrap(), "no path between vertices");
    }

    #[test]
    fn empty_string_round_trip() {
        let body = encode_string("").unwrap();
        assert_eq!(body, vec![0, 0]);
        assert_eq!(decode_string(&body).unwrap(), "");
    }

    #[test]
    fn string_rejects_length_mismatch() {
        let mut body = encode_string("hello").unwrap();
        body.push(b'!');
        match decode_string(&body) {
            Err(ProtoError::TrailingBytes) => {}
            other => panic!("expected TrailingBytes, got {:?}", other),
        }
    }
}
