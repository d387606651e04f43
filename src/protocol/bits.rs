//! Bit packing for the incidence matrix.
//!
//! The V x E matrix is flattened row-major (vertex-major, edge-minor); each
//! cell takes one bit at index `v * E + e`, least-significant bit first
//! within each byte. The packed length is exactly `ceil(V * E / 8)` bytes
//! and unpacking rejects any other length.

use crate::protocol::errors::ProtoError;

/// Number of bytes a packed V x E matrix occupies.
pub fn packed_len(vertex_count: u16, edge_count: u16) -> usize {
    let total_bits = vertex_count as usize * edge_count as usize;
    total_bits.div_ceil(8)
}

/// Pack a matrix of 0/1 cells into its wire form.
///
/// Rows must all have the same length; any non-zero cell packs as 1.
pub fn pack_incidence_matrix(matrix: &[Vec<u8>]) -> Vec<u8> {
    let Some(first_row) = matrix.first() else {
        return Vec::new();
    };
    if first_row.is_empty() {
        return Vec::new();
    }
    let edge_count = first_row.len();
    let total_bits = matrix.len() * edge_count;
    let mut bits = vec![0u8; total_bits.div_ceil(8)];

    let mut bit_index = 0usize;
    for row in matrix {
        for cell in row {
            if *cell != 0 {
                bits[bit_index / 8] |= 1u8 << (bit_index % 8);
            }
            bit_index += 1;
        }
    }
    bits
}

/// Unpack the wire form back into a row-per-vertex matrix.
pub fn unpack_incidence_matrix(
    vertex_count: u16,
    edge_count: u16,
    bits: &[u8],
) -> Result<Vec<Vec<u8>>, ProtoError> {
    if vertex_count == 0 || edge_count == 0 {
        return Err(ProtoError::EmptyMatrix);
    }
    let expected = packed_len(vertex_count, edge_count);
    if bits.len() != expected {
        return Err(ProtoError::BitsLengthMismatch {
            expected,
            actual: bits.len(),
        });
    }

    let mut matrix = vec![vec![0u8; edge_count as usize]; vertex_count as usize];
    let mut bit_index = 0usize;
    for row in &mut matrix {
        for cell in row.iter_mut() {
            *cell = (bits[bit_index / 8] >> (bit_index % 8)) & 1;
            bit_index += 1;
        }
    }
    Ok(matrix)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    #[test]
    fn pack_unpack_is_identity() {
        // 3 vertices x 10 edges, a deliberately non-byte-aligned size.
        let matrix: Vec<Vec<u8>> = (0..3)
            .map(|v| (0..10).map(|e| u8::from((v + e) % 3 == 0)).collect())
            .collect();
        let bits = pack_incidence_matrix(&matrix);
        assert_eq!(bits.len(), packed_len(3, 10));
        let unpacked = unpack_incidence_matrix(3, 10, &bits).unwrap();
        assert_eq!(unpacked, matrix);
    }

    #[test]
    fn bits_are_lsb_first_row_major() {
        // Single vertex, 9 edges: bit 0 and bit 8 set.
        let matrix = vec![vec![1, 0, 0, 0, 0, 0, 0, 0, 1]];
        let bits = pack_incidence_matrix(&matrix);
        assert_eq!(bits, vec![0b0000_0001, 0b0000_0001]);
    }

    #[test]
    fn wrong_length_is_rejected() {
        let matrix = vec![vec![1u8, 0], vec![0, 1]];
        let mut bits = pack_incidence_matrix(&matrix);
        bits.push(0);
        match unpack_incidence_matrix(2, 2, &bits) {
            Err(ProtoError::BitsLengthMismatch { expected: 1, actual: 2 }) => {}
            other => panic!("expected BitsLengthMismatch, got {:?}", other),
        }
    }

    #[test]
    fn empty_dimensions_are_rejected() {
        assert!(unpack_incidence_matrix(0, 4, &[]).is_err());
        assert!(unpack_incidence_matrix(4, 0, &[]).is_err());
    }

    #[test]
    fn minimal_one_by_one_matrix_round_trips() {
        let matrix = vec![vec![1u8]];
        let bits = pack_incidence_matrix(&matrix);
        assert_eq!(bits, vec![1]);
        assert_eq!(unpack_incidence_matrix(1, 1, &bits).unwrap(), matrix);
    }
}
