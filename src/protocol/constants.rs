/// Protocol constants and header layout.
///
/// Header (12 bytes, all multi-byte integers big endian):
///   [command: u8][status: u8][request_id: u16][payload_size: u32][reserved: u32]
/// Body:
///   command-specific payload, up to `MAX_PAYLOAD_SIZE`.
pub const HEADER_SIZE: usize = 12;

/// Maximum allowed payload size for a message (to avoid OOM).
pub const MAX_PAYLOAD_SIZE: u32 = 1_048_576; // 1 MiB

/// Sentinel distance for "unreachable / not yet known".
///
/// A quarter of the u32 range leaves headroom so that relaxation sums
/// (`dist + weight`) never wrap. Edge weights above this value are rejected
/// by the graph validator.
pub const INF_DISTANCE: u32 = u32::MAX / 4;
