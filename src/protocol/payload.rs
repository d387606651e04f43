// ---- Typed payload bodies --------------------------------------------------

/// Body of an UploadGraph request: the graph in its compact wire form.
///
/// The incidence matrix travels bit-packed; `crate::protocol::bits` converts
/// between this form and the row-per-vertex matrix the graph engine uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadGraphPayload {
    pub vertex_count: u16,
    pub edge_count: u16,
    pub incidence_bits: Vec<u8>,
    pub weights: Vec<u32>,
}

/// Body of a PathQuery request. Vertex numbering starts at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathQueryPayload {
    pub source: u16,
    pub target: u16,
}

/// Body of a PathResult response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResultPayload {
    pub distance: u32,
    pub path: Vec<u16>,
}
