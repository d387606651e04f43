/// A weighted undirected graph as the service stores it: vertex/edge counts,
/// an incidence matrix (one row per vertex, one column per edge, cells 0/1)
/// and one weight per edge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphDefinition {
    pub vertex_count: u16,
    pub edge_count: u16,
    pub incidence: Vec<Vec<u8>>,
    pub weights: Vec<u32>,
}

/// Outcome of structural validation. `message` is populated only on failure.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub ok: bool,
    pub message: String,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            ok: true,
            message: String::new(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

/// Outcome of a shortest-path computation.
///
/// `distance` is `INF_DISTANCE` when the target is unreachable; `error`
/// holds a human-readable message when `reachable` is false.
#[derive(Debug, Clone, Default)]
pub struct PathComputation {
    pub reachable: bool,
    pub distance: u32,
    pub path: Vec<u16>,
    pub error: String,
}
