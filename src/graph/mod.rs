pub mod bellman_ford;
pub mod edge_list;
pub mod text_format;
pub mod types;
pub mod validate;

pub mod test_graphs;

pub use bellman_ford::shortest_path;
pub use types::{GraphDefinition, PathComputation, ValidationResult};
pub use validate::validate_graph;
