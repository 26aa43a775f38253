#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod generators;
pub mod metrics;
pub mod model;
pub mod path;
pub mod vertex;

pub use generators::{CpcGenerator, EdgeGenerator, FilterGenerator};
pub use metrics::{compute as compute_metrics, Metrics};
pub use model::{Constraint, ConstraintKind, Graph, Sut, SutBuildError, SutBuilder, TestPath, TestSet};
pub use path::{
    admissible, build_path_covering_edge, contains, edge_occurrences, find_path_from_edge,
    find_path_to_edge, mark_constraints, mark_edges, occurrences, repeats,
};
pub use vertex::VertexId;
