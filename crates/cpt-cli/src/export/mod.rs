//! Graph export: Graphviz DOT, and PNG via a local `dot` binary.
pub mod dot;

pub use dot::{render_png, write_dot};
