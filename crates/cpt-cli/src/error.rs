//! CLI error types with associated exit codes.
//!
//! [`CptError`] is the top-level error type for the `cpt` binary. Every
//! variant maps to a stable exit code via [`CptError::exit_code`]:
//!
//! - Exit code **1** — a file or directory could not be loaded at all (I/O
//!   failure, not found, wrong kind of path).
//! - Exit code **2** — the file was read but violates the SUT grammar, or a
//!   constraint refers to an unknown vertex.
use std::fmt;
use std::path::PathBuf;

/// All error conditions the `cpt` CLI can produce.
#[derive(Debug)]
pub enum CptError {
    /// The input file or directory could not be read.
    FileLoad { path: PathBuf, detail: String },
    /// The input violates the SUT text grammar (§6.1), or a constraint
    /// references a vertex absent from the graph.
    ParseFormat {
        file: PathBuf,
        line: Option<usize>,
        message: String,
    },
}

impl CptError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileLoad { .. } => 1,
            Self::ParseFormat { .. } => 2,
        }
    }

    /// Returns a human-readable message suitable for printing to stderr.
    pub fn message(&self) -> String {
        match self {
            Self::FileLoad { path, detail } => {
                format!("error: failed to load {}: {detail}", path.display())
            }
            Self::ParseFormat {
                file,
                line: Some(line),
                message,
            } => {
                format!("error: {}:{line}: {message}", file.display())
            }
            Self::ParseFormat {
                file,
                line: None,
                message,
            } => {
                format!("error: {}: {message}", file.display())
            }
        }
    }
}

impl fmt::Display for CptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for CptError {}
