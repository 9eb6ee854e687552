use std::path::PathBuf;

use thiserror::Error;

/// Result alias used across the crate.
pub type NnResult<T> = Result<T, NnError>;

/// Everything that can go wrong while building, running, or training a network.
#[derive(Debug, Error)]
pub enum NnError {
    /// Backing storage for `requested` floats could not be obtained.
    #[error("could not allocate storage for {requested} elements")]
    Allocation { requested: usize },

    /// Two operands (or an operand and a destination) have incompatible shapes.
    /// Shapes are reported as `(rows, cols)`; vectors use `(1, len)`.
    #[error("dimension mismatch in {op}: expected {expected:?}, found {found:?}")]
    DimensionMismatch {
        op: &'static str,
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("invalid topology: {0}")]
    InvalidTopology(String),

    #[error("could not open {path}: {source}", path = .path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error at line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl NnError {
    pub(crate) fn mismatch(op: &'static str, expected: (usize, usize), found: (usize, usize)) -> NnError {
        NnError::DimensionMismatch { op, expected, found }
    }
}
