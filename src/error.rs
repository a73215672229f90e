// In: src/error.rs

//! This module defines the single, unified error type for the entire volseg library.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, VolsegError>;

#[derive(Error, Debug)]
pub enum VolsegError {
    // =========================================================================
    // === Contract Errors (raised at the call site, never retried)
    // =========================================================================
    /// A `VolumeRecord` could not be used to build a slice table.
    #[error("Malformed volume record: {0}")]
    Precondition(String),

    /// Overlap inputs were not 3-dimensional or did not share a shape.
    #[error("Shape mismatch ({reason}): got {left:?} and {right:?}")]
    ShapeMismatch {
        left: Vec<usize>,
        right: Vec<usize>,
        reason: String,
    },

    #[error("Slice index {index} out of range for dataset of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid configuration: {0}")]
    Config(String),

    // =========================================================================
    // === External Error Wrappers (Using #[from] for automatic conversion)
    // =========================================================================
    /// An error from the Serde JSON library, typically during config or report (de)serialization.
    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// An error originating from the underlying I/O subsystem (e.g. opening a log file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error from `ndarray` when reinterpreting an array's dimensionality.
    #[error("Array shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),
}

impl VolsegError {
    /// Builds a `ShapeMismatch` from two raw shapes.
    pub(crate) fn shape_mismatch(left: &[usize], right: &[usize], reason: &str) -> Self {
        VolsegError::ShapeMismatch {
            left: left.to_vec(),
            right: right.to_vec(),
            reason: reason.to_string(),
        }
    }
}
