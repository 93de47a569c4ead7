//! Error types for the index engine.

use thiserror::Error;

/// Everything that can go wrong inside the engine.
///
/// Each variant is a distinct failure kind so embedders can map them onto
/// their own error surfaces. Transient graph imperfections (dangling
/// connection indices, asymmetric back-edges) are deliberately *not* errors;
/// search tolerates them and keeps going.
#[derive(Error, Debug)]
pub enum IndexError {
    /// Two vectors disagreed on dimensionality.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A layer-search entry index was out of range for that layer.
    #[error("Invalid entry index: {entry} out of range for layer of {len} nodes")]
    InvalidEntry { entry: u64, len: usize },

    /// A state document was missing required fields or had the wrong shape.
    #[error("Malformed state document: {0}")]
    MalformedDocument(String),

    /// The operation is declared on the surface but not implemented.
    #[error("{0} is not implemented")]
    Unsupported(&'static str),
}
