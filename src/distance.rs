//! Euclidean distance kernel over `f64` slices.
//!
//! Everything inside the engine compares distances in squared form — the
//! ordering is identical and it saves a `sqrt` per comparison. Only values
//! crossing the public boundary are converted to true Euclidean distances.

use crate::error::IndexError;

/// Squared Euclidean distance between two equal-length vectors.
///
/// Fails with [`IndexError::DimensionMismatch`] when the lengths disagree;
/// this check is the single place where the engine enforces dimensional
/// consistency.
#[inline]
pub fn squared_euclidean(a: &[f64], b: &[f64]) -> Result<f64, IndexError> {
    if a.len() != b.len() {
        return Err(IndexError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }
    Ok(a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum())
}

/// True Euclidean distance; same contract as [`squared_euclidean`].
#[inline]
pub fn euclidean(a: &[f64], b: &[f64]) -> Result<f64, IndexError> {
    squared_euclidean(a, b).map(f64::sqrt)
}
