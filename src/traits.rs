//! Core traits for binned accumulators
//!
//! Both histogram shapes implement the base [`Accumulator`] trait, which
//! covers filling, merging and resetting. Shape-specific access lives on the
//! concrete types in [`crate::histogram`].

use core::fmt::Debug;

use thiserror::Error;

/// Error during accumulator merge operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MergeError {
    /// Accumulators have different binning
    #[error("incompatible binning: expected {expected}, found {found}")]
    IncompatibleBinning { expected: String, found: String },
    /// Accumulators have different shapes
    #[error("shape mismatch: expected {expected}, found {found}")]
    ShapeMismatch { expected: String, found: String },
}

/// Core trait for all binned accumulators
pub trait Accumulator: Clone + Debug {
    /// The coordinate this accumulator bins: `f64` or `(f64, f64)`
    type Point: Copy;

    /// Add a weighted observation
    fn fill_weighted(&mut self, point: Self::Point, weight: f64);

    /// Add an observation with unit weight
    fn fill(&mut self, point: Self::Point) {
        self.fill_weighted(point, 1.0);
    }

    /// Merge another accumulator into this one by bin-wise addition
    ///
    /// Returns an error if the binning differs
    fn merge(&mut self, other: &Self) -> Result<(), MergeError>;

    /// Reset all bins to zero
    fn clear(&mut self);

    /// Memory usage in bytes
    fn size_bytes(&self) -> usize;

    /// Number of observations accepted
    fn entries(&self) -> u64;

    /// Sum of the weights of all accepted observations
    fn sum_of_weights(&self) -> f64;

    /// Check if nothing was filled
    fn is_empty(&self) -> bool {
        self.entries() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_error_display() {
        let err = MergeError::IncompatibleBinning {
            expected: "10 bins in [0, 1)".to_string(),
            found: "20 bins in [0, 1)".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "incompatible binning: expected 10 bins in [0, 1), found 20 bins in [0, 1)"
        );
    }
}
