//! Binned histograms
//!
//! This module provides the two histogram shapes the registry stores and
//! the tagged union that holds either of them.
//!
//! # Shapes
//!
//! - [`Hist1D`]: one axis, `bins + 2` cells
//! - [`Hist2D`]: two axes, `(x_bins + 2) * (y_bins + 2)` cells
//!
//! # Example
//!
//! ```
//! use histbook::histogram::{Binning, Histogram, Observation, Shape};
//!
//! let mut h = Histogram::new("E_{#gamma}", Binning::one_axis(100, 0.0, 8.0));
//! assert_eq!(h.shape(), Shape::OneAxis);
//!
//! h.fill(Observation::one(1.2)).unwrap();
//! assert!(h.fill(Observation::two(1.2, 3.4)).is_err());
//! ```

mod axis;
mod one_axis;
mod two_axis;

use core::fmt;

use thiserror::Error;

use crate::traits::{Accumulator, MergeError};

pub use axis::Axis;
pub use one_axis::Hist1D;
pub use two_axis::Hist2D;

/// The two histogram shapes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    OneAxis,
    TwoAxis,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::OneAxis => write!(f, "one-axis"),
            Shape::TwoAxis => write!(f, "two-axis"),
        }
    }
}

/// An observation routed to a histogram
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Observation {
    One { value: f64, weight: f64 },
    Two { x: f64, y: f64, weight: f64 },
}

impl Observation {
    /// Single value with unit weight
    pub fn one(value: f64) -> Self {
        Observation::One { value, weight: 1.0 }
    }

    /// Pair of values with unit weight
    pub fn two(x: f64, y: f64) -> Self {
        Observation::Two { x, y, weight: 1.0 }
    }

    /// Replace the weight
    pub fn with_weight(self, weight: f64) -> Self {
        match self {
            Observation::One { value, .. } => Observation::One { value, weight },
            Observation::Two { x, y, .. } => Observation::Two { x, y, weight },
        }
    }

    /// Shape of histogram this observation fits
    pub fn shape(&self) -> Shape {
        match self {
            Observation::One { .. } => Shape::OneAxis,
            Observation::Two { .. } => Shape::TwoAxis,
        }
    }
}

/// Binning parameters chosen at booking time
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Binning {
    OneAxis(Axis),
    TwoAxis { x: Axis, y: Axis },
}

impl Binning {
    /// One-axis binning
    ///
    /// # Panics
    ///
    /// Panics if `bins` is zero or if `low < high` does not hold
    pub fn one_axis(bins: usize, low: f64, high: f64) -> Self {
        Binning::OneAxis(Axis::new(bins, low, high))
    }

    /// Two-axis binning
    ///
    /// # Panics
    ///
    /// Panics if either bin count is zero or either range is empty
    pub fn two_axis(
        x_bins: usize,
        x_low: f64,
        x_high: f64,
        y_bins: usize,
        y_low: f64,
        y_high: f64,
    ) -> Self {
        Binning::TwoAxis {
            x: Axis::new(x_bins, x_low, x_high),
            y: Axis::new(y_bins, y_low, y_high),
        }
    }

    pub fn shape(&self) -> Shape {
        match self {
            Binning::OneAxis(_) => Shape::OneAxis,
            Binning::TwoAxis { .. } => Shape::TwoAxis,
        }
    }
}

impl fmt::Display for Binning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binning::OneAxis(axis) => write!(f, "{}", axis),
            Binning::TwoAxis { x, y } => write!(f, "x: {}, y: {}", x, y),
        }
    }
}

/// Observation arity disagrees with the histogram shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{requested} observation for a {booked} histogram")]
pub struct ShapeMismatch {
    pub booked: Shape,
    pub requested: Shape,
}

/// A histogram of either shape
///
/// The variant is fixed at creation.
#[derive(Clone, Debug, PartialEq)]
pub enum Histogram {
    OneAxis(Hist1D),
    TwoAxis(Hist2D),
}

impl Histogram {
    /// Create an empty histogram with the given binning
    pub fn new(title: impl Into<String>, binning: Binning) -> Self {
        match binning {
            Binning::OneAxis(axis) => Histogram::OneAxis(Hist1D::with_axis(title, axis)),
            Binning::TwoAxis { x, y } => Histogram::TwoAxis(Hist2D::with_axes(title, x, y)),
        }
    }

    pub fn shape(&self) -> Shape {
        match self {
            Histogram::OneAxis(_) => Shape::OneAxis,
            Histogram::TwoAxis(_) => Shape::TwoAxis,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Histogram::OneAxis(h) => h.title(),
            Histogram::TwoAxis(h) => h.title(),
        }
    }

    /// Binning this histogram was created with
    pub fn binning(&self) -> Binning {
        match self {
            Histogram::OneAxis(h) => Binning::OneAxis(*h.axis()),
            Histogram::TwoAxis(h) => Binning::TwoAxis {
                x: *h.x_axis(),
                y: *h.y_axis(),
            },
        }
    }

    /// Route an observation to the matching shape
    ///
    /// Leaves the contents untouched on a shape mismatch.
    pub fn fill(&mut self, observation: Observation) -> Result<(), ShapeMismatch> {
        match (self, observation) {
            (Histogram::OneAxis(h), Observation::One { value, weight }) => {
                h.fill_weighted(value, weight);
                Ok(())
            }
            (Histogram::TwoAxis(h), Observation::Two { x, y, weight }) => {
                h.fill_weighted(x, y, weight);
                Ok(())
            }
            (histogram, observation) => Err(ShapeMismatch {
                booked: histogram.shape(),
                requested: observation.shape(),
            }),
        }
    }

    /// Bin-wise addition of a histogram with identical shape and binning
    pub fn merge(&mut self, other: &Self) -> Result<(), MergeError> {
        match (self, other) {
            (Histogram::OneAxis(a), Histogram::OneAxis(b)) => a.merge(b),
            (Histogram::TwoAxis(a), Histogram::TwoAxis(b)) => a.merge(b),
            (histogram, other) => Err(MergeError::ShapeMismatch {
                expected: histogram.shape().to_string(),
                found: other.shape().to_string(),
            }),
        }
    }

    /// Check that [`merge`](Self::merge) would succeed, without merging
    pub fn check_compatible(&self, other: &Self) -> Result<(), MergeError> {
        if self.shape() != other.shape() {
            return Err(MergeError::ShapeMismatch {
                expected: self.shape().to_string(),
                found: other.shape().to_string(),
            });
        }
        if self.binning() != other.binning() {
            return Err(MergeError::IncompatibleBinning {
                expected: self.binning().to_string(),
                found: other.binning().to_string(),
            });
        }
        Ok(())
    }

    pub fn as_one_axis(&self) -> Option<&Hist1D> {
        match self {
            Histogram::OneAxis(h) => Some(h),
            Histogram::TwoAxis(_) => None,
        }
    }

    pub fn as_two_axis(&self) -> Option<&Hist2D> {
        match self {
            Histogram::TwoAxis(h) => Some(h),
            Histogram::OneAxis(_) => None,
        }
    }

    pub fn entries(&self) -> u64 {
        match self {
            Histogram::OneAxis(h) => h.entries(),
            Histogram::TwoAxis(h) => h.entries(),
        }
    }

    pub fn sum_of_weights(&self) -> f64 {
        match self {
            Histogram::OneAxis(h) => h.sum_of_weights(),
            Histogram::TwoAxis(h) => h.sum_of_weights(),
        }
    }

    pub fn clear(&mut self) {
        match self {
            Histogram::OneAxis(h) => Accumulator::clear(h),
            Histogram::TwoAxis(h) => Accumulator::clear(h),
        }
    }

    pub fn size_bytes(&self) -> usize {
        match self {
            Histogram::OneAxis(h) => h.size_bytes(),
            Histogram::TwoAxis(h) => h.size_bytes(),
        }
    }
}

impl serde::Serialize for Histogram {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Histogram::OneAxis(h) => serde::Serialize::serialize(h, serializer),
            Histogram::TwoAxis(h) => serde::Serialize::serialize(h, serializer),
        }
    }
}
