//! One-axis histogram

use super::Axis;
use crate::traits::{Accumulator, MergeError};

/// Histogram over a single coordinate
///
/// Holds `bins + 2` cells: the underflow bin, the regular bins in order and
/// the overflow bin. Cells carry summed weights, so unweighted fills count
/// observations.
///
/// # Example
///
/// ```
/// use histbook::histogram::Hist1D;
///
/// let mut h = Hist1D::new("E_{#gamma}", 10, 0.0, 10.0);
///
/// h.fill(5.0);
/// h.fill_weighted(5.5, 2.0);
/// h.fill(42.0);
///
/// assert_eq!(h.bin_content(6), 3.0);
/// assert_eq!(h.overflow(), 1.0);
/// assert_eq!(h.entries(), 3);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Hist1D {
    title: String,
    axis: Axis,
    /// Summed weights per storage index
    counts: Vec<f64>,
    /// Number of accepted observations
    entries: u64,
}

impl Hist1D {
    /// Create an empty histogram
    ///
    /// # Panics
    ///
    /// Panics if `bins` is zero or if `low < high` does not hold
    pub fn new(title: impl Into<String>, bins: usize, low: f64, high: f64) -> Self {
        Self::with_axis(title, Axis::new(bins, low, high))
    }

    /// Create an empty histogram over an existing axis
    pub fn with_axis(title: impl Into<String>, axis: Axis) -> Self {
        Self {
            title: title.into(),
            axis,
            counts: vec![0.0; axis.len_with_flow()],
            entries: 0,
        }
    }

    /// Get the title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Get the binning
    pub fn axis(&self) -> &Axis {
        &self.axis
    }

    /// Add one observation with unit weight
    pub fn fill(&mut self, value: f64) {
        self.fill_weighted(value, 1.0);
    }

    /// Add one observation with the given weight
    ///
    /// NaN values are counted in the overflow bin.
    pub fn fill_weighted(&mut self, value: f64, weight: f64) {
        let index = self.axis.index(value);
        self.counts[index] += weight;
        self.entries += 1;
    }

    /// Content of the cell with storage index `index`
    ///
    /// `0` is underflow, `1..=bins` the regular bins, `bins + 1` overflow.
    /// Out of range indices read as zero.
    pub fn bin_content(&self, index: usize) -> f64 {
        self.counts.get(index).copied().unwrap_or(0.0)
    }

    /// Content of the underflow bin
    pub fn underflow(&self) -> f64 {
        self.counts[0]
    }

    /// Content of the overflow bin
    pub fn overflow(&self) -> f64 {
        self.counts[self.axis.bins() + 1]
    }

    /// All cells including underflow and overflow
    pub fn counts(&self) -> &[f64] {
        &self.counts
    }

    /// Sum of the regular bins, excluding flow
    pub fn integral(&self) -> f64 {
        self.counts[1..=self.axis.bins()].iter().sum()
    }

    /// Number of accepted observations
    pub fn entries(&self) -> u64 {
        self.entries
    }
}

impl Accumulator for Hist1D {
    type Point = f64;

    fn fill_weighted(&mut self, point: f64, weight: f64) {
        Hist1D::fill_weighted(self, point, weight);
    }

    fn merge(&mut self, other: &Self) -> Result<(), MergeError> {
        if self.axis != other.axis {
            return Err(MergeError::IncompatibleBinning {
                expected: self.axis.to_string(),
                found: other.axis.to_string(),
            });
        }

        for (cell, &theirs) in self.counts.iter_mut().zip(other.counts.iter()) {
            *cell += theirs;
        }
        self.entries += other.entries;

        Ok(())
    }

    fn clear(&mut self) {
        self.counts.fill(0.0);
        self.entries = 0;
    }

    fn size_bytes(&self) -> usize {
        core::mem::size_of::<Self>()
            + self.title.capacity()
            + self.counts.len() * core::mem::size_of::<f64>()
    }

    fn entries(&self) -> u64 {
        self.entries
    }

    fn sum_of_weights(&self) -> f64 {
        self.counts.iter().sum()
    }
}

impl serde::Serialize for Hist1D {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("Hist1D", 5)?;
        state.serialize_field("title", &self.title)?;
        state.serialize_field("entries", &self.entries)?;
        state.serialize_field("sum_of_weights", &self.sum_of_weights())?;
        state.serialize_field("axis", &self.axis)?;
        state.serialize_field("contents", &self.counts)?;
        state.end()
    }
}
