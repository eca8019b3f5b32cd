//! Two-axis histogram

use super::Axis;
use crate::traits::{Accumulator, MergeError};

/// Histogram over a pair of coordinates
///
/// Cells are stored row-major by y: cell `(ix, iy)` lives at
/// `iy * (x_bins + 2) + ix`, with storage index `0` the underflow and
/// `bins + 1` the overflow on each axis.
///
/// # Example
///
/// ```
/// use histbook::histogram::Hist2D;
///
/// let mut h = Hist2D::new("E vs mult", 10, 0.0, 10.0, 4, 0.0, 4.0);
///
/// h.fill(2.5, 1.5);
/// h.fill(2.5, 9.0);
///
/// assert_eq!(h.bin_content(3, 2), 1.0);
/// assert_eq!(h.bin_content(3, 5), 1.0); // y overflow
/// assert_eq!(h.entries(), 2);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Hist2D {
    title: String,
    x: Axis,
    y: Axis,
    counts: Vec<f64>,
    entries: u64,
}

impl Hist2D {
    /// Create an empty histogram
    ///
    /// # Panics
    ///
    /// Panics if either bin count is zero or either range is empty
    pub fn new(
        title: impl Into<String>,
        x_bins: usize,
        x_low: f64,
        x_high: f64,
        y_bins: usize,
        y_low: f64,
        y_high: f64,
    ) -> Self {
        Self::with_axes(
            title,
            Axis::new(x_bins, x_low, x_high),
            Axis::new(y_bins, y_low, y_high),
        )
    }

    /// Create an empty histogram over existing axes
    pub fn with_axes(title: impl Into<String>, x: Axis, y: Axis) -> Self {
        Self {
            title: title.into(),
            x,
            y,
            counts: vec![0.0; x.len_with_flow() * y.len_with_flow()],
            entries: 0,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn x_axis(&self) -> &Axis {
        &self.x
    }

    pub fn y_axis(&self) -> &Axis {
        &self.y
    }

    /// Add one observation with unit weight
    pub fn fill(&mut self, x: f64, y: f64) {
        self.fill_weighted(x, y, 1.0);
    }

    /// Add one observation with the given weight
    ///
    /// Each axis is binned independently. A NaN coordinate lands in that
    /// axis' overflow bin.
    pub fn fill_weighted(&mut self, x: f64, y: f64, weight: f64) {
        let cell = self.cell(self.x.index(x), self.y.index(y));
        self.counts[cell] += weight;
        self.entries += 1;
    }

    /// Content of the cell at storage indices `(ix, iy)`
    ///
    /// Out of range indices read as zero.
    pub fn bin_content(&self, ix: usize, iy: usize) -> f64 {
        if ix >= self.x.len_with_flow() || iy >= self.y.len_with_flow() {
            return 0.0;
        }
        self.counts[self.cell(ix, iy)]
    }

    /// All cells, row-major by y
    pub fn counts(&self) -> &[f64] {
        &self.counts
    }

    /// Cells grouped into one row per y storage index
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.counts.chunks(self.x.len_with_flow())
    }

    /// Sum of the regular cells, excluding every flow row and column
    pub fn integral(&self) -> f64 {
        (1..=self.y.bins())
            .flat_map(|iy| (1..=self.x.bins()).map(move |ix| (ix, iy)))
            .map(|(ix, iy)| self.counts[self.cell(ix, iy)])
            .sum()
    }

    pub fn entries(&self) -> u64 {
        self.entries
    }

    fn cell(&self, ix: usize, iy: usize) -> usize {
        iy * self.x.len_with_flow() + ix
    }

    fn binning(&self) -> String {
        format!("x: {}, y: {}", self.x, self.y)
    }
}

impl Accumulator for Hist2D {
    type Point = (f64, f64);

    fn fill_weighted(&mut self, (x, y): (f64, f64), weight: f64) {
        Hist2D::fill_weighted(self, x, y, weight);
    }

    fn merge(&mut self, other: &Self) -> Result<(), MergeError> {
        if self.x != other.x || self.y != other.y {
            return Err(MergeError::IncompatibleBinning {
                expected: self.binning(),
                found: other.binning(),
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

impl serde::Serialize for Hist2D {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let rows: Vec<&[f64]> = self.rows().collect();
        let mut state = serializer.serialize_struct("Hist2D", 6)?;
        state.serialize_field("title", &self.title)?;
        state.serialize_field("entries", &self.entries)?;
        state.serialize_field("sum_of_weights", &self.sum_of_weights())?;
        state.serialize_field("x_axis", &self.x)?;
        state.serialize_field("y_axis", &self.y)?;
        state.serialize_field("contents", &rows)?;
        state.end()
    }
}
