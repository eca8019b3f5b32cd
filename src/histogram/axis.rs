//! Equal-width binning of a single coordinate

use core::fmt;

/// Equal-width binning of the half-open interval `[low, high)`
///
/// Besides the `bins` regular bins every axis has an underflow bin (storage
/// index `0`) and an overflow bin (storage index `bins + 1`), so a histogram
/// stores `bins + 2` cells per axis.
///
/// # Example
///
/// ```
/// use histbook::histogram::Axis;
///
/// let axis = Axis::new(10, 0.0, 10.0);
///
/// assert_eq!(axis.index(-0.5), 0); // underflow
/// assert_eq!(axis.index(0.0), 1); // first regular bin
/// assert_eq!(axis.index(5.0), 6);
/// assert_eq!(axis.index(10.0), 11); // overflow
/// assert_eq!(axis.index(f64::NAN), 11);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Axis {
    bins: usize,
    low: f64,
    high: f64,
}

impl Axis {
    /// Create a new axis
    ///
    /// # Panics
    ///
    /// Panics if `bins` is zero or if `low < high` does not hold
    pub fn new(bins: usize, low: f64, high: f64) -> Self {
        assert!(bins > 0, "bin count must be positive");
        assert!(low < high, "low edge must be below high edge");

        Self { bins, low, high }
    }

    /// Number of regular bins
    pub fn bins(&self) -> usize {
        self.bins
    }

    /// Inclusive lower edge of the first regular bin
    pub fn low(&self) -> f64 {
        self.low
    }

    /// Exclusive upper edge of the last regular bin
    pub fn high(&self) -> f64 {
        self.high
    }

    /// Number of stored cells including underflow and overflow
    pub fn len_with_flow(&self) -> usize {
        self.bins + 2
    }

    /// Width of each regular bin
    pub fn bin_width(&self) -> f64 {
        (self.high - self.low) / self.bins as f64
    }

    /// Lower edge of the regular bin with storage index `index`
    ///
    /// Returns `None` for the flow bins and out of range indices
    pub fn bin_low_edge(&self, index: usize) -> Option<f64> {
        if index == 0 || index > self.bins {
            return None;
        }
        Some(self.low + (index - 1) as f64 * self.bin_width())
    }

    /// Map a value to its storage index
    ///
    /// The regular bin is `floor((value - low) / (high - low) * bins)`,
    /// clamped into `[-1, bins]`, then shifted by one so that the underflow
    /// bin is `0`. Anything not below `bins`, NaN included, lands in
    /// overflow.
    pub fn index(&self, value: f64) -> usize {
        let position = ((value - self.low) / (self.high - self.low) * self.bins as f64).floor();

        if position < 0.0 {
            0
        } else if position < self.bins as f64 {
            position as usize + 1
        } else {
            self.bins + 1
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bins in [{}, {})", self.bins, self.low, self.high)
    }
}

impl serde::Serialize for Axis {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("Axis", 3)?;
        state.serialize_field("bins", &self.bins)?;
        state.serialize_field("low", &self.low)?;
        state.serialize_field("high", &self.high)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_open_interval() {
        let axis = Axis::new(10, 0.0, 10.0);

        assert_eq!(axis.index(0.0), 1);
        assert_eq!(axis.index(9.999), 10);
        assert_eq!(axis.index(10.0), 11);
    }

    #[test]
    fn test_flow_bins() {
        let axis = Axis::new(4, -2.0, 2.0);

        assert_eq!(axis.index(-2.0001), 0);
        assert_eq!(axis.index(-1e300), 0);
        assert_eq!(axis.index(f64::NEG_INFINITY), 0);
        assert_eq!(axis.index(1e300), 5);
        assert_eq!(axis.index(f64::INFINITY), 5);
    }

    #[test]
    fn test_nan_goes_to_overflow() {
        let axis = Axis::new(4, 0.0, 1.0);
        assert_eq!(axis.index(f64::NAN), 5);
    }

    #[test]
    fn test_edges() {
        let axis = Axis::new(5, 0.0, 5.0);

        assert_eq!(axis.len_with_flow(), 7);
        assert!((axis.bin_width() - 1.0).abs() < 1e-12);
        assert_eq!(axis.bin_low_edge(0), None);
        assert_eq!(axis.bin_low_edge(1), Some(0.0));
        assert_eq!(axis.bin_low_edge(5), Some(4.0));
        assert_eq!(axis.bin_low_edge(6), None);
    }

    #[test]
    fn test_display() {
        let axis = Axis::new(50, 0.0, 1000.0);
        assert_eq!(axis.to_string(), "50 bins in [0, 1000)");
    }

    #[test]
    #[should_panic(expected = "bin count must be positive")]
    fn test_zero_bins_panics() {
        Axis::new(0, 0.0, 1.0);
    }

    #[test]
    #[should_panic(expected = "low edge must be below high edge")]
    fn test_inverted_range_panics() {
        Axis::new(10, 1.0, 1.0);
    }
}
