//! Named histogram registry
//!
//! A [`Registry`] owns every histogram of a run under a string key. Keys are
//! booked once during setup, filled from the event loop and exported at the
//! end in a deterministic [`ExportOrder`].
//!
//! # Example
//!
//! ```
//! use histbook::registry::{Registry, RegistryError};
//! use histbook::sink::MemorySink;
//!
//! let mut registry = Registry::new();
//!
//! registry.book_one_axis("h", "t", 5, 0.0, 5.0);
//! registry.fill("h", 1.0)?;
//! registry.fill("h", 4.0)?;
//! registry.fill("h", 10.0)?;
//!
//! assert!(matches!(
//!     registry.fill("missing", 1.0),
//!     Err(RegistryError::NotBooked { .. })
//! ));
//!
//! let mut sink = MemorySink::new();
//! registry.write_to(&mut sink)?;
//!
//! let h = sink.get("h").unwrap().as_one_axis().unwrap();
//! assert_eq!(h.bin_content(2), 1.0);
//! assert_eq!(h.bin_content(5), 1.0);
//! assert_eq!(h.overflow(), 1.0);
//! # Ok::<(), RegistryError>(())
//! ```
//!
//! # Distributed Usage
//!
//! Each worker fills its own registry; the results are combined afterwards:
//!
//! ```
//! use histbook::registry::Registry;
//!
//! let mut worker1 = Registry::new();
//! let mut worker2 = Registry::new();
//! for registry in [&mut worker1, &mut worker2] {
//!     registry.book_one_axis("mult", "multiplicity", 10, 0.0, 100.0);
//! }
//!
//! worker1.fill("mult", 12.0).unwrap();
//! worker2.fill("mult", 15.0).unwrap();
//!
//! worker1.merge(&worker2).unwrap();
//! assert_eq!(worker1.get("mult").unwrap().entries(), 2);
//! ```

mod order;

use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};

use crate::histogram::{Binning, Histogram, Observation, Shape};
use crate::sink::{JsonLinesSink, Record, Sink, SinkError};
use crate::traits::MergeError;

pub use order::ExportOrder;

/// Error reported by registry operations
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Fill targeted a key that was never booked
    #[error("histogram '{key}' is not booked")]
    NotBooked { key: String },
    /// Fill arity disagrees with the booked shape
    #[error("histogram '{key}' is {booked}, got a {requested} observation")]
    ShapeMismatch {
        key: String,
        booked: Shape,
        requested: Shape,
    },
    /// Export target could not be opened, written or closed
    #[error("export failed: {0}")]
    Sink(#[from] SinkError),
    /// Histograms under the same key cannot be added
    #[error("cannot merge histogram '{key}': {source}")]
    Merge {
        key: String,
        #[source]
        source: MergeError,
    },
}

/// Histograms keyed by name, exported in a fixed order
///
/// Invariant: `declaration_order` lists exactly the keys of `entries`, each
/// once, in the order they were first booked.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    entries: HashMap<String, Histogram>,
    declaration_order: Vec<String>,
    order: ExportOrder,
}

impl Registry {
    /// Create an empty registry exporting in declaration order
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry with the given export order
    pub fn with_order(order: ExportOrder) -> Self {
        Self {
            order,
            ..Self::default()
        }
    }

    /// Configured export order
    pub fn order(&self) -> ExportOrder {
        self.order
    }

    /// Book a histogram under `key`
    ///
    /// Booking an existing key discards its histogram and contents; the key
    /// keeps its position in declaration order.
    pub fn book(&mut self, key: impl Into<String>, title: impl Into<String>, binning: Binning) {
        let key = key.into();
        let histogram = Histogram::new(title, binning);

        if self.entries.contains_key(&key) {
            debug!(key = %key, binning = %binning, "rebooking histogram, previous contents discarded");
        } else {
            debug!(key = %key, binning = %binning, "booking histogram");
            self.declaration_order.push(key.clone());
        }

        self.entries.insert(key, histogram);
    }

    /// Book a one-axis histogram
    ///
    /// # Panics
    ///
    /// Panics if `bins` is zero or if `low < high` does not hold
    pub fn book_one_axis(
        &mut self,
        key: impl Into<String>,
        title: impl Into<String>,
        bins: usize,
        low: f64,
        high: f64,
    ) {
        self.book(key, title, Binning::one_axis(bins, low, high));
    }

    /// Book a two-axis histogram
    ///
    /// # Panics
    ///
    /// Panics if either bin count is zero or either range is empty
    #[allow(clippy::too_many_arguments)]
    pub fn book_two_axis(
        &mut self,
        key: impl Into<String>,
        title: impl Into<String>,
        x_bins: usize,
        x_low: f64,
        x_high: f64,
        y_bins: usize,
        y_low: f64,
        y_high: f64,
    ) {
        self.book(
            key,
            title,
            Binning::two_axis(x_bins, x_low, x_high, y_bins, y_low, y_high),
        );
    }

    /// Route an observation to the histogram booked under `key`
    ///
    /// Never books implicitly. On error nothing is modified.
    pub fn fill_observation(
        &mut self,
        key: &str,
        observation: Observation,
    ) -> Result<(), RegistryError> {
        let histogram = self
            .entries
            .get_mut(key)
            .ok_or_else(|| RegistryError::NotBooked {
                key: key.to_string(),
            })?;

        histogram
            .fill(observation)
            .map_err(|mismatch| RegistryError::ShapeMismatch {
                key: key.to_string(),
                booked: mismatch.booked,
                requested: mismatch.requested,
            })
    }

    /// Fill a one-axis histogram with unit weight
    pub fn fill(&mut self, key: &str, value: f64) -> Result<(), RegistryError> {
        self.fill_observation(key, Observation::one(value))
    }

    /// Fill a one-axis histogram with the given weight
    pub fn fill_weighted(&mut self, key: &str, value: f64, weight: f64) -> Result<(), RegistryError> {
        self.fill_observation(key, Observation::one(value).with_weight(weight))
    }

    /// Fill a two-axis histogram with unit weight
    pub fn fill_2d(&mut self, key: &str, x: f64, y: f64) -> Result<(), RegistryError> {
        self.fill_observation(key, Observation::two(x, y))
    }

    /// Fill a two-axis histogram with the given weight
    pub fn fill_2d_weighted(
        &mut self,
        key: &str,
        x: f64,
        y: f64,
        weight: f64,
    ) -> Result<(), RegistryError> {
        self.fill_observation(key, Observation::two(x, y).with_weight(weight))
    }

    /// Histogram booked under `key`
    pub fn get(&self, key: &str) -> Option<&Histogram> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of booked keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in the order they were first booked
    pub fn declared_keys(&self) -> &[String] {
        &self.declaration_order
    }

    /// Keys in export order
    pub fn export_order(&self) -> Vec<&str> {
        self.order.arrange(&self.declaration_order)
    }

    /// Records in export order
    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.export_order().into_iter().filter_map(move |name| {
            self.entries
                .get(name)
                .map(|histogram| Record { name, histogram })
        })
    }

    /// Reset the contents of every histogram, keeping the bookings
    pub fn reset(&mut self) {
        for histogram in self.entries.values_mut() {
            histogram.clear();
        }
    }

    /// Drop every booking
    pub fn clear(&mut self) {
        self.entries.clear();
        self.declaration_order.clear();
    }

    /// Approximate memory usage in bytes
    pub fn size_bytes(&self) -> usize {
        core::mem::size_of::<Self>()
            + self
                .entries
                .iter()
                .map(|(key, histogram)| key.capacity() + histogram.size_bytes())
                .sum::<usize>()
            + self.declaration_order.capacity() * core::mem::size_of::<String>()
            + self
                .declaration_order
                .iter()
                .map(String::capacity)
                .sum::<usize>()
    }

    /// Export every histogram to the file at `path` as JSON lines
    ///
    /// The file is created or overwritten. Returns the number of records.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<usize, RegistryError> {
        let sink = JsonLinesSink::create(path.as_ref())?;
        self.write_to(sink)
    }

    /// Export every histogram to `sink` in export order
    ///
    /// The sink is closed on every path, including after a failed record.
    /// The first error wins. The registry is not modified, so repeated
    /// exports without intervening book or fill produce identical output.
    pub fn write_to<S: Sink>(&self, mut sink: S) -> Result<usize, RegistryError> {
        let mut written = 0;
        let mut outcome = Ok(());

        for record in self.records() {
            if let Err(err) = sink.write_record(&record) {
                outcome = Err(err);
                break;
            }
            written += 1;
        }

        let closed = sink.close();
        outcome.and(closed)?;

        info!(records = written, order = %self.order, "exported histograms");
        Ok(written)
    }

    /// Add another registry's histograms into this one
    ///
    /// Keys present in both are added bin-wise and must agree in shape and
    /// binning. Keys only in `other` are adopted, appended in `other`'s
    /// declaration order. Compatibility is checked up front, so on error
    /// `self` is unchanged.
    pub fn merge(&mut self, other: &Registry) -> Result<(), RegistryError> {
        for key in &other.declaration_order {
            if let (Some(mine), Some(theirs)) = (self.entries.get(key), other.entries.get(key)) {
                mine.check_compatible(theirs)
                    .map_err(|source| RegistryError::Merge {
                        key: key.clone(),
                        source,
                    })?;
            }
        }

        for key in &other.declaration_order {
            let Some(theirs) = other.entries.get(key) else {
                continue;
            };
            match self.entries.get_mut(key) {
                Some(mine) => mine.merge(theirs).map_err(|source| RegistryError::Merge {
                    key: key.clone(),
                    source,
                })?,
                None => {
                    self.declaration_order.push(key.clone());
                    self.entries.insert(key.clone(), theirs.clone());
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;

    #[test]
    fn test_book_and_fill() {
        let mut registry = Registry::new();
        registry.book_one_axis("h", "t", 10, 0.0, 10.0);

        registry.fill("h", 5.0).unwrap();

        let h = registry.get("h").unwrap().as_one_axis().unwrap();
        assert_eq!(h.bin_content(6), 1.0);
        assert_eq!(h.entries(), 1);
    }

    #[test]
    fn test_fill_not_booked() {
        let mut registry = Registry::new();
        registry.book_one_axis("h", "t", 10, 0.0, 10.0);

        let err = registry.fill("other", 1.0).unwrap_err();

        assert!(matches!(&err, RegistryError::NotBooked { key } if key == "other"));
        assert_eq!(err.to_string(), "histogram 'other' is not booked");
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.declared_keys(), ["h"]);
    }

    #[test]
    fn test_fill_shape_mismatch() {
        let mut registry = Registry::new();
        registry.book_two_axis("k", "t", 2, 0.0, 2.0, 2, 0.0, 2.0);
        registry.fill_2d("k", 0.5, 0.5).unwrap();
        let before = registry.get("k").unwrap().clone();

        let err = registry.fill("k", 1.0).unwrap_err();

        assert!(matches!(
            err,
            RegistryError::ShapeMismatch {
                booked: Shape::TwoAxis,
                requested: Shape::OneAxis,
                ..
            }
        ));
        assert_eq!(registry.get("k").unwrap(), &before);
    }

    #[test]
    fn test_fill_2d_on_one_axis() {
        let mut registry = Registry::new();
        registry.book_one_axis("k", "t", 2, 0.0, 2.0);

        let err = registry.fill_2d("k", 1.0, 1.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "histogram 'k' is one-axis, got a two-axis observation"
        );
    }

    #[test]
    fn test_rebook_discards_contents() {
        let mut registry = Registry::new();
        registry.book_one_axis("a", "first", 5, 0.0, 5.0);
        registry.book_one_axis("k", "t", 5, 0.0, 5.0);
        registry.fill("k", 3.0).unwrap();

        registry.book_one_axis("k", "t2", 5, 0.0, 5.0);

        let h = registry.get("k").unwrap();
        assert_eq!(h.entries(), 0);
        assert_eq!(h.title(), "t2");
        assert_eq!(registry.declared_keys(), ["a", "k"]);
    }

    #[test]
    fn test_rebook_can_change_shape() {
        let mut registry = Registry::new();
        registry.book_one_axis("k", "t", 5, 0.0, 5.0);
        registry.book_two_axis("k", "t", 5, 0.0, 5.0, 5, 0.0, 5.0);

        assert_eq!(registry.get("k").unwrap().shape(), Shape::TwoAxis);
        assert!(registry.fill_2d("k", 1.0, 1.0).is_ok());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_weighted_fills() {
        let mut registry = Registry::new();
        registry.book_one_axis("a", "t", 2, 0.0, 2.0);
        registry.book_two_axis("b", "t", 2, 0.0, 2.0, 2, 0.0, 2.0);

        registry.fill_weighted("a", 0.5, 2.0).unwrap();
        registry.fill_2d_weighted("b", 0.5, 1.5, 0.5).unwrap();

        assert_eq!(registry.get("a").unwrap().sum_of_weights(), 2.0);
        let b = registry.get("b").unwrap().as_two_axis().unwrap();
        assert_eq!(b.bin_content(1, 2), 0.5);
    }

    #[test]
    fn test_export_order_declaration() {
        let mut registry = Registry::new();
        for key in ["z", "a", "m"] {
            registry.book_one_axis(key, key, 1, 0.0, 1.0);
        }

        assert_eq!(registry.export_order(), ["z", "a", "m"]);
    }

    #[test]
    fn test_export_order_lexicographic() {
        let mut registry = Registry::with_order(ExportOrder::Lexicographic);
        for key in ["z", "a", "m"] {
            registry.book_one_axis(key, key, 1, 0.0, 1.0);
        }

        assert_eq!(registry.export_order(), ["a", "m", "z"]);
        assert_eq!(registry.declared_keys(), ["z", "a", "m"]);
    }

    #[test]
    fn test_write_to_memory() {
        let mut registry = Registry::new();
        registry.book_one_axis("h1", "t", 2, 0.0, 2.0);
        registry.book_two_axis("h2", "t", 2, 0.0, 2.0, 2, 0.0, 2.0);
        registry.fill("h1", 1.0).unwrap();

        let mut sink = MemorySink::new();
        let written = registry.write_to(&mut sink).unwrap();

        assert_eq!(written, 2);
        assert_eq!(sink.names(), ["h1", "h2"]);
        assert_eq!(sink.close_count(), 1);
        assert_eq!(sink.get("h1"), registry.get("h1"));
    }

    #[test]
    fn test_write_closes_sink_on_failure() {
        let mut registry = Registry::new();
        for key in ["a", "b", "c"] {
            registry.book_one_axis(key, key, 1, 0.0, 1.0);
        }

        let mut sink = MemorySink::failing_after(1);
        let err = registry.write_to(&mut sink).unwrap_err();

        assert!(matches!(err, RegistryError::Sink(SinkError::Io(_))));
        assert_eq!(sink.names(), ["a"]);
        assert_eq!(sink.close_count(), 1);
    }

    #[test]
    fn test_write_empty_registry() {
        let registry = Registry::new();
        let mut sink = MemorySink::new();

        assert_eq!(registry.write_to(&mut sink).unwrap(), 0);
        assert!(sink.is_closed());
    }

    #[test]
    fn test_reset_keeps_bookings() {
        let mut registry = Registry::new();
        registry.book_one_axis("h", "t", 2, 0.0, 2.0);
        registry.fill("h", 1.0).unwrap();

        registry.reset();

        assert!(registry.contains("h"));
        assert_eq!(registry.get("h").unwrap().entries(), 0);
    }

    #[test]
    fn test_clear() {
        let mut registry = Registry::new();
        registry.book_one_axis("h", "t", 2, 0.0, 2.0);

        registry.clear();

        assert!(registry.is_empty());
        assert!(registry.declared_keys().is_empty());
        assert!(matches!(
            registry.fill("h", 1.0),
            Err(RegistryError::NotBooked { .. })
        ));
    }

    #[test]
    fn test_merge() {
        let mut r1 = Registry::new();
        let mut r2 = Registry::new();
        r1.book_one_axis("shared", "t", 4, 0.0, 4.0);
        r2.book_one_axis("shared", "t", 4, 0.0, 4.0);
        r2.book_one_axis("only_r2", "t", 4, 0.0, 4.0);

        r1.fill("shared", 1.5).unwrap();
        r2.fill("shared", 1.5).unwrap();
        r2.fill("only_r2", 3.5).unwrap();

        r1.merge(&r2).unwrap();

        assert_eq!(r1.declared_keys(), ["shared", "only_r2"]);
        let shared = r1.get("shared").unwrap().as_one_axis().unwrap();
        assert_eq!(shared.bin_content(2), 2.0);
        assert_eq!(r1.get("only_r2").unwrap().entries(), 1);
    }

    #[test]
    fn test_merge_incompatible_is_atomic() {
        let mut r1 = Registry::new();
        let mut r2 = Registry::new();
        r1.book_one_axis("a", "t", 4, 0.0, 4.0);
        r1.book_one_axis("b", "t", 4, 0.0, 4.0);
        r2.book_one_axis("a", "t", 4, 0.0, 4.0);
        r2.book_one_axis("b", "t", 8, 0.0, 4.0);
        r2.book_one_axis("c", "t", 4, 0.0, 4.0);
        r2.fill("a", 1.0).unwrap();

        let err = r1.merge(&r2).unwrap_err();

        assert!(matches!(&err, RegistryError::Merge { key, .. } if key == "b"));
        assert_eq!(r1.get("a").unwrap().entries(), 0);
        assert!(!r1.contains("c"));
    }

    #[test]
    fn test_size_bytes_grows_with_bookings() {
        let mut registry = Registry::new();
        let empty = registry.size_bytes();

        registry.book_one_axis("h", "t", 100, 0.0, 1.0);

        assert!(registry.size_bytes() > empty + 100 * core::mem::size_of::<f64>());
    }

    #[test]
    fn test_size_bytes_counts_key_storage() {
        let long_key = "k".repeat(200);
        let mut short = Registry::new();
        let mut long = Registry::new();
        short.book_one_axis("k", "t", 4, 0.0, 4.0);
        long.book_one_axis(long_key.as_str(), "t", 4, 0.0, 4.0);

        // the key is held by the map and by the declaration list
        assert!(long.size_bytes() >= short.size_bytes() + 2 * (long_key.len() - 1));
    }
}
