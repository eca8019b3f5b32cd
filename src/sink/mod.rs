//! Export targets for registry contents
//!
//! A [`Sink`] receives one [`Record`] per booked histogram and is closed
//! exactly once when the export finishes, whether or not it succeeded.
//!
//! # Sinks
//!
//! - [`JsonLinesSink`]: one JSON object per line in a file
//! - [`MemorySink`]: keeps copies of the records, for tests and embedding
//!
//! JSON has no encoding for infinities or NaN, so a bin content or weight
//! sum that is not finite is written as `null`. [`MemorySink`] keeps the
//! exact values.
//!
//! # Example
//!
//! ```
//! use histbook::registry::Registry;
//! use histbook::sink::MemorySink;
//!
//! let mut registry = Registry::new();
//! registry.book_one_axis("h", "title", 5, 0.0, 5.0);
//! registry.fill("h", 1.0).unwrap();
//!
//! let mut sink = MemorySink::new();
//! registry.write_to(&mut sink).unwrap();
//!
//! assert_eq!(sink.records().len(), 1);
//! assert!(sink.is_closed());
//! ```

mod json_lines;
mod memory;

use thiserror::Error;

use crate::histogram::{Histogram, Shape};

pub use json_lines::JsonLinesSink;
pub use memory::MemorySink;

/// Error raised by a sink
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("sink I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode record: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("sink already closed")]
    Closed,
}

/// One exported histogram: the registry key plus the histogram itself
#[derive(Clone, Copy, Debug)]
pub struct Record<'a> {
    pub name: &'a str,
    pub histogram: &'a Histogram,
}

impl serde::Serialize for Record<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        #[derive(serde::Serialize)]
        #[serde(rename_all = "snake_case")]
        enum ShapeTag {
            OneAxis,
            TwoAxis,
        }

        #[derive(serde::Serialize)]
        struct Flat<'a> {
            name: &'a str,
            shape: ShapeTag,
            #[serde(flatten)]
            histogram: &'a Histogram,
        }

        let shape = match self.histogram.shape() {
            Shape::OneAxis => ShapeTag::OneAxis,
            Shape::TwoAxis => ShapeTag::TwoAxis,
        };

        serde::Serialize::serialize(
            &Flat {
                name: self.name,
                shape,
                histogram: self.histogram,
            },
            serializer,
        )
    }
}

/// Destination of a registry export
pub trait Sink {
    /// Write one record
    fn write_record(&mut self, record: &Record<'_>) -> Result<(), SinkError>;

    /// Flush and release the underlying resource
    ///
    /// Called once per export, including after a failed `write_record`.
    fn close(&mut self) -> Result<(), SinkError>;
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn write_record(&mut self, record: &Record<'_>) -> Result<(), SinkError> {
        (**self).write_record(record)
    }

    fn close(&mut self) -> Result<(), SinkError> {
        (**self).close()
    }
}
