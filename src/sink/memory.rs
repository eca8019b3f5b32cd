//! In-memory sink

use super::{Record, Sink, SinkError};
use crate::histogram::Histogram;

/// Keeps a copy of every exported record
///
/// Optionally fails after a fixed number of records, which lets callers
/// exercise the error path of an export.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    records: Vec<(String, Histogram)>,
    closes: usize,
    fail_after: Option<usize>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sink whose `write_record` fails once `limit` records were accepted
    pub fn failing_after(limit: usize) -> Self {
        Self {
            fail_after: Some(limit),
            ..Self::default()
        }
    }

    /// Records in the order they were written
    pub fn records(&self) -> &[(String, Histogram)] {
        &self.records
    }

    /// Names in the order they were written
    pub fn names(&self) -> Vec<&str> {
        self.records.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Look up a written record by name
    pub fn get(&self, name: &str) -> Option<&Histogram> {
        self.records
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, histogram)| histogram)
    }

    pub fn is_closed(&self) -> bool {
        self.closes > 0
    }

    /// Number of times `close` was called
    pub fn close_count(&self) -> usize {
        self.closes
    }

    /// Drop collected records so the sink can take another export
    pub fn reset(&mut self) {
        self.records.clear();
        self.closes = 0;
    }
}

impl Sink for MemorySink {
    fn write_record(&mut self, record: &Record<'_>) -> Result<(), SinkError> {
        if self.fail_after.is_some_and(|limit| self.records.len() >= limit) {
            return Err(SinkError::Io(std::io::Error::other("memory sink full")));
        }
        self.records
            .push((record.name.to_string(), record.histogram.clone()));
        Ok(())
    }

    fn close(&mut self) -> Result<(), SinkError> {
        self.closes += 1;
        Ok(())
    }
}
