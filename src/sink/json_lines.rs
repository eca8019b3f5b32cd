//! JSON-lines file sink

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{Record, Sink, SinkError};

/// Writes one JSON object per record, newline separated
///
/// The file is created or truncated on [`create`](Self::create). After
/// [`close`](Sink::close) further writes fail with [`SinkError::Closed`].
#[derive(Debug)]
pub struct JsonLinesSink {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
    written: usize,
}

impl JsonLinesSink {
    /// Create or overwrite the file at `path`
    pub fn create(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)?;
        debug!(path = %path.display(), "opened export file");

        Ok(Self {
            path,
            writer: Some(BufWriter::new(file)),
            written: 0,
        })
    }

    /// Path of the export file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of records written so far
    pub fn written(&self) -> usize {
        self.written
    }
}

impl Sink for JsonLinesSink {
    fn write_record(&mut self, record: &Record<'_>) -> Result<(), SinkError> {
        let writer = self.writer.as_mut().ok_or(SinkError::Closed)?;
        serde_json::to_writer(&mut *writer, record)?;
        writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    fn close(&mut self) -> Result<(), SinkError> {
        let Some(mut writer) = self.writer.take() else {
            return Ok(());
        };
        writer.flush()?;
        writer.get_ref().sync_all()?;
        debug!(path = %self.path.display(), records = self.written, "closed export file");
        Ok(())
    }
}
