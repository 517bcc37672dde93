//! Destinations for expanded rows.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::expand::OutputRow;

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("sink already committed")]
    Committed,
}

/// Receives rows one at a time and persists them on `commit`.
///
/// Nothing inserted before `commit` is required to be visible to readers.
pub trait RowSink {
    fn insert(&mut self, row: OutputRow) -> Result<(), SinkError>;
    fn commit(&mut self) -> Result<(), SinkError>;
}

/// Collects rows in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    rows: Vec<OutputRow>,
    committed: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[OutputRow] {
        &self.rows
    }

    pub fn is_committed(&self) -> bool {
        self.committed
    }
}

impl RowSink for MemorySink {
    fn insert(&mut self, row: OutputRow) -> Result<(), SinkError> {
        if self.committed {
            return Err(SinkError::Committed);
        }
        self.rows.push(row);
        Ok(())
    }

    fn commit(&mut self) -> Result<(), SinkError> {
        self.committed = true;
        Ok(())
    }
}

/// Writes rows as JSON Lines.
///
/// Rows go to `<path>.tmp`; `commit` renames it over `path`. A sink dropped
/// without committing removes its temp file and leaves `path` untouched.
pub struct JsonlSink {
    path: PathBuf,
    tmp_path: PathBuf,
    writer: Option<BufWriter<File>>,
    rows: usize,
}

impl JsonlSink {
    pub fn create(path: &Path) -> Result<Self, SinkError> {
        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp_path = PathBuf::from(tmp);
        let file = File::create(&tmp_path)?;
        Ok(Self {
            path: path.to_path_buf(),
            tmp_path,
            writer: Some(BufWriter::new(file)),
            rows: 0,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(writer: BufWriter<File>, tmp_path: &Path, path: &Path) -> Result<(), SinkError> {
        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
        drop(file);
        fs::rename(tmp_path, path)?;
        Ok(())
    }
}

impl RowSink for JsonlSink {
    fn insert(&mut self, row: OutputRow) -> Result<(), SinkError> {
        let writer = self.writer.as_mut().ok_or(SinkError::Committed)?;
        serde_json::to_writer(&mut *writer, &row)?;
        writer.write_all(b"\n")?;
        self.rows += 1;
        Ok(())
    }

    /// A failed commit removes the temp file; the sink cannot be reused.
    fn commit(&mut self) -> Result<(), SinkError> {
        let writer = self.writer.take().ok_or(SinkError::Committed)?;
        let result = Self::persist(writer, &self.tmp_path, &self.path);
        if result.is_err() {
            let _ = fs::remove_file(&self.tmp_path);
        }
        result
    }
}

impl Drop for JsonlSink {
    fn drop(&mut self) {
        if self.writer.take().is_some() {
            let _ = fs::remove_file(&self.tmp_path);
        }
    }
}

/// Read back rows written by [`JsonlSink`].
pub fn read_jsonl(path: &Path) -> Result<Vec<OutputRow>, SinkError> {
    let content = fs::read_to_string(path)?;
    let mut rows = Vec::new();
    for line in content.lines().filter(|l| !l.is_empty()) {
        rows.push(serde_json::from_str(line)?);
    }
    Ok(rows)
}
