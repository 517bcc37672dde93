//! Audio sources that feed rows into a shared sink.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::audio::AudioIndex;
use crate::expand::{EntryExpander, ExpandError, OutputRow, SOURCE_ID};
use crate::export::{self, ExportError};
use crate::settings::Settings;
use crate::sink::{RowSink, SinkError};

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("export error: {0}")]
    Export(#[from] ExportError),

    #[error("audio scan of {path}: {source}")]
    AudioScan {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Expand(#[from] ExpandError),

    #[error("sink error: {0}")]
    Sink(#[from] SinkError),
}

/// Outcome of feeding one source into a sink.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceReport {
    pub entries: usize,
    pub rows: usize,
    /// Set when the export file was not found and the source added nothing.
    pub missing_export: Option<PathBuf>,
}

/// A data source of the audio lookup add-on.
pub trait AudioSource {
    /// Tag stored in the `source` column of every row.
    fn id(&self) -> &str;

    /// Expand the source's export into `sink`. Does not commit.
    fn add_entries(&self, sink: &mut dyn RowSink) -> Result<SourceReport, SourceError>;

    /// Label shown to the user for a row of this source.
    fn display_name(&self, row: &OutputRow) -> String;
}

/// NHK 日本語発音アクセント新辞典 (2016) export plus recordings.
pub struct Nhk16Source {
    media_dir: PathBuf,
    entries_file: String,
}

impl Nhk16Source {
    pub fn new(media_dir: impl Into<PathBuf>, entries_file: impl Into<String>) -> Self {
        Self {
            media_dir: media_dir.into(),
            entries_file: entries_file.into(),
        }
    }

    /// Resolve the configured media directory against the add-on `root`.
    pub fn from_settings(root: &Path, settings: &Settings) -> Self {
        Self::new(
            root.join(&settings.source.media_dir),
            settings.source.entries_file.as_str(),
        )
    }

    pub fn entries_path(&self) -> PathBuf {
        self.media_dir.join(&self.entries_file)
    }
}

impl AudioSource for Nhk16Source {
    fn id(&self) -> &str {
        SOURCE_ID
    }

    fn add_entries(&self, sink: &mut dyn RowSink) -> Result<SourceReport, SourceError> {
        let entries_path = self.entries_path();
        if !entries_path.is_file() {
            warn!(path = %entries_path.display(), "cannot find entries file");
            return Ok(SourceReport {
                missing_export: Some(entries_path),
                ..SourceReport::default()
            });
        }

        let entries = export::load_entries(&entries_path)?;
        let index = AudioIndex::scan(&self.media_dir).map_err(|source| SourceError::AudioScan {
            path: self.media_dir.clone(),
            source,
        })?;
        info!(
            entries = entries.len(),
            audio_files = index.len(),
            "expanding nhk16 export"
        );

        let expander = EntryExpander::standard(&index);
        let mut report = SourceReport {
            entries: entries.len(),
            ..SourceReport::default()
        };
        for entry in &entries {
            for row in expander.expand(entry)? {
                sink.insert(row)?;
                report.rows += 1;
            }
        }

        info!(rows = report.rows, "nhk16 rows added");
        Ok(report)
    }

    fn display_name(&self, row: &OutputRow) -> String {
        format!("NHK16 {}", row.display)
    }
}

/// Create an `AudioSource` by id. Returns `None` for unknown ids.
pub fn from_name(id: &str, root: &Path, settings: &Settings) -> Option<Box<dyn AudioSource>> {
    match id {
        SOURCE_ID => Some(Box::new(Nhk16Source::from_settings(root, settings))),
        _ => None,
    }
}
