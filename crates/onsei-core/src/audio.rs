//! Audio file lookup for the media directory.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

/// Maps an audio file name from the export to a path relative to the media
/// directory.
pub trait AudioResolver {
    fn resolve(&self, file_name: &str) -> Option<&str>;
}

/// File name → relative path index built from a directory scan.
#[derive(Debug, Default, Clone)]
pub struct AudioIndex {
    paths: HashMap<String, String>,
}

impl AudioIndex {
    /// Walk `root` recursively. Directory entries are visited in name order and
    /// a file name seen twice keeps the path visited last.
    pub fn scan(root: &Path) -> io::Result<Self> {
        let mut index = Self::default();
        index.scan_dir(root, "")?;
        Ok(index)
    }

    fn scan_dir(&mut self, dir: &Path, prefix: &str) -> io::Result<()> {
        let mut entries: Vec<fs::DirEntry> = fs::read_dir(dir)?.collect::<Result<_, _>>()?;
        entries.sort_by_key(|e| e.file_name());

        for entry in entries {
            let name = entry.file_name().to_string_lossy().into_owned();
            let relpath = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{prefix}/{name}")
            };
            if entry.file_type()?.is_dir() {
                self.scan_dir(&entry.path(), &relpath)?;
            } else {
                self.paths.insert(name, relpath);
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl<N: Into<String>, P: Into<String>> FromIterator<(N, P)> for AudioIndex {
    fn from_iter<I: IntoIterator<Item = (N, P)>>(iter: I) -> Self {
        Self {
            paths: iter
                .into_iter()
                .map(|(n, p)| (n.into(), p.into()))
                .collect(),
        }
    }
}

impl AudioResolver for AudioIndex {
    fn resolve(&self, file_name: &str) -> Option<&str> {
        self.paths.get(file_name).map(String::as_str)
    }
}

/// Audio container formats the lookup server can stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Mp3,
    Aac,
}

impl AudioFormat {
    pub fn from_path(path: &str) -> Option<Self> {
        let ext = Path::new(path).extension()?.to_str()?;
        match ext.to_ascii_lowercase().as_str() {
            "mp3" => Some(AudioFormat::Mp3),
            "aac" => Some(AudioFormat::Aac),
            _ => None,
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "audio/mpeg",
            AudioFormat::Aac => "audio/aac",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_nested_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("audio/a")).unwrap();
        fs::write(dir.path().join("entries.json"), "[]").unwrap();
        fs::write(dir.path().join("audio/a/x.aac"), b"").unwrap();
        fs::write(dir.path().join("audio/y.mp3"), b"").unwrap();

        let index = AudioIndex::scan(dir.path()).unwrap();
        assert_eq!(index.len(), 3);
        assert_eq!(index.resolve("x.aac"), Some("audio/a/x.aac"));
        assert_eq!(index.resolve("y.mp3"), Some("audio/y.mp3"));
        assert_eq!(index.resolve("entries.json"), Some("entries.json"));
        assert_eq!(index.resolve("z.aac"), None);
    }

    #[test]
    fn collision_keeps_last_visited() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a")).unwrap();
        fs::create_dir_all(dir.path().join("b")).unwrap();
        fs::write(dir.path().join("a/same.aac"), b"").unwrap();
        fs::write(dir.path().join("b/same.aac"), b"").unwrap();

        let index = AudioIndex::scan(dir.path()).unwrap();
        assert_eq!(index.resolve("same.aac"), Some("b/same.aac"));
    }

    #[test]
    fn scan_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AudioIndex::scan(&dir.path().join("missing")).is_err());
    }

    #[test]
    fn from_pairs() {
        let index: AudioIndex = [("a.aac", "x/a.aac")].into_iter().collect();
        assert_eq!(index.resolve("a.aac"), Some("x/a.aac"));
        assert!(!index.is_empty());
    }

    #[test]
    fn audio_formats() {
        assert_eq!(AudioFormat::from_path("x/a.mp3"), Some(AudioFormat::Mp3));
        assert_eq!(AudioFormat::from_path("a.AAC"), Some(AudioFormat::Aac));
        assert_eq!(AudioFormat::from_path("a.wav"), None);
        assert_eq!(AudioFormat::from_path("noext"), None);
        assert_eq!(AudioFormat::Mp3.content_type(), "audio/mpeg");
        assert_eq!(AudioFormat::Aac.content_type(), "audio/aac");
    }
}
