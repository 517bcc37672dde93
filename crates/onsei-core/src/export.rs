//! Typed records of the NHK16 JSON export.
//!
//! File format: a single JSON array of entries:
//!
//! ```json
//! [{"kana": "あめ", "kanji": ["雨"], "kanjiNotUsed": [],
//!   "accents": [{"accent": [{"pronunciation": "アメ", "silencedMora": [],
//!                            "pitchAccent": "1"}],
//!                "soundFile": "20170616125910.aac"}],
//!   "subentries": []}]
//! ```

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Deserializer};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Root dictionary record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Reading of the headword.
    pub kana: String,
    /// Primary headwords; each string may hold several forms separated by `，`.
    #[serde(default)]
    pub kanji: Vec<String>,
    /// Headword fragments that disqualify a primary headword containing them.
    #[serde(default)]
    pub kanji_not_used: Vec<String>,
    #[serde(default)]
    pub accents: Vec<Accent>,
    #[serde(default)]
    pub subentries: Vec<Subentry>,
}

/// One way of pronouncing an entry, with its recording.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accent {
    pub accent: Vec<WordSegment>,
    #[serde(default)]
    pub sound_file: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordSegment {
    pub pronunciation: String,
    /// 1-based mora indices pronounced devoiced. The export holds some that
    /// are zero, negative or past the last mora; rendering skips those.
    #[serde(default)]
    pub silenced_mora: Vec<i64>,
    /// Downstep position; 0 means no drop.
    #[serde(deserialize_with = "int_or_string")]
    pub pitch_accent: i32,
}

/// Nested variant under an entry: an alternate headword, or a numeral used
/// with the entry's counter.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Subentry {
    Headword {
        head: String,
        #[serde(default)]
        accents: Vec<Accent>,
    },
    Numeral {
        #[serde(deserialize_with = "string_or_int")]
        number: String,
        #[serde(default)]
        accents: Vec<Accent>,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrString {
    Int(i64),
    Str(String),
}

fn int_or_string<'de, D: Deserializer<'de>>(d: D) -> Result<i32, D::Error> {
    use serde::de::Error;
    let n = match IntOrString::deserialize(d)? {
        IntOrString::Int(n) => n,
        IntOrString::Str(s) => s
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("expected integer, got {s:?}")))?,
    };
    i32::try_from(n).map_err(|_| D::Error::custom(format!("integer out of range: {n}")))
}

fn string_or_int<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match IntOrString::deserialize(d)? {
        IntOrString::Int(n) => n.to_string(),
        IntOrString::Str(s) => s,
    })
}

/// Parse an export from JSON text.
pub fn parse_entries(json: &str) -> Result<Vec<Entry>, ExportError> {
    Ok(serde_json::from_str(json)?)
}

/// Read and parse an export file. Invalid UTF-8 sequences are replaced rather
/// than rejected.
pub fn load_entries(path: &Path) -> Result<Vec<Entry>, ExportError> {
    let bytes = fs::read(path)?;
    parse_entries(&String::from_utf8_lossy(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
      {
        "kana": "ほん",
        "kanji": ["本"],
        "kanjiNotUsed": [],
        "accents": [
          {"accent": [{"pronunciation": "ホン", "silencedMora": [], "pitchAccent": "1"}],
           "soundFile": "hon.aac"}
        ],
        "subentries": [
          {"head": "本屋", "accents": []},
          {"number": "3", "accents": [
            {"accent": [{"pronunciation": "サンボン", "silencedMora": [], "pitchAccent": 1}],
             "soundFile": null}
          ]},
          {"number": 10, "accents": []}
        ]
      },
      {"kana": "いち", "accents": []}
    ]"#;

    #[test]
    fn parse_sample() {
        let entries = parse_entries(SAMPLE).unwrap();
        assert_eq!(entries.len(), 2);

        let hon = &entries[0];
        assert_eq!(hon.kana, "ほん");
        assert_eq!(hon.kanji, vec!["本"]);
        assert_eq!(hon.accents[0].sound_file.as_deref(), Some("hon.aac"));
        assert_eq!(hon.accents[0].accent[0].pitch_accent, 1);

        assert!(matches!(&hon.subentries[0], Subentry::Headword { head, .. } if head == "本屋"));
        match &hon.subentries[1] {
            Subentry::Numeral { number, accents } => {
                assert_eq!(number, "3");
                assert_eq!(accents[0].accent[0].pitch_accent, 1);
                assert!(accents[0].sound_file.is_none());
            }
            other => panic!("expected numeral subentry, got {other:?}"),
        }
        assert!(matches!(&hon.subentries[2], Subentry::Numeral { number, .. } if number == "10"));
    }

    #[test]
    fn missing_lists_default_to_empty() {
        let entries = parse_entries(SAMPLE).unwrap();
        let ichi = &entries[1];
        assert!(ichi.kanji.is_empty());
        assert!(ichi.kanji_not_used.is_empty());
        assert!(ichi.subentries.is_empty());
    }

    #[test]
    fn rejects_non_integer_pitch() {
        let json = r#"[{"kana": "あ", "accents": [{"accent":
            [{"pronunciation": "ア", "silencedMora": [], "pitchAccent": "x"}]}]}]"#;
        assert!(matches!(parse_entries(json), Err(ExportError::Json(_))));
    }

    #[test]
    fn negative_silenced_index_loads() {
        let json = r#"[
          {"kana": "かき", "accents": [{"accent":
            [{"pronunciation": "カキ", "silencedMora": [-1], "pitchAccent": "0"}]}]},
          {"kana": "あめ", "accents": [{"accent":
            [{"pronunciation": "アメ", "silencedMora": [], "pitchAccent": "1"}]}]}
        ]"#;
        let entries = parse_entries(json).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].accents[0].accent[0].silenced_mora, vec![-1]);
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entries.json");
        fs::write(&path, SAMPLE).unwrap();
        assert_eq!(load_entries(&path).unwrap().len(), 2);
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_entries(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ExportError::Io(_)));
    }
}
