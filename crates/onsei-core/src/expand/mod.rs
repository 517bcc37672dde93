//! Expansion of one export entry into lookup rows.
//!
//! An entry yields one row per (resolved accent × headword). Headword
//! sub-entries add rows keyed on their own head, numeral sub-entries add rows
//! for every numeral form combined with the entry's counter.


use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span};

use crate::accent;
use crate::audio::AudioResolver;
use crate::export::{Accent, Entry, Subentry};
use crate::mora::DigraphTable;
use crate::numeric::{NumeralError, NumeralTable};
use crate::unicode::is_kana;

/// Source tag carried by every row from this data source.
pub const SOURCE_ID: &str = "nhk16";

/// Separator between alternative headwords inside one `kanji` / `head` string.
const HEADWORD_DELIMITER: char = '，';
/// Separator between counter words inside the `kanji` of a numeral entry.
const COUNTER_DELIMITER: char = '・';
/// Reading used by the bare-number entry; it contributes no suffix.
const INTEGER_PLACEHOLDER: &str = "整数";

/// One lookup row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRow {
    pub expression: String,
    pub reading: Option<String>,
    pub source: String,
    pub display: String,
    /// Audio path relative to the media directory.
    pub file: String,
}

impl OutputRow {
    fn new(expression: &str, reading: Option<&str>, display: &str, file: &str) -> Self {
        Self {
            expression: expression.to_string(),
            reading: reading.map(str::to_string),
            source: SOURCE_ID.to_string(),
            display: display.to_string(),
            file: file.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExpandError {
    #[error("entry {reading:?}: {source}")]
    Numeral {
        reading: String,
        #[source]
        source: NumeralError,
    },
}

/// Split every string on `delimiter`, trim, and drop empty pieces.
pub fn parse_headwords<S: AsRef<str>>(raw: &[S], delimiter: char) -> Vec<String> {
    raw.iter()
        .flat_map(|s| s.as_ref().split(delimiter))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Drop every candidate that contains one of the disqualifying fragments.
pub fn filter_optional_kanji(candidates: Vec<String>, disqualifying: &[String]) -> Vec<String> {
    let mut candidates = candidates;
    candidates.retain(|c| !disqualifying.iter().any(|d| c.contains(d.as_str())));
    candidates
}

/// Expands entries against a fixed digraph table, numeral table and audio
/// index. Holds no state between entries.
pub struct EntryExpander<'a, R: AudioResolver + ?Sized> {
    resolver: &'a R,
    digraphs: &'a DigraphTable,
    numerals: &'a NumeralTable,
}

impl<'a, R: AudioResolver + ?Sized> EntryExpander<'a, R> {
    pub fn new(resolver: &'a R, digraphs: &'a DigraphTable, numerals: &'a NumeralTable) -> Self {
        Self {
            resolver,
            digraphs,
            numerals,
        }
    }

    /// Expander using the standard digraph and numeral tables.
    pub fn standard(resolver: &'a R) -> Self {
        Self::new(resolver, DigraphTable::standard(), NumeralTable::standard())
    }

    /// Accents with a resolvable recording, paired with (display, audio path).
    fn resolved<'e>(
        &'e self,
        accents: &'e [Accent],
    ) -> impl Iterator<Item = (String, &'a str)> + 'e {
        let resolver: &'a R = self.resolver;
        let digraphs: &'a DigraphTable = self.digraphs;
        accents.iter().filter_map(move |accent| {
            let Some(file) = accent
                .sound_file
                .as_deref()
                .and_then(|f| resolver.resolve(f))
            else {
                debug!(sound_file = ?accent.sound_file, "accent skipped: audio not found");
                return None;
            };
            Some((accent::display_text(accent, digraphs), file))
        })
    }

    /// Expand one entry. Row order follows the export: main accents first,
    /// then sub-entries in order.
    pub fn expand(&self, entry: &Entry) -> Result<Vec<OutputRow>, ExpandError> {
        let _span = debug_span!("expand", reading = %entry.kana).entered();
        let mut rows = Vec::new();
        let reading = entry.kana.as_str();

        let expressions = filter_optional_kanji(
            parse_headwords(&entry.kanji, HEADWORD_DELIMITER),
            &parse_headwords(&entry.kanji_not_used, HEADWORD_DELIMITER),
        );

        for (display, file) in self.resolved(&entry.accents) {
            if expressions.is_empty() {
                rows.push(OutputRow::new(reading, Some(reading), &display, file));
            }
            for expression in &expressions {
                rows.push(OutputRow::new(expression, Some(reading), &display, file));
            }
        }

        for subentry in &entry.subentries {
            match subentry {
                Subentry::Headword { head, accents } => {
                    self.expand_headword(head, accents, &mut rows);
                }
                Subentry::Numeral { number, accents } => {
                    self.expand_numeral(entry, number, accents, &mut rows)?;
                }
            }
        }

        debug!(rows = rows.len());
        Ok(rows)
    }

    fn expand_headword(&self, head: &str, accents: &[Accent], rows: &mut Vec<OutputRow>) {
        let heads = parse_headwords(&[head], HEADWORD_DELIMITER);
        for (display, file) in self.resolved(accents) {
            for head in &heads {
                let reading = is_kana(head).then_some(head.as_str());
                rows.push(OutputRow::new(head, reading, &display, file));
            }
        }
    }

    fn expand_numeral(
        &self,
        entry: &Entry,
        number: &str,
        accents: &[Accent],
        rows: &mut Vec<OutputRow>,
    ) -> Result<(), ExpandError> {
        let counters = parse_headwords(&entry.kanji, COUNTER_DELIMITER);
        let numbers = self
            .numerals
            .expand(number)
            .map_err(|source| ExpandError::Numeral {
                reading: entry.kana.clone(),
                source,
            })?;
        let reading = if entry.kana == INTEGER_PLACEHOLDER {
            ""
        } else {
            entry.kana.as_str()
        };

        for (display, file) in self.resolved(accents) {
            if counters.is_empty() {
                for n in &numbers {
                    rows.push(OutputRow::new(&format!("{n}{reading}"), None, &display, file));
                }
            }
            for counter in &counters {
                for n in &numbers {
                    rows.push(OutputRow::new(&format!("{n}{counter}"), None, &display, file));
                }
            }
        }
        Ok(())
    }
}
