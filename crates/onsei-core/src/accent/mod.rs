//! Pitch-accent display rendering.
//!
//! An accent renders as `<footnote><seg1>・<seg2>… [<p1>・<p2>…]`, e.g.
//! `ア＼メ [1]`. Silenced (devoiced) morae are shown in hiragana, which is the
//! only way to set them apart from voiced katakana morae in the lookup UI.


use std::borrow::Cow;

use tracing::debug;

use crate::export::{Accent, WordSegment};
use crate::mora::DigraphTable;
use crate::unicode::katakana_to_hiragana;

/// Glyph inserted after the mora where pitch drops.
pub const DOWNSTEP_MARKER: &str = "＼";
/// Separator between word segments and between pitch numbers.
pub const SEGMENT_SEPARATOR: &str = "・";

/// Segment that only carries the opening half of the 温度・角度 footnote.
const TEMPERATURE_SEGMENT: &str = "（温度";

/// Grammatical footnote shown once in front of the whole accent.
///
/// The export encodes the footnote inside the pronunciation of the segment it
/// applies to, and that segment's pitch is shifted by the footnote's mora count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Footnote {
    TemperatureAngle,
    Count,
}

impl Footnote {
    fn marker(self) -> &'static str {
        match self {
            Footnote::TemperatureAngle => "角度）",
            Footnote::Count => "（回数）",
        }
    }

    pub fn prefix(self) -> &'static str {
        match self {
            Footnote::TemperatureAngle => "（温度・角度）",
            Footnote::Count => "（回数）",
        }
    }

    pub fn pitch_offset(self) -> i32 {
        match self {
            Footnote::TemperatureAngle => -3,
            Footnote::Count => -4,
        }
    }

    /// Detect a footnote marker and return the pronunciation without it.
    fn strip(pronunciation: &str) -> Option<(Footnote, &str)> {
        [Footnote::TemperatureAngle, Footnote::Count]
            .into_iter()
            .find_map(|f| pronunciation.strip_prefix(f.marker()).map(|rest| (f, rest)))
    }
}

/// One rendered word segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSegment {
    pub text: String,
    pub pitch: i32,
}

/// Rendered display of a whole accent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccentDisplay {
    pub footnote: Option<Footnote>,
    pub segments: Vec<RenderedSegment>,
}

impl AccentDisplay {
    pub fn pitches(&self) -> impl Iterator<Item = i32> + '_ {
        self.segments.iter().map(|s| s.pitch)
    }

    pub fn to_text(&self) -> String {
        let prefix = self.footnote.map_or("", Footnote::prefix);
        let words: Vec<&str> = self.segments.iter().map(|s| s.text.as_str()).collect();
        let pitches: Vec<String> = self.pitches().map(|p| p.to_string()).collect();
        format!(
            "{prefix}{} [{}]",
            words.join(SEGMENT_SEPARATOR),
            pitches.join(SEGMENT_SEPARATOR)
        )
    }
}

/// Pitch after applying a footnote offset. An offset that would push the value
/// to -1 or below is ignored and the raw pitch is kept.
pub fn effective_pitch(pitch: i32, offset: i32) -> i32 {
    let corrected = pitch + offset;
    if corrected > -1 {
        corrected
    } else {
        pitch
    }
}

/// Morae of `pronunciation` with silenced morae converted to hiragana.
/// Indices are 1-based; anything outside `1..=mora count` is skipped.
pub fn mark_silenced<'a>(
    pronunciation: &'a str,
    silenced: &[i64],
    digraphs: &DigraphTable,
) -> Vec<Cow<'a, str>> {
    let mut morae: Vec<Cow<'a, str>> = digraphs
        .tokenize(pronunciation)
        .into_iter()
        .map(Cow::Borrowed)
        .collect();
    for &index in silenced {
        // 0 and negative indices are out of range; they never wrap to the end.
        let slot = usize::try_from(index).ok().and_then(|i| i.checked_sub(1));
        let Some(mora) = slot.and_then(|i| morae.get_mut(i)) else {
            debug!(pronunciation, index, "silenced mora out of range");
            continue;
        };
        *mora = Cow::Owned(katakana_to_hiragana(mora.as_ref()));
    }
    morae
}

/// Insert the downstep marker after mora `pitch`. Non-positive pitches leave
/// the morae untouched; a pitch past the end appends the marker.
pub fn insert_downstep(morae: &mut Vec<Cow<'_, str>>, pitch: i32) {
    if pitch <= 0 {
        return;
    }
    let at = (pitch as usize).min(morae.len());
    morae.insert(at, Cow::Borrowed(DOWNSTEP_MARKER));
}

fn render_segment(
    pronunciation: &str,
    segment: &WordSegment,
    offset: i32,
    digraphs: &DigraphTable,
) -> RenderedSegment {
    let mut morae = mark_silenced(pronunciation, &segment.silenced_mora, digraphs);
    let pitch = effective_pitch(segment.pitch_accent, offset);
    insert_downstep(&mut morae, pitch);
    RenderedSegment {
        text: morae.concat(),
        pitch,
    }
}

/// Render an accent into its structured display.
pub fn render(accent: &Accent, digraphs: &DigraphTable) -> AccentDisplay {
    let mut footnote = None;
    let mut segments = Vec::with_capacity(accent.accent.len());

    for segment in &accent.accent {
        let pronunciation = segment.pronunciation.as_str();
        if pronunciation == TEMPERATURE_SEGMENT {
            continue;
        }
        let (offset, pronunciation) = match Footnote::strip(pronunciation) {
            Some((f, rest)) => {
                footnote = Some(f);
                (f.pitch_offset(), rest)
            }
            None => (0, pronunciation),
        };
        segments.push(render_segment(pronunciation, segment, offset, digraphs));
    }

    AccentDisplay { footnote, segments }
}

/// Render an accent straight to its display text.
pub fn display_text(accent: &Accent, digraphs: &DigraphTable) -> String {
    render(accent, digraphs).to_text()
}
