//! Mora segmentation of kana pronunciations.
//!
//! A pronunciation is split greedily: at every position the longest digraph
//! from the [`DigraphTable`] that prefixes the remaining text becomes one
//! mora, otherwise a single character does.

use std::sync::OnceLock;

/// Digraphs are not necessarily two characters: キ゚ャ is three.
const STANDARD_DIGRAPHS: &[&str] = &[
    "りゃ", "みゃ", "ひゃ", "にゃ", "ちゃ", "しゃ", "きゃ", "りゅ", "みゅ", "ひゅ", "にゅ", "ちゅ",
    "しゅ", "きゅ", "りょ", "みょ", "ひょ", "にょ", "ちょ", "しょ", "きょ", "ぎゃ", "じゃ", "びゃ",
    "ぴゃ", "き゚ゃ", "ぎゅ", "じゅ", "びゅ", "ぴゅ", "き゚ゅ", "ぎょ", "じょ", "びょ", "ぴょ",
    "き゚ょ", "ヴぁ", "ふぁ", "ゔぃ", "うぃ", "ふぃ", "でぃ", "てぃ", "どぅ", "とぅ", "ゔぇ", "うぇ",
    "ふぇ", "ちぇ", "じぇ", "しぇ", "ゔぉ", "うぉ", "ふぉ", "リャ", "ミャ", "ヒャ", "ニャ", "チャ",
    "シャ", "キャ", "リュ", "ミュ", "ヒュ", "ニュ", "チュ", "シュ", "キュ", "リョ", "ミョ", "ヒョ",
    "ニョ", "チョ", "ショ", "キョ", "ギャ", "ジャ", "ビャ", "ピャ", "キ゚ャ", "ギュ", "ジュ", "ビュ",
    "ピュ", "キ゚ュ", "ギョ", "ジョ", "ビョ", "ピョ", "キ゚ョ", "ヴァ", "ファ", "ヴィ", "ウィ", "フィ",
    "ディ", "ティ", "ドゥ", "トゥ", "ヴェ", "ウェ", "フェ", "チェ", "ジェ", "シェ", "ヴォ", "ウォ",
    "フォ", "か゚", "き゚", "く゚", "け゚", "こ゚", "カ゚", "キ゚", "ク゚", "ケ゚", "コ゚",
];

#[derive(Debug, thiserror::Error)]
pub enum MoraError {
    #[error("digraph must span at least two characters: {0:?}")]
    TooShort(String),
}

/// Read-only set of multi-character sequences that count as a single mora.
#[derive(Debug, Clone)]
pub struct DigraphTable {
    /// Sorted longest-first so the first prefix hit is the longest match.
    digraphs: Vec<String>,
}

impl DigraphTable {
    /// Build a table from arbitrary digraphs. Order does not matter.
    pub fn new<I, S>(digraphs: I) -> Result<Self, MoraError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut digraphs: Vec<String> = digraphs.into_iter().map(Into::into).collect();
        if let Some(short) = digraphs.iter().find(|d| d.chars().count() < 2) {
            return Err(MoraError::TooShort(short.clone()));
        }
        digraphs.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        digraphs.dedup();
        Ok(Self { digraphs })
    }

    /// The built-in table used for the NHK16 export.
    pub fn standard() -> &'static DigraphTable {
        static INSTANCE: OnceLock<DigraphTable> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            DigraphTable::new(STANDARD_DIGRAPHS.iter().copied())
                .expect("standard digraph table must be valid")
        })
    }

    pub fn len(&self) -> usize {
        self.digraphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digraphs.is_empty()
    }

    /// Longest digraph that is a prefix of `s`.
    fn longest_prefix(&self, s: &str) -> Option<&str> {
        self.digraphs
            .iter()
            .find(|d| s.starts_with(d.as_str()))
            .map(String::as_str)
    }

    /// Split `pronunciation` into morae. Concatenating the result always
    /// reproduces the input.
    pub fn tokenize<'a>(&self, pronunciation: &'a str) -> Vec<&'a str> {
        let mut morae = Vec::new();
        let mut rest = pronunciation;
        while let Some(c) = rest.chars().next() {
            let len = self
                .longest_prefix(rest)
                .map_or_else(|| c.len_utf8(), str::len);
            let (mora, tail) = rest.split_at(len);
            morae.push(mora);
            rest = tail;
        }
        morae
    }
}

/// Tokenize with the standard table.
pub fn tokenize(pronunciation: &str) -> Vec<&str> {
    DigraphTable::standard().tokenize(pronunciation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn digraph_precedence() {
        assert_eq!(tokenize("きゃく"), vec!["きゃ", "く"]);
        assert_eq!(tokenize("トウキョウ"), vec!["ト", "ウ", "キョ", "ウ"]);
    }

    #[test]
    fn single_characters() {
        assert_eq!(tokenize("アメ"), vec!["ア", "メ"]);
        assert_eq!(tokenize("さっそく"), vec!["さ", "っ", "そ", "く"]);
        assert_eq!(tokenize("ラーメン"), vec!["ラ", "ー", "メ", "ン"]);
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn longest_match_for_nasal_digraphs() {
        // き゚ is itself a digraph, but き゚ゃ must win.
        assert_eq!(tokenize("き゚ゃく"), vec!["き゚ゃ", "く"]);
        assert_eq!(tokenize("カ゚ク゚"), vec!["カ゚", "ク゚"]);
        assert_eq!(tokenize("キ゚ョ"), vec!["キ゚ョ"]);
    }

    #[test]
    fn table_order_is_irrelevant() {
        let forward = DigraphTable::new(["き゚", "き゚ゃ"]).unwrap();
        let backward = DigraphTable::new(["き゚ゃ", "き゚"]).unwrap();
        assert_eq!(forward.tokenize("き゚ゃき゚"), vec!["き゚ゃ", "き゚"]);
        assert_eq!(backward.tokenize("き゚ゃき゚"), vec!["き゚ゃ", "き゚"]);
    }

    #[test]
    fn custom_table() {
        let table = DigraphTable::new(["ab"]).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.tokenize("abcab"), vec!["ab", "c", "ab"]);
    }

    #[test]
    fn rejects_single_character_digraph() {
        let err = DigraphTable::new(["あ"]).unwrap_err();
        assert!(matches!(err, MoraError::TooShort(_)));
    }

    #[test]
    fn standard_table_size() {
        assert_eq!(DigraphTable::standard().len(), STANDARD_DIGRAPHS.len());
    }

    proptest! {
        #[test]
        fn round_trip(s in "\\PC*") {
            prop_assert_eq!(tokenize(&s).concat(), s);
        }

        #[test]
        fn round_trip_kana(s in "[ぁ-ゖァ-ヺー゚]{0,16}") {
            let morae = tokenize(&s);
            prop_assert!(morae.iter().all(|m| !m.is_empty()));
            prop_assert_eq!(morae.concat(), s);
        }
    }
}
