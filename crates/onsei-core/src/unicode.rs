//! Character-level script classification and kana conversion.

/// Katakana alphabet, index-aligned with [`HIRAGANA_CHART`]. The nasal-mark
/// forms (カ゚ etc.) are spelled with the combining U+309A, so both charts map
/// it onto itself.
const KATAKANA_CHART: &str = "ァアィイゥウェエォオカガカ゚キギキ゚クグク゚ケゲケ゚コゴコ゚サザシジスズセゼソゾタダチヂッツヅテデトドナニヌネノハバパヒビピフブプヘベペホボポマミムメモャヤュユョヨラリルレロヮワヰヱヲンヴヵヶヽヾ";
const HIRAGANA_CHART: &str = "ぁあぃいぅうぇえぉおかがか゚きぎき゚くぐく゚けげけ゚こごこ゚さざしじすずせぜそぞただちぢっつづてでとどなにぬねのはばぱひびぴふぶぷへべぺほぼぽまみむめもゃやゅゆょよらりるれろゎわゐゑをんゔゕゖゝゞ";

/// First and last code points accepted by [`is_kana`]: ぁ (U+3041) through
/// ヾ (U+30FE). Covers both kana blocks minus ヿ and the block edges.
const KANA_FIRST: char = '\u{3041}';
const KANA_LAST: char = '\u{30FE}';

pub fn is_kana_char(c: char) -> bool {
    (KANA_FIRST..=KANA_LAST).contains(&c)
}

/// True when every character of `text` is kana. The empty string counts as kana.
pub fn is_kana(text: &str) -> bool {
    text.chars().all(is_kana_char)
}

fn translate(s: &str, from: &str, to: &str) -> String {
    s.chars()
        .map(|c| {
            from.chars()
                .zip(to.chars())
                .find_map(|(f, t)| (f == c).then_some(t))
                .unwrap_or(c)
        })
        .collect()
}

/// Convert katakana to hiragana. Characters outside the chart (ー, kanji,
/// ASCII, etc.) are passed through unchanged.
pub fn katakana_to_hiragana(s: &str) -> String {
    translate(s, KATAKANA_CHART, HIRAGANA_CHART)
}

/// Convert hiragana to katakana. Inverse of [`katakana_to_hiragana`].
pub fn hiragana_to_katakana(s: &str) -> String {
    translate(s, HIRAGANA_CHART, KATAKANA_CHART)
}
