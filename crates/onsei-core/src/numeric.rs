//! Numeral tokens of counter sub-entries → surface forms.
//!
//! A counter sub-entry such as `{"number": "5"}` under 本 is looked up as both
//! ５本 and 五本, so every numeral expands to its full-width digit form and its
//! kanji numeral form.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Token the export uses for the counter question word (何本, 何回, ...).
pub const QUESTION_TOKEN: &str = "何［ナン］";
const QUESTION_FORM: &str = "何";

/// Counts above this only get the kanji form.
const FULLWIDTH_LIMIT: i64 = 100;

const DIGITS: [&str; 10] = ["零", "一", "二", "三", "四", "五", "六", "七", "八", "九"];

#[derive(Debug, thiserror::Error)]
pub enum NumeralError {
    #[error("numeral token is not an integer: {0:?}")]
    NotANumber(String),
    #[error("no kanji numeral for {0}")]
    Missing(i64),
}

/// Fixed integer → kanji numeral map.
#[derive(Debug, Clone)]
pub struct NumeralTable {
    forms: HashMap<i64, String>,
}

impl NumeralTable {
    pub fn new(forms: HashMap<i64, String>) -> Self {
        Self { forms }
    }

    /// 0–100, 1000 and 10000.
    pub fn standard() -> &'static NumeralTable {
        static INSTANCE: OnceLock<NumeralTable> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            let forms = (0..=100u64)
                .chain([1_000, 10_000])
                .map(|n| (n as i64, kanji_numeral(n)))
                .collect();
            NumeralTable { forms }
        })
    }

    pub fn get(&self, n: i64) -> Option<&str> {
        self.forms.get(&n).map(String::as_str)
    }

    /// Expand a numeral token into its surface forms.
    ///
    /// - the question token → `["何"]`
    /// - `n <= 100` → `[full-width digits, kanji]`, both required
    /// - `n > 100` → `[kanji]`, composed when the table has no entry
    pub fn expand(&self, token: &str) -> Result<Vec<String>, NumeralError> {
        if token == QUESTION_TOKEN {
            return Ok(vec![QUESTION_FORM.to_string()]);
        }
        let n: i64 = token
            .trim()
            .parse()
            .map_err(|_| NumeralError::NotANumber(token.to_string()))?;

        if n > FULLWIDTH_LIMIT {
            let kanji = match self.get(n) {
                Some(form) => form.to_string(),
                None => kanji_numeral(n as u64),
            };
            return Ok(vec![kanji]);
        }

        let kanji = self.get(n).ok_or(NumeralError::Missing(n))?;
        Ok(vec![to_fullwidth(token.trim()), kanji.to_string()])
    }
}

/// Expand with the standard table.
pub fn expand_numeral(token: &str) -> Result<Vec<String>, NumeralError> {
    NumeralTable::standard().expand(token)
}

/// Replace ASCII digits with their full-width forms; everything else is kept.
pub fn to_fullwidth(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii_digit() {
                char::from_u32(c as u32 - '0' as u32 + '０' as u32).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

/// Format a number as a kanji numeral (百五十, 二千十, 一万).
///
/// Inside a 万 group a leading one is dropped before 千, 百 and 十; the group
/// itself keeps it (一万, not 万).
pub fn kanji_numeral(n: u64) -> String {
    if n == 0 {
        return DIGITS[0].to_string();
    }

    let mut out = String::new();
    let mut groups = Vec::new();
    let mut rest = n;
    while rest > 0 {
        groups.push(rest % 10_000);
        rest /= 10_000;
    }

    const LARGE_UNITS: [&str; 5] = ["", "万", "億", "兆", "京"];
    for (i, &group) in groups.iter().enumerate().rev() {
        if group == 0 {
            continue;
        }
        out.push_str(&format_group(group));
        out.push_str(LARGE_UNITS[i]);
    }
    out
}

/// Format a value below 10000 without a leading 一 before a unit.
fn format_group(n: u64) -> String {
    let mut out = String::new();
    for (unit_val, unit) in [(1000, "千"), (100, "百"), (10, "十")] {
        let d = (n / unit_val) % 10;
        if d == 0 {
            continue;
        }
        if d > 1 {
            out.push_str(DIGITS[d as usize]);
        }
        out.push_str(unit);
    }
    let ones = n % 10;
    if ones > 0 {
        out.push_str(DIGITS[ones as usize]);
    }
    out
}
