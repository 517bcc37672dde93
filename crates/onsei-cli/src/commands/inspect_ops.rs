use std::path::Path;

use onsei_core::accent;
use onsei_core::audio::{AudioFormat, AudioIndex, AudioResolver};
use onsei_core::export::Accent;
use onsei_core::mora::{self, DigraphTable};
use onsei_core::numeric;
use onsei_core::unicode::{is_kana, katakana_to_hiragana};

pub fn mora_cmd(text: &str) {
    let morae = mora::tokenize(text);
    println!("{}", morae.join(" | "));
    println!(
        "{} morae, kana: {}, hiragana: {}",
        morae.len(),
        is_kana(text),
        katakana_to_hiragana(text)
    );
}

/// Render one accent given as export JSON, e.g.
/// `{"accent": [{"pronunciation": "アメ", "silencedMora": [], "pitchAccent": "1"}]}`.
pub fn render_cmd(accent_json: &str) {
    let accent: Accent = die!(serde_json::from_str(accent_json), "Error parsing accent: {}");
    let display = accent::render(&accent, DigraphTable::standard());
    println!("{}", display.to_text());
    for (i, seg) in display.segments.iter().enumerate() {
        println!("  #{}: {} (pitch {})", i + 1, seg.text, seg.pitch);
    }
}

pub fn numeral_cmd(token: &str) {
    let forms = die!(numeric::expand_numeral(token), "Error: {}");
    println!("{}", forms.join(" | "));
}

pub fn resolve_cmd(media_dir: &str, file_name: &str) {
    let index = die!(
        AudioIndex::scan(Path::new(media_dir)),
        "Error scanning {media_dir}: {}"
    );
    let Some(relpath) = index.resolve(file_name) else {
        eprintln!("Not found: {file_name} ({} files indexed)", index.len());
        std::process::exit(1);
    };
    match AudioFormat::from_path(relpath) {
        Some(format) => println!("{relpath}\t{}", format.content_type()),
        None => println!("{relpath}\t(unsupported format)"),
    }
}
