use criterion::{black_box, criterion_group, criterion_main, Criterion};

use onsei_core::accent;
use onsei_core::audio::AudioIndex;
use onsei_core::expand::EntryExpander;
use onsei_core::export::{parse_entries, Entry};
use onsei_core::mora::{self, DigraphTable};

const ENTRY_JSON: &str = r#"[{
  "kana": "ほん", "kanji": ["本，冊"], "kanjiNotUsed": ["冊"],
  "accents": [
    {"accent": [{"pronunciation": "ホン", "silencedMora": [], "pitchAccent": "1"}], "soundFile": "hon.aac"},
    {"accent": [{"pronunciation": "（回数）ニホン", "silencedMora": [2], "pitchAccent": "5"}], "soundFile": "hon2.aac"}
  ],
  "subentries": [
    {"head": "本屋，ほんや", "accents": [
      {"accent": [{"pronunciation": "ホンヤ", "silencedMora": [], "pitchAccent": "1"}], "soundFile": "honya.aac"}]},
    {"number": "3", "accents": [
      {"accent": [{"pronunciation": "サンボン", "silencedMora": [], "pitchAccent": "1"}], "soundFile": "hon3.aac"}]},
    {"number": "150", "accents": [
      {"accent": [{"pronunciation": "ヒャクゴジュッポン", "silencedMora": [1], "pitchAccent": "4"}], "soundFile": "hon150.aac"}]}
  ]
}]"#;

fn sample_entry() -> Entry {
    parse_entries(ENTRY_JSON)
        .expect("bench entry must parse")
        .remove(0)
}

fn bench_tokenize(c: &mut Criterion) {
    c.bench_function("tokenize", |b| {
        b.iter(|| mora::tokenize(black_box("ショウキャクヒャクゴジュッポンキ゚ョウ")))
    });
}

fn bench_render(c: &mut Criterion) {
    let entry = sample_entry();
    let digraphs = DigraphTable::standard();
    c.bench_function("render_accent", |b| {
        b.iter(|| accent::display_text(black_box(&entry.accents[1]), digraphs))
    });
}

fn bench_expand(c: &mut Criterion) {
    let entry = sample_entry();
    let index: AudioIndex = [
        ("hon.aac", "a/hon.aac"),
        ("hon2.aac", "a/hon2.aac"),
        ("honya.aac", "a/honya.aac"),
        ("hon3.aac", "a/hon3.aac"),
        ("hon150.aac", "a/hon150.aac"),
    ]
    .into_iter()
    .collect();
    let expander = EntryExpander::standard(&index);
    c.bench_function("expand_entry", |b| {
        b.iter(|| expander.expand(black_box(&entry)).expect("bench entry must expand"))
    });
}

criterion_group!(benches, bench_tokenize, bench_render, bench_expand);
criterion_main!(benches);
