use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use onsei_core::settings::Settings;
use onsei_core::sink::{JsonlSink, RowSink};
use onsei_core::source::{self, SourceReport};

pub struct BuildOptions<'a> {
    pub source: &'a str,
    pub root: &'a Path,
    /// Overrides `source.media_dir`.
    pub media_dir: Option<&'a str>,
    /// Overrides `output.rows_file`.
    pub output: Option<&'a str>,
}

/// Expand the source export and write all rows as JSON Lines.
pub fn build(settings: &Settings, opts: &BuildOptions) {
    let mut settings = settings.clone();
    if let Some(media_dir) = opts.media_dir {
        settings.source.media_dir = media_dir.to_string();
    }
    let output: PathBuf = opts
        .output
        .map(PathBuf::from)
        .unwrap_or_else(|| opts.root.join(&settings.output.rows_file));

    let audio_source = source::from_name(opts.source, opts.root, &settings).unwrap_or_else(|| {
        eprintln!("Error: unknown source '{}' (available: nhk16)", opts.source);
        process::exit(1);
    });

    eprintln!("Source: {}", audio_source.id());
    let mut sink = die!(JsonlSink::create(&output), "Error creating output: {}");
    let report = match audio_source.add_entries(&mut sink) {
        Ok(report) => report,
        Err(e) => {
            drop(sink); // removes the partial output
            eprintln!("Error expanding entries: {e}");
            process::exit(1);
        }
    };
    print_report(audio_source.id(), &report);
    die!(sink.commit(), "Error writing {}: {}", sink.path().display());

    let file_size = fs::metadata(sink.path()).map(|m| m.len()).unwrap_or(0);
    eprintln!(
        "Wrote {} ({} rows, {:.1} KB)",
        sink.path().display(),
        sink.rows(),
        file_size as f64 / 1024.0
    );
}

fn print_report(id: &str, report: &SourceReport) {
    if let Some(path) = &report.missing_export {
        eprintln!("({id}) Cannot find entries file: {}", path.display());
        return;
    }
    eprintln!(
        "({id}) {} entries expanded into {} rows",
        report.entries, report.rows
    );
}
