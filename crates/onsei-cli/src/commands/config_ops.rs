use std::fs;

use onsei_core::settings::{self, Settings};

pub fn settings_export() {
    print!("{}", settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(settings::parse_settings_toml(&content), "Error: {}");
    println!(
        "OK: source.media_dir={}, source.entries_file={}, output.rows_file={}",
        s.source.media_dir, s.source.entries_file, s.output.rows_file
    );
}

/// Install a custom settings file (if any) and return the active settings.
pub fn load_settings(file: Option<&str>) -> &'static Settings {
    if let Some(file) = file {
        let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
        die!(settings::init_custom(content), "Error in {file}: {}");
    }
    settings::settings()
}
