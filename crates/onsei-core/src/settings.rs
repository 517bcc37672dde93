//! Where the NHK16 export is read from and where expanded rows are written.
//!
//! `[source]` names the media directory (relative to the add-on root) and the
//! export file inside it; `[output]` names the JSON Lines row file. The
//! defaults ship in `default_settings.toml`; a custom file passed with
//! `init_custom` replaces them for the whole process.

use std::path::{Component, Path};
use std::sync::OnceLock;

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub source: SourceSettings,
    pub output: OutputSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceSettings {
    /// Media directory, relative to the add-on root.
    pub media_dir: String,
    /// Export file name inside `media_dir`.
    pub entries_file: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputSettings {
    pub rows_file: String,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_non_empty {
        ($section:ident . $field:ident) => {
            if s.$section.$field.trim().is_empty() {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must not be empty".to_string(),
                });
            }
        };
    }

    check_non_empty!(source.media_dir);
    check_non_empty!(source.entries_file);
    check_non_empty!(output.rows_file);

    // The export must sit directly inside the media directory.
    let mut components = Path::new(&s.source.entries_file).components();
    let is_plain_name = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if !is_plain_name {
        return Err(SettingsError::InvalidValue {
            field: "source.entries_file".to_string(),
            reason: "must be a plain file name".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_default_toml() {
        let s = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
        assert_eq!(s.source.media_dir, "user_files/nhk16_files");
        assert_eq!(s.source.entries_file, "entries.json");
        assert_eq!(s.output.rows_file, "nhk16_rows.jsonl");
    }

    #[test]
    fn parse_valid_custom_toml() {
        let toml = r#"
[source]
media_dir = "media/nhk"
entries_file = "nhk.json"

[output]
rows_file = "out.jsonl"
"#;
        let s = parse_settings_toml(toml).unwrap();
        assert_eq!(s.source.media_dir, "media/nhk");
        assert_eq!(s.source.entries_file, "nhk.json");
        assert_eq!(s.output.rows_file, "out.jsonl");
    }

    #[test]
    fn error_empty_media_dir() {
        let toml = r#"
[source]
media_dir = "  "
entries_file = "entries.json"

[output]
rows_file = "out.jsonl"
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue { .. }));
        assert!(err.to_string().contains("source.media_dir"));
    }

    #[test]
    fn error_nested_entries_file() {
        let toml = r#"
[source]
media_dir = "media"
entries_file = "../entries.json"

[output]
rows_file = "out.jsonl"
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(err.to_string().contains("source.entries_file"));
    }

    #[test]
    fn error_invalid_toml() {
        let err = parse_settings_toml("not valid toml {{{").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn error_missing_section() {
        let toml = r#"
[source]
media_dir = "media"
entries_file = "entries.json"
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }
}
