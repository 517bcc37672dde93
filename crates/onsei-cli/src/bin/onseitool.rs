use std::path::Path;

use clap::{Parser, Subcommand};

use onsei_cli::commands::{build_ops, config_ops, inspect_ops};
use onsei_cli::trace_init::init_tracing;

#[derive(Parser)]
#[command(name = "onseitool", about = "NHK16 pitch-accent audio source tool")]
struct Cli {
    /// Write JSON trace logs to this directory (requires --features trace)
    #[arg(long, global = true)]
    log_dir: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Expand the export into lookup rows (JSON Lines)
    Build {
        /// Audio source
        #[arg(long, default_value = "nhk16")]
        source: String,
        /// Add-on root that settings paths are relative to
        #[arg(long, default_value = ".")]
        root: String,
        /// Custom settings TOML
        #[arg(long)]
        settings: Option<String>,
        /// Media directory (overrides source.media_dir)
        #[arg(long)]
        media_dir: Option<String>,
        /// Output file (overrides output.rows_file)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Split a pronunciation into morae
    Mora {
        /// Kana pronunciation
        text: String,
    },
    /// Render an accent JSON object into its display text
    Render {
        /// Accent as it appears in the export
        accent_json: String,
    },
    /// Show the surface forms of a numeral token
    Numeral {
        /// Numeral token (e.g. "5", "150", "何［ナン］")
        token: String,
    },
    /// Look up an audio file in a media directory
    Resolve {
        /// Media directory
        media_dir: String,
        /// Audio file name
        file_name: String,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();
    let _trace = init_tracing(cli.log_dir.as_deref().map(Path::new));

    match cli.command {
        Command::Build {
            source,
            root,
            settings,
            media_dir,
            output,
        } => {
            let s = config_ops::load_settings(settings.as_deref());
            let opts = build_ops::BuildOptions {
                source: &source,
                root: Path::new(&root),
                media_dir: media_dir.as_deref(),
                output: output.as_deref(),
            };
            build_ops::build(s, &opts);
        }
        Command::Mora { text } => inspect_ops::mora_cmd(&text),
        Command::Render { accent_json } => inspect_ops::render_cmd(&accent_json),
        Command::Numeral { token } => inspect_ops::numeral_cmd(&token),
        Command::Resolve {
            media_dir,
            file_name,
        } => inspect_ops::resolve_cmd(&media_dir, &file_name),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
