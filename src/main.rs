//! Headless boxpoly runner: replays a session script and writes its exports.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use boxpoly::config::AppConfig;
use boxpoly::data::ImageCrateDecoder;
use boxpoly::format::{DirectoryWriter, FormatRegistry};
use boxpoly::session::{self, SessionScript};
use boxpoly::Editor;

#[derive(Debug, Parser)]
#[command(name = "boxpoly", version, about = "Replay an annotation session and write its exports")]
struct Cli {
    /// Configuration file (defaults apply when it does not exist)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output directory, overriding the configured one
    #[arg(short, long, value_name = "DIR")]
    out: Option<PathBuf>,

    /// Session script (JSON)
    session: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .unwrap_or_else(|| PathBuf::from(AppConfig::default_filename()));
    let config = match AppConfig::load_or_default(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config {}: {}", config_path.display(), e);
            return ExitCode::FAILURE;
        }
    };

    env_logger::Builder::new()
        .filter_level(config.preferences.log_level.to_level_filter())
        .parse_default_env()
        .init();

    let script = match SessionScript::load(&cli.session) {
        Ok(script) => script,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let out_dir = cli
        .out
        .unwrap_or_else(|| config.preferences.output_folder.clone());
    let mut writer = DirectoryWriter::new(out_dir);
    let mut editor = Editor::from_config(&config);
    let registry = FormatRegistry::new();

    match session::replay(&mut editor, &script, &ImageCrateDecoder, &registry, &mut writer) {
        Ok(report) => {
            log::info!(
                "Session done: {} images, {} events, {} advisories, {} files written to {}",
                report.images_loaded,
                report.events_applied,
                report.advisories.len(),
                report.files_written.len(),
                writer.root().display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Session failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
