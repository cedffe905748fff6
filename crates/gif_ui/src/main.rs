//! Video to GIF - Main entry point
//!
//! Loads configuration, starts application logging and launches the
//! iced event loop.

use std::path::PathBuf;

use directories::ProjectDirs;

use gif_core::config::ConfigManager;
use gif_core::logging::{init_tracing_with_file, LogLevel};

mod app;
mod handlers;
mod pages;
mod theme;

use app::{App, AppInit};

/// Config file in the platform config directory, or `.config/settings.toml`
/// relative to the working directory when there is none.
fn default_config_path() -> PathBuf {
    ProjectDirs::from("io.github", "videotogif", "video-to-gif")
        .map(|dirs| dirs.config_dir().join("settings.toml"))
        .unwrap_or_else(|| PathBuf::from(".config").join("settings.toml"))
}

fn main() -> iced::Result {
    // Config first: it names the logs folder
    let config_path = default_config_path();
    let mut config_manager = ConfigManager::new(&config_path);

    if let Err(e) = config_manager.load_or_create() {
        eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
    }

    if let Err(e) = config_manager.ensure_dirs_exist() {
        eprintln!("Warning: Failed to create directories: {}", e);
    }

    let level: LogLevel = config_manager
        .settings()
        .logging
        .level
        .parse()
        .unwrap_or_default();
    let logs_dir = config_manager.logs_folder();
    let _log_guard = init_tracing_with_file(level, &logs_dir);

    tracing::info!("Video to GIF starting");
    tracing::info!("Config: {}", config_path.display());
    tracing::info!("Core version: {}", gif_core::version());

    let init = AppInit {
        config_path,
        settings: config_manager.settings().clone(),
    };

    iced::application(move || App::new(init.clone()), App::update, App::view)
        .title("Video -> GIF (ffmpeg)")
        .window_size((820.0, 560.0))
        .run()
}
