//! Configuration management for Video to GIF.
//!
//! Settings live in a TOML file with one table per concern:
//! - `[tools]` where to find ffmpeg and ffprobe
//! - `[export]` default frame rate, width and encoding method
//! - `[paths]` logs folder and the last directories used in file dialogs
//! - `[logging]` log level and per-export log formatting
//!
//! Writes are atomic (temp file, then rename) and single sections can be
//! updated without touching the rest of the file.
//!
//! # Example
//!
//! ```no_run
//! use gif_core::config::{ConfigManager, ConfigSection};
//!
//! let mut config = ConfigManager::new(".config/settings.toml");
//! config.load_or_create().unwrap();
//!
//! println!("ffmpeg: {}", config.settings().tools.ffmpeg);
//!
//! config.settings_mut().export.fps = 15;
//! config.update_section(ConfigSection::Export).unwrap();
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{ConfigSection, ExportSettings, LoggingSettings, PathSettings, Settings};
