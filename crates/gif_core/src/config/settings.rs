//! Settings struct with TOML-based sections.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::models::{ExportMethod, ExportOptions, MAX_FPS, MIN_FPS};
use crate::tools::ToolPaths;

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// External program locations.
    #[serde(default)]
    pub tools: ToolPaths,

    /// Defaults for the export form.
    #[serde(default)]
    pub export: ExportSettings,

    /// Log folder and remembered dialog directories.
    #[serde(default)]
    pub paths: PathSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Defaults loaded into the export form at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSettings {
    #[serde(default = "default_fps")]
    pub fps: u32,

    /// Zero keeps the source width.
    #[serde(default)]
    pub width: u32,

    #[serde(default)]
    pub method: ExportMethod,
}

fn default_fps() -> u32 {
    10
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            width: 0,
            method: ExportMethod::default(),
        }
    }
}

impl ExportSettings {
    /// Convert to export options, clamping values a hand-edited file may
    /// have pushed out of range.
    pub fn to_options(&self) -> ExportOptions {
        ExportOptions {
            fps: self.fps.clamp(MIN_FPS, MAX_FPS),
            width: (self.width > 0).then_some(self.width),
            method: self.method,
        }
    }

    /// Remember the options of a successful export.
    pub fn remember(&mut self, options: &ExportOptions) {
        self.fps = options.fps;
        self.width = options.width.unwrap_or(0);
        self.method = options.method;
    }
}

/// Path configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSettings {
    /// Folder for log files.
    #[serde(default = "default_logs_folder")]
    pub logs_folder: String,

    /// Directory of the last opened video.
    #[serde(default)]
    pub last_input_dir: String,

    /// Directory of the last written GIF.
    #[serde(default)]
    pub last_output_dir: String,
}

fn default_logs_folder() -> String {
    ".logs".to_string()
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            logs_folder: default_logs_folder(),
            last_input_dir: String::new(),
            last_output_dir: String::new(),
        }
    }
}

impl PathSettings {
    /// Last input directory, if one was remembered.
    pub fn last_input(&self) -> Option<PathBuf> {
        non_empty_path(&self.last_input_dir)
    }

    /// Last output directory, if one was remembered.
    pub fn last_output(&self) -> Option<PathBuf> {
        non_empty_path(&self.last_output_dir)
    }
}

fn non_empty_path(value: &str) -> Option<PathBuf> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Filter for the application log (`error`, `warn`, `info`, `debug`, `trace`).
    #[serde(default = "default_level")]
    pub level: String,

    /// Prefix export log lines with the time of day.
    #[serde(default = "default_true")]
    pub show_timestamps: bool,

    /// Number of tool output lines to show after a failure.
    #[serde(default = "default_error_tail")]
    pub error_tail: u32,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_error_tail() -> u32 {
    20
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_level(),
            show_timestamps: true,
            error_tail: default_error_tail(),
        }
    }
}

/// Names of config sections for targeted updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigSection {
    Tools,
    Export,
    Paths,
    Logging,
}

impl ConfigSection {
    /// All sections in file order.
    pub const ALL: [ConfigSection; 4] = [
        ConfigSection::Tools,
        ConfigSection::Export,
        ConfigSection::Paths,
        ConfigSection::Logging,
    ];

    /// Get the TOML table name for this section.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConfigSection::Tools => "tools",
            ConfigSection::Export => "export",
            ConfigSection::Paths => "paths",
            ConfigSection::Logging => "logging",
        }
    }

    /// Comment written above the table.
    pub(crate) fn comment(&self) -> &'static str {
        match self {
            ConfigSection::Tools => "# External programs (names are looked up on PATH)",
            ConfigSection::Export => "# Export defaults (width = 0 keeps the source width)",
            ConfigSection::Paths => "# Log folder and last used directories",
            ConfigSection::Logging => "# Logging configuration",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_serializes() {
        let settings = Settings::default();
        let toml = toml::to_string_pretty(&settings).unwrap();
        assert!(toml.contains("[tools]"));
        assert!(toml.contains("[export]"));
        assert!(toml.contains("[paths]"));
        assert!(toml.contains("[logging]"));
        assert!(toml.contains("method = \"palette\""));
    }

    #[test]
    fn settings_round_trip() {
        let mut settings = Settings::default();
        settings.export.method = ExportMethod::SingleStep;
        settings.paths.last_input_dir = "/videos".to_string();
        let toml = toml::to_string_pretty(&settings).unwrap();
        let parsed: Settings = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let minimal = "[export]\nfps = 24";
        let parsed: Settings = toml::from_str(minimal).unwrap();
        assert_eq!(parsed.export.fps, 24);
        assert_eq!(parsed.export.method, ExportMethod::Palette);
        assert_eq!(parsed.logging.error_tail, 20);
        assert_eq!(parsed.tools, ToolPaths::default());
    }

    #[test]
    fn export_settings_clamp_to_valid_options() {
        let settings = ExportSettings {
            fps: 500,
            width: 0,
            method: ExportMethod::SingleStep,
        };
        let options = settings.to_options();
        assert_eq!(options.fps, MAX_FPS);
        assert_eq!(options.width, None);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn remember_stores_options() {
        let mut settings = ExportSettings::default();
        settings.remember(&ExportOptions {
            fps: 25,
            width: Some(480),
            method: ExportMethod::SingleStep,
        });
        assert_eq!(settings.fps, 25);
        assert_eq!(settings.width, 480);
        assert_eq!(settings.to_options().width, Some(480));
    }

    #[test]
    fn empty_dirs_are_not_remembered() {
        let paths = PathSettings::default();
        assert_eq!(paths.last_input(), None);
        let paths = PathSettings {
            last_output_dir: "/tmp/gifs".to_string(),
            ..PathSettings::default()
        };
        assert_eq!(paths.last_output(), Some(PathBuf::from("/tmp/gifs")));
    }
}
