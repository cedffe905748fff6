//! Types for external tool operations.

use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from running or talking to an external program.
#[derive(Error, Debug)]
pub enum ToolError {
    /// The program could not be started at all.
    #[error("Failed to run {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: io::Error,
    },

    /// A required program is missing or does not respond to `-version`.
    #[error("{tool} not found or not working ({path}). Install ffmpeg and make sure ffmpeg and ffprobe are available.")]
    Missing { tool: String, path: String },

    /// Neither ffprobe nor ffmpeg reported a duration.
    #[error("Could not determine duration of {0}")]
    DurationUnavailable(PathBuf),
}

/// Result type for tool operations.
pub type ToolResult<T> = Result<T, ToolError>;

/// Where to find the external programs.
///
/// Plain names are resolved through `PATH`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolPaths {
    #[serde(default = "default_ffmpeg")]
    pub ffmpeg: String,

    #[serde(default = "default_ffprobe")]
    pub ffprobe: String,
}

fn default_ffmpeg() -> String {
    if cfg!(windows) { "ffmpeg.exe" } else { "ffmpeg" }.to_string()
}

fn default_ffprobe() -> String {
    if cfg!(windows) { "ffprobe.exe" } else { "ffprobe" }.to_string()
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            ffmpeg: default_ffmpeg(),
            ffprobe: default_ffprobe(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_displays_context() {
        let err = ToolError::Missing {
            tool: "ffprobe".to_string(),
            path: "/opt/ffprobe".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("ffprobe not found"));
        assert!(msg.contains("/opt/ffprobe"));
    }

    #[test]
    fn default_paths_use_plain_names() {
        let paths = ToolPaths::default();
        assert!(paths.ffmpeg.starts_with("ffmpeg"));
        assert!(paths.ffprobe.starts_with("ffprobe"));
    }
}
