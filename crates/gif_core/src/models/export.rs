//! Export configuration and the validated export request.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::enums::ExportMethod;
use super::form::InputError;
use crate::time::Timecode;

/// Lowest accepted frame rate.
pub const MIN_FPS: u32 = 1;
/// Highest accepted frame rate.
pub const MAX_FPS: u32 = 60;

/// Encoding options for one export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportOptions {
    /// Output frame rate.
    pub fps: u32,
    /// Target width in pixels. `None` keeps the source width.
    pub width: Option<u32>,
    /// Palette or single-step encoding.
    pub method: ExportMethod,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            fps: 10,
            width: None,
            method: ExportMethod::default(),
        }
    }
}

impl ExportOptions {
    /// Check frame rate and width bounds.
    pub fn validate(&self) -> Result<(), InputError> {
        if !(MIN_FPS..=MAX_FPS).contains(&self.fps) {
            return Err(InputError::InvalidFps(self.fps.to_string()));
        }
        if self.width == Some(0) {
            return Err(InputError::InvalidWidth("0".to_string()));
        }
        Ok(())
    }
}

/// A complete, validated description of one export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRequest {
    /// Source video.
    pub input: PathBuf,
    /// Destination GIF.
    pub output: PathBuf,
    /// Start of the exported range.
    pub start: Timecode,
    /// End of the exported range (exclusive of anything after).
    pub end: Timecode,
    /// Encoding options.
    pub options: ExportOptions,
}

impl ExportRequest {
    /// Check that the request can be handed to the pipeline.
    pub fn validate(&self) -> Result<(), InputError> {
        if self.input.as_os_str().is_empty() {
            return Err(InputError::NoInput);
        }
        if self.output.as_os_str().is_empty() {
            return Err(InputError::MissingOutput);
        }
        if self.end <= self.start {
            return Err(InputError::InvalidRange {
                start: self.start,
                end: self.end,
            });
        }
        self.options.validate()
    }

    /// Length of the exported range in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.end.as_secs_f64() - self.start.as_secs_f64()
    }
}
