//! Single-frame preview extraction.
//!
//! ffmpeg writes one JPEG frame into a temporary directory. The frame is
//! decoded, shrunk to fit the preview box and handed back as RGBA pixels.

use std::io;
use std::path::Path;

use image::imageops::FilterType;
use thiserror::Error;

use crate::time::Timecode;
use crate::tools::{frame_extract_command, ToolError, ToolPaths};

/// Prefix of the temporary directory holding the extracted frame.
pub const PREVIEW_DIR_PREFIX: &str = "v2g_preview_";

const FRAME_FILE_NAME: &str = "frame.jpg";

/// Errors from preview extraction.
#[derive(Error, Debug)]
pub enum PreviewError {
    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error("Frame extraction failed: {0}")]
    ExtractFailed(String),

    /// ffmpeg succeeded but wrote nothing, usually a time past the end.
    #[error("No frame at {0}")]
    NoFrame(Timecode),

    #[error("Failed to decode frame: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Failed to create temporary directory: {0}")]
    TempDir(#[source] io::Error),
}

/// Result type for preview operations.
pub type PreviewResult<T> = Result<T, PreviewError>;

/// Decoded preview pixels.
#[derive(Clone, PartialEq, Eq)]
pub struct PreviewFrame {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA, `width * height * 4` bytes.
    pub rgba: Vec<u8>,
}

impl std::fmt::Debug for PreviewFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewFrame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.rgba.len())
            .finish()
    }
}

/// Extract the frame at `at` and fit it inside `max_width` x `max_height`.
pub fn extract_preview(
    tools: &ToolPaths,
    input: &Path,
    at: Timecode,
    max_width: u32,
    max_height: u32,
) -> PreviewResult<PreviewFrame> {
    let dir = tempfile::Builder::new()
        .prefix(PREVIEW_DIR_PREFIX)
        .tempdir()
        .map_err(PreviewError::TempDir)?;
    let frame_path = dir.path().join(FRAME_FILE_NAME);

    let cmd = frame_extract_command(&tools.ffmpeg, input, at, &frame_path);
    tracing::debug!("Preview: {}", cmd);
    let output = cmd.run()?;

    if !output.success() {
        return Err(PreviewError::ExtractFailed(output.diagnostic().to_string()));
    }
    if !frame_path.is_file() {
        return Err(PreviewError::NoFrame(at));
    }

    let frame = decode_and_fit(&frame_path, max_width, max_height)?;
    tracing::debug!("Preview frame {}x{} at {}", frame.width, frame.height, at);

    // dropping `dir` removes the frame
    Ok(frame)
}

fn decode_and_fit(path: &Path, max_width: u32, max_height: u32) -> PreviewResult<PreviewFrame> {
    let img = image::open(path)?;
    let (width, height) = fit_within(img.width(), img.height(), max_width, max_height);

    let img = if (width, height) == (img.width(), img.height()) {
        img
    } else {
        img.resize_exact(width, height, FilterType::Lanczos3)
    };

    let rgba = img.to_rgba8();
    Ok(PreviewFrame {
        width: rgba.width(),
        height: rgba.height(),
        rgba: rgba.into_raw(),
    })
}

/// Largest size with the same aspect ratio that fits the box.
///
/// Images already inside the box keep their size.
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width == 0 || height == 0 || (width <= max_width && height <= max_height) {
        return (width, height);
    }

    let scale = f64::min(
        max_width as f64 / width as f64,
        max_height as f64 / height as f64,
    );
    let fit = |v: u32| ((v as f64 * scale).round() as u32).max(1);
    (fit(width), fit(height))
}
