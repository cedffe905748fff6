//! The raw export form and its validation.
//!
//! The window keeps every field as text. `ExportForm::resolve` turns that
//! text into an [`ExportRequest`], in the same order the fields are checked
//! on screen, and stops at the first problem.

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::enums::ExportMethod;
use super::export::{ExportOptions, ExportRequest, MAX_FPS, MIN_FPS};
use crate::time::{parse_time, TimeParseError, Timecode};

/// A user input that cannot be turned into an export.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("Please choose a video file first.")]
    NoInput,

    #[error("Start time invalid: {0}")]
    InvalidStart(TimeParseError),

    #[error("End time invalid and video duration unknown.")]
    InvalidEnd,

    #[error("End time must be greater than start time ({start} >= {end}).")]
    InvalidRange { start: Timecode, end: Timecode },

    #[error("FPS must be an integer between 1 and 60 (got '{0}').")]
    InvalidFps(String),

    #[error("Width must be a positive integer (got '{0}').")]
    InvalidWidth(String),

    #[error("No output file chosen.")]
    MissingOutput,
}

impl InputError {
    /// Short title for the warning dialog.
    pub fn title(&self) -> &'static str {
        match self {
            InputError::NoInput => "No file",
            InputError::InvalidStart(_) => "Invalid start",
            InputError::InvalidEnd => "Invalid end",
            InputError::InvalidRange { .. } => "Invalid range",
            InputError::InvalidFps(_) => "Invalid FPS",
            InputError::InvalidWidth(_) => "Invalid width",
            InputError::MissingOutput => "No output",
        }
    }
}

/// Text fields of the export form, exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportForm {
    pub start: String,
    pub end: String,
    pub fps: String,
    pub width: String,
    pub method: ExportMethod,
    pub output: String,
}

impl Default for ExportForm {
    fn default() -> Self {
        Self::from_options(&ExportOptions::default())
    }
}

/// A successfully resolved form.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedExport {
    pub request: ExportRequest,
    /// Set when the end field was empty or invalid and the probed duration
    /// was used instead. The window writes it back into the end field.
    pub end_from_duration: Option<f64>,
}

impl ExportForm {
    /// Blank form prefilled with the given option defaults.
    pub fn from_options(options: &ExportOptions) -> Self {
        Self {
            start: "0".to_string(),
            end: String::new(),
            fps: options.fps.to_string(),
            width: options.width.map(|w| w.to_string()).unwrap_or_default(),
            method: options.method,
            output: String::new(),
        }
    }

    /// Validate every field and build the request.
    ///
    /// `known_duration` is the probed length of the input in seconds.
    pub fn resolve(
        &self,
        input: Option<&Path>,
        known_duration: Option<f64>,
    ) -> Result<ResolvedExport, InputError> {
        let input = input
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or(InputError::NoInput)?;

        let start = parse_time(&self.start).map_err(InputError::InvalidStart)?;

        let mut end_from_duration = None;
        let end = match parse_time(&self.end) {
            Ok(end) => end,
            Err(_) => {
                let duration = known_duration.ok_or(InputError::InvalidEnd)?;
                let end = Timecode::from_secs_f64(duration).map_err(|_| InputError::InvalidEnd)?;
                end_from_duration = Some(duration);
                end
            }
        };

        if end <= start {
            return Err(InputError::InvalidRange { start, end });
        }

        let fps = parse_fps(&self.fps)?;
        let width = parse_width(&self.width)?;

        let output = self.output.trim();
        if output.is_empty() {
            return Err(InputError::MissingOutput);
        }

        let request = ExportRequest {
            input: input.to_path_buf(),
            output: PathBuf::from(output),
            start,
            end,
            options: ExportOptions {
                fps,
                width,
                method: self.method,
            },
        };
        request.validate()?;

        Ok(ResolvedExport {
            request,
            end_from_duration,
        })
    }
}

fn parse_fps(text: &str) -> Result<u32, InputError> {
    let trimmed = text.trim();
    trimmed
        .parse::<u32>()
        .ok()
        .filter(|fps| (MIN_FPS..=MAX_FPS).contains(fps))
        .ok_or_else(|| InputError::InvalidFps(trimmed.to_string()))
}

fn parse_width(text: &str) -> Result<Option<u32>, InputError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<u32>()
        .ok()
        .filter(|w| *w > 0)
        .map(Some)
        .ok_or_else(|| InputError::InvalidWidth(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ExportForm {
        ExportForm {
            start: "0".to_string(),
            end: "5".to_string(),
            fps: "12".to_string(),
            width: "480".to_string(),
            method: ExportMethod::Palette,
            output: "/tmp/out.gif".to_string(),
        }
    }

    fn input() -> Option<&'static Path> {
        Some(Path::new("/videos/clip.mp4"))
    }

    #[test]
    fn resolves_complete_form() {
        let resolved = form().resolve(input(), None).unwrap();
        let req = resolved.request;
        assert_eq!(req.start, Timecode::ZERO);
        assert_eq!(req.end.as_millis(), 5_000);
        assert_eq!(req.options.fps, 12);
        assert_eq!(req.options.width, Some(480));
        assert_eq!(req.output, PathBuf::from("/tmp/out.gif"));
        assert!(resolved.end_from_duration.is_none());
    }

    #[test]
    fn missing_input_reported_first() {
        let mut f = form();
        f.start = "bogus".to_string();
        assert_eq!(f.resolve(None, None), Err(InputError::NoInput));
    }

    #[test]
    fn invalid_start() {
        let mut f = form();
        f.start = "x".to_string();
        let err = f.resolve(input(), None).unwrap_err();
        assert!(matches!(err, InputError::InvalidStart(_)));
        assert_eq!(err.title(), "Invalid start");
    }

    #[test]
    fn empty_end_uses_known_duration() {
        let mut f = form();
        f.end = String::new();
        let resolved = f.resolve(input(), Some(42.5)).unwrap();
        assert_eq!(resolved.request.end.as_millis(), 42_500);
        assert_eq!(resolved.end_from_duration, Some(42.5));
    }

    #[test]
    fn empty_end_without_duration_fails() {
        let mut f = form();
        f.end = String::new();
        assert_eq!(f.resolve(input(), None), Err(InputError::InvalidEnd));
    }

    #[test]
    fn end_not_after_start() {
        let mut f = form();
        f.start = "0:05".to_string();
        f.end = "5".to_string();
        assert!(matches!(
            f.resolve(input(), None),
            Err(InputError::InvalidRange { .. })
        ));
    }

    #[test]
    fn fps_must_be_integer_in_range() {
        for bad in ["0", "61", "10.5", "", "fast"] {
            let mut f = form();
            f.fps = bad.to_string();
            assert!(
                matches!(f.resolve(input(), None), Err(InputError::InvalidFps(_))),
                "fps '{}' should be rejected",
                bad
            );
        }
    }

    #[test]
    fn width_optional_but_positive() {
        let mut f = form();
        f.width = "  ".to_string();
        assert_eq!(f.resolve(input(), None).unwrap().request.options.width, None);

        for bad in ["0", "-10", "wide"] {
            f.width = bad.to_string();
            assert!(matches!(
                f.resolve(input(), None),
                Err(InputError::InvalidWidth(_))
            ));
        }
    }

    #[test]
    fn missing_output_reported_last() {
        let mut f = form();
        f.output = " ".to_string();
        assert_eq!(f.resolve(input(), None), Err(InputError::MissingOutput));
    }

    #[test]
    fn defaults_prefill_form() {
        let f = ExportForm::default();
        assert_eq!(f.start, "0");
        assert_eq!(f.fps, "10");
        assert!(f.width.is_empty());
        assert_eq!(f.method, ExportMethod::Palette);
    }
}
