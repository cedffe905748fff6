//! Error types for the export pipeline.
//!
//! Errors chain through layers: Export → Step → Tool.

use std::io;

use thiserror::Error;

use crate::models::InputError;
use crate::tools::ToolError;

/// Message shown when an export is requested while another one runs.
pub const BUSY_MESSAGE: &str = "Another export is in progress. Please wait.";

/// Top-level export error.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The request did not pass validation.
    #[error(transparent)]
    Invalid(#[from] InputError),

    /// A step failed. `summary` is the user-facing headline.
    #[error("{summary}: {source}")]
    StepFailed {
        step: String,
        summary: String,
        #[source]
        source: StepError,
    },

    /// Failed to set up the export (temporary directory, worker thread).
    #[error("Export setup failed while {operation}: {source}")]
    Setup {
        operation: String,
        #[source]
        source: io::Error,
    },

    /// Another export holds the worker.
    #[error("{}", BUSY_MESSAGE)]
    Busy,
}

impl ExportError {
    /// Create a step failed error.
    pub fn step_failed(
        step: impl Into<String>,
        summary: impl Into<String>,
        source: StepError,
    ) -> Self {
        Self::StepFailed {
            step: step.into(),
            summary: summary.into(),
            source,
        }
    }

    /// Create a setup error with context.
    pub fn setup(operation: impl Into<String>, source: io::Error) -> Self {
        Self::Setup {
            operation: operation.into(),
            source,
        }
    }

    /// Dialog title for this error.
    pub fn title(&self) -> &'static str {
        match self {
            ExportError::Invalid(e) => e.title(),
            ExportError::Busy => "Busy",
            ExportError::StepFailed { .. } | ExportError::Setup { .. } => "Export failed",
        }
    }
}

/// Error from a single export step.
#[derive(Error, Debug)]
pub enum StepError {
    #[error("Input validation failed: {0}")]
    InvalidInput(String),

    #[error("Output validation failed: {0}")]
    InvalidOutput(String),

    /// The tool ran and exited unsuccessfully.
    #[error("{tool} failed with exit code {exit_code}: {message}")]
    CommandFailed {
        tool: String,
        exit_code: i32,
        message: String,
    },

    /// The tool could not be run.
    #[error(transparent)]
    Tool(#[from] ToolError),
}

impl StepError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn invalid_output(message: impl Into<String>) -> Self {
        Self::InvalidOutput(message.into())
    }

    pub fn command_failed(
        tool: impl Into<String>,
        exit_code: i32,
        message: impl Into<String>,
    ) -> Self {
        Self::CommandFailed {
            tool: tool.into(),
            exit_code,
            message: message.into(),
        }
    }
}

/// Result type for step operations.
pub type StepResult<T> = Result<T, StepError>;

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_error_displays_context() {
        let err = StepError::command_failed("ffmpeg", 1, "Invalid data found when processing input");
        let msg = err.to_string();
        assert!(msg.contains("ffmpeg"));
        assert!(msg.contains("exit code 1"));
        assert!(msg.contains("Invalid data found"));
    }

    #[test]
    fn export_error_leads_with_summary() {
        let step_err = StepError::command_failed("ffmpeg", 1, "No such file");
        let err = ExportError::step_failed("Palette generation", "Palette generation failed", step_err);

        let msg = err.to_string();
        assert!(msg.starts_with("Palette generation failed: "));
        assert!(msg.contains("No such file"));
        assert_eq!(err.title(), "Export failed");
    }

    #[test]
    fn busy_message() {
        assert_eq!(ExportError::Busy.to_string(), BUSY_MESSAGE);
    }

    #[test]
    fn invalid_request_keeps_input_title() {
        let err = ExportError::from(InputError::NoInput);
        assert_eq!(err.title(), InputError::NoInput.title());
    }
}
