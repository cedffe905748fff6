//! Data models for Video to GIF.
//!
//! This module contains the value types that flow through an export:
//! - The export method and options (frame rate, width)
//! - The validated export request
//! - The raw form a user fills in, and its validation errors
//! - Captured results of external processes

mod enums;
mod export;
mod form;
mod process;

// Re-export all public types
pub use enums::ExportMethod;
pub use export::{ExportOptions, ExportRequest, MAX_FPS, MIN_FPS};
pub use form::{ExportForm, InputError, ResolvedExport};
pub use process::ProcessOutput;
