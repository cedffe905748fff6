//! GIF export: the step pipeline and the background worker.
//!
//! # Architecture
//!
//! ```text
//! run_export
//!     ├── validate request
//!     ├── create work dir (v2g_work_*)
//!     ├── Pipeline (palette method)
//!     │       ├── Step: Palette generation
//!     │       └── Step: Palette encode
//!     │   or Pipeline (single-step method)
//!     │       └── Step: Single-step encode
//!     └── remove work dir
//! ```
//!
//! [`ExportWorker`] runs one export at a time on a background thread and
//! streams [`ExportEvent`]s back to the caller.

mod errors;
mod pipeline;
mod step;
pub mod steps;
mod types;
mod worker;

pub use errors::{ExportError, ExportResult, StepError, StepResult, BUSY_MESSAGE};
pub use pipeline::{pipeline_for, Pipeline};
pub use step::ExportStep;
pub use steps::{PaletteGenStep, PaletteUseStep, SingleStepEncodeStep};
pub use types::{Context, ExportOutcome, ExportState};
pub use worker::{ExportEvent, ExportHandle, ExportPermit, ExportWorker};

use std::sync::Arc;

use crate::logging::ExportLogger;
use crate::models::ExportRequest;
use crate::tools::ToolPaths;

/// Prefix of the per-export temporary directory.
pub const WORK_DIR_PREFIX: &str = "v2g_work_";

/// Validate `request` and produce the GIF with the method it names.
///
/// The work dir is removed whether or not the pipeline succeeds.
pub fn run_export(
    request: &ExportRequest,
    tools: &ToolPaths,
    logger: Arc<ExportLogger>,
) -> ExportResult<ExportOutcome> {
    let pipeline = pipeline_for(request.options.method);
    run_pipeline(&pipeline, request, tools, logger)
}

fn run_pipeline(
    pipeline: &Pipeline,
    request: &ExportRequest,
    tools: &ToolPaths,
    logger: Arc<ExportLogger>,
) -> ExportResult<ExportOutcome> {
    request.validate()?;

    let method = request.options.method;
    logger.info(&format!(
        "Exporting {} -> {}",
        request.input.display(),
        request.output.display()
    ));
    logger.info(&format!(
        "Range {} - {} ({:.3}s), {} fps, width {}, {} method",
        request.start,
        request.end,
        request.duration_secs(),
        request.options.fps,
        request
            .options
            .width
            .map_or_else(|| "source".to_string(), |w| w.to_string()),
        method.short_name()
    ));

    let work_dir = tempfile::Builder::new()
        .prefix(WORK_DIR_PREFIX)
        .tempdir()
        .map_err(|e| ExportError::setup("creating the work directory", e))?;
    logger.debug(&format!("Work directory: {}", work_dir.path().display()));

    let ctx = Context::new(
        request.clone(),
        tools.clone(),
        work_dir.path().to_path_buf(),
        Arc::clone(&logger),
    );
    let mut state = ExportState::default();
    let result = pipeline.run(&ctx, &mut state);

    match work_dir.close() {
        Ok(()) => logger.info("Cleaned temporary files."),
        Err(e) => logger.warn(&format!("Failed to clean temporary files: {}", e)),
    }

    result?;

    let message = ExportOutcome::success_message(method);
    logger.success(message);

    Ok(ExportOutcome {
        output: request.output.clone(),
        method,
        message: message.to_string(),
        commands: state.commands,
    })
}
