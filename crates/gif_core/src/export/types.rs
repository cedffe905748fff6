//! Core types for the export pipeline.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::logging::ExportLogger;
use crate::models::{ExportMethod, ExportRequest};
use crate::tools::{ToolPaths, PALETTE_FILE_NAME};

/// Read-only context passed to export steps.
pub struct Context {
    pub request: ExportRequest,
    pub tools: ToolPaths,
    /// Per-export temporary directory.
    pub work_dir: PathBuf,
    pub logger: Arc<ExportLogger>,
}

impl Context {
    pub fn new(
        request: ExportRequest,
        tools: ToolPaths,
        work_dir: PathBuf,
        logger: Arc<ExportLogger>,
    ) -> Self {
        Self {
            request,
            tools,
            work_dir,
            logger,
        }
    }

    /// Where the palette pass writes its image.
    pub fn palette_path(&self) -> PathBuf {
        self.work_dir.join(PALETTE_FILE_NAME)
    }

    pub fn input(&self) -> &Path {
        &self.request.input
    }

    pub fn output(&self) -> &Path {
        &self.request.output
    }
}

/// State accumulated while the steps run.
#[derive(Debug, Clone, Default)]
pub struct ExportState {
    /// Palette image, once generated.
    pub palette: Option<PathBuf>,
    /// Every command line run, in order.
    pub commands: Vec<String>,
    /// Names of steps that finished.
    pub steps_completed: Vec<String>,
}

/// Result of a successful export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    pub output: PathBuf,
    pub method: ExportMethod,
    /// Line shown to the user.
    pub message: String,
    pub commands: Vec<String>,
}

impl ExportOutcome {
    /// Success line for an export with `method`.
    pub fn success_message(method: ExportMethod) -> &'static str {
        match method {
            ExportMethod::Palette => "GIF created successfully (palette method).",
            ExportMethod::SingleStep => "GIF created successfully (single-step method).",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_lives_in_work_dir() {
        let ctx = Context::new(
            ExportRequest {
                input: "in.mp4".into(),
                output: "out.gif".into(),
                start: Default::default(),
                end: Default::default(),
                options: Default::default(),
            },
            ToolPaths::default(),
            PathBuf::from("/tmp/v2g_work_abc"),
            Arc::new(ExportLogger::detached()),
        );
        assert_eq!(ctx.palette_path(), PathBuf::from("/tmp/v2g_work_abc/palette.png"));
        assert_eq!(ctx.input(), Path::new("in.mp4"));
    }

    #[test]
    fn success_messages_name_the_method() {
        assert_eq!(
            ExportOutcome::success_message(ExportMethod::Palette),
            "GIF created successfully (palette method)."
        );
        assert_eq!(
            ExportOutcome::success_message(ExportMethod::SingleStep),
            "GIF created successfully (single-step method)."
        );
    }

    #[test]
    fn fresh_state_is_empty() {
        let state = ExportState::default();
        assert!(state.palette.is_none());
        assert!(state.commands.is_empty());
        assert!(state.steps_completed.is_empty());
    }
}
