//! Export step implementations.

mod palette;
mod single_step;

pub use palette::{PaletteGenStep, PaletteUseStep};
pub use single_step::SingleStepEncodeStep;

use std::path::Path;

use crate::export::errors::{StepError, StepResult};
use crate::export::types::{Context, ExportState};
use crate::models::ProcessOutput;
use crate::tools::CommandLine;

/// Log and run a tool command, failing on a non-zero exit.
///
/// Tool output goes to the logger's tail buffer and is shown when the
/// command fails.
pub(crate) fn run_logged(
    ctx: &Context,
    state: &mut ExportState,
    cmd: &CommandLine,
) -> StepResult<ProcessOutput> {
    let line = cmd.to_string();
    ctx.logger.command(&line);
    state.commands.push(line);

    ctx.logger.clear_tail();
    let output = cmd.run()?;
    ctx.logger.output_text(&output.stdout);
    ctx.logger.output_text(&output.stderr);

    if !output.success() {
        let tool = cmd.tool_name();
        ctx.logger.show_tail(&tool);
        return Err(StepError::command_failed(
            tool,
            output.code_or_unknown(),
            output.diagnostic(),
        ));
    }

    Ok(output)
}

/// The source video must exist.
pub(crate) fn require_input(ctx: &Context) -> StepResult<()> {
    if !ctx.input().is_file() {
        return Err(StepError::invalid_input(format!(
            "Input file not found: {}",
            ctx.input().display()
        )));
    }
    Ok(())
}

/// The folder the GIF is written into must exist.
pub(crate) fn require_output_dir(ctx: &Context) -> StepResult<()> {
    match ctx.output().parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => {
            Err(StepError::invalid_input(format!(
                "Output folder does not exist: {}",
                parent.display()
            )))
        }
        _ => Ok(()),
    }
}

/// A step's product must exist and be non-empty.
pub(crate) fn require_file(path: &Path, what: &str) -> StepResult<()> {
    let len = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
    if len == 0 {
        return Err(StepError::invalid_output(format!(
            "{} was not created: {}",
            what,
            path.display()
        )));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::PathBuf;
    use std::sync::Arc;

    use crate::export::types::Context;
    use crate::logging::ExportLogger;
    use crate::models::{ExportOptions, ExportRequest};
    use crate::time::Timecode;
    use crate::tools::ToolPaths;

    /// A context whose tools do not exist.
    pub fn context(input: PathBuf, output: PathBuf, work_dir: PathBuf) -> Context {
        let request = ExportRequest {
            input,
            output,
            start: Timecode::ZERO,
            end: Timecode::from_millis(2_000),
            options: ExportOptions::default(),
        };
        let tools = ToolPaths {
            ffmpeg: "/nonexistent/ffmpeg".to_string(),
            ffprobe: "/nonexistent/ffprobe".to_string(),
        };
        Context::new(request, tools, work_dir, Arc::new(ExportLogger::detached()))
    }
}
