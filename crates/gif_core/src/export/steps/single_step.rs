//! Single-step method: one ffmpeg pass without a dedicated palette.

use super::{require_file, require_input, require_output_dir, run_logged};
use crate::export::errors::StepResult;
use crate::export::step::ExportStep;
use crate::export::types::{Context, ExportState};
use crate::tools::single_step_command;

pub struct SingleStepEncodeStep;

impl ExportStep for SingleStepEncodeStep {
    fn name(&self) -> &str {
        "Single-step encode"
    }

    fn failure_message(&self) -> &str {
        "Single-step GIF creation failed"
    }

    fn validate_input(&self, ctx: &Context) -> StepResult<()> {
        require_input(ctx)?;
        require_output_dir(ctx)
    }

    fn execute(&self, ctx: &Context, state: &mut ExportState) -> StepResult<()> {
        let cmd = single_step_command(&ctx.tools.ffmpeg, &ctx.request);
        run_logged(ctx, state, &cmd)?;
        Ok(())
    }

    fn validate_output(&self, ctx: &Context, _state: &ExportState) -> StepResult<()> {
        require_file(ctx.output(), "GIF")
    }
}
