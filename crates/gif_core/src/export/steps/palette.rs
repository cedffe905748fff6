//! Palette method: derive an optimal palette, then encode with it.

use super::{require_file, require_input, require_output_dir, run_logged};
use crate::export::errors::{StepError, StepResult};
use crate::export::step::ExportStep;
use crate::export::types::{Context, ExportState};
use crate::tools::{palette_gen_command, palette_use_command};

/// First pass: writes `palette.png` into the work dir.
pub struct PaletteGenStep;

impl ExportStep for PaletteGenStep {
    fn name(&self) -> &str {
        "Palette generation"
    }

    fn failure_message(&self) -> &str {
        "Palette generation failed"
    }

    fn validate_input(&self, ctx: &Context) -> StepResult<()> {
        require_input(ctx)?;
        if !ctx.work_dir.is_dir() {
            return Err(StepError::invalid_input(format!(
                "Work directory missing: {}",
                ctx.work_dir.display()
            )));
        }
        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut ExportState) -> StepResult<()> {
        let palette = ctx.palette_path();
        let cmd = palette_gen_command(&ctx.tools.ffmpeg, &ctx.request, &palette);
        run_logged(ctx, state, &cmd)?;
        state.palette = Some(palette);
        Ok(())
    }

    fn validate_output(&self, ctx: &Context, state: &ExportState) -> StepResult<()> {
        match state.palette {
            Some(ref palette) => require_file(palette, "Palette"),
            None => require_file(&ctx.palette_path(), "Palette"),
        }
    }
}

/// Second pass: encodes the GIF using the generated palette.
pub struct PaletteUseStep;

impl ExportStep for PaletteUseStep {
    fn name(&self) -> &str {
        "Palette encode"
    }

    fn failure_message(&self) -> &str {
        "Palette-based gif creation failed"
    }

    fn validate_input(&self, ctx: &Context) -> StepResult<()> {
        require_input(ctx)?;
        require_output_dir(ctx)?;
        if !ctx.palette_path().is_file() {
            return Err(StepError::invalid_input(
                "Palette has not been generated",
            ));
        }
        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut ExportState) -> StepResult<()> {
        let palette = state.palette.clone().unwrap_or_else(|| ctx.palette_path());
        let cmd = palette_use_command(&ctx.tools.ffmpeg, &ctx.request, &palette);
        run_logged(ctx, state, &cmd)?;
        Ok(())
    }

    fn validate_output(&self, ctx: &Context, _state: &ExportState) -> StepResult<()> {
        require_file(ctx.output(), "GIF")
    }
}
