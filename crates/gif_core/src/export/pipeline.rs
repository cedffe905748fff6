//! Pipeline runner that executes steps in sequence.

use super::errors::{ExportError, ExportResult, StepError};
use super::step::ExportStep;
use super::steps::{PaletteGenStep, PaletteUseStep, SingleStepEncodeStep};
use super::types::{Context, ExportState};
use crate::models::ExportMethod;

/// Sequence of export steps, stopped at the first failure.
pub struct Pipeline {
    steps: Vec<Box<dyn ExportStep>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn add_step<S: ExportStep + 'static>(&mut self, step: S) -> &mut Self {
        self.steps.push(Box::new(step));
        self
    }

    /// Add a step (builder pattern).
    pub fn with_step<S: ExportStep + 'static>(mut self, step: S) -> Self {
        self.add_step(step);
        self
    }

    /// Run every step in order.
    ///
    /// Each step is validated, executed and its output checked before the
    /// next one starts.
    pub fn run(&self, ctx: &Context, state: &mut ExportState) -> ExportResult<()> {
        for step in &self.steps {
            let step_name = step.name();
            ctx.logger.phase(step_name);

            let fail = |e: StepError| {
                ctx.logger.error(&format!("{}: {}", step.failure_message(), e));
                ExportError::step_failed(step_name, step.failure_message(), e)
            };

            ctx.logger.debug(&format!("Validating input for '{}'", step_name));
            step.validate_input(ctx).map_err(fail)?;

            ctx.logger.debug(&format!("Executing '{}'", step_name));
            step.execute(ctx, state).map_err(fail)?;

            ctx.logger.debug(&format!("Validating output for '{}'", step_name));
            step.validate_output(ctx, state).map_err(fail)?;

            ctx.logger.success(&format!("{} completed", step_name));
            state.steps_completed.push(step_name.to_string());
        }

        Ok(())
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// The steps that implement `method`.
pub fn pipeline_for(method: ExportMethod) -> Pipeline {
    match method {
        ExportMethod::Palette => Pipeline::new()
            .with_step(PaletteGenStep)
            .with_step(PaletteUseStep),
        ExportMethod::SingleStep => Pipeline::new().with_step(SingleStepEncodeStep),
    }
}
