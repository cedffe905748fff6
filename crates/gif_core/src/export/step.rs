//! Export step trait definition.

use super::errors::StepResult;
use super::types::{Context, ExportState};

/// Trait for export steps.
///
/// The pipeline calls these methods in order:
///
/// 1. `validate_input` - check preconditions
/// 2. `execute` - run the tool and record results in the state
/// 3. `validate_output` - verify the step produced its file
pub trait ExportStep: Send + Sync {
    /// Step name, used for phase markers and error context.
    fn name(&self) -> &str;

    /// Headline shown to the user when this step fails.
    fn failure_message(&self) -> &str;

    fn validate_input(&self, ctx: &Context) -> StepResult<()>;

    fn execute(&self, ctx: &Context, state: &mut ExportState) -> StepResult<()>;

    fn validate_output(&self, ctx: &Context, state: &ExportState) -> StepResult<()>;
}
