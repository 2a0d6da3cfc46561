use serde_json::json;

use super::{DispatchEnv, StepOutcome};
use crate::core::execution_context::ExecutionContext;
use crate::dsl::schema::CompletionAction;
use crate::error::StepError;
use crate::template::render_str;

pub fn execute(
    action: &CompletionAction,
    ctx: &ExecutionContext,
    env: DispatchEnv<'_>,
) -> Result<StepOutcome, StepError> {
    let message = render_str(&action.message, ctx, env.strict_template)?;
    Ok(StepOutcome::success(json!({
        "message": message,
        "status": action.status,
    })))
}
