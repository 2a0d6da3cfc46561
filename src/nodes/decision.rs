use serde_json::{json, Map, Value};

use super::StepOutcome;
use crate::core::execution_context::{ExecutionContext, USER_CHOICE_KEY};
use crate::dsl::schema::DecisionAction;
use crate::error::StepError;
use crate::template::{substitute_str, value_to_display};

/// Without a `userChoice` in this step's input the decision waits and
/// advertises its options; with one it records the choice and pre-sets the
/// next action.
pub fn execute(
    node_id: &str,
    action: &DecisionAction,
    input: &Map<String, Value>,
    ctx: &mut ExecutionContext,
) -> Result<StepOutcome, StepError> {
    let choice = match input.get(USER_CHOICE_KEY) {
        None | Some(Value::Null) => return Ok(StepOutcome::waiting(prompt(action, ctx))),
        Some(v) => value_to_display(v),
    };

    let option = action
        .options
        .iter()
        .find(|opt| opt.value == choice)
        .ok_or_else(|| StepError::InvalidChoice(choice.clone()))?;

    ctx.record_choice(node_id, &option.value);
    Ok(StepOutcome::success(json!({
        "choice": option.value,
        "label": option.label,
    }))
    .with_next(option.target_node_id.clone()))
}

fn prompt(action: &DecisionAction, ctx: &ExecutionContext) -> Value {
    let options: Vec<Value> = action
        .options
        .iter()
        .map(|opt| json!({"label": opt.label, "value": opt.value}))
        .collect();
    let mut data = json!({ "options": options });
    if let Some(title) = &action.title {
        data["title"] = json!(substitute_str(title, ctx));
    }
    data
}
