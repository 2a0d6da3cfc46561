use serde_json::json;

use super::{DispatchEnv, StepOutcome};
use crate::core::capabilities::TransferRequest;
use crate::core::execution_context::ExecutionContext;
use crate::dsl::schema::TransferAction;
use crate::error::StepError;
use crate::template::{render_str, render_value};

pub async fn execute(
    action: &TransferAction,
    ctx: &ExecutionContext,
    env: DispatchEnv<'_>,
) -> Result<StepOutcome, StepError> {
    let chain = env.capabilities.chain()?;

    let transfer = TransferRequest {
        to: render_str(&action.to, ctx, env.strict_template)?,
        amount: render_value(&action.amount, ctx, env.strict_template)?,
        chains: action.chains.clone(),
    };
    let tx_handle = chain.send_transfer(&transfer).await?;

    Ok(StepOutcome::success(json!({
        "txHandle": tx_handle,
        "to": transfer.to,
        "amount": transfer.amount,
    })))
}
