use serde_json::{json, Value};

use super::{DispatchEnv, StepOutcome};
use crate::core::capabilities::ContractCall;
use crate::core::execution_context::ExecutionContext;
use crate::dsl::schema::BlockchainAction;
use crate::error::StepError;
use crate::template::render_value;

/// Render the call arguments and hand the call to the chain client.
pub async fn execute(
    action: &BlockchainAction,
    ctx: &ExecutionContext,
    env: DispatchEnv<'_>,
) -> Result<StepOutcome, StepError> {
    let chain = env.capabilities.chain()?;

    let params = action
        .params
        .iter()
        .map(|p| render_value(p, ctx, env.strict_template))
        .collect::<Result<Vec<_>, _>>()?;
    let amount = action
        .amount
        .as_ref()
        .map(|a| render_value(a, ctx, env.strict_template))
        .transpose()?;

    let call = ContractCall {
        address: action.address.clone(),
        function_name: action.function_name.clone(),
        params,
        amount,
        chains: action.chains.clone(),
    };
    let tx_handle = chain.send_blockchain_call(&call).await?;

    Ok(StepOutcome::success(json!({
        "txHandle": tx_handle,
        "params": Value::Array(call.params),
    })))
}
