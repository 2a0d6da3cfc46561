use std::collections::HashMap;

use serde_json::{json, Value};

use super::{DispatchEnv, StepOutcome};
use crate::core::capabilities::HttpRequest;
use crate::core::execution_context::ExecutionContext;
use crate::dsl::schema::HttpAction;
use crate::error::StepError;
use crate::template::{render_str, render_value};

pub async fn execute(
    action: &HttpAction,
    ctx: &ExecutionContext,
    env: DispatchEnv<'_>,
) -> Result<StepOutcome, StepError> {
    let transport = env.capabilities.http()?;

    let mut headers = HashMap::with_capacity(action.headers.len());
    for (key, value) in &action.headers {
        headers.insert(key.clone(), render_str(value, ctx, env.strict_template)?);
    }
    let request = HttpRequest {
        url: render_str(&action.endpoint, ctx, env.strict_template)?,
        method: action.method,
        headers,
        body: render_value(&action.body, ctx, env.strict_template)?,
    };

    let response = transport.send(&request).await?;

    let request_id = env.runtime.id_generator.next_id();
    let timestamp = env.runtime.time_provider.now_millis();
    let data = match response {
        Value::Object(mut fields) => {
            fields.insert("requestId".into(), json!(request_id));
            fields.insert("timestamp".into(), json!(timestamp));
            Value::Object(fields)
        }
        other => json!({
            "response": other,
            "requestId": request_id,
            "timestamp": timestamp,
        }),
    };
    Ok(StepOutcome::success(data))
}
