//! Invoke command handler.
//!
//! Calls any capability by name. Only the envelope's shape is printed:
//! block kinds and lengths, never the content itself.

use anyhow::Result;
use serde_json::{Map, Value};
use toolbridge_core::{CallRequest, ToolInvoker};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::print_json;

/// Execute the invoke command.
///
/// # Errors
///
/// Fails when `args` is not a JSON object or the call fails.
pub async fn execute(ctx: &CliContext, server: &str, capability: &str, args: &str) -> Result<()> {
    let arguments = parse_arguments(args)?;
    let envelope = ctx
        .bridge()
        .invoke_with(CallRequest::new(server, capability, arguments), ctx.call())
        .await?;

    print_json(&envelope.summary())
}

fn parse_arguments(args: &str) -> Result<Map<String, Value>, CliError> {
    match serde_json::from_str::<Value>(args) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(CliError::Arguments(format!(
            "--args must be a JSON object, got {other}"
        ))),
        Err(e) => Err(CliError::Arguments(format!("--args is not valid JSON: {e}"))),
    }
}
