//! Connection lifecycle for a single bridge call.
//!
//! A connection lives only as long as one call: it is opened, used once and
//! closed before the call returns, whatever the outcome. Nothing is pooled
//! or reused.

use futures_util::future::BoxFuture;
use std::future::Future;
use std::time::{Duration, Instant};
use toolbridge_core::{BridgeErrorKind, Connection, Connector, LaunchSpec};

/// Run `task` against a fresh connection to `server`.
///
/// - Handshake failure: nothing was established, nothing is closed.
/// - Otherwise the connection is closed exactly once after `task` finishes,
///   fails or runs past the deadline. A failing close is logged and never
///   replaces the task's own result.
///
/// `deadline` bounds the whole call, handshake included.
pub async fn with_connection<T, F>(
    connector: &dyn Connector,
    server: &str,
    spec: &LaunchSpec,
    deadline: Option<Duration>,
    task: F,
) -> Result<T, BridgeErrorKind>
where
    F: for<'c> FnOnce(&'c mut dyn Connection) -> BoxFuture<'c, Result<T, BridgeErrorKind>>,
{
    let started = Instant::now();

    let mut connection = within(deadline, deadline, connector.connect(server, spec)).await?;

    let remaining = deadline.map(|limit| limit.saturating_sub(started.elapsed()));
    let outcome = within(remaining, deadline, async {
        log_capabilities(server, connection.as_mut()).await;
        task(connection.as_mut()).await
    })
    .await;

    if let Err(e) = connection.close().await {
        tracing::warn!(server = %server, error = %e, "Failed to close MCP connection");
    }

    outcome
}

/// List capabilities for diagnostics only. Unknown capabilities are left for
/// the server to reject.
async fn log_capabilities(server: &str, connection: &mut dyn Connection) {
    match connection.list_tools().await {
        Ok(tools) => {
            let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
            let listed = if names.is_empty() {
                "none".to_string()
            } else {
                names.join(", ")
            };
            tracing::debug!(
                server = %server,
                tool_count = tools.len(),
                tools = %listed,
                "Connected to MCP server"
            );
        }
        Err(e) => {
            tracing::warn!(server = %server, error = %e, "Failed to list MCP tools");
        }
    }
}

/// Await `fut`, failing with `Timeout(reported)` once `limit` elapses.
async fn within<T>(
    limit: Option<Duration>,
    reported: Option<Duration>,
    fut: impl Future<Output = Result<T, BridgeErrorKind>>,
) -> Result<T, BridgeErrorKind> {
    match limit {
        None => fut.await,
        Some(limit) => tokio::time::timeout(limit, fut)
            .await
            .map_err(|_| BridgeErrorKind::Timeout(reported.unwrap_or(limit)))?,
    }
}
