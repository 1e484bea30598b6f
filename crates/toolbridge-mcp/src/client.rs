//! MCP JSON-RPC client for communicating with MCP servers.
//!
//! Implements the MCP protocol over stdio (JSON-RPC 2.0, one message per
//! line). Reference: <https://spec.modelcontextprotocol.io/>

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use toolbridge_core::{
    BridgeErrorKind, Connection, Connector, LaunchSpec, ResultEnvelope, ToolDescriptor,
};

/// Protocol version sent in `initialize`.
const PROTOCOL_VERSION: &str = "2024-11-05";

/// How long a closed-stdin server gets to exit before it is killed.
const EXIT_GRACE: Duration = Duration::from_secs(2);

/// Errors that can occur during MCP client operations.
#[derive(Debug, Error)]
pub enum McpClientError {
    #[error("Failed to spawn MCP server process: {0}")]
    SpawnFailed(String),

    #[error("Failed to communicate with MCP server: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("MCP protocol error: {0}")]
    ProtocolError(String),

    #[error("MCP server returned error: code={code}, message={message}")]
    ServerError { code: i64, message: String },

    #[error("Server not connected")]
    NotConnected,
}

impl From<McpClientError> for BridgeErrorKind {
    fn from(err: McpClientError) -> Self {
        Self::Transport(err.to_string())
    }
}

/// JSON-RPC 2.0 request.
#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    params: Option<Value>,
}

/// JSON-RPC 2.0 response.
#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    id: Option<u64>,
    /// Set on server-initiated requests and notifications, never on responses.
    method: Option<String>,
    result: Option<Value>,
    error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    fn answers(&self, id: u64) -> bool {
        self.method.is_none() && self.id == Some(id)
    }
}

/// JSON-RPC 2.0 error.
#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

/// MCP initialize result.
#[derive(Debug, Clone, Deserialize)]
struct InitializeResult {
    #[serde(rename = "protocolVersion")]
    protocol_version: String,
    #[serde(rename = "serverInfo")]
    server_info: ServerInfo,
    #[serde(default)]
    capabilities: ServerCapabilities,
}

/// Server information from initialize.
#[derive(Debug, Clone, Deserialize)]
struct ServerInfo {
    name: String,
    #[serde(default)]
    version: Option<String>,
}

/// Server capabilities. Only `tools` matters to the bridge.
#[derive(Debug, Clone, Deserialize, Default)]
struct ServerCapabilities {
    #[serde(default)]
    tools: Option<Value>,
}

/// Spawns stdio MCP servers.
#[derive(Debug, Clone)]
pub struct StdioConnector {
    client_name: String,
}

impl StdioConnector {
    pub fn new() -> Self {
        Self {
            client_name: "toolbridge".to_string(),
        }
    }

    /// Override the `clientInfo.name` sent during initialize.
    #[must_use]
    pub fn with_client_name(mut self, name: impl Into<String>) -> Self {
        self.client_name = name.into();
        self
    }
}

impl Default for StdioConnector {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Connector for StdioConnector {
    async fn connect(
        &self,
        server: &str,
        spec: &LaunchSpec,
    ) -> Result<Box<dyn Connection>, BridgeErrorKind> {
        let mut client = McpClient::spawn(server, spec)?;

        if let Err(e) = client.initialize(&self.client_name).await {
            // Handshake failed: the caller never sees this connection, so
            // reap the process here.
            client.shutdown().await.ok();
            return Err(e.into());
        }

        Ok(Box::new(client))
    }
}

/// Client for one MCP server process.
pub struct McpClient {
    server: String,
    process: Option<Child>,
    stdin: Option<ChildStdin>,
    stdout: Option<BufReader<ChildStdout>>,
    next_id: u64,
    capabilities: Option<ServerCapabilities>,
}

impl McpClient {
    /// Spawn the server process. No protocol traffic yet.
    fn spawn(server: &str, spec: &LaunchSpec) -> Result<Self, McpClientError> {
        if spec.command.is_empty() {
            return Err(McpClientError::SpawnFailed(format!(
                "Server '{server}' has an empty command"
            )));
        }

        let mut command = Command::new(&spec.command);
        command
            .args(&spec.args)
            .envs(&spec.env)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);

        let mut child = command.spawn().map_err(|e| {
            McpClientError::SpawnFailed(format!(
                "Failed to spawn '{}': {e}\nArgs: {:?}",
                spec.command, spec.args
            ))
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| McpClientError::SpawnFailed("Failed to get stdin".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| McpClientError::SpawnFailed("Failed to get stdout".to_string()))?;

        tracing::debug!(server = %server, command = %spec.command, "Spawned MCP server");

        Ok(Self {
            server: server.to_string(),
            process: Some(child),
            stdin: Some(stdin),
            stdout: Some(BufReader::new(stdout)),
            next_id: 1,
            capabilities: None,
        })
    }

    /// Send the initialize request and the initialized notification.
    async fn initialize(&mut self, client_name: &str) -> Result<(), McpClientError> {
        let params = json!({
            "protocolVersion": PROTOCOL_VERSION,
            "clientInfo": {
                "name": client_name,
                "version": env!("CARGO_PKG_VERSION")
            },
            "capabilities": {}
        });

        let result: InitializeResult = self.request("initialize", Some(params)).await?;

        tracing::debug!(
            server = %self.server,
            server_name = %result.server_info.name,
            server_version = ?result.server_info.version,
            protocol_version = %result.protocol_version,
            "MCP session initialized"
        );

        self.capabilities = Some(result.capabilities);
        self.notify("notifications/initialized").await
    }

    /// Send a JSON-RPC request and wait for the response with the same id.
    ///
    /// Blank lines, non-JSON output (e.g. npx banners) and messages for other
    /// ids are skipped.
    async fn request<T: DeserializeOwned>(
        &mut self,
        method: &str,
        params: Option<Value>,
    ) -> Result<T, McpClientError> {
        let id = self.next_id;
        self.next_id += 1;

        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id,
            method,
            params,
        };
        self.write_line(&serde_json::to_string(&request)?).await?;

        let reader = self.stdout.as_mut().ok_or(McpClientError::NotConnected)?;
        let mut line = String::new();

        let response = loop {
            line.clear();
            if reader.read_line(&mut line).await? == 0 {
                return Err(McpClientError::ProtocolError(
                    "Server closed connection".to_string(),
                ));
            }

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            match serde_json::from_str::<JsonRpcResponse>(trimmed) {
                Ok(response) if response.answers(id) => break response,
                Ok(_) => {
                    tracing::trace!(line = trimmed, "Skipping message that is not our response");
                }
                Err(_) => {
                    tracing::debug!(line = trimmed, "Skipping non-JSON-RPC output");
                }
            }
        };

        if let Some(err) = response.error {
            return Err(McpClientError::ServerError {
                code: err.code,
                message: err.message,
            });
        }

        let result = response.result.ok_or_else(|| {
            McpClientError::ProtocolError("Missing result in response".to_string())
        })?;

        Ok(serde_json::from_value(result)?)
    }

    /// Send a JSON-RPC notification (no response expected).
    async fn notify(&mut self, method: &str) -> Result<(), McpClientError> {
        let notification = json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": {}
        });
        self.write_line(&serde_json::to_string(&notification)?)
            .await
    }

    async fn write_line(&mut self, line: &str) -> Result<(), McpClientError> {
        let stdin = self.stdin.as_mut().ok_or(McpClientError::NotConnected)?;
        stdin.write_all(line.as_bytes()).await?;
        stdin.write_all(b"\n").await?;
        stdin.flush().await?;
        Ok(())
    }

    /// Close stdin, give the process a moment to exit, then kill it.
    async fn shutdown(&mut self) -> Result<(), McpClientError> {
        // Dropping stdin signals EOF to the server
        self.stdin = None;
        self.stdout = None;

        let Some(mut process) = self.process.take() else {
            return Ok(());
        };

        match tokio::time::timeout(EXIT_GRACE, process.wait()).await {
            Ok(Ok(status)) => {
                tracing::debug!(server = %self.server, %status, "MCP server exited");
                Ok(())
            }
            Ok(Err(e)) => Err(e.into()),
            Err(_) => {
                tracing::debug!(server = %self.server, "MCP server did not exit, killing");
                process.kill().await?;
                Ok(())
            }
        }
    }
}

#[async_trait]
impl Connection for McpClient {
    async fn list_tools(&mut self) -> Result<Vec<ToolDescriptor>, BridgeErrorKind> {
        // Servers that do not advertise tools are not asked
        if self
            .capabilities
            .as_ref()
            .and_then(|c| c.tools.as_ref())
            .is_none()
        {
            return Ok(Vec::new());
        }

        let result: Value = self.request("tools/list", None).await?;
        let tools = result.get("tools").cloned().unwrap_or_else(|| json!([]));
        serde_json::from_value(tools).map_err(|e| McpClientError::from(e).into())
    }

    async fn call_tool(
        &mut self,
        capability: &str,
        arguments: &Map<String, Value>,
    ) -> Result<ResultEnvelope, BridgeErrorKind> {
        let params = json!({
            "name": capability,
            "arguments": arguments
        });

        let result: Value = match self.request("tools/call", Some(params)).await {
            Ok(result) => result,
            Err(McpClientError::ServerError { code, message }) => {
                return Err(BridgeErrorKind::ToolInvocation {
                    code: Some(code),
                    message,
                });
            }
            Err(e) => return Err(e.into()),
        };

        let envelope = ResultEnvelope::from_value(result);
        if envelope.is_error {
            let message = envelope.first_text().unwrap_or("Unknown error");
            return Err(BridgeErrorKind::tool(message));
        }

        Ok(envelope)
    }

    async fn close(&mut self) -> Result<(), BridgeErrorKind> {
        self.shutdown().await.map_err(Into::into)
    }
}
