//! Transport port: how the bridge reaches a tool server.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::BridgeErrorKind;
use crate::domain::{LaunchSpec, ResultEnvelope};

/// A capability advertised by a server during the handshake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// An established connection to one server process.
///
/// Owned by exactly one in-flight call and never shared.
#[async_trait]
pub trait Connection: Send {
    /// List the capabilities the server exposes.
    async fn list_tools(&mut self) -> Result<Vec<ToolDescriptor>, BridgeErrorKind>;

    /// Invoke one capability and return its raw envelope.
    async fn call_tool(
        &mut self,
        capability: &str,
        arguments: &Map<String, Value>,
    ) -> Result<ResultEnvelope, BridgeErrorKind>;

    /// Shut the connection down and release the server process.
    async fn close(&mut self) -> Result<(), BridgeErrorKind>;
}

/// Factory for connections.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Spawn the server described by `spec` and complete the protocol
    /// handshake.
    ///
    /// On failure the implementation cleans up whatever it started; the
    /// caller has nothing to close.
    async fn connect(
        &self,
        server: &str,
        spec: &LaunchSpec,
    ) -> Result<Box<dyn Connection>, BridgeErrorKind>;
}
