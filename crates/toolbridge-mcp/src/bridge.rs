//! Tool invocation bridge.
//!
//! The public entry point: resolve the server, open a connection, call the
//! capability, close, and hand back the raw envelope. Callers get either
//! the envelope or one `BridgeError` naming server, capability and cause.

use crate::client::StdioConnector;
use crate::lifecycle::with_connection;
use crate::registry::RegistryLocator;
use async_trait::async_trait;
use std::sync::Arc;
use toolbridge_core::{
    BridgeError, BridgeErrorKind, CallOptions, CallRequest, Connector, ResultEnvelope,
    ServerRegistry, ToolInvoker,
};

/// Bridge from host code to MCP tool servers.
///
/// Each call re-reads the registry and spawns its own server process, so
/// calls share no state. Callers that need one browser session across
/// several actions must serialize those calls themselves.
pub struct Bridge {
    locator: RegistryLocator,
    connector: Arc<dyn Connector>,
}

impl Bridge {
    /// Bridge over the default registry locations and stdio transport.
    pub fn discover() -> std::io::Result<Self> {
        Ok(Self::new(
            RegistryLocator::discover()?,
            Arc::new(StdioConnector::new()),
        ))
    }

    /// Bridge with injected dependencies.
    pub fn new(locator: RegistryLocator, connector: Arc<dyn Connector>) -> Self {
        Self { locator, connector }
    }

    pub const fn locator(&self) -> &RegistryLocator {
        &self.locator
    }

    /// Load the registry without calling anything.
    ///
    /// No server or capability is involved, so the bare cause is returned.
    pub fn registry(&self) -> Result<ServerRegistry, BridgeErrorKind> {
        self.locator.load().map(|(registry, _path)| registry)
    }
}

#[async_trait]
impl ToolInvoker for Bridge {
    async fn invoke_with(
        &self,
        request: CallRequest,
        options: CallOptions,
    ) -> Result<ResultEnvelope, BridgeError> {
        let server = request.server().to_string();
        let capability = request.capability().to_string();

        tracing::info!(
            server = %server,
            capability = %capability,
            argument_keys = ?request.arguments().keys().collect::<Vec<_>>(),
            "Calling MCP tool"
        );

        let wrap = |kind| BridgeError::new(server.as_str(), capability.as_str(), kind);

        let spec = self.locator.resolve(&server).map_err(wrap)?;

        let call_capability = capability.clone();
        let arguments = request.arguments().clone();
        let result = with_connection(
            self.connector.as_ref(),
            &server,
            &spec,
            options.timeout,
            move |conn| {
                Box::pin(async move { conn.call_tool(&call_capability, &arguments).await })
            },
        )
        .await;

        match result {
            Ok(envelope) => {
                tracing::info!(
                    server = %server,
                    capability = %capability,
                    blocks = envelope.content.len(),
                    "MCP tool executed successfully"
                );
                Ok(envelope)
            }
            Err(kind) => {
                tracing::error!(
                    server = %server,
                    capability = %capability,
                    error = %kind,
                    "MCP tool call failed"
                );
                Err(wrap(kind))
            }
        }
    }
}
