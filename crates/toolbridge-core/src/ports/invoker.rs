//! The single entry point wrappers call through.

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::BridgeError;
use crate::domain::{CallOptions, CallRequest, ResultEnvelope};

/// Anything that can carry a capability call to a server and bring back
/// its envelope.
#[async_trait]
pub trait ToolInvoker: Send + Sync {
    async fn invoke_with(
        &self,
        request: CallRequest,
        options: CallOptions,
    ) -> Result<ResultEnvelope, BridgeError>;

    /// Invoke with default options.
    async fn invoke(
        &self,
        server: &str,
        capability: &str,
        arguments: Map<String, Value>,
    ) -> Result<ResultEnvelope, BridgeError> {
        self.invoke_with(
            CallRequest::new(server, capability, arguments),
            CallOptions::default(),
        )
        .await
    }
}

#[async_trait]
impl<T: ToolInvoker + ?Sized> ToolInvoker for std::sync::Arc<T> {
    async fn invoke_with(
        &self,
        request: CallRequest,
        options: CallOptions,
    ) -> Result<ResultEnvelope, BridgeError> {
        (**self).invoke_with(request, options).await
    }
}
