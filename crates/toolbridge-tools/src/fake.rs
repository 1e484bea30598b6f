//! Scripted `ToolInvoker` for wrapper tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use toolbridge_core::{
    BridgeError, BridgeErrorKind, CallOptions, CallRequest, ResultEnvelope, ToolInvoker,
};

/// Answers each capability with a canned outcome and records every call.
#[derive(Default)]
pub struct FakeInvoker {
    responses: HashMap<String, Result<ResultEnvelope, String>>,
    calls: Mutex<Vec<(CallRequest, CallOptions)>>,
}

impl FakeInvoker {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn respond(mut self, capability: &str, envelope: ResultEnvelope) -> Self {
        self.responses.insert(capability.to_string(), Ok(envelope));
        self
    }

    #[must_use]
    pub fn fail(mut self, capability: &str, message: &str) -> Self {
        self.responses
            .insert(capability.to_string(), Err(message.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<(CallRequest, CallOptions)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ToolInvoker for FakeInvoker {
    async fn invoke_with(
        &self,
        request: CallRequest,
        options: CallOptions,
    ) -> Result<ResultEnvelope, BridgeError> {
        self.calls.lock().unwrap().push((request.clone(), options));

        match self.responses.get(request.capability()) {
            Some(Ok(envelope)) => Ok(envelope.clone()),
            Some(Err(message)) => Err(BridgeError::new(
                request.server(),
                request.capability(),
                BridgeErrorKind::tool(message.clone()),
            )),
            None => Err(BridgeError::new(
                request.server(),
                request.capability(),
                BridgeErrorKind::tool(format!("Unknown tool: {}", request.capability())),
            )),
        }
    }
}
