//! Call request types.

use serde_json::{Map, Value};
use std::time::Duration;

/// A single capability invocation against a named server.
///
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct CallRequest {
    server: String,
    capability: String,
    arguments: Map<String, Value>,
}

impl CallRequest {
    pub fn new(
        server: impl Into<String>,
        capability: impl Into<String>,
        arguments: Map<String, Value>,
    ) -> Self {
        Self {
            server: server.into(),
            capability: capability.into(),
            arguments,
        }
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    pub fn capability(&self) -> &str {
        &self.capability
    }

    pub const fn arguments(&self) -> &Map<String, Value> {
        &self.arguments
    }
}

/// Per-call options carried by every wrapper.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallOptions {
    /// Deadline covering spawn, handshake and invocation. `None` waits forever.
    pub timeout: Option<Duration>,
}

impl CallOptions {
    #[must_use]
    pub const fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_call_request_accessors() {
        let mut args = Map::new();
        args.insert("url".into(), json!("https://example.com"));

        let request = CallRequest::new("puppeteer", "puppeteer_navigate", args);
        assert_eq!(request.server(), "puppeteer");
        assert_eq!(request.capability(), "puppeteer_navigate");
        assert_eq!(request.arguments()["url"], "https://example.com");
    }

    #[test]
    fn test_default_options_have_no_deadline() {
        assert!(CallOptions::default().timeout.is_none());
        assert_eq!(
            CallOptions::with_timeout(Duration::from_secs(5)).timeout,
            Some(Duration::from_secs(5))
        );
    }
}
