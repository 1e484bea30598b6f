//! Bridge error types.
//!
//! Every failure of a bridge call is reported as one `BridgeError` naming
//! the server, the capability and the underlying `BridgeErrorKind`, so
//! callers never branch on where a failure came from.

use std::time::Duration;
use thiserror::Error;

use crate::domain::RegistryAttempt;

/// Cause of a failed bridge call.
#[derive(Debug, Error)]
pub enum BridgeErrorKind {
    /// No registry file could be read and parsed at any candidate path.
    #[error(
        "MCP configuration not found. Create .claude/mcp.json with server configurations. Searched:\n{}",
        format_attempts(.attempts)
    )]
    ConfigNotFound { attempts: Vec<RegistryAttempt> },

    /// The registry parsed but does not list the requested server.
    #[error(
        "MCP server '{server}' not found in configuration. Available servers: {}",
        format_names(.available)
    )]
    ServerNotRegistered {
        server: String,
        available: Vec<String>,
    },

    /// The server is listed but its entry is not a stdio launch entry.
    #[error("MCP server '{server}' has an invalid configuration entry: {reason}")]
    InvalidServerEntry { server: String, reason: String },

    /// Spawning the server or completing the handshake failed.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server rejected or failed the capability call.
    #[error("Tool invocation failed: {message}")]
    ToolInvocation { code: Option<i64>, message: String },

    /// The call did not finish before its deadline.
    #[error("Call timed out after {}ms", .0.as_millis())]
    Timeout(Duration),
}

impl BridgeErrorKind {
    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport(reason.into())
    }

    pub fn tool(message: impl Into<String>) -> Self {
        Self::ToolInvocation {
            code: None,
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from(self)
    }
}

fn format_attempts(attempts: &[RegistryAttempt]) -> String {
    if attempts.is_empty() {
        return "  (no candidates checked)".to_string();
    }
    attempts
        .iter()
        .map(|a| format!("  ✗ {}: {}", a.candidate.display(), a.outcome))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_names(names: &[String]) -> String {
    if names.is_empty() {
        "(none)".to_string()
    } else {
        names.join(", ")
    }
}

/// A failed bridge call, wrapped uniformly.
#[derive(Debug, Error)]
#[error(
    "MCP bridge call failed: {kind}\nServer: {server}, Tool: {capability}\nCheck that MCP servers are properly configured in .claude/mcp.json"
)]
pub struct BridgeError {
    pub server: String,
    pub capability: String,
    #[source]
    pub kind: BridgeErrorKind,
}

impl BridgeError {
    pub fn new(
        server: impl Into<String>,
        capability: impl Into<String>,
        kind: BridgeErrorKind,
    ) -> Self {
        Self {
            server: server.into(),
            capability: capability.into(),
            kind,
        }
    }

    pub const fn kind(&self) -> &BridgeErrorKind {
        &self.kind
    }

    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }
}

/// Coarse error categories, used for exit codes and log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Registry missing or server not listed.
    Configuration,
    /// Spawn, handshake or I/O failure.
    Transport,
    /// The tool itself reported failure.
    Tool,
    /// Deadline exceeded.
    Timeout,
}

impl From<&BridgeErrorKind> for ErrorCategory {
    fn from(kind: &BridgeErrorKind) -> Self {
        match kind {
            BridgeErrorKind::ConfigNotFound { .. }
            | BridgeErrorKind::ServerNotRegistered { .. }
            | BridgeErrorKind::InvalidServerEntry { .. } => Self::Configuration,
            BridgeErrorKind::Transport(_) => Self::Transport,
            BridgeErrorKind::ToolInvocation { .. } => Self::Tool,
            BridgeErrorKind::Timeout(_) => Self::Timeout,
        }
    }
}
