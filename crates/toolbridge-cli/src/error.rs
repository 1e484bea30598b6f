//! CLI-specific error types and mappings.
//!
//! This module provides error types for the CLI adapter and mappings
//! from bridge and router errors to exit codes.

use thiserror::Error;
use toolbridge_core::{BridgeError, BridgeErrorKind, ErrorCategory};
use toolbridge_router::RouterError;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Argument parsing error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// Registry missing or server not listed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Server could not be spawned or reached.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The tool reported failure.
    #[error("Tool error: {0}")]
    Tool(String),

    /// A call ran past its deadline.
    #[error("Timed out: {0}")]
    Timeout(String),

    /// Routing backend failure.
    #[error("Router error: {0}")]
    Router(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Tool(_) => 1,
            Self::Arguments(_) => 2,                    // EX_USAGE
            Self::Transport(_) | Self::Router(_) => 69, // EX_UNAVAILABLE
            Self::Io(_) => 74,                          // EX_IOERR
            Self::Timeout(_) => 75,                     // EX_TEMPFAIL
            Self::Config(_) => 78,                      // EX_CONFIG
        }
    }
}

impl CliError {
    fn categorized(category: ErrorCategory, message: String) -> Self {
        match category {
            ErrorCategory::Configuration => Self::Config(message),
            ErrorCategory::Transport => Self::Transport(message),
            ErrorCategory::Tool => Self::Tool(message),
            ErrorCategory::Timeout => Self::Timeout(message),
        }
    }
}

impl From<&BridgeError> for CliError {
    fn from(err: &BridgeError) -> Self {
        Self::categorized(err.category(), err.to_string())
    }
}

impl From<&BridgeErrorKind> for CliError {
    fn from(kind: &BridgeErrorKind) -> Self {
        Self::categorized(kind.category(), kind.to_string())
    }
}

impl From<&RouterError> for CliError {
    fn from(err: &RouterError) -> Self {
        match err {
            RouterError::MissingApiKey => Self::Config(err.to_string()),
            _ => Self::Router(err.to_string()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Exit code for an error that reached `main`.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    if let Some(cli) = err.downcast_ref::<CliError>() {
        return cli.exit_code();
    }
    if let Some(bridge) = err.downcast_ref::<BridgeError>() {
        return CliError::from(bridge).exit_code();
    }
    if let Some(kind) = err.downcast_ref::<BridgeErrorKind>() {
        return CliError::from(kind).exit_code();
    }
    if let Some(router) = err.downcast_ref::<RouterError>() {
        return CliError::from(router).exit_code();
    }
    if err.downcast_ref::<std::io::Error>().is_some() {
        return 74;
    }
    1
}
