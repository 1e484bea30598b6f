//! Core domain types and ports for toolbridge.
//!
//! This crate is the dependency root of the workspace. It holds the shapes
//! that cross the bridge boundary (launch specs, call requests, result
//! envelopes, artifact metadata) and the traits the bridge is wired through.
//! It does no process or network I/O itself.

#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    ArtifactMetadata, AttemptOutcome, CallOptions, CallRequest, ContentBlock, EnvelopeSummary,
    ImageFormat, LaunchSpec, RegistryAttempt, ResultEnvelope, ServerRegistry,
};
pub use ports::{
    BridgeError, BridgeErrorKind, Connection, Connector, ErrorCategory, ToolDescriptor,
    ToolInvoker,
};

#[cfg(test)]
use tokio as _;
