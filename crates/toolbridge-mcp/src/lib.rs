//! MCP stdio bridge.
//!
//! Resolves a logical server name to a launch command, opens a connection
//! for exactly one call, invokes a capability and hands back the raw
//! result envelope. Errors from every stage are wrapped into one
//! [`BridgeError`](toolbridge_core::BridgeError).
//!
//! ```rust,no_run
//! use toolbridge_core::ToolInvoker;
//! use toolbridge_mcp::Bridge;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let bridge = Bridge::discover()?;
//! let envelope = bridge.invoke("demo", "ping", serde_json::Map::new()).await?;
//! println!("{:?}", envelope.first_text());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

pub(crate) mod client;
pub mod bridge;
pub mod lifecycle;
pub mod registry;

pub use bridge::Bridge;
pub use client::StdioConnector;
pub use lifecycle::with_connection;
pub use registry::{EnvProvider, RegistryLocator, RegistrySource, SystemEnv, SystemSource};

#[cfg(test)]
use tempfile as _;
