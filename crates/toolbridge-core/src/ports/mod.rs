//! Port definitions.
//!
//! The bridge talks to tool servers only through `Connector`/`Connection`,
//! and wrappers talk to the bridge only through `ToolInvoker`. Production
//! implementations live in `toolbridge-mcp`; tests substitute fakes.

mod bridge_error;
mod invoker;
mod transport;

pub use bridge_error::{BridgeError, BridgeErrorKind, ErrorCategory};
pub use invoker::ToolInvoker;
pub use transport::{Connection, Connector, ToolDescriptor};
