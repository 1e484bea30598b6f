//! Server registry discovery.
//!
//! Finds the registry file (`.claude/mcp.json`) and maps a server name to
//! its [`LaunchSpec`](toolbridge_core::LaunchSpec).
//!
//! ## Search order
//!
//! 1. `<cwd>/.claude/mcp.json`
//! 2. `<cwd>/../.claude/mcp.json`
//! 3. `$TOOLBRIDGE_MCP_CONFIG` if set, otherwise `<home>/.claude/mcp.json`
//!
//! The first candidate that reads and parses wins. Later candidates are
//! only tried when an earlier one fails; files are never merged.
//!
//! ## Layout
//!
//! - `source`: file reading trait (injectable for testing)
//! - `env`: environment variable access trait (injectable for testing)
//! - `locate`: candidate construction and resolution

mod env;
mod locate;
mod source;

pub use env::{EnvProvider, SystemEnv};
pub use locate::{CONFIG_ENV_VAR, RegistryLocator, default_candidates};
pub use source::{RegistrySource, SystemSource};

#[cfg(test)]
pub use env::MockEnv;
#[cfg(test)]
pub use source::MockSource;
