//! Typed tool wrappers for the toolbridge MCP bridge.
//!
//! Wrappers call through the [`ToolInvoker`](toolbridge_core::ToolInvoker)
//! port and turn the raw envelope into a compact result:
//!
//! - `extract`: extraction rules and their defaults
//! - `artifact`: base64 image persistence
//! - `browser`: navigate, click, fill and screenshot
//! - `docs`: documentation search

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

pub mod artifact;
pub mod browser;
pub mod docs;
pub mod extract;

#[cfg(test)]
mod fake;

pub use artifact::{Persisted, PersistenceError, estimate_size_kb, persist};
pub use browser::BrowserTools;
pub use docs::{DocsSearch, SearchOptions, SearchResult};
pub use extract::{CodeSnippet, ExtractionPolicy};

// Only used by integration tests
#[cfg(test)]
use toolbridge_mcp as _;
