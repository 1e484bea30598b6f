//! Command-line adapter for toolbridge.
//!
//! Wires the MCP bridge, the tool wrappers and the semantic router behind
//! one `toolbridge` binary. Every command prints compact metadata; large
//! tool outputs stay on disk or with the server.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Used only by the binary.
use dotenvy as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;

pub use bootstrap::{CliContext, bootstrap};
pub use commands::Commands;
pub use error::{CliError, exit_code};
pub use parser::Cli;
