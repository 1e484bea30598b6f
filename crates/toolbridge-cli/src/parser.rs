//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use clap::Parser;
use std::path::PathBuf;

use crate::commands::Commands;

/// Command-line interface for the MCP tool bridge.
///
/// Global options apply to every subcommand that talks to a tool server.
#[derive(Parser)]
#[command(name = "toolbridge")]
#[command(about = "Call MCP tool servers and keep their large outputs local")]
#[command(version)]
pub struct Cli {
    /// Read the server registry from this file instead of searching for it
    #[arg(long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Give up on a tool call after this many milliseconds
    #[arg(long = "timeout-ms", global = true, env = "TOOLBRIDGE_TIMEOUT_MS")]
    pub timeout_ms: Option<u64>,

    /// Report action success only with positive evidence from the server
    #[arg(long, global = true)]
    pub strict: bool,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
