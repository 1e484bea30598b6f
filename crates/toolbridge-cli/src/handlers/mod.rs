//! Command handlers.
//!
//! Handlers follow one pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<()>`
//! - Build wrapper options from CLI input, call the wrapper, print metadata.
//!
//! Raw tool output never reaches stdout.

pub mod browser;
pub mod demo;
pub mod docs;
pub mod invoke;
pub mod route;
pub mod servers;
