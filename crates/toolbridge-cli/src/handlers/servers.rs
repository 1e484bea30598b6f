//! Servers command handler.
//!
//! Lists the registry entries the bridge can launch.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::presentation::{print_separator, truncate_string};

/// Execute the servers command.
///
/// # Errors
///
/// Fails when no registry can be found or parsed.
pub fn execute(ctx: &CliContext) -> Result<()> {
    let registry = ctx.bridge().registry()?;

    if registry.is_empty() {
        println!("No MCP servers configured.");
        return Ok(());
    }

    println!("Found {} MCP server(s):\n", registry.len());
    println!("{:<20} Command", "Name");
    print_separator(72);

    for name in registry.names() {
        let line = match registry.launch_spec(&name) {
            Some(Ok(spec)) => std::iter::once(spec.command.as_str())
                .chain(spec.args.iter().map(String::as_str))
                .collect::<Vec<_>>()
                .join(" "),
            _ => "(not a stdio server)".to_string(),
        };
        println!("{:<20} {}", truncate_string(&name, 20), truncate_string(&line, 50));
    }

    Ok(())
}
