//! Docs command handler.

use anyhow::Result;
use toolbridge_tools::SearchOptions;

use crate::bootstrap::CliContext;
use crate::presentation::print_json;

/// Execute the docs command.
///
/// Prints the bounded snippet list, never the full documentation.
pub async fn execute(
    ctx: &CliContext,
    query: String,
    framework: Option<String>,
    max_results: usize,
) -> Result<()> {
    let mut options = SearchOptions::new(query).max_results(max_results);
    options.framework = framework;
    options.call = ctx.call();

    let result = ctx.docs().search(options).await?;
    print_json(&result)
}
