//! Demo command handler.
//!
//! Runs one navigate, screenshot and docs search session end to end and
//! reports what each step kept out of the output.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use toolbridge_core::ImageFormat;
use toolbridge_tools::SearchOptions;
use toolbridge_tools::browser::{NavigateOptions, ScreenshotOptions, WaitUntil};

use crate::bootstrap::CliContext;
use crate::presentation::truncate_string;

const DOCS_QUERY: &str = "Puppeteer screenshot API options";

/// Execute the demo command.
///
/// # Errors
///
/// Stops at the first failing step.
pub async fn execute(ctx: &CliContext, url: String, screenshot_path: PathBuf) -> Result<()> {
    println!("=== Code-API Pattern Demo ===\n");
    let browser = ctx.browser();

    println!("Step 1: Navigating to {url}...");
    let mut navigate = NavigateOptions::new(url).wait_until(WaitUntil::NetworkIdle0);
    navigate.call = ctx.call();
    let page = browser.navigate(navigate).await.context("navigate step failed")?;
    println!("  Loaded: \"{}\"", page.title);
    println!("  Status: {}", page.status);
    println!("  Load time: {}ms", page.load_time_ms);
    println!("  Page HTML stayed with the server\n");

    println!("Step 2: Taking screenshot...");
    ensure_parent_dir(&screenshot_path).await?;
    let mut screenshot = ScreenshotOptions::new()
        .path(&screenshot_path)
        .full_page(true)
        .format(ImageFormat::Png);
    screenshot.call = ctx.call();
    let shot = browser
        .screenshot(screenshot)
        .await
        .context("screenshot step failed")?;
    if shot.saved {
        println!("  Saved: {}", screenshot_path.display());
    } else {
        println!("  Not saved (see log)");
    }
    println!("  Dimensions: {}x{}", shot.metadata.width, shot.metadata.height);
    println!("  Size: {}KB", shot.metadata.size_kb);
    println!("  Image data stayed on disk\n");

    println!("Step 3: Searching Puppeteer documentation...");
    let mut search = SearchOptions::new(DOCS_QUERY)
        .framework("puppeteer")
        .max_results(2);
    search.call = ctx.call();
    let docs = ctx
        .docs()
        .search(search)
        .await
        .context("docs step failed")?;
    println!("  Found {} results", docs.total_results);
    for (i, snippet) in docs.snippets.iter().enumerate() {
        println!(
            "  {}. {} (score: {})",
            i + 1,
            snippet.title,
            snippet.relevance_score
        );
        println!("     {}", truncate_string(&snippet.snippet, 100));
    }
    println!("  Full documentation stayed with the server\n");

    println!("Demo completed: 3 steps");
    Ok(())
}

async fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    Ok(())
}
