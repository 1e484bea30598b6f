//! Browser command handlers.
//!
//! Thin wrappers over [`BrowserTools`](toolbridge_tools::BrowserTools) that
//! print the compact result as JSON.

use std::path::PathBuf;

use anyhow::Result;
use toolbridge_core::ImageFormat;
use toolbridge_tools::browser::{
    ClickOptions, NavigateOptions, ScreenshotOptions, TypeOptions, WaitUntil,
};

use crate::bootstrap::CliContext;
use crate::presentation::print_json;

/// Execute the navigate command.
pub async fn navigate(ctx: &CliContext, url: String, wait_until: WaitUntil) -> Result<()> {
    let mut options = NavigateOptions::new(url).wait_until(wait_until);
    options.call = ctx.call();

    let result = ctx.browser().navigate(options).await?;
    print_json(&result)
}

/// Execute the click command.
pub async fn click(
    ctx: &CliContext,
    selector: String,
    wait_for_navigation: bool,
    delay_ms: Option<u64>,
) -> Result<()> {
    let mut options = ClickOptions::new(selector).wait_for_navigation(wait_for_navigation);
    options.delay_ms = delay_ms;
    options.call = ctx.call();

    let result = ctx.browser().click(options).await?;
    print_json(&result)
}

/// Execute the fill command.
pub async fn fill(ctx: &CliContext, selector: String, text: String) -> Result<()> {
    let mut options = TypeOptions::new(selector, text);
    options.call = ctx.call();

    let result = ctx.browser().fill(options).await?;
    print_json(&result)
}

/// Arguments for the screenshot command.
#[derive(Debug, Clone, Default)]
pub struct ScreenshotArgs {
    pub path: Option<PathBuf>,
    pub full_page: bool,
    pub format: ImageFormat,
    pub quality: Option<u8>,
}

/// Execute the screenshot command.
///
/// The image stays on disk; only its metadata is printed.
pub async fn screenshot(ctx: &CliContext, args: ScreenshotArgs) -> Result<()> {
    let options = screenshot_options(ctx, args);
    let result = ctx.browser().screenshot(options).await?;

    if !result.saved {
        tracing::info!("Screenshot was not written to disk");
    }
    print_json(&result)
}

fn screenshot_options(ctx: &CliContext, args: ScreenshotArgs) -> ScreenshotOptions {
    let mut options = ScreenshotOptions::new()
        .full_page(args.full_page)
        .format(args.format);
    options.path = args.path;
    options.quality = args.quality;
    options.call = ctx.call();
    options
}
