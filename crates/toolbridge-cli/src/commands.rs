//! Main commands enum.
//!
//! This module defines the available commands for the CLI tool.

use clap::Subcommand;
use std::path::PathBuf;
use toolbridge_core::ImageFormat;
use toolbridge_tools::browser::WaitUntil;

/// Available commands.
///
/// Tool commands print only compact JSON metadata; raw tool output
/// (page HTML, image data, full documentation) is never printed.
#[derive(Subcommand)]
pub enum Commands {
    /// List servers in the MCP registry
    Servers,

    /// Call any capability and print a size-only summary of the result
    Invoke {
        /// Server name from the registry
        server: String,
        /// Capability (tool) name on that server
        capability: String,
        /// Arguments as a JSON object
        #[arg(long, default_value = "{}")]
        args: String,
    },

    /// Navigate the browser to a URL
    Navigate {
        url: String,
        /// Page event to wait for: load, domcontentloaded, networkidle0, networkidle2
        #[arg(long, default_value = "load")]
        wait_until: WaitUntil,
    },

    /// Click an element by CSS selector
    Click {
        selector: String,
        /// Wait for navigation triggered by the click
        #[arg(long)]
        wait_for_navigation: bool,
        /// Delay between mouse down and up, in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,
    },

    /// Fill an input field
    Fill {
        selector: String,
        text: String,
    },

    /// Take a screenshot and save it locally
    Screenshot {
        /// Where to save the image; without it nothing is written
        #[arg(long)]
        path: Option<PathBuf>,
        /// Capture the full scrollable page
        #[arg(long)]
        full_page: bool,
        /// Image format: png or jpeg
        #[arg(long, default_value = "png")]
        format: ImageFormat,
        /// JPEG quality (0-100)
        #[arg(long)]
        quality: Option<u8>,
    },

    /// Search library documentation and print the top snippets
    Docs {
        query: String,
        /// Library or framework to search
        #[arg(short, long)]
        framework: Option<String>,
        /// Number of snippets to return
        #[arg(short = 'n', long, default_value_t = toolbridge_tools::docs::DEFAULT_MAX_RESULTS)]
        max_results: usize,
    },

    /// Route requests to a specialist agent
    Route {
        /// Requests to route; with --batch and none given, a built-in sample set is used
        requests: Vec<String>,
        /// Route all requests concurrently and print a confidence summary
        #[arg(short, long)]
        batch: bool,
    },

    /// Run navigate, screenshot and docs search end to end
    Demo {
        /// Screenshot destination
        #[arg(long, default_value = "./screenshots/demo-example-com.png")]
        screenshot_path: PathBuf,
        /// Page to open
        #[arg(long, default_value = "https://example.com")]
        url: String,
    },
}
