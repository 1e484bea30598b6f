//! Browser automation wrappers over the puppeteer MCP server.
//!
//! Each action issues one bridge call and returns page or artifact
//! metadata. Page content and image bytes never leave this module.
//!
//! Every call opens its own server connection, so browser state left by
//! one action is only visible to the next if the server keeps it between
//! sessions. Run actions that depend on each other sequentially.

mod types;

pub use types::{
    ClickOptions, ClickResult, NavigateOptions, NavigateResult, ScreenshotOptions,
    ScreenshotResult, TypeOptions, TypeResult, WaitUntil,
};

use crate::artifact;
use crate::extract::{self, ExtractionPolicy};
use serde_json::{Map, Value, json};
use std::time::Instant;
use toolbridge_core::{ArtifactMetadata, BridgeError, CallRequest, ToolInvoker};

/// Server name browser actions are sent to unless overridden.
pub const DEFAULT_SERVER: &str = "puppeteer";

const NAVIGATE: &str = "puppeteer_navigate";
const CLICK: &str = "puppeteer_click";
const FILL: &str = "puppeteer_fill";
const SCREENSHOT: &str = "puppeteer_screenshot";

/// Typed browser actions.
pub struct BrowserTools<I> {
    invoker: I,
    server: String,
    policy: ExtractionPolicy,
}

impl<I: ToolInvoker> BrowserTools<I> {
    pub fn new(invoker: I) -> Self {
        Self {
            invoker,
            server: DEFAULT_SERVER.to_string(),
            policy: ExtractionPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_server(mut self, server: impl Into<String>) -> Self {
        self.server = server.into();
        self
    }

    #[must_use]
    pub const fn with_policy(mut self, policy: ExtractionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Navigate to a URL and report title, status and load time.
    pub async fn navigate(&self, options: NavigateOptions) -> Result<NavigateResult, BridgeError> {
        let mut args = Map::new();
        args.insert("url".into(), json!(options.url));
        args.insert("waitUntil".into(), json!(options.wait_until.as_str()));

        let started = Instant::now();
        let envelope = self
            .invoker
            .invoke_with(CallRequest::new(&self.server, NAVIGATE, args), options.call)
            .await?;
        let load_time_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let result = NavigateResult {
            title: extract::page_title(&envelope),
            status: extract::status_code(&envelope, &self.policy),
            url: options.url,
            load_time_ms,
        };

        tracing::debug!(
            url = %result.url,
            status = result.status,
            load_time_ms = result.load_time_ms,
            "Navigated"
        );
        Ok(result)
    }

    /// Click the element matching a CSS selector.
    pub async fn click(&self, options: ClickOptions) -> Result<ClickResult, BridgeError> {
        let mut args = Map::new();
        args.insert("selector".into(), json!(options.selector));
        args.insert(
            "waitForNavigation".into(),
            json!(options.wait_for_navigation),
        );
        if let Some(delay) = options.delay_ms {
            args.insert("delay".into(), json!(delay));
        }

        let envelope = self
            .invoker
            .invoke_with(CallRequest::new(&self.server, CLICK, args), options.call)
            .await?;

        Ok(ClickResult {
            success: extract::action_succeeded(&envelope, "clicked", &self.policy),
            selector: options.selector,
            // The server raises an error when nothing matches
            element_found: true,
            navigation_occurred: options.wait_for_navigation,
        })
    }

    /// Fill an input field with text.
    pub async fn fill(&self, options: TypeOptions) -> Result<TypeResult, BridgeError> {
        let mut args = Map::new();
        args.insert("selector".into(), json!(options.selector));
        args.insert("value".into(), json!(options.text));

        let envelope = self
            .invoker
            .invoke_with(CallRequest::new(&self.server, FILL, args), options.call)
            .await?;

        Ok(TypeResult {
            success: extract::action_succeeded(&envelope, "filled", &self.policy),
            characters_typed: options.text.chars().count(),
            selector: options.selector,
        })
    }

    /// Capture the page and keep the image local.
    ///
    /// The image is written to `options.path` when one is given. A failed
    /// write is logged and reported as `saved: false`.
    pub async fn screenshot(
        &self,
        options: ScreenshotOptions,
    ) -> Result<ScreenshotResult, BridgeError> {
        let mut args = Map::new();
        args.insert("fullPage".into(), json!(options.full_page));
        args.insert("type".into(), json!(options.format.as_str()));
        if let Some(quality) = options.quality {
            args.insert("quality".into(), Value::from(quality));
        }

        let envelope = self
            .invoker
            .invoke_with(
                CallRequest::new(&self.server, SCREENSHOT, args),
                options.call,
            )
            .await?;

        let payload = extract::image_payload(&envelope);
        let (width, height) = extract::image_dimensions(&envelope, &self.policy);
        let size_kb = payload.map_or(0, |data| artifact::estimate_size_kb(data.len()));

        let saved = match artifact::persist(payload, options.path.as_deref()).await {
            Ok(outcome) => outcome.saved(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to save screenshot");
                false
            }
        };
        if payload.is_none() {
            tracing::debug!("Screenshot result carried no image data");
        }

        Ok(ScreenshotResult {
            saved,
            metadata: ArtifactMetadata {
                path: options.path,
                width,
                height,
                size_kb,
                format: options.format,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakeInvoker;
    use std::time::Duration;
    use tempfile::TempDir;
    use toolbridge_core::{ContentBlock, ImageFormat, ResultEnvelope};

    fn text(text: &str) -> ResultEnvelope {
        ResultEnvelope::from_blocks(vec![ContentBlock::text(text)])
    }

    #[tokio::test]
    async fn test_navigate_extracts_title_and_default_status() {
        let invoker = FakeInvoker::new().respond(NAVIGATE, text("Example Domain"));
        let browser = BrowserTools::new(invoker);

        let result = browser
            .navigate(NavigateOptions::new("https://example.com").wait_until(WaitUntil::NetworkIdle0))
            .await
            .unwrap();

        assert_eq!(result.url, "https://example.com");
        assert_eq!(result.title, "Example Domain");
        assert_eq!(result.status, 200);

        let calls = browser.invoker.calls();
        assert_eq!(calls[0].0.server(), "puppeteer");
        assert_eq!(calls[0].0.arguments()["waitUntil"], "networkidle0");
    }

    #[tokio::test]
    async fn test_timeout_reaches_the_bridge() {
        let invoker = FakeInvoker::new().respond(NAVIGATE, text("t"));
        let browser = BrowserTools::new(invoker);

        browser
            .navigate(NavigateOptions::new("https://example.com").timeout(Duration::from_secs(5)))
            .await
            .unwrap();

        assert_eq!(
            browser.invoker.calls()[0].1.timeout,
            Some(Duration::from_secs(5))
        );
    }

    #[tokio::test]
    async fn test_click_reports_element_clicked() {
        let invoker = FakeInvoker::new().respond(CLICK, text("element clicked"));
        let browser = BrowserTools::new(invoker);

        let result = browser
            .click(ClickOptions::new("#login").wait_for_navigation(true))
            .await
            .unwrap();

        assert!(result.success);
        assert!(result.element_found);
        assert!(result.navigation_occurred);
        let args = browser.invoker.calls()[0].0.arguments().clone();
        assert!(args.get("delay").is_none());
    }

    #[tokio::test]
    async fn test_click_without_text_is_still_success() {
        let invoker = FakeInvoker::new().respond(CLICK, ResultEnvelope::default());
        let browser = BrowserTools::new(invoker);

        let result = browser.click(ClickOptions::new("#login")).await.unwrap();
        assert!(result.success);
    }

    #[tokio::test]
    async fn test_click_strict_policy_without_evidence_fails() {
        let invoker = FakeInvoker::new().respond(CLICK, ResultEnvelope::default());
        let browser = BrowserTools::new(invoker).with_policy(ExtractionPolicy::strict());

        let result = browser.click(ClickOptions::new("#login")).await.unwrap();
        assert!(!result.success);
    }

    #[tokio::test]
    async fn test_fill_counts_characters() {
        let invoker = FakeInvoker::new().respond(FILL, text("Filled #name"));
        let browser = BrowserTools::new(invoker).with_policy(ExtractionPolicy::strict());

        let result = browser
            .fill(TypeOptions::new("#name", "Zoë"))
            .await
            .unwrap();

        assert_eq!(result.characters_typed, 3);
        // Keyword match is case-sensitive
        assert!(!result.success);
        assert_eq!(browser.invoker.calls()[0].0.arguments()["value"], "Zoë");
    }

    #[tokio::test]
    async fn test_bridge_errors_propagate() {
        let invoker = FakeInvoker::new().fail(CLICK, "No element found for selector: #nope");
        let browser = BrowserTools::new(invoker);

        let err = browser.click(ClickOptions::new("#nope")).await.unwrap_err();
        assert_eq!(err.capability, CLICK);
    }

    #[tokio::test]
    async fn test_screenshot_saves_and_returns_metadata_only() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("page.png");
        let data = "aGVsbG8=".repeat(512);
        let invoker = FakeInvoker::new().respond(
            SCREENSHOT,
            ResultEnvelope::from_blocks(vec![
                ContentBlock::text("Screenshot taken"),
                ContentBlock::image("image/png", data.clone()),
            ]),
        );
        let browser = BrowserTools::new(invoker);

        let result = browser
            .screenshot(ScreenshotOptions::new().path(&path).full_page(true))
            .await
            .unwrap();

        assert!(result.saved);
        assert_eq!(result.metadata.path.as_deref(), Some(path.as_path()));
        assert_eq!((result.metadata.width, result.metadata.height), (800, 600));
        assert_eq!(result.metadata.size_kb, artifact::estimate_size_kb(data.len()));
        assert!(path.exists());

        let args = browser.invoker.calls()[0].0.arguments().clone();
        assert_eq!(args["fullPage"], true);
        assert_eq!(args["type"], "png");
    }

    #[tokio::test]
    async fn test_screenshot_without_path_writes_nothing() {
        let invoker = FakeInvoker::new().respond(
            SCREENSHOT,
            ResultEnvelope::from_blocks(vec![ContentBlock::image("image/jpeg", "aGVsbG8=")]),
        );
        let browser = BrowserTools::new(invoker);

        let result = browser
            .screenshot(ScreenshotOptions::new().format(ImageFormat::Jpeg).quality(80))
            .await
            .unwrap();

        assert!(!result.saved);
        assert_eq!(result.metadata.path, None);
        assert_eq!(result.metadata.format, ImageFormat::Jpeg);
        assert_eq!(browser.invoker.calls()[0].0.arguments()["quality"], 80);
    }

    #[tokio::test]
    async fn test_screenshot_write_failure_degrades_to_not_saved() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("page.png");
        let invoker = FakeInvoker::new().respond(
            SCREENSHOT,
            ResultEnvelope::from_blocks(vec![ContentBlock::image("image/png", "aGVsbG8=")]),
        );
        let browser = BrowserTools::new(invoker);

        let result = browser
            .screenshot(ScreenshotOptions::new().path(&path))
            .await
            .unwrap();

        assert!(!result.saved);
        assert!(!path.exists());
    }
}
