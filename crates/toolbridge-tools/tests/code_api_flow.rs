//! End-to-end wrapper tests through the real bridge.
//!
//! The registry is a temp file and the transport is an in-process stub
//! server, so the whole path (resolve, connect, call, close, extract,
//! persist) runs without spawning anything.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Map, Value, json};
use tempfile::TempDir;
use toolbridge_core::{
    BridgeErrorKind, Connection, Connector, LaunchSpec, ResultEnvelope, ToolDescriptor,
};
use toolbridge_mcp::{Bridge, RegistryLocator};
use toolbridge_tools::browser::{ClickOptions, NavigateOptions, ScreenshotOptions};
use toolbridge_tools::{BrowserTools, DocsSearch, SearchOptions};

// ── Stub servers ───────────────────────────────────────────────────

/// Answers with raw `tools/call` results, the way real servers shape them.
#[derive(Default)]
struct StubServers {
    log: Arc<Mutex<Vec<String>>>,
}

struct StubConnection {
    server: String,
    log: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl Connector for StubServers {
    async fn connect(
        &self,
        server: &str,
        _spec: &LaunchSpec,
    ) -> Result<Box<dyn Connection>, BridgeErrorKind> {
        self.log.lock().unwrap().push(format!("connect {server}"));
        Ok(Box::new(StubConnection {
            server: server.to_string(),
            log: Arc::clone(&self.log),
        }))
    }
}

#[async_trait]
impl Connection for StubConnection {
    async fn list_tools(&mut self) -> Result<Vec<ToolDescriptor>, BridgeErrorKind> {
        Ok(Vec::new())
    }

    async fn call_tool(
        &mut self,
        capability: &str,
        arguments: &Map<String, Value>,
    ) -> Result<ResultEnvelope, BridgeErrorKind> {
        self.log
            .lock()
            .unwrap()
            .push(format!("call {}.{capability}", self.server));

        let result = match capability {
            "puppeteer_navigate" => json!({
                "content": [{ "type": "text", "text": "Example Domain" }]
            }),
            "puppeteer_click" => json!({
                "content": [{ "type": "text", "text": format!("{} clicked", arguments["selector"]) }]
            }),
            "puppeteer_screenshot" => json!({
                "content": [
                    { "type": "text", "text": "Screenshot taken" },
                    { "type": "image", "mimeType": "image/png", "data": "iVBORw0KGgo=" }
                ],
                "width": 1280,
                "height": 720
            }),
            "get-library-docs" => json!({
                "content": [{ "type": "text", "text": "A\n\nB\n\nC" }]
            }),
            other => {
                return Err(BridgeErrorKind::tool(format!("Unknown tool: {other}")));
            }
        };
        Ok(ResultEnvelope::from_value(result))
    }

    async fn close(&mut self) -> Result<(), BridgeErrorKind> {
        self.log
            .lock()
            .unwrap()
            .push(format!("close {}", self.server));
        Ok(())
    }
}

// ── Helpers ────────────────────────────────────────────────────────

fn bridge(dir: &TempDir, servers: Arc<StubServers>) -> Arc<Bridge> {
    let claude = dir.path().join(".claude");
    std::fs::create_dir_all(&claude).unwrap();
    let path: PathBuf = claude.join("mcp.json");
    std::fs::write(
        &path,
        json!({
            "mcpServers": {
                "puppeteer": { "command": "npx", "args": ["-y", "@modelcontextprotocol/server-puppeteer"] },
                "context7": { "command": "npx", "args": ["-y", "@upstash/context7-mcp"] }
            }
        })
        .to_string(),
    )
    .unwrap();

    Arc::new(Bridge::new(
        RegistryLocator::with_candidates(vec![path]),
        servers,
    ))
}

// ── Tests ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_browser_session_returns_metadata_only() {
    let dir = TempDir::new().unwrap();
    let servers = Arc::new(StubServers::default());
    let browser = BrowserTools::new(bridge(&dir, Arc::clone(&servers)));

    let page = browser
        .navigate(NavigateOptions::new("https://example.com"))
        .await
        .unwrap();
    assert_eq!(page.title, "Example Domain");
    assert_eq!(page.status, 200);

    let shot_path = dir.path().join("page.png");
    let shot = browser
        .screenshot(ScreenshotOptions::new().path(&shot_path))
        .await
        .unwrap();
    assert!(shot.saved);
    assert_eq!((shot.metadata.width, shot.metadata.height), (1280, 720));
    assert_eq!(std::fs::read(&shot_path).unwrap()[..4], [0x89, b'P', b'N', b'G']);

    let summary = serde_json::to_value(&shot).unwrap();
    assert!(summary.get("data").is_none());
    assert_eq!(summary["saved"], true);
    assert_eq!(summary["width"], 1280);

    let click = browser.click(ClickOptions::new("a")).await.unwrap();
    assert!(click.success);

    // One connection per action, each closed before the next opens
    let log = servers.log.lock().unwrap().clone();
    assert_eq!(
        log,
        vec![
            "connect puppeteer",
            "call puppeteer.puppeteer_navigate",
            "close puppeteer",
            "connect puppeteer",
            "call puppeteer.puppeteer_screenshot",
            "close puppeteer",
            "connect puppeteer",
            "call puppeteer.puppeteer_click",
            "close puppeteer",
        ]
    );
}

#[tokio::test]
async fn test_docs_search_survives_failed_resolution() {
    let dir = TempDir::new().unwrap();
    let servers = Arc::new(StubServers::default());
    let docs = DocsSearch::new(bridge(&dir, Arc::clone(&servers)));

    // The stub does not know resolve-library-id
    let result = docs
        .search(SearchOptions::new("screenshots").framework("puppeteer"))
        .await
        .unwrap();

    assert_eq!(result.total_results, 3);
    assert_eq!(result.snippets[0].source, "puppeteer");
}
