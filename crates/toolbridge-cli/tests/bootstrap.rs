//! Integration tests for CLI composition.
//!
//! # What is tested
//!
//! - `--config` pins the registry the bridge reads, including files that
//!   also list non-stdio servers
//! - The servers handler succeeds on a valid registry and fails with a
//!   configuration exit code on a missing one
//! - Invalid `--args` map to the usage exit code

use clap::Parser;
use tempfile::TempDir;
use toolbridge_cli::{Cli, bootstrap, exit_code, handlers};

const REGISTRY: &str = r#"{
  "mcpServers": {
    "puppeteer": { "command": "npx", "args": ["-y", "@modelcontextprotocol/server-puppeteer"] },
    "context7": { "command": "npx", "args": ["-y", "@upstash/context7-mcp"] },
    "remote": { "type": "http", "url": "https://example.com/mcp" }
  }
}"#;

fn cli_with_config(dir: &TempDir, file: &str, command: &[&str]) -> Cli {
    let path = dir.path().join(file);
    let mut argv = vec!["toolbridge".to_string()];
    argv.extend(command.iter().map(ToString::to_string));
    argv.push("--config".to_string());
    argv.push(path.display().to_string());
    Cli::parse_from(argv)
}

// ── Servers ─────────────────────────────────────────────────────────

#[test]
fn servers_lists_registry_from_config_flag() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("mcp.json"), REGISTRY).unwrap();

    let cli = cli_with_config(&dir, "mcp.json", &["servers"]);
    let ctx = bootstrap(&cli).unwrap();

    let registry = ctx.bridge().registry().unwrap();
    assert_eq!(registry.names(), vec!["context7", "puppeteer", "remote"]);
    handlers::servers::execute(&ctx).unwrap();
}

#[test]
fn servers_without_registry_is_a_config_error() {
    let dir = TempDir::new().unwrap();

    let cli = cli_with_config(&dir, "absent.json", &["servers"]);
    let ctx = bootstrap(&cli).unwrap();

    let err = handlers::servers::execute(&ctx).unwrap_err();
    assert_eq!(exit_code(&err), 78);
    assert!(err.to_string().contains("MCP configuration not found"));
    assert!(!err.to_string().contains("Server: *"));
}

// ── Invoke ──────────────────────────────────────────────────────────

#[tokio::test]
async fn invoke_rejects_non_object_args_before_calling() {
    let dir = TempDir::new().unwrap();

    let cli = cli_with_config(&dir, "absent.json", &["invoke", "demo", "ping"]);
    let ctx = bootstrap(&cli).unwrap();

    let err = handlers::invoke::execute(&ctx, "demo", "ping", "[1]")
        .await
        .unwrap_err();
    assert_eq!(exit_code(&err), 2);
}
