//! CLI bootstrap - the composition root.
//!
//! This module is the only place where the bridge is wired together for
//! the CLI adapter. Handlers receive a [`CliContext`] and never touch the
//! registry locator or transport directly.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use toolbridge_core::CallOptions;
use toolbridge_mcp::{Bridge, RegistryLocator, StdioConnector};
use toolbridge_tools::{BrowserTools, DocsSearch, ExtractionPolicy};

use crate::parser::Cli;

/// Fully composed context for CLI commands.
pub struct CliContext {
    bridge: Arc<Bridge>,
    call: CallOptions,
    policy: ExtractionPolicy,
}

impl CliContext {
    /// Context over an already built bridge.
    pub fn new(bridge: Bridge, call: CallOptions, policy: ExtractionPolicy) -> Self {
        Self {
            bridge: Arc::new(bridge),
            call,
            policy,
        }
    }

    pub fn bridge(&self) -> &Bridge {
        &self.bridge
    }

    /// Options applied to every call made by a handler.
    pub const fn call(&self) -> CallOptions {
        self.call
    }

    pub fn browser(&self) -> BrowserTools<Arc<Bridge>> {
        BrowserTools::new(Arc::clone(&self.bridge)).with_policy(self.policy)
    }

    pub fn docs(&self) -> DocsSearch<Arc<Bridge>> {
        DocsSearch::new(Arc::clone(&self.bridge))
    }
}

/// Build the CLI context from global flags.
///
/// `--config` pins the registry to one file; otherwise the usual
/// locations are searched at call time.
pub fn bootstrap(cli: &Cli) -> Result<CliContext> {
    let bridge = match &cli.config {
        Some(path) => Bridge::new(
            RegistryLocator::with_candidates(vec![path.clone()]),
            Arc::new(StdioConnector::new()),
        ),
        None => Bridge::discover().context("Failed to determine registry search paths")?,
    };

    let call = cli
        .timeout_ms
        .map(|ms| CallOptions::with_timeout(Duration::from_millis(ms)))
        .unwrap_or_default();

    let policy = if cli.strict {
        ExtractionPolicy::strict()
    } else {
        ExtractionPolicy::default()
    };

    tracing::debug!(
        candidates = ?bridge.locator().candidates(),
        timeout_ms = ?cli.timeout_ms,
        strict = cli.strict,
        "CLI context ready"
    );

    Ok(CliContext::new(bridge, call, policy))
}
