//! Documentation search over the context7 MCP server.
//!
//! The full documentation text is fetched and split here; only the top
//! snippets are returned.

use crate::extract::{self, CodeSnippet};
use serde::Serialize;
use serde_json::{Map, json};
use std::time::Duration;
use toolbridge_core::{BridgeError, CallOptions, CallRequest, ToolInvoker};

/// Server name documentation searches are sent to unless overridden.
pub const DEFAULT_SERVER: &str = "context7";
/// Library queried when no framework is given.
pub const DEFAULT_LIBRARY: &str = "puppeteer";
pub const DEFAULT_MAX_RESULTS: usize = 5;

const RESOLVE_LIBRARY: &str = "resolve-library-id";
const GET_DOCS: &str = "get-library-docs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    pub query: String,
    pub framework: Option<String>,
    pub max_results: usize,
    pub call: CallOptions,
}

impl SearchOptions {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            framework: None,
            max_results: DEFAULT_MAX_RESULTS,
            call: CallOptions::default(),
        }
    }

    #[must_use]
    pub fn framework(mut self, framework: impl Into<String>) -> Self {
        self.framework = Some(framework.into());
        self
    }

    /// Defaults to 5; 0 also means the default.
    #[must_use]
    pub const fn max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.call = CallOptions::with_timeout(timeout);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub query: String,
    /// Sections found in the whole document, not just the ones returned.
    pub total_results: usize,
    pub snippets: Vec<CodeSnippet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub framework: Option<String>,
}

/// Documentation search wrapper.
pub struct DocsSearch<I> {
    invoker: I,
    server: String,
}

impl<I: ToolInvoker> DocsSearch<I> {
    pub fn new(invoker: I) -> Self {
        Self {
            invoker,
            server: DEFAULT_SERVER.to_string(),
        }
    }

    #[must_use]
    pub fn with_server(mut self, server: impl Into<String>) -> Self {
        self.server = server.into();
        self
    }

    /// Search the docs and return the leading sections.
    ///
    /// With a framework, its library id is resolved first. If resolution
    /// fails the framework name is used as the id. Only the docs fetch can
    /// fail the search.
    pub async fn search(&self, options: SearchOptions) -> Result<SearchResult, BridgeError> {
        let library_id = match &options.framework {
            Some(framework) => self.resolve_library(framework, options.call).await,
            None => DEFAULT_LIBRARY.to_string(),
        };

        let mut args = Map::new();
        args.insert("libraryId".into(), json!(library_id));
        args.insert("query".into(), json!(options.query));

        let envelope = self
            .invoker
            .invoke_with(CallRequest::new(&self.server, GET_DOCS, args), options.call)
            .await?;

        let text = extract::doc_text(&envelope);
        let max_results = match options.max_results {
            0 => DEFAULT_MAX_RESULTS,
            n => n,
        };
        let sections = extract::doc_sections(text, max_results, &library_id);

        tracing::debug!(
            library_id = %library_id,
            doc_chars = text.chars().count(),
            total = sections.total,
            returned = sections.snippets.len(),
            "Documentation filtered"
        );

        Ok(SearchResult {
            query: options.query,
            total_results: sections.total,
            snippets: sections.snippets,
            framework: options.framework,
        })
    }

    async fn resolve_library(&self, framework: &str, call: CallOptions) -> String {
        let mut args = Map::new();
        args.insert("name".into(), json!(framework));

        match self
            .invoker
            .invoke_with(CallRequest::new(&self.server, RESOLVE_LIBRARY, args), call)
            .await
        {
            Ok(envelope) => {
                let resolved = envelope
                    .first_text()
                    .filter(|id| !id.trim().is_empty())
                    .map_or_else(|| framework.to_string(), |id| id.trim().to_string());
                tracing::debug!(framework = %framework, library_id = %resolved, "Resolved library");
                resolved
            }
            Err(e) => {
                tracing::warn!(
                    framework = %framework,
                    error = %e.kind,
                    "Could not resolve library, using framework name directly"
                );
                framework.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakeInvoker;
    use toolbridge_core::{ContentBlock, ResultEnvelope};

    const DOCS: &str = "# Puppeteer\n\nInstall with npm.\n\npage.screenshot() captures the page.\n\npage.click() clicks.\n\npage.type() types.\n\npage.goto() navigates.\n\nbrowser.close() closes.";

    fn text(text: &str) -> ResultEnvelope {
        ResultEnvelope::from_blocks(vec![ContentBlock::text(text)])
    }

    #[tokio::test]
    async fn test_resolves_framework_then_fetches_docs() {
        let invoker = FakeInvoker::new()
            .respond(RESOLVE_LIBRARY, text("/puppeteer/puppeteer"))
            .respond(GET_DOCS, text(DOCS));
        let docs = DocsSearch::new(invoker);

        let result = docs
            .search(SearchOptions::new("screenshot API").framework("puppeteer").max_results(3))
            .await
            .unwrap();

        assert_eq!(result.total_results, 7);
        assert_eq!(result.snippets.len(), 3);
        assert_eq!(result.snippets[0].source, "/puppeteer/puppeteer");
        assert_eq!(result.framework.as_deref(), Some("puppeteer"));

        let calls = docs.invoker.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].0.arguments()["name"], "puppeteer");
        assert_eq!(calls[1].0.arguments()["libraryId"], "/puppeteer/puppeteer");
        assert_eq!(calls[1].0.arguments()["query"], "screenshot API");
    }

    #[tokio::test]
    async fn test_resolution_failure_falls_back_to_framework_name() {
        let invoker = FakeInvoker::new()
            .fail(RESOLVE_LIBRARY, "resolver offline")
            .respond(GET_DOCS, text(DOCS));
        let docs = DocsSearch::new(invoker);

        let result = docs
            .search(SearchOptions::new("click").framework("react"))
            .await
            .unwrap();

        assert_eq!(result.snippets.len(), DEFAULT_MAX_RESULTS);
        assert_eq!(docs.invoker.calls()[1].0.arguments()["libraryId"], "react");
    }

    #[tokio::test]
    async fn test_no_framework_uses_default_library() {
        let invoker = FakeInvoker::new().respond(GET_DOCS, text("only section"));
        let docs = DocsSearch::new(invoker);

        let result = docs.search(SearchOptions::new("anything")).await.unwrap();

        let calls = docs.invoker.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0.arguments()["libraryId"], DEFAULT_LIBRARY);
        assert_eq!(result.total_results, 1);
        assert_eq!(result.framework, None);
    }

    #[tokio::test]
    async fn test_zero_max_results_uses_default() {
        let invoker = FakeInvoker::new().respond(GET_DOCS, text(DOCS));
        let docs = DocsSearch::new(invoker);

        let result = docs
            .search(SearchOptions::new("page").max_results(0))
            .await
            .unwrap();

        assert_eq!(result.total_results, 7);
        assert_eq!(result.snippets.len(), DEFAULT_MAX_RESULTS);
    }

    #[tokio::test]
    async fn test_docs_fetch_failure_fails_the_search() {
        let invoker = FakeInvoker::new().fail(GET_DOCS, "rate limited");
        let docs = DocsSearch::new(invoker);

        let err = docs.search(SearchOptions::new("x")).await.unwrap_err();
        assert_eq!(err.capability, GET_DOCS);
        assert_eq!(err.server, DEFAULT_SERVER);
    }
}
